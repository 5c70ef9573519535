//! Fortune Generation
//!
//! Orchestration on top of the AI layer:
//!
//! - `pipeline`: prompt -> provider -> parser -> shaper for one request
//! - `view`: per-category grouping of parsed entries
//! - `cache`: TTL + LRU cache of parsed entries keyed by request fingerprint
//! - `service`: provider dispatch and cache lookup

pub mod cache;
pub mod pipeline;
pub mod service;
pub mod view;

pub use cache::{CacheStats, ResultCache};
pub use pipeline::{FortunePipeline, PipelineStage};
pub use service::FortuneService;
pub use view::{FortuneView, flatten_views, group_views};

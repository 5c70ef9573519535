//! luckylog - AI-Driven Fortune Generation
//!
//! Turns a user's birth data and requested fortune categories into a prompt,
//! sends it to a generative model (Gemini), parses the JSON answer into
//! structured entries and groups them per category for presentation.
//!
//! ## Core Features
//!
//! - **Prompt Builder**: template with `[ANALYSIS_YEAR]` / `[FORTUNE_TYPES]` placeholders
//! - **Provider Client**: single-shot REST call, failures folded into a closed taxonomy
//! - **Response Parser**: fence stripping, strict JSON decoding, " | " expansion
//! - **Result Cache**: one-day TTL, LRU-bounded, keyed by request fingerprint
//!
//! ## Quick Start
//!
//! ```ignore
//! use luckylog::{ConfigLoader, FortuneService};
//! use luckylog::types::*;
//!
//! let config = ConfigLoader::load()?;
//! let service = FortuneService::from_config(&config)?;
//!
//! let birth = BirthInfo::new(GenderType::Female, CalendarType::Solar, 1995, 2, 16)?
//!     .with_time(Some(TimeType::Time1130))
//!     .with_city(Some(CityType::Seoul));
//! let option = FortuneOption::new(
//!     AiType::Gemini,
//!     [FortuneType::Love, FortuneType::Health],
//!     PeriodType::Monthly,
//! )?;
//!
//! let views = service
//!     .generate_views(&FortuneRequest::new(birth, option, 2025))
//!     .await?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: prompt rendering, provider abstraction, response parsing
//! - [`fortune`]: pipeline orchestration, grouping, caching, provider dispatch
//! - [`config`]: layered configuration
//! - [`types`]: request model, enums, error taxonomy

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod fortune;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{FortuneError, FortuneErrorKind, LuckyError, Result};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use fortune::{FortunePipeline, FortuneService, FortuneView, PipelineStage, ResultCache};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{
    FortuneClient, GeminiProvider, LlmProvider, ProviderConfig, SamplingConfig, SharedProvider,
};

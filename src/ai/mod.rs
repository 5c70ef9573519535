//! AI Integration Layer
//!
//! Prompt rendering, provider invocation and response parsing.

pub mod client;
pub mod parse;
pub mod prompt;
pub mod provider;

pub use client::{FortuneClient, format_elapsed};
pub use parse::{RESULT_DELIMITER, normalize_result, parse_entries, strip_code_fences};
pub use prompt::{DEFAULT_TEMPLATE, build_prompt, missing_placeholders};
pub use provider::{
    GeminiProvider, LlmProvider, ProviderConfig, SamplingConfig, SharedProvider, create_provider,
};

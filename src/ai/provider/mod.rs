//! LLM Provider Abstraction
//!
//! Narrow boundary around the vendor API: one prompt in, raw text out.
//! Providers report raw `ProviderFailure`s; classification into the fortune
//! taxonomy happens in `FortuneClient`.
//!
//! ## Modules
//!
//! - `gemini`: Gemini `generateContent` REST provider

mod gemini;

#[cfg(test)]
pub(crate) mod mock;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::types::{AiType, LuckyError, ProviderFailure, Result};

// =============================================================================
// Sampling Configuration
// =============================================================================

/// Fixed sampling parameters shared by every request in the process
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Creativity (0.0 = deterministic)
    pub temperature: f32,
    /// Nucleus sampling cutoff (diversity)
    pub top_p: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_p: 0.9,
        }
    }
}

/// Shared LLM provider type for concurrent access across requests.
pub type SharedProvider = Arc<dyn LlmProvider + Send + Sync>;

// =============================================================================
// Provider Configuration
// =============================================================================

/// Configuration for LLM providers
///
/// The API key is never serialized and is redacted in debug output.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider family
    pub provider: AiType,
    /// Model name (provider-specific)
    pub model: Option<String>,
    /// Request timeout in seconds; `None` leaves the HTTP client without one
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// API base URL (for custom endpoints)
    #[serde(default)]
    pub api_base: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: AiType::Gemini,
            model: None,
            timeout_secs: None,
            api_key: None,
            api_base: None,
        }
    }
}

// =============================================================================
// LLM Provider Trait
// =============================================================================

/// Generative model invocation
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one prompt with the given sampling parameters
    ///
    /// Returns `Ok(None)` when the provider answered without any text.
    async fn generate(
        &self,
        prompt: &str,
        sampling: &SamplingConfig,
    ) -> std::result::Result<Option<String>, ProviderFailure>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;
}

/// Create a shared provider from configuration
pub fn create_provider(config: &ProviderConfig) -> Result<SharedProvider> {
    match config.provider {
        AiType::Gemini => Ok(Arc::new(GeminiProvider::new(config.clone())?)),
        other => Err(LuckyError::UnsupportedProvider(other)),
    }
}

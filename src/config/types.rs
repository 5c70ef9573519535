//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/luckylog/) and project (./luckylog.toml) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::ai::prompt::{DEFAULT_TEMPLATE, missing_placeholders};
use crate::ai::provider::{ProviderConfig, SamplingConfig};
use crate::constants::{cache, gemini, sampling};
use crate::types::{AiType, LuckyError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Gemini provider settings
    pub gemini: GeminiConfig,

    /// Sampling parameters shared by every request
    pub sampling: SamplingConfig,

    /// Prompt template settings
    pub prompt: PromptConfig,

    /// Result cache settings
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            gemini: GeminiConfig::default(),
            sampling: SamplingConfig::default(),
            prompt: PromptConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `LuckyError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=sampling::MAX_TEMPERATURE).contains(&self.sampling.temperature) {
            return Err(LuckyError::Config(format!(
                "Sampling temperature must be between 0.0 and {}, got {}",
                sampling::MAX_TEMPERATURE,
                self.sampling.temperature
            )));
        }

        if !(self.sampling.top_p > 0.0 && self.sampling.top_p <= 1.0) {
            return Err(LuckyError::Config(format!(
                "Sampling top_p must be in (0.0, 1.0], got {}",
                self.sampling.top_p
            )));
        }

        if self.gemini.timeout_secs == Some(0) {
            return Err(LuckyError::Config(
                "Gemini timeout_secs must be greater than 0 when set".to_string(),
            ));
        }

        if self.gemini.model.trim().is_empty() {
            return Err(LuckyError::Config("Gemini model must not be empty".to_string()));
        }

        if self.cache.max_entries == 0 {
            return Err(LuckyError::Config(
                "Cache max_entries must be greater than 0".to_string(),
            ));
        }

        if self.cache.ttl_secs == 0 {
            return Err(LuckyError::Config(
                "Cache ttl_secs must be greater than 0".to_string(),
            ));
        }

        if let Some(template) = &self.prompt.template {
            check_template(template, "prompt.template")?;
        }

        Ok(())
    }

    /// Provider settings for `create_provider`
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: AiType::Gemini,
            model: Some(self.gemini.model.clone()),
            timeout_secs: self.gemini.timeout_secs,
            api_key: self.gemini.api_key.clone(),
            api_base: Some(self.gemini.api_base.clone()),
        }
    }

    /// Resolve the prompt template: file, then inline, then built-in
    pub fn load_template(&self) -> Result<String> {
        if let Some(path) = &self.prompt.template_file {
            let template = std::fs::read_to_string(path).map_err(|e| {
                LuckyError::Config(format!(
                    "Failed to read prompt template {}: {}",
                    path.display(),
                    e
                ))
            })?;
            check_template(&template, &path.display().to_string())?;
            return Ok(template);
        }

        Ok(self
            .prompt
            .template
            .clone()
            .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()))
    }
}

fn check_template(template: &str, source: &str) -> Result<()> {
    let missing = missing_placeholders(template);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LuckyError::Config(format!(
            "Prompt template {} is missing placeholders: {}",
            source,
            missing.join(", ")
        )))
    }
}

// =============================================================================
// Gemini Configuration
// =============================================================================

/// The API key is never serialized and is redacted in debug output.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Model name, e.g. "gemini-2.5-flash"
    pub model: String,

    /// REST API base URL
    pub api_base: String,

    /// Request timeout in seconds (unset = no timeout)
    pub timeout_secs: Option<u64>,

    /// Falls back to the GEMINI_API_KEY environment variable when unset
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: gemini::DEFAULT_MODEL.to_string(),
            api_base: gemini::DEFAULT_API_BASE.to_string(),
            timeout_secs: None,
            api_key: None,
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// =============================================================================
// Prompt Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Inline template; must contain [ANALYSIS_YEAR] and [FORTUNE_TYPES]
    pub template: Option<String>,

    /// Template file, takes precedence over `template`
    pub template_file: Option<PathBuf>,
}

// =============================================================================
// Cache Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,

    /// Seconds an entry lives after being written
    pub ttl_secs: u64,

    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: cache::DEFAULT_TTL_SECS,
            max_entries: cache::DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

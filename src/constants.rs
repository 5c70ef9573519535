//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Gemini provider constants
pub mod gemini {
    /// REST API base URL
    pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Model used when none is configured
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

    /// Environment variable consulted when the config carries no key
    pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
}

/// Sampling constants
pub mod sampling {
    /// Upper bound accepted for temperature
    pub const MAX_TEMPERATURE: f32 = 2.0;
}

/// Result cache constants
pub mod cache {
    /// Entries expire this long after they were written (one day)
    pub const DEFAULT_TTL_SECS: u64 = 86_400;

    /// Maximum number of cached results
    pub const DEFAULT_MAX_ENTRIES: usize = 300;
}

/// Config file locations
pub mod config {
    /// Directory name under the user config dir
    pub const APP_DIR: &str = "luckylog";

    /// Global config file name
    pub const GLOBAL_FILE: &str = "config.toml";

    /// Project config file name (current directory)
    pub const PROJECT_FILE: &str = "luckylog.toml";

    /// Environment variable prefix; nested keys are separated by `__`
    pub const ENV_PREFIX: &str = "LUCKYLOG_";
}

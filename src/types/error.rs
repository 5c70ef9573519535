//! Unified Error Type System
//!
//! Centralized error types for the entire crate.
//!
//! ## Fortune Error Taxonomy
//!
//! Failures of the generation pipeline are folded into a closed set of kinds:
//!
//! - **EmptyResponse**: provider answered with null or blank text
//! - **ProviderOverload**: provider signalled a server-side (5xx) failure
//! - **ProviderUnknownError**: any other invocation failure
//! - **ParseError**: provider text did not match the expected JSON shape
//!
//! Each failure is classified exactly once, at the provider boundary or at the
//! parse boundary, and propagated to the caller with its cause retained.
//! There is no retry and no placeholder content.

use std::fmt;
use thiserror::Error;

use super::fortune::AiType;

// =============================================================================
// Provider Failure
// =============================================================================

/// Raw failure reported by an `LlmProvider` before classification
#[derive(Debug, Error)]
pub enum ProviderFailure {
    /// Provider answered with a 5xx status
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Provider rejected the request with a non-5xx status
    #[error("client error ({status}): {message}")]
    Client { status: u16, message: String },

    /// Request never completed or the body could not be read
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

// =============================================================================
// Fortune Error
// =============================================================================

/// Classified failure kinds surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FortuneErrorKind {
    EmptyResponse,
    ProviderOverload,
    ProviderUnknownError,
    ParseError,
}

impl fmt::Display for FortuneErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyResponse => write!(f, "EMPTY_RESPONSE"),
            Self::ProviderOverload => write!(f, "PROVIDER_OVERLOAD"),
            Self::ProviderUnknownError => write!(f, "PROVIDER_UNKNOWN_ERROR"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
        }
    }
}

impl FortuneErrorKind {
    /// HTTP status the calling web layer should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ProviderOverload => 503,
            Self::EmptyResponse | Self::ProviderUnknownError | Self::ParseError => 500,
        }
    }

    /// Message shown to end users
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyResponse => "❓ AI 응답이 비어있습니다. 잠시 후 다시 시도해주세요.",
            Self::ProviderOverload => "😵 AI API 과부하 상태입니다. 잠시 후 다시 시도해주세요.",
            Self::ProviderUnknownError => "😮 AI API 호출 중 예기치 못한 오류가 발생했습니다.",
            Self::ParseError => "🔮 AI 응답 파싱 중 오류가 발생했습니다.",
        }
    }

    /// Whether the user should simply try again later
    pub fn is_retry_later(&self) -> bool {
        matches!(self, Self::EmptyResponse | Self::ProviderOverload)
    }
}

/// Classified pipeline failure with its original cause
#[derive(Debug, Error)]
pub enum FortuneError {
    #[error("{model} returned an empty response")]
    EmptyResponse { model: String },

    #[error("{model} is overloaded, try again later")]
    ProviderOverload {
        model: String,
        #[source]
        source: ProviderFailure,
    },

    #[error("unexpected error while calling {model}")]
    ProviderUnknown {
        model: String,
        #[source]
        source: ProviderFailure,
    },

    #[error("failed to parse fortune response: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

impl FortuneError {
    pub fn kind(&self) -> FortuneErrorKind {
        match self {
            Self::EmptyResponse { .. } => FortuneErrorKind::EmptyResponse,
            Self::ProviderOverload { .. } => FortuneErrorKind::ProviderOverload,
            Self::ProviderUnknown { .. } => FortuneErrorKind::ProviderUnknownError,
            Self::Parse { .. } => FortuneErrorKind::ParseError,
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }

    pub fn http_status(&self) -> u16 {
        self.kind().http_status()
    }

    pub fn is_retry_later(&self) -> bool {
        self.kind().is_retry_later()
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps raw provider failures onto the fortune taxonomy
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Server-side failures are overload; everything else is unknown
    pub fn classify_failure(failure: ProviderFailure, model: &str) -> FortuneError {
        match failure {
            ProviderFailure::Server { .. } => FortuneError::ProviderOverload {
                model: model.to_string(),
                source: failure,
            },
            _ => FortuneError::ProviderUnknown {
                model: model.to_string(),
                source: failure,
            },
        }
    }

    /// Classify an HTTP status returned by a provider endpoint
    pub fn failure_from_status(status: u16, message: impl Into<String>) -> ProviderFailure {
        let message = message.into();
        if (500..600).contains(&status) {
            ProviderFailure::Server { status, message }
        } else {
            ProviderFailure::Client { status, message }
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Structured validation error with context
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// What validation failed
    pub kind: ValidationErrorKind,
    /// Field that failed validation
    pub field: Option<String>,
    /// Detailed message
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "Validation failed for '{}': {}", field, self.message)
        } else {
            write!(f, "Validation failed: {}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
        }
    }

    /// Add field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Validation error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Required field missing or empty
    MissingField,
    /// Year/month/day do not form a calendar date
    InvalidBirthDate,
    /// Invalid format
    Format,
    /// Value out of range
    Range,
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum LuckyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Fortune(#[from] FortuneError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported AI type: {0}")]
    UnsupportedProvider(AiType),

    #[error("Config error: {0}")]
    Config(String),
}

impl LuckyError {
    /// Fortune taxonomy kind, if this is a pipeline failure
    pub fn fortune_kind(&self) -> Option<FortuneErrorKind> {
        match self {
            Self::Fortune(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// HTTP status the calling web layer should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Fortune(e) => e.http_status(),
            Self::Validation(_) | Self::UnsupportedProvider(_) => 400,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, LuckyError>;

// =============================================================================
// Tests
// =============================================================================

//! Fortune Client
//!
//! Sends a rendered prompt through the configured provider exactly once and
//! classifies whatever comes back. No retry, no fallback content.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

use super::provider::{SamplingConfig, SharedProvider};
use crate::types::{ErrorClassifier, FortuneError, FortuneRequest};

/// Provider invocation with logging and failure classification
#[derive(Clone)]
pub struct FortuneClient {
    provider: SharedProvider,
    sampling: Arc<SamplingConfig>,
}

impl FortuneClient {
    pub fn new(provider: SharedProvider, sampling: Arc<SamplingConfig>) -> Self {
        Self { provider, sampling }
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    /// Send one prompt and return the raw response text
    ///
    /// `request` is used for log context only.
    pub async fn invoke(
        &self,
        prompt: &str,
        request: &FortuneRequest,
    ) -> Result<String, FortuneError> {
        let model = self.provider.model();
        let categories = request.option.fortunes_keys();
        let birth = request.birth.flattened();

        info!(
            provider = self.provider.name(),
            model,
            categories = %categories,
            "Requesting fortune ({})",
            birth
        );

        let start = Instant::now();
        let outcome = self.provider.generate(prompt, &self.sampling).await;
        let elapsed = start.elapsed();

        match outcome {
            Ok(Some(text)) if !text.trim().is_empty() => {
                info!(
                    model,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Fortune response received in {}",
                    format_elapsed(elapsed)
                );
                Ok(text)
            }
            Ok(_) => {
                let err = FortuneError::EmptyResponse {
                    model: model.to_string(),
                };
                log_failure(&err, request, elapsed);
                Err(err)
            }
            Err(failure) => {
                let err = ErrorClassifier::classify_failure(failure, model);
                log_failure(&err, request, elapsed);
                Err(err)
            }
        }
    }
}

/// Failure log shared by every terminal stage
pub(crate) fn log_failure(err: &FortuneError, request: &FortuneRequest, elapsed: Duration) {
    error!(
        kind = %err.kind(),
        categories = %request.option.fortunes_keys(),
        elapsed = %format_elapsed(elapsed),
        "{}{} ({})",
        err,
        error_cause(err),
        request.birth.flattened()
    );
}

/// Whole minutes and remaining seconds, e.g. "1m 5s"
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}m {}s", secs / 60, secs % 60)
}

fn error_cause(err: &FortuneError) -> String {
    std::error::Error::source(err)
        .map(|s| format!(": {}", s))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::mock::MockProvider;
    use crate::types::{
        AiType, BirthInfo, CalendarType, FortuneErrorKind, FortuneOption, FortuneType, GenderType,
        PeriodType, ProviderFailure,
    };

    fn request() -> FortuneRequest {
        let birth = BirthInfo::new(GenderType::Female, CalendarType::Solar, 1995, 2, 16).unwrap();
        let option =
            FortuneOption::new(AiType::Gemini, [FortuneType::Love], PeriodType::Monthly).unwrap();
        FortuneRequest::new(birth, option, 2025)
    }

    fn client(provider: MockProvider) -> (FortuneClient, Arc<MockProvider>) {
        let provider = Arc::new(provider);
        let client = FortuneClient::new(provider.clone(), Arc::new(SamplingConfig::default()));
        (client, provider)
    }

    #[tokio::test]
    async fn test_invoke_returns_text_verbatim() {
        let (client, provider) = client(MockProvider::text("```json\n[]\n```"));
        let text = client.invoke("prompt", &request()).await.unwrap();

        assert_eq!(text, "```json\n[]\n```");
        assert_eq!(provider.prompts(), vec!["prompt".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_text_is_empty_response() {
        let (client, _) = client(MockProvider::new([Ok(None)]));
        let err = client.invoke("prompt", &request()).await.unwrap_err();
        assert_eq!(err.kind(), FortuneErrorKind::EmptyResponse);
    }

    #[tokio::test]
    async fn test_blank_text_is_empty_response() {
        let (client, _) = client(MockProvider::text("  \n\t "));
        let err = client.invoke("prompt", &request()).await.unwrap_err();
        assert_eq!(err.kind(), FortuneErrorKind::EmptyResponse);
    }

    #[tokio::test]
    async fn test_server_failure_is_overload_and_not_retried() {
        let (client, provider) = client(MockProvider::failing(ProviderFailure::Server {
            status: 503,
            message: "overloaded".to_string(),
        }));
        let err = client.invoke("prompt", &request()).await.unwrap_err();

        assert_eq!(err.kind(), FortuneErrorKind::ProviderOverload);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_other_failure_is_unknown() {
        let (client, _) = client(MockProvider::failing(ProviderFailure::Other(
            "connection reset".to_string(),
        )));
        let err = client.invoke("prompt", &request()).await.unwrap_err();

        assert_eq!(err.kind(), FortuneErrorKind::ProviderUnknownError);
        assert_eq!(error_cause(&err), ": connection reset");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(900)), "0m 0s");
        assert_eq!(format_elapsed(Duration::from_secs(65)), "1m 5s");
        assert_eq!(format_elapsed(Duration::from_secs(3600)), "60m 0s");
    }
}

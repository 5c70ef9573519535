//! Fortune Service
//!
//! Entry point for callers: picks the pipeline for the requested AI type and
//! serves repeated requests from the result cache.

use std::sync::Arc;
use tracing::{debug, info};

use super::cache::{CacheStats, ResultCache};
use super::pipeline::FortunePipeline;
use super::view::{FortuneView, group_views};
use crate::ai::{FortuneClient, create_provider};
use crate::config::Config;
use crate::types::{AiType, FortuneEntry, FortuneRequest, LuckyError, Result};

/// Dispatches requests to the enabled provider pipeline
#[derive(Clone)]
pub struct FortuneService {
    gemini: FortunePipeline,
    cache: Option<Arc<ResultCache>>,
}

impl FortuneService {
    pub fn new(gemini: FortunePipeline, cache: Option<Arc<ResultCache>>) -> Self {
        Self { gemini, cache }
    }

    /// Wire provider, sampling, template and cache from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = create_provider(&config.provider_config())?;
        let client = FortuneClient::new(provider, Arc::new(config.sampling));
        let pipeline = FortunePipeline::new(client, config.load_template()?);

        let cache = config.cache.enabled.then(|| {
            Arc::new(ResultCache::new(
                config.cache.max_entries,
                config.cache.ttl(),
            ))
        });

        Ok(Self::new(pipeline, cache))
    }

    fn pipeline_for(&self, ai: AiType) -> Result<&FortunePipeline> {
        match ai {
            AiType::Gemini => Ok(&self.gemini),
            other => Err(LuckyError::UnsupportedProvider(other)),
        }
    }

    /// Prompt that would be sent for a request
    pub fn render_prompt(&self, request: &FortuneRequest) -> Result<String> {
        Ok(self.pipeline_for(request.option.ai())?.render_prompt(request))
    }

    /// Generate entries, consulting the cache first
    pub async fn generate_fortune(&self, request: &FortuneRequest) -> Result<Vec<FortuneEntry>> {
        let pipeline = self.pipeline_for(request.option.ai())?;
        let fingerprint = request.fingerprint();

        if let Some(cache) = &self.cache
            && let Some(entries) = cache.get(&fingerprint)
        {
            debug!("Serving cached fortune: {}", request.cache_key());
            return Ok(entries);
        }

        let entries = pipeline.generate_entries(request).await?;

        if let Some(cache) = &self.cache {
            cache.insert(fingerprint, entries.clone());
        }

        info!(
            "Fortune generated: {} ({} entries)",
            request.default_title(),
            entries.len()
        );
        Ok(entries)
    }

    /// Generate entries grouped per category
    pub async fn generate_views(&self, request: &FortuneRequest) -> Result<Vec<FortuneView>> {
        let entries = self.generate_fortune(request).await?;
        Ok(group_views(&entries))
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::SamplingConfig;
    use crate::ai::prompt::DEFAULT_TEMPLATE;
    use crate::ai::provider::mock::MockProvider;
    use crate::types::{
        BirthInfo, CalendarType, FortuneErrorKind, FortuneOption, FortuneType, GenderType,
        PeriodType, PeriodValue, ProviderFailure,
    };
    use std::time::Duration;

    const RESPONSE: &str = r#"[{"fortune":"money","periodValue":"q1","result":"좋음"}]"#;

    fn request(ai: AiType) -> FortuneRequest {
        let birth = BirthInfo::new(GenderType::Male, CalendarType::Solar, 1990, 5, 5).unwrap();
        let option = FortuneOption::new(ai, [FortuneType::Money], PeriodType::Quarterly).unwrap();
        FortuneRequest::new(birth, option, 2025)
    }

    fn service(provider: MockProvider, cached: bool) -> (FortuneService, Arc<MockProvider>) {
        let provider = Arc::new(provider);
        let client = FortuneClient::new(provider.clone(), Arc::new(SamplingConfig::default()));
        let cache = cached.then(|| Arc::new(ResultCache::new(10, Duration::from_secs(60))));
        (
            FortuneService::new(FortunePipeline::new(client, DEFAULT_TEMPLATE), cache),
            provider,
        )
    }

    #[tokio::test]
    async fn test_unsupported_ai_type_never_calls_provider() {
        let (service, provider) = service(MockProvider::text(RESPONSE), true);

        for ai in [AiType::Claude, AiType::Gpt] {
            let err = service.generate_fortune(&request(ai)).await.unwrap_err();
            assert!(matches!(err, LuckyError::UnsupportedProvider(t) if t == ai));
            assert_eq!(err.http_status(), 400);
        }
        assert!(service.render_prompt(&request(AiType::Gpt)).is_err());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_repeated_request_is_served_from_cache() {
        let (service, provider) = service(MockProvider::text(RESPONSE), true);
        let request = request(AiType::Gemini);

        let first = service.generate_fortune(&request).await.unwrap();
        let second = service.generate_fortune(&request).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.call_count(), 1);

        let stats = service.cache_stats().unwrap();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_without_cache_every_request_calls_provider() {
        let replies = [Ok(Some(RESPONSE.to_string())), Ok(Some(RESPONSE.to_string()))];
        let (service, provider) = service(MockProvider::new(replies), false);
        let request = request(AiType::Gemini);

        service.generate_fortune(&request).await.unwrap();
        service.generate_fortune(&request).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert!(service.cache_stats().is_none());
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let replies = [
            Err(ProviderFailure::Server {
                status: 503,
                message: "busy".to_string(),
            }),
            Ok(Some(RESPONSE.to_string())),
        ];
        let (service, provider) = service(MockProvider::new(replies), true);
        let request = request(AiType::Gemini);

        let err = service.generate_fortune(&request).await.unwrap_err();
        assert_eq!(err.fortune_kind(), Some(FortuneErrorKind::ProviderOverload));
        assert_eq!(err.http_status(), 503);

        let views = service.generate_views(&request).await.unwrap();
        assert_eq!(views[0].get(PeriodValue::Q1), Some("좋음"));
        assert_eq!(provider.call_count(), 2);
    }
}

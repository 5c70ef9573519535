//! Fortune Generation Pipeline
//!
//! One request flows through five stages:
//!
//! ```text
//! Built -> Invoked -> Parsed -> Grouped -> Done
//!             |          |
//!             |          +-> ParseFailed
//!             +-> ProviderFailed | EmptyResponse
//! ```
//!
//! Every failure is terminal and surfaces as a classified `FortuneError`.
//! Each run is wrapped in a `fortune` span carrying a fresh request id and
//! the last stage reached.

use std::time::Instant;
use tracing::{Instrument, Span, debug, field, info, info_span};
use uuid::Uuid;

use super::view::{FortuneView, group_views};
use crate::ai::client::log_failure;
use crate::ai::{FortuneClient, build_prompt, parse_entries};
use crate::types::{FortuneEntry, FortuneError, FortuneErrorKind, FortuneRequest};

/// Stage a request has reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Built,
    Invoked,
    Parsed,
    Grouped,
    Done,
    ProviderFailed,
    EmptyResponse,
    ParseFailed,
}

impl PipelineStage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Built => "built",
            Self::Invoked => "invoked",
            Self::Parsed => "parsed",
            Self::Grouped => "grouped",
            Self::Done => "done",
            Self::ProviderFailed => "provider_failed",
            Self::EmptyResponse => "empty_response",
            Self::ParseFailed => "parse_failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            Self::Built | Self::Invoked | Self::Parsed | Self::Grouped
        )
    }

    /// Terminal stage for a classified failure
    pub fn from_error(err: &FortuneError) -> Self {
        match err.kind() {
            FortuneErrorKind::EmptyResponse => Self::EmptyResponse,
            FortuneErrorKind::ProviderOverload | FortuneErrorKind::ProviderUnknownError => {
                Self::ProviderFailed
            }
            FortuneErrorKind::ParseError => Self::ParseFailed,
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Prompt -> provider -> parser -> shaper
#[derive(Clone)]
pub struct FortunePipeline {
    client: FortuneClient,
    template: String,
}

impl FortunePipeline {
    pub fn new(client: FortuneClient, template: impl Into<String>) -> Self {
        Self {
            client,
            template: template.into(),
        }
    }

    pub fn client(&self) -> &FortuneClient {
        &self.client
    }

    /// Prompt that would be sent for a request
    pub fn render_prompt(&self, request: &FortuneRequest) -> String {
        build_prompt(
            &self.template,
            request.result_year,
            &request.option,
            &request.birth,
        )
    }

    /// Run the pipeline and return entries in provider order
    pub async fn generate_entries(
        &self,
        request: &FortuneRequest,
    ) -> Result<Vec<FortuneEntry>, FortuneError> {
        let span = Self::request_span();
        async {
            let entries = self.run(request).await;
            if entries.is_ok() {
                record_stage(PipelineStage::Done);
            }
            entries
        }
        .instrument(span)
        .await
    }

    /// Run the pipeline and group entries per category
    pub async fn generate_views(
        &self,
        request: &FortuneRequest,
    ) -> Result<Vec<FortuneView>, FortuneError> {
        let span = Self::request_span();
        async {
            let entries = self.run(request).await?;
            let views = group_views(&entries);
            record_stage(PipelineStage::Grouped);
            debug!("Grouped {} entries into {} views", entries.len(), views.len());
            record_stage(PipelineStage::Done);
            Ok(views)
        }
        .instrument(span)
        .await
    }

    fn request_span() -> Span {
        info_span!(
            "fortune",
            request_id = %Uuid::new_v4(),
            stage = field::Empty
        )
    }

    async fn run(&self, request: &FortuneRequest) -> Result<Vec<FortuneEntry>, FortuneError> {
        let start = Instant::now();
        let prompt = self.render_prompt(request);
        record_stage(PipelineStage::Built);
        debug!("Rendered prompt ({} chars)", prompt.chars().count());

        let raw = self
            .client
            .invoke(&prompt, request)
            .await
            .inspect_err(|e| record_stage(PipelineStage::from_error(e)))?;
        record_stage(PipelineStage::Invoked);

        let entries = parse_entries(&raw).inspect_err(|e| {
            record_stage(PipelineStage::from_error(e));
            log_failure(e, request, start.elapsed());
        })?;
        record_stage(PipelineStage::Parsed);

        info!(
            "Generated {} fortune entries for {}",
            entries.len(),
            request.option.fortunes_keys()
        );
        Ok(entries)
    }
}

fn record_stage(stage: PipelineStage) {
    Span::current().record("stage", stage.name());
}

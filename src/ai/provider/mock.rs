//! Scripted provider for pipeline tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{LlmProvider, SamplingConfig};
use crate::types::ProviderFailure;

type Reply = Result<Option<String>, ProviderFailure>;

/// Replays queued replies in order and records every prompt it receives
pub(crate) struct MockProvider {
    replies: Mutex<VecDeque<Reply>>,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    pub(crate) fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn text(text: &str) -> Self {
        Self::new([Ok(Some(text.to_string()))])
    }

    pub(crate) fn failing(failure: ProviderFailure) -> Self {
        Self::new([Err(failure)])
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn generate(&self, prompt: &str, _sampling: &SamplingConfig) -> Reply {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderFailure::Other("no scripted reply left".to_string())))
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}

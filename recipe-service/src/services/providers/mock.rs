//! Scripted provider for tests and local runs.

use super::{GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock text provider.
///
/// Queued replies are returned first, in order; once the queue is empty the
/// default reply (if any) is returned. Every prompt received is recorded.
pub struct MockTextProvider {
    model_id: String,
    default_reply: Option<String>,
    queued: Mutex<VecDeque<Result<String, ProviderError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn new() -> Self {
        Self {
            model_id: "mock.text-model".to_string(),
            default_reply: None,
            queued: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Provider that answers every prompt with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            default_reply: Some(reply.into()),
            ..Self::new()
        }
    }

    /// Queue a one-shot outcome ahead of the default reply.
    pub fn push(&self, outcome: Result<String, ProviderError>) {
        if let Ok(mut queued) = self.queued.lock() {
            queued.push_back(outcome);
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }
}

impl Default for MockTextProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let queued = self
            .queued
            .lock()
            .ok()
            .and_then(|mut queued| queued.pop_front());

        match queued {
            Some(outcome) => outcome.map(ProviderResponse::from_text),
            None => self
                .default_reply
                .clone()
                .map(ProviderResponse::from_text)
                .ok_or_else(|| {
                    ProviderError::NotConfigured("Mock provider has no reply configured".to_string())
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queued_then_default_replies() {
        let provider = MockTextProvider::with_reply("default");
        provider.push(Ok("first".to_string()));
        provider.push(Err(ProviderError::Throttled("busy".to_string())));

        let params = GenerationParams::default();
        assert_eq!(provider.generate("a", &params).await.unwrap().text, "first");
        assert!(matches!(
            provider.generate("b", &params).await,
            Err(ProviderError::Throttled(_))
        ));
        assert_eq!(provider.generate("c", &params).await.unwrap().text, "default");

        assert_eq!(provider.prompts(), vec!["a", "b", "c"]);
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_unconfigured_mock_errors() {
        let provider = MockTextProvider::new();
        assert!(matches!(
            provider.generate("x", &GenerationParams::default()).await,
            Err(ProviderError::NotConfigured(_))
        ));
    }
}

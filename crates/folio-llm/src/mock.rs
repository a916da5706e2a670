//! Test-only mock LLM provider.

use std::sync::{Arc, Mutex};

use crate::error::LlmError;
use crate::provider::{ChatOptions, LlmProvider, Message};

#[derive(Debug, Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<String>>>,
    pub default_response: String,
    pub fail_chat: bool,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            default_response: "mock response".into(),
            fail_chat: false,
        }
    }
}

impl MockProvider {
    #[must_use]
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_chat: true,
            ..Self::default()
        }
    }
}

impl LlmProvider for MockProvider {
    async fn chat(&self, _messages: &[Message], _options: &ChatOptions) -> Result<String, LlmError> {
        if self.fail_chat {
            return Err(LlmError::Other("mock LLM error".into()));
        }
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(self.default_response.clone())
        } else {
            Ok(responses.remove(0))
        }
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let p = MockProvider::with_responses(vec!["one".into(), "two".into()]);
        let opts = ChatOptions::default();
        assert_eq!(p.chat(&[], &opts).await.unwrap(), "one");
        assert_eq!(p.chat(&[], &opts).await.unwrap(), "two");
        assert_eq!(p.chat(&[], &opts).await.unwrap(), "mock response");
    }

    #[tokio::test]
    async fn failing_mock_errors() {
        let p = MockProvider::failing();
        assert!(p.chat(&[], &ChatOptions::default()).await.is_err());
    }
}

//! Static dispatch over provider backends.
//!
//! `LlmProvider` uses native async fns and is not dyn-compatible, so
//! call sites that need a single concrete type go through this enum.

use crate::error::LlmError;
use crate::openai::OpenAiProvider;
use crate::provider::{ChatOptions, LlmProvider, Message};

#[derive(Debug, Clone)]
pub enum AnyProvider {
    OpenAi(OpenAiProvider),
    #[cfg(feature = "mock")]
    Mock(crate::mock::MockProvider),
}

impl LlmProvider for AnyProvider {
    async fn chat(&self, messages: &[Message], options: &ChatOptions) -> Result<String, LlmError> {
        match self {
            Self::OpenAi(p) => p.chat(messages, options).await,
            #[cfg(feature = "mock")]
            Self::Mock(p) => p.chat(messages, options).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::OpenAi(p) => p.name(),
            #[cfg(feature = "mock")]
            Self::Mock(p) => p.name(),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::error::LlmError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Per-request generation settings, overridable by API callers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChatOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 500,
        }
    }
}

pub trait LlmProvider: Send + Sync {
    /// Send messages to the LLM and return the assistant response text.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to communicate or the
    /// response is empty.
    fn chat(
        &self,
        messages: &[Message],
        options: &ChatOptions,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;

    fn name(&self) -> &str;
}

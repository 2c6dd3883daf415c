//! Completion oracle port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::analysis::ResponseMode;

/// Completion oracle errors
#[derive(Debug, Clone, Error)]
pub enum OracleError {
    /// Provider rejected the credentials; carries the provider's message
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    /// Provider throttled the call; carries the provider's message
    #[error("Rate limit or quota exceeded: {0}")]
    RateLimited(String),

    #[error("Empty completion response")]
    EmptyResponse,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

impl MessageRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Provider-neutral chat completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub response_mode: ResponseMode,
    pub messages: Vec<ChatMessage>,
}

/// Port for the external LLM completion service
#[async_trait]
pub trait CompletionOracle: Send + Sync {
    /// Run a chat completion.
    ///
    /// # Arguments
    /// * `request` - Model, response-format hint and ordered messages
    ///
    /// # Returns
    /// The text of the first completion choice, or an error
    async fn complete(&self, request: &CompletionRequest) -> Result<String, OracleError>;
}

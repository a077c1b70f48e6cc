//! Base trait for chat backends

use async_trait::async_trait;
use thiserror::Error;

use chatui_core::transcript::Message;

/// Error type for provider operations
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("API error: {0}")]
    Api(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Trait for chat completion backends.
///
/// A provider maps a full conversation to a single reply. The call is not
/// cancellable or time-bounded; callers own any liveness feedback shown
/// while it runs.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Request a completion for the conversation so far
    async fn complete(&self, messages: &[Message]) -> ProviderResult<String>;

    /// The model this provider targets
    fn default_model(&self) -> String;
}

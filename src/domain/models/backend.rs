#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

pub const RATE_LIMIT_CODE: &str = "rate_limit_exceeded";

/// Failure of a single completion request. Every variant rolls back the user
/// turn that triggered it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("rate limit exceeded")]
    RateLimited,

    #[error("api error: {0}")]
    Api(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl CompletionError {
    pub fn user_message(&self) -> String {
        match self {
            CompletionError::RateLimited => {
                return "🚨 API rate limit reached, please try again later.".to_string();
            }
            CompletionError::Api(message) => return format!("🚨 API Error: {message}"),
            CompletionError::Transport(_) | CompletionError::MalformedResponse(_) => {
                return "🚨 Something went wrong. Please try again later.".to_string();
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendPrompt {
    pub text: String,
}

impl BackendPrompt {
    pub fn new(text: String) -> BackendPrompt {
        return BackendPrompt { text };
    }
}

#[async_trait]
pub trait Backend {
    /// Used before the first request to verify all configurations are
    /// available to work with the backend.
    async fn health_check(&self) -> Result<()>;

    /// Requests a single, non streamed completion and returns the raw text of
    /// the first choice.
    async fn get_completion(&self, prompt: BackendPrompt) -> Result<String, CompletionError>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;

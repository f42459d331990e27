pub mod openai;
pub mod prompts;

pub use openai::OpenAiOracle;

use crate::error::Result;
use async_trait::async_trait;

/// Literal the oracle returns when it cannot find what was asked for
pub const NOT_FOUND: &str = "NOT_FOUND";

/// A text-in, text-out completion service
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Send one user prompt and return the response text
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Decoded oracle response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Found(String),
    NotFound,
}

impl Answer {
    /// Map a raw response onto a tagged answer. The sentinel is only honoured
    /// here; anything else non-empty is taken verbatim.
    pub fn from_response(response: &str) -> Self {
        let trimmed = response.trim();
        if trimmed.is_empty() || trimmed == NOT_FOUND {
            Answer::NotFound
        } else {
            Answer::Found(trimmed.to_string())
        }
    }
}

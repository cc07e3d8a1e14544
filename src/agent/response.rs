//! Model response and upstream error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures reported by a model client.
///
/// Every variant aborts the run that produced it; nothing here is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Authentication failed ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl UpstreamError {
    /// Map a non-success HTTP status and its provider message to an error
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => UpstreamError::Unauthorized { status, message },
            429 => UpstreamError::RateLimited(message),
            _ => UpstreamError::Api { status, message },
        }
    }
}

/// Response from the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// The generated text
    pub content: String,

    /// Token usage information (if the provider reports it)
    pub usage: Option<TokenUsage>,
}

impl AgentResponse {
    /// Create a response without usage information
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }
}

/// Token usage information
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Add another call's usage to this total
    pub fn accumulate(&mut self, other: &TokenUsage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            UpstreamError::from_status(401, "bad key".into()),
            UpstreamError::Unauthorized { status: 401, .. }
        ));
        assert!(matches!(
            UpstreamError::from_status(403, "forbidden".into()),
            UpstreamError::Unauthorized { status: 403, .. }
        ));
        assert_eq!(
            UpstreamError::from_status(429, "slow down".into()),
            UpstreamError::RateLimited("slow down".into())
        );
        assert!(matches!(
            UpstreamError::from_status(502, "bad gateway".into()),
            UpstreamError::Api { status: 502, .. }
        ));
    }

    #[test]
    fn test_usage_accumulates() {
        let mut total = TokenUsage::default();
        total.accumulate(&TokenUsage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        });
        total.accumulate(&TokenUsage {
            prompt_tokens: 1,
            completion_tokens: 2,
            total_tokens: 3,
        });
        assert_eq!(total.total_tokens, 18);
        assert_eq!(total.prompt_tokens, 11);
    }
}

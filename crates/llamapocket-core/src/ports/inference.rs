//! Inference port definition.
//!
//! Given a prompt, an [`InferenceClient`] returns a completion or fails.
//! The backing engine may be a remote HTTP endpoint or an on-device
//! runtime; the core is agnostic. Retry policy, if any, belongs to the
//! implementation - the chat session never retries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for completion requests.
///
/// The chat session absorbs every variant into the transcript; these
/// distinctions exist for logging and for implementations' retry policies.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum InferenceError {
    /// Transport-level failure before any response arrived.
    #[error("network error: {message}")]
    Network {
        /// Detailed error message.
        message: String,
    },

    /// The endpoint answered with a non-2xx status.
    #[error("generation endpoint returned HTTP {status}")]
    Http {
        /// The HTTP status code.
        status: u16,
    },

    /// The response body was not the expected shape.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// What was wrong with the body.
        message: String,
    },

    /// The request exceeded the client's deadline.
    #[error("request timed out after {seconds}s")]
    Timeout {
        /// The deadline that was exceeded.
        seconds: u64,
    },
}

impl InferenceError {
    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Whether a retry could plausibly succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => true,
            Self::Http { status } => *status >= 500,
            Self::MalformedResponse { .. } => false,
        }
    }
}

/// Port for text completion.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Produce a completion for `prompt`.
    ///
    /// The prompt arrives already trimmed; implementations should return
    /// the completion text without surrounding whitespace.
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError>;
}

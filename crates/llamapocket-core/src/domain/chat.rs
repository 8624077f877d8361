//! Chat domain types.
//!
//! One conversation transcript, represented as an ordered sequence of
//! [`ChatMessage`] values. Messages are immutable once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Parse a role from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }

    /// Convert role to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One turn in the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Session-local identifier, strictly increasing in append order.
    pub id: u64,
    /// Body content, immutable once created.
    pub text: String,
    /// Who produced this turn.
    pub role: MessageRole,
    /// Creation instant.
    pub timestamp: DateTime<Utc>,
    /// True for a synthesized failure notice rather than a genuine completion.
    pub is_error: bool,
}

impl ChatMessage {
    /// Create a user turn, stamped with the current instant.
    pub fn user(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            role: MessageRole::User,
            timestamp: Utc::now(),
            is_error: false,
        }
    }

    /// Create an assistant turn, stamped with the current instant.
    pub fn assistant(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            role: MessageRole::Assistant,
            timestamp: Utc::now(),
            is_error: false,
        }
    }

    /// Create a synthesized failure notice in the assistant's voice.
    pub fn failure_notice(id: u64, text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::assistant(id, text)
        }
    }
}

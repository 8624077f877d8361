//! Download port definition.
//!
//! The core makes no assumption about the transfer mechanism behind a
//! model's `download_source` - chunked HTTP, a package manager, or an
//! instantaneous copy of a bundled file all fit behind [`DownloadClient`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

/// Error type for byte-transfer operations.
///
/// Designed to be serializable without depending on non-serializable types
/// like `std::io::Error`; I/O detail is captured as kind and message
/// strings.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransferError {
    /// I/O error during file operations.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error (e.g., "NotFound", "PermissionDenied").
        kind: String,
        /// Detailed error message.
        message: String,
    },

    /// Network/HTTP error during transfer.
    #[error("network error: {message}")]
    Network {
        /// Detailed error message.
        message: String,
        /// HTTP status code if available.
        #[serde(skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },

    /// The download source locator could not be used.
    #[error("invalid download source: {message}")]
    InvalidSource {
        /// What was wrong with the locator.
        message: String,
    },

    /// General/uncategorized error.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl TransferError {
    /// Create an I/O error from kind and message strings.
    pub fn io(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error from a `std::io::Error`.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        let kind = err.kind();
        Self::Io {
            kind: format!("{kind:?}"),
            message: err.to_string(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a network error with HTTP status code.
    pub fn network_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self::Network {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create an invalid source error.
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
        }
    }

    /// Create a generic error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

/// Port for transferring model bytes.
///
/// Implementations report progress through the watch channel as fractions
/// in `[0, 1]`, monotonically non-decreasing, ending at exactly `1.0` on
/// success. The sender is dropped with the future, so observers see the
/// channel close when the transfer resolves either way.
///
/// Cancellation is the caller's concern: the lifecycle manager races the
/// returned future against its cancellation token and drops it mid-flight.
#[async_trait]
pub trait DownloadClient: Send + Sync {
    /// Transfer the bytes behind `source`, reporting progress as it goes.
    async fn transfer(
        &self,
        source: &str,
        progress: watch::Sender<f64>,
    ) -> Result<(), TransferError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = TransferError::from_io_error(&io_err);

        match err {
            TransferError::Io { kind, message } => {
                assert_eq!(kind, "NotFound");
                assert!(message.contains("file not found"));
            }
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_serialization() {
        let err = TransferError::network_with_status("service unavailable", 503);
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("503"));

        let parsed: TransferError = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, err);
    }

    #[test]
    fn test_status_code_omitted_when_absent() {
        let json = serde_json::to_string(&TransferError::network("dns failure")).unwrap();
        assert!(!json.contains("status_code"));
    }
}

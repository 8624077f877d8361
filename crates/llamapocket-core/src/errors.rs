//! Typed failure surface of the lifecycle manager and chat session.
//!
//! Every operation is total: each failure mode is a value of one of these
//! enums, never a panic. The enums are serializable so the surrounding app
//! can carry them across its FFI boundary unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ModelId;
use crate::ports::TransferError;

/// Failure modes of `ModelLifecycleManager::download`.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DownloadError {
    /// Another model is already transferring; only one download may be in
    /// flight at a time.
    #[error("another download is already in progress")]
    AlreadyDownloading,

    /// The ID does not name a catalog model.
    #[error("unknown model: {id}")]
    NotFound {
        /// The unrecognized ID.
        id: ModelId,
    },

    /// The transport reported a failure; the model reverted to
    /// `NotDownloaded`.
    #[error("transfer failed: {reason}")]
    TransferFailed {
        /// The underlying transport error.
        reason: TransferError,
    },

    /// The download was cancelled; the model reverted to `NotDownloaded`.
    #[error("download cancelled")]
    Cancelled,
}

impl DownloadError {
    /// Check if this is a cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Failure modes of `ModelLifecycleManager::select`.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum SelectionError {
    /// The ID does not name a catalog model.
    #[error("unknown model: {id}")]
    NotFound {
        /// The unrecognized ID.
        id: ModelId,
    },

    /// Only downloaded models may be selected.
    #[error("model {id} is not downloaded")]
    NotDownloaded {
        /// The model that was not downloaded.
        id: ModelId,
    },
}

/// Failure modes of `ModelLifecycleManager::delete_model`.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeleteError {
    /// The ID does not name a catalog model.
    #[error("unknown model: {id}")]
    NotFound {
        /// The unrecognized ID.
        id: ModelId,
    },

    /// The model is currently transferring; cancel the download first.
    #[error("model {id} is currently downloading")]
    DownloadInProgress {
        /// The model being transferred.
        id: ModelId,
    },
}

/// Failure modes of `ChatSession::send`.
///
/// Inference failures are deliberately absent: they are absorbed into the
/// transcript as error-flagged assistant messages, never surfaced here.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionError {
    /// A generation is already pending; sends are serialized.
    #[error("a generation is already in progress")]
    SessionBusy,

    /// The prompt was empty after trimming whitespace.
    #[error("prompt is empty")]
    EmptyPrompt,

    /// The generation was cancelled; no message was appended.
    #[error("generation cancelled")]
    Cancelled,
}

//! Download events - discriminated union for all download state changes.
//!
//! The lifecycle manager publishes these through the unbounded channel it
//! returns from its constructor. The frontend handles the union as a
//! tagged JSON object:
//!
//! ```typescript
//! type DownloadEvent =
//!   | { type: "started"; id: string }
//!   | { type: "progress"; id: string; fraction: number }
//!   | { type: "completed"; id: string }
//!   | { type: "failed"; id: string; error: string }
//!   | { type: "cancelled"; id: string };
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::ModelId;

/// Single discriminated union for all download state changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DownloadEvent {
    /// A download has started.
    Started {
        /// The model being downloaded.
        id: ModelId,
    },

    /// A progress tick. Fractions are in `[0, 1]` and non-decreasing
    /// within one download.
    Progress {
        /// The model being downloaded.
        id: ModelId,
        /// Fraction of the transfer completed.
        fraction: f64,
    },

    /// The download completed; the model is now `Downloaded`.
    Completed {
        /// The downloaded model.
        id: ModelId,
    },

    /// The download failed; the model reverted to `NotDownloaded`.
    Failed {
        /// The model whose transfer failed.
        id: ModelId,
        /// Error message describing what went wrong.
        error: String,
    },

    /// The download was cancelled; the model reverted to `NotDownloaded`.
    Cancelled {
        /// The model whose transfer was cancelled.
        id: ModelId,
    },
}

impl DownloadEvent {
    /// Create a download started event.
    pub fn started(id: impl Into<ModelId>) -> Self {
        Self::Started { id: id.into() }
    }

    /// Create a progress event.
    pub fn progress(id: impl Into<ModelId>, fraction: f64) -> Self {
        Self::Progress {
            id: id.into(),
            fraction,
        }
    }

    /// Create a download completed event.
    pub fn completed(id: impl Into<ModelId>) -> Self {
        Self::Completed { id: id.into() }
    }

    /// Create a download failed event.
    pub fn failed(id: impl Into<ModelId>, error: impl Into<String>) -> Self {
        Self::Failed {
            id: id.into(),
            error: error.into(),
        }
    }

    /// Create a download cancelled event.
    pub fn cancelled(id: impl Into<ModelId>) -> Self {
        Self::Cancelled { id: id.into() }
    }

    /// Get the model ID from any event type.
    #[must_use]
    pub fn id(&self) -> &ModelId {
        match self {
            Self::Started { id }
            | Self::Progress { id, .. }
            | Self::Completed { id }
            | Self::Failed { id, .. }
            | Self::Cancelled { id } => id,
        }
    }
}

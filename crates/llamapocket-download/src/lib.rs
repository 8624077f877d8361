//! Simulated model transfer client for llamapocket.
//!
//! The app treats model downloads as an opaque, progress-reporting
//! transfer behind the [`DownloadClient`] port. This crate provides the
//! stand-in transport the app ships with: a timed simulation that ticks
//! through evenly spaced progress fractions instead of moving real bytes.

// Re-export core types for convenience
pub use llamapocket_core::ports::{DownloadClient, TransferError};

mod simulated;

pub use simulated::SimulatedDownloadClient;

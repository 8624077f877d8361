//! Port definitions (trait abstractions) for external collaborators.
//!
//! Ports define the interfaces the core expects from infrastructure. They
//! contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No HTTP or filesystem types in any signature
//! - No cancellation tokens in any signature; cancellation is the
//!   services' concern
//! - Errors are serializable, with transport detail captured as strings

pub mod download;
pub mod inference;

pub use download::{DownloadClient, TransferError};
pub use inference::{InferenceClient, InferenceError};

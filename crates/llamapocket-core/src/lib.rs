//! Core domain types, ports, and services for llamapocket.
//!
//! This crate holds everything the surrounding mobile app needs to drive
//! model management and chat, independent of any transport:
//!
//! - `domain` - model descriptors, the catalog, and chat messages
//! - `ports` - trait abstractions for the download and inference collaborators
//! - `services` - [`ModelLifecycleManager`] and [`ChatSession`]
//! - `errors` - the typed failure surface of both services
//! - `events` - the download progress stream consumed by the UI

pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    CatalogError, ChatMessage, MessageRole, ModelCatalog, ModelDescriptor, ModelId, ModelState,
    StorageInfo,
};
pub use errors::{DeleteError, DownloadError, SelectionError, SessionError};
pub use events::DownloadEvent;
pub use ports::{DownloadClient, InferenceClient, InferenceError, TransferError};
pub use services::{ChatSession, GENERATION_FAILED_TEXT, ModelLifecycleManager};

//! Services - the two stateful engines of the app.
//!
//! [`ModelLifecycleManager`] owns model state, the current selection, and
//! download exclusivity. [`ChatSession`] owns the transcript and send
//! serialization. Neither calls the other; the UI layer coordinates them.

pub mod chat_session;
pub mod model_lifecycle;

pub use chat_session::{ChatSession, GENERATION_FAILED_TEXT};
pub use model_lifecycle::ModelLifecycleManager;

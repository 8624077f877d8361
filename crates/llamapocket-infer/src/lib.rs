//! HTTP inference client for llamapocket.
//!
//! Implements the [`InferenceClient`] port against the generation
//! endpoint the app's backend exposes: `POST {base_url}/generate` with a
//! JSON body of `{"input": <prompt>}`, answered by
//! `{"response": <completion>}`.
//!
//! Retry of transient failures lives here, behind the port - the chat
//! session never retries.

// Re-export core types for convenience
pub use llamapocket_core::ports::{InferenceClient, InferenceError};

mod client;
mod config;
mod wire;

pub use client::HttpInferenceClient;
pub use config::InferenceClientConfig;

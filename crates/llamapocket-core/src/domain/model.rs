//! Model domain types.
//!
//! A [`ModelDescriptor`] is one selectable language model: the immutable
//! catalog metadata plus its current [`ModelState`]. Descriptor state is
//! owned by the lifecycle manager; everything handed out of the manager is
//! a snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, opaque identifier for a model. Unique within the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Create a new model ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Download state of a model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelState {
    /// No local copy exists.
    #[default]
    NotDownloaded,
    /// A transfer for this model is in flight.
    Downloading,
    /// A complete local copy exists.
    Downloaded,
}

impl ModelState {
    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotDownloaded => "not_downloaded",
            Self::Downloading => "downloading",
            Self::Downloaded => "downloaded",
        }
    }

    /// Parse from string representation.
    ///
    /// Unknown values default to `NotDownloaded`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "downloading" => Self::Downloading,
            "downloaded" => Self::Downloaded,
            _ => Self::NotDownloaded,
        }
    }

    /// Whether a complete local copy exists.
    #[must_use]
    pub const fn is_downloaded(&self) -> bool {
        matches!(self, Self::Downloaded)
    }
}

impl fmt::Display for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One selectable language model and its download state.
///
/// `id`, `name`, `description`, `size_bytes`, and `download_source` are
/// fixed at catalog construction. `state` changes only through the
/// lifecycle manager.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Stable identifier, unique within the catalog.
    pub id: ModelId,
    /// Human-readable display name.
    pub name: String,
    /// Human-readable description for the model picker.
    pub description: String,
    /// Declared size in bytes; used for display and storage accounting.
    pub size_bytes: u64,
    /// Opaque locator consumed by the download client.
    pub download_source: String,
    /// Current download state.
    pub state: ModelState,
}

impl ModelDescriptor {
    /// Create a descriptor in the `NotDownloaded` state.
    pub fn new(
        id: impl Into<ModelId>,
        name: impl Into<String>,
        description: impl Into<String>,
        size_bytes: u64,
        download_source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            size_bytes,
            download_source: download_source.into(),
            state: ModelState::NotDownloaded,
        }
    }
}

/// Storage accounting snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInfo {
    /// Sum of `size_bytes` over all downloaded models.
    pub used_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_state_round_trip() {
        for state in [
            ModelState::NotDownloaded,
            ModelState::Downloading,
            ModelState::Downloaded,
        ] {
            assert_eq!(ModelState::parse(state.as_str()), state);
        }
    }

    #[test]
    fn test_model_state_parse_unknown_defaults() {
        assert_eq!(ModelState::parse("garbage"), ModelState::NotDownloaded);
        assert_eq!(ModelState::default(), ModelState::NotDownloaded);
    }

    #[test]
    fn test_descriptor_starts_not_downloaded() {
        let model = ModelDescriptor::new(
            "tinyllama-1.1b",
            "TinyLlama 1.1B",
            "Smallest model.",
            600,
            "https://example.com/tinyllama",
        );
        assert_eq!(model.state, ModelState::NotDownloaded);
        assert_eq!(model.id.as_str(), "tinyllama-1.1b");
        assert!(!model.state.is_downloaded());
    }

    #[test]
    fn test_model_id_serde_transparent() {
        let id = ModelId::new("llama3-8b-gguf");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"llama3-8b-gguf\"");
    }
}

//! The model catalog.
//!
//! An immutable, ordered list of the models the app offers. Loaded once at
//! startup; after construction it exposes only reads.

use std::collections::HashSet;

use thiserror::Error;

use super::model::{ModelDescriptor, ModelId};

/// Error raised while constructing a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two catalog entries share the same ID.
    #[error("duplicate model id in catalog: {id}")]
    DuplicateId {
        /// The offending ID.
        id: ModelId,
    },
}

/// Static, read-only list of the models available to the app.
#[derive(Clone, Debug)]
pub struct ModelCatalog {
    models: Vec<ModelDescriptor>,
}

impl ModelCatalog {
    /// Build a catalog from descriptors, validating ID uniqueness.
    pub fn new(models: Vec<ModelDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for model in &models {
            if !seen.insert(model.id.clone()) {
                return Err(CatalogError::DuplicateId {
                    id: model.id.clone(),
                });
            }
        }
        Ok(Self { models })
    }

    /// The catalog the app ships with.
    #[must_use]
    pub fn builtin() -> Self {
        // IDs are statically distinct, so no validation pass is needed.
        Self {
            models: vec![
                ModelDescriptor::new(
                    "tinyllama-1.1b",
                    "TinyLlama 1.1B",
                    "Smallest model, 1.1 billion parameters. Best for low-resource \
                     devices. Good for simple tasks.",
                    600 * 1024 * 1024,
                    "https://huggingface.co/TinyLlama/TinyLlama-1.1B-intermediate-step-1431k-3T",
                ),
                ModelDescriptor::new(
                    "llama3-8b-gguf",
                    "LLaMA 3 8B (GGUF)",
                    "Mid-sized model, 8 billion parameters. Good balance of \
                     performance and quality. Suitable for most tasks.",
                    4 * 1024 * 1024 * 1024,
                    "https://huggingface.co/meta-llama/Meta-Llama-3-8B-GGUF",
                ),
            ],
        }
    }

    /// All models in catalog order.
    #[must_use]
    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    /// Look up a model by ID.
    #[must_use]
    pub fn get(&self, id: &ModelId) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| &m.id == id)
    }

    /// Number of catalog entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelState;

    #[test]
    fn test_builtin_catalog_entries() {
        let catalog = ModelCatalog::builtin();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.models()[0].id.as_str(), "tinyllama-1.1b");
        assert_eq!(catalog.models()[1].id.as_str(), "llama3-8b-gguf");
        assert!(
            catalog
                .models()
                .iter()
                .all(|m| m.state == ModelState::NotDownloaded)
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = ModelCatalog::new(vec![
            ModelDescriptor::new("a", "A", "first", 1, "src-a"),
            ModelDescriptor::new("a", "A again", "second", 2, "src-a2"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateId {
                id: ModelId::new("a")
            }
        );
    }

    #[test]
    fn test_get_by_id() {
        let catalog = ModelCatalog::builtin();
        let id = ModelId::new("llama3-8b-gguf");
        assert_eq!(catalog.get(&id).unwrap().name, "LLaMA 3 8B (GGUF)");
        assert!(catalog.get(&ModelId::new("nope")).is_none());
    }
}

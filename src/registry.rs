//! Schema registry for cross-document reference resolution.
//!
//! This module provides the [`SchemaRegistry`] type that stores registered
//! schema containers by base identifier and serves as the [`SchemaLoader`]
//! hook when a reference points outside its own document.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::container::{SchemaContainer, SchemaLoader};
use crate::error::SchemaError;

/// Type alias for the container storage map.
type ContainerMap = Arc<RwLock<HashMap<String, Arc<SchemaContainer>>>>;

/// A thread-safe registry of schema containers.
///
/// The registry enables references across schema documents: every container
/// registered through it gets the registry installed as its loader, so a
/// `$ref` carrying a foreign base identifier resolves into whichever
/// registered document owns that base.
///
/// # Thread safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can resolve references concurrently (read access)
/// - Registration operations are serialized (write access)
///
/// # Example
///
/// ```rust
/// use inquest::{validate, SchemaRegistry};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
///
/// registry.register(json!({
///     "$id": "https://example.org/even",
///     "divisibleBy": 2
/// })).unwrap();
///
/// let doc = registry.register(json!({
///     "$id": "https://example.org/doc",
///     "$ref": "https://example.org/even#"
/// })).unwrap();
///
/// let report = validate(&doc, &json!(6)).unwrap();
/// assert!(report.is_success());
/// ```
pub struct SchemaRegistry {
    containers: ContainerMap,
}

impl SchemaRegistry {
    /// Creates a new empty schema registry.
    pub fn new() -> Self {
        Self {
            containers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a schema document and returns its container.
    ///
    /// The document must carry a `$id` base identifier so other documents
    /// can refer to it. The returned container has this registry installed
    /// as its loader.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingBase`] for anonymous documents,
    /// [`RegistryError::DuplicateBase`] if the base is already taken, and
    /// any [`SchemaError`] from container registration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use inquest::SchemaRegistry;
    /// use serde_json::json;
    ///
    /// let registry = SchemaRegistry::new();
    /// let doc = json!({ "$id": "https://example.org/s", "divisibleBy": 3 });
    /// registry.register(doc.clone()).unwrap();
    ///
    /// // Duplicate registration fails
    /// assert!(registry.register(doc).is_err());
    /// ```
    pub fn register(&self, document: Value) -> Result<Arc<SchemaContainer>, RegistryError> {
        let container = SchemaContainer::register(document)?.with_loader(Arc::new(self.clone()));
        let base = container.base().to_string();

        if base.is_empty() {
            return Err(RegistryError::MissingBase);
        }

        let mut containers = self.containers.write();
        if containers.contains_key(&base) {
            return Err(RegistryError::DuplicateBase(base));
        }

        let container = Arc::new(container);
        containers.insert(base, Arc::clone(&container));
        Ok(container)
    }

    /// Retrieves a registered container by base identifier.
    pub fn get(&self, base: &str) -> Option<Arc<SchemaContainer>> {
        self.containers.read().get(base).cloned()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SchemaRegistry {
    fn clone(&self) -> Self {
        Self {
            containers: Arc::clone(&self.containers),
        }
    }
}

impl SchemaLoader for SchemaRegistry {
    fn load(&self, base: &str) -> Result<Arc<SchemaContainer>, SchemaError> {
        self.get(base)
            .ok_or_else(|| SchemaError::UnknownBase(base.to_string()))
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a document without a `$id` base identifier.
    #[error("document has no $id base identifier to register under")]
    MissingBase,

    /// Attempted to register a second document under the same base.
    #[error("base '{0}' already registered")]
    DuplicateBase(String),

    /// The document itself was malformed.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

//! Schema containers and nodes.
//!
//! A [`SchemaContainer`] owns one registered schema document together with
//! its canonical base identifier and an index of every sub-schema by JSON
//! pointer. It is immutable after registration and may be shared across
//! concurrent validation runs. A [`SchemaNode`] is a lightweight view over
//! one sub-document of a container.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{json_type, SchemaError};
use crate::pointer::JsonPointer;

/// Hook for resolving references into other schema documents.
///
/// The container itself never fetches anything: a reference whose base
/// identifier differs from the container's own is delegated to this trait.
/// [`SchemaRegistry`](crate::SchemaRegistry) is the in-memory implementation.
pub trait SchemaLoader: Send + Sync {
    /// Returns the container registered under the given base identifier.
    fn load(&self, base: &str) -> Result<Arc<SchemaContainer>, SchemaError>;
}

/// An immutable, indexed schema document.
///
/// Registration walks the document once and records every sub-value under
/// its pointer path, so reference resolution is a pure lookup regardless of
/// where the reference points (including ancestors of the referring node).
///
/// # Example
///
/// ```rust
/// use inquest::SchemaContainer;
/// use serde_json::json;
///
/// let container = SchemaContainer::register(json!({
///     "properties": {
///         "age": { "divisibleBy": 2 }
///     }
/// })).unwrap();
///
/// let container = std::sync::Arc::new(container);
/// let node = container.resolve("#/properties/age").unwrap();
/// assert_eq!(node.value(), &json!({ "divisibleBy": 2 }));
/// ```
pub struct SchemaContainer {
    root: Value,
    base: String,
    index: IndexMap<String, Value>,
    loader: Option<Arc<dyn SchemaLoader>>,
}

impl SchemaContainer {
    /// Registers a schema document, building its pointer index.
    ///
    /// The document must be a JSON object or a boolean. An object's `$id`,
    /// if present, becomes the container's base identifier (any fragment is
    /// stripped).
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDocument`] for any other document type
    /// and [`SchemaError::MalformedKeyword`] if `$id` is not a string.
    pub fn register(document: Value) -> Result<Self, SchemaError> {
        let base = match &document {
            Value::Bool(_) => String::new(),
            Value::Object(map) => match map.get("$id") {
                None => String::new(),
                Some(Value::String(id)) => {
                    id.split_once('#').map_or(id.as_str(), |(b, _)| b).to_string()
                }
                Some(other) => {
                    return Err(SchemaError::malformed(
                        "$id",
                        format!("expected a string, got {}", json_type(other)),
                    ))
                }
            },
            other => return Err(SchemaError::InvalidDocument(json_type(other))),
        };

        let mut index = IndexMap::new();
        build_index(&document, &JsonPointer::root(), &mut index);

        Ok(Self {
            root: document,
            base,
            index,
            loader: None,
        })
    }

    /// Installs a loader for references into other documents.
    pub fn with_loader(mut self, loader: Arc<dyn SchemaLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Returns the canonical base identifier, or `""` for anonymous schemas.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the root schema document.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Returns a node over the root document.
    pub fn root_node(self: &Arc<Self>) -> SchemaNode {
        SchemaNode {
            container: Arc::clone(self),
            pointer: JsonPointer::root(),
            value: self.root.clone(),
        }
    }

    /// Resolves a reference string into a schema node.
    ///
    /// The reference splits into a base-identifier part and a fragment
    /// pointer at `#`. An empty base, or one equal to this container's own,
    /// is looked up in the local index; any other base is delegated to the
    /// installed [`SchemaLoader`]. Resolution never mutates the container.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::PointerNotFound`] if the fragment designates
    /// no sub-schema, and [`SchemaError::UnknownBase`] for a foreign base
    /// when no loader is installed.
    pub fn resolve(self: &Arc<Self>, reference: &str) -> Result<SchemaNode, SchemaError> {
        let (base, fragment) = split_reference(reference);

        if !base.is_empty() && base != self.base {
            let loader = self
                .loader
                .as_ref()
                .ok_or_else(|| SchemaError::UnknownBase(base.to_string()))?;
            let target = loader.load(base)?;
            return target.resolve(&format!("#{}", fragment));
        }

        let pointer = JsonPointer::parse(fragment)?;
        let value = self
            .index
            .get(&pointer.to_string())
            .ok_or_else(|| SchemaError::PointerNotFound(pointer.to_string()))?
            .clone();

        Ok(SchemaNode {
            container: Arc::clone(self),
            pointer,
            value,
        })
    }

    /// Expands a reference to its `base#fragment` form, supplying this
    /// container's base when the reference has none. Cycle detection
    /// compares canonical forms so the same pointer reached from two
    /// documents is not a false repeat.
    pub(crate) fn canonicalize(&self, reference: &str) -> String {
        let (base, fragment) = split_reference(reference);
        let base = if base.is_empty() { &self.base } else { base };
        format!("{}#{}", base, fragment)
    }
}

/// A view over one sub-document of a schema container.
///
/// Nodes are cheap to clone and re-creatable on demand; they hold the
/// sub-value itself plus enough context (container, pointer) to resolve
/// references and build child nodes.
#[derive(Clone)]
pub struct SchemaNode {
    container: Arc<SchemaContainer>,
    pointer: JsonPointer,
    value: Value,
}

impl SchemaNode {
    /// Returns the container this node belongs to.
    pub fn container(&self) -> &Arc<SchemaContainer> {
        &self.container
    }

    /// Returns the pointer path of this node within its container.
    pub fn pointer(&self) -> &JsonPointer {
        &self.pointer
    }

    /// Returns the schema fragment at this node.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the child node under an object member, if present.
    pub fn child(&self, token: &str) -> Option<SchemaNode> {
        self.value.get(token).map(|value| SchemaNode {
            container: Arc::clone(&self.container),
            pointer: self.pointer.push(token),
            value: value.clone(),
        })
    }

    /// Returns the child node under an array element, if present.
    pub fn child_index(&self, index: usize) -> Option<SchemaNode> {
        self.value.get(index).map(|value| SchemaNode {
            container: Arc::clone(&self.container),
            pointer: self.pointer.push_index(index),
            value: value.clone(),
        })
    }
}

fn split_reference(reference: &str) -> (&str, &str) {
    match reference.split_once('#') {
        Some((base, fragment)) => (base, fragment),
        None => (reference, ""),
    }
}

fn build_index(value: &Value, pointer: &JsonPointer, index: &mut IndexMap<String, Value>) {
    index.insert(pointer.to_string(), value.clone());
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                build_index(child, &pointer.push(name), index);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                build_index(child, &pointer.push_index(i), index);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_rejects_non_schema_documents() {
        assert!(SchemaContainer::register(json!(null)).is_err());
        assert!(SchemaContainer::register(json!(42)).is_err());
        assert!(SchemaContainer::register(json!("schema")).is_err());
        assert!(SchemaContainer::register(json!([])).is_err());
    }

    #[test]
    fn test_register_accepts_boolean_schemas() {
        assert!(SchemaContainer::register(json!(true)).is_ok());
        assert!(SchemaContainer::register(json!(false)).is_ok());
    }

    #[test]
    fn test_base_from_id() {
        let container =
            SchemaContainer::register(json!({ "$id": "https://example.org/s#" })).unwrap();
        assert_eq!(container.base(), "https://example.org/s");

        let anonymous = SchemaContainer::register(json!({})).unwrap();
        assert_eq!(anonymous.base(), "");
    }

    #[test]
    fn test_register_rejects_non_string_id() {
        assert!(SchemaContainer::register(json!({ "$id": 42 })).is_err());
    }

    #[test]
    fn test_resolve_local_pointer() {
        let container = Arc::new(
            SchemaContainer::register(json!({
                "definitions": { "positive": { "minimum": 0 } }
            }))
            .unwrap(),
        );

        let node = container.resolve("#/definitions/positive").unwrap();
        assert_eq!(node.value(), &json!({ "minimum": 0 }));
        assert_eq!(node.pointer().to_string(), "/definitions/positive");
    }

    #[test]
    fn test_resolve_root() {
        let container = Arc::new(SchemaContainer::register(json!({ "type": "object" })).unwrap());
        let node = container.resolve("#").unwrap();
        assert!(node.pointer().is_root());
        assert_eq!(node.value(), container.root());
    }

    #[test]
    fn test_resolve_missing_pointer() {
        let container = Arc::new(SchemaContainer::register(json!({})).unwrap());
        let result = container.resolve("#/definitions/missing");
        assert!(matches!(result, Err(SchemaError::PointerNotFound(_))));
    }

    #[test]
    fn test_resolve_foreign_base_without_loader() {
        let container = Arc::new(SchemaContainer::register(json!({})).unwrap());
        let result = container.resolve("https://example.org/other#/a");
        assert!(matches!(result, Err(SchemaError::UnknownBase(_))));
    }

    #[test]
    fn test_resolve_matching_base_is_local() {
        let container = Arc::new(
            SchemaContainer::register(json!({
                "$id": "https://example.org/s",
                "definitions": { "x": true }
            }))
            .unwrap(),
        );

        let node = container.resolve("https://example.org/s#/definitions/x").unwrap();
        assert_eq!(node.value(), &json!(true));
    }

    #[test]
    fn test_node_children() {
        let container = Arc::new(
            SchemaContainer::register(json!({
                "items": [{ "type": "string" }, { "type": "number" }]
            }))
            .unwrap(),
        );

        let items = container.root_node().child("items").unwrap();
        let second = items.child_index(1).unwrap();
        assert_eq!(second.pointer().to_string(), "/items/1");
        assert_eq!(second.value(), &json!({ "type": "number" }));
        assert!(items.child_index(2).is_none());
    }

    #[test]
    fn test_canonicalize() {
        let container =
            SchemaContainer::register(json!({ "$id": "https://example.org/s" })).unwrap();
        assert_eq!(container.canonicalize("#/a"), "https://example.org/s#/a");
        assert_eq!(
            container.canonicalize("https://example.org/other#/b"),
            "https://example.org/other#/b"
        );
    }
}

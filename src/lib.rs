//! # Inquest
//!
//! A JSON-Schema-style validation engine that accumulates ALL violations,
//! providing comprehensive feedback rather than short-circuiting on the
//! first failure.
//!
//! ## Overview
//!
//! Schemas are plain data: a `serde_json::Value` document whose keywords
//! (`type`, `divisibleBy`, `properties`, `$ref`, ...) describe the
//! constraints an instance must satisfy. Registering a document builds a
//! [`SchemaContainer`] with an index of every sub-schema by JSON pointer;
//! validating an instance against it drives a tree of keyword validators
//! that all report into one shared [`ValidationReport`].
//!
//! References (`$ref`) resolve through the container, or across documents
//! through a [`SchemaRegistry`], and a per-run resolution stack detects
//! reference cycles instead of recursing forever.
//!
//! ## Core Types
//!
//! - [`SchemaContainer`]: an immutable, indexed schema document
//! - [`SchemaNode`]: a view over one sub-schema of a container
//! - [`ValidationReport`]: the accumulated messages and success flag of one run
//! - [`SchemaError`]: a structural problem with the schema itself, kept
//!   disjoint from instance violations
//! - [`SchemaRegistry`]: cross-document reference resolution
//!
//! ## Example
//!
//! ```rust
//! use inquest::{validate, SchemaContainer};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let container = Arc::new(SchemaContainer::register(json!({
//!     "type": "object",
//!     "required": ["count"],
//!     "properties": {
//!         "count": { "type": "integer", "divisibleBy": 5 }
//!     }
//! })).unwrap());
//!
//! let report = validate(&container, &json!({ "count": 25 })).unwrap();
//! assert!(report.is_success());
//!
//! let report = validate(&container, &json!({ "count": "many" })).unwrap();
//! assert!(!report.is_success());
//! assert_eq!(report.messages()[0], "/count: expected integer, got string");
//! ```

pub mod container;
pub mod context;
pub mod error;
pub mod pointer;
pub mod registry;
pub mod report;
pub mod validator;

pub use container::{SchemaContainer, SchemaLoader, SchemaNode};
pub use context::ValidationContext;
pub use error::SchemaError;
pub use pointer::JsonPointer;
pub use registry::{RegistryError, SchemaRegistry};
pub use report::ValidationReport;
pub use validator::{is_valid, validate, KeywordValidatorFactory, Validator};

//! Validation context for schema reference resolution.
//!
//! This module provides the [`ValidationContext`] type that carries the
//! active schema container, the stack of references currently being
//! resolved, and the factory handle used to construct validators on demand.

use std::sync::Arc;

use crate::container::SchemaContainer;
use crate::validator::KeywordValidatorFactory;

/// Per-run state threaded through the validation call chain.
///
/// A context is created fresh for each top-level validation run and must not
/// be shared across concurrent runs. The resolution stack holds the
/// canonical form of every reference currently being resolved; a repeat is
/// the infinite-reference-loop condition and aborts that branch instead of
/// recursing further. This duplicate check is the engine's sole termination
/// guarantee for cyclic schemas.
pub struct ValidationContext {
    container: Arc<SchemaContainer>,
    resolution_stack: Vec<String>,
    factory: KeywordValidatorFactory,
}

impl ValidationContext {
    /// Creates a context bound to a schema container.
    pub fn new(container: Arc<SchemaContainer>) -> Self {
        Self {
            container,
            resolution_stack: Vec::new(),
            factory: KeywordValidatorFactory::default(),
        }
    }

    /// Returns the currently active schema container.
    pub fn container(&self) -> &Arc<SchemaContainer> {
        &self.container
    }

    /// Replaces the active container, returning the previous one.
    ///
    /// Called when a reference crosses into another document; the caller
    /// restores the previous container once the delegated subtree is done.
    pub fn set_container(&mut self, container: Arc<SchemaContainer>) -> Arc<SchemaContainer> {
        std::mem::replace(&mut self.container, container)
    }

    /// Returns the factory used to construct validators on demand.
    pub fn factory(&self) -> &KeywordValidatorFactory {
        &self.factory
    }

    /// Pushes a canonical reference onto the resolution stack.
    ///
    /// Returns false without pushing if the reference is already on the
    /// stack, which means resolution has looped back on itself.
    pub fn push_reference(&mut self, canonical: &str) -> bool {
        if self.resolution_stack.iter().any(|r| r == canonical) {
            return false;
        }
        self.resolution_stack.push(canonical.to_string());
        true
    }

    /// Pops the most recently pushed reference.
    pub fn pop_reference(&mut self) {
        self.resolution_stack.pop();
    }

    /// Returns the number of references currently being resolved.
    pub fn resolution_depth(&self) -> usize {
        self.resolution_stack.len()
    }
}

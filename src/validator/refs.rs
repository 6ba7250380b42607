//! Reference-resolving validator.
//!
//! A schema object containing `$ref` is wholly replaced by the referenced
//! schema: sibling keywords are ignored and the referenced schema validates
//! the same instance in place of the referring one.

use std::sync::Arc;

use serde_json::Value;

use crate::container::SchemaNode;
use crate::context::ValidationContext;
use crate::error::{json_type, SchemaError};
use crate::pointer::JsonPointer;
use crate::report::ValidationReport;

use super::{PendingValidation, ValidatorQueue};

/// Validator for the `$ref` keyword.
///
/// Construction only reads and validates the reference string; resolution
/// happens during `validate`, where the context's resolution stack guards
/// against reference cycles. The queue is a single-element delegation: the
/// target schema's validator runs against the same instance, and its result
/// is this validator's result. Unlike sibling keyword validators, this path
/// stops at its first (and only) failure, because a broken reference makes
/// continued validation of the branch meaningless.
pub struct RefValidator {
    reference: String,
    schema: SchemaNode,
    instance: Value,
    path: JsonPointer,
    queue: ValidatorQueue,
}

impl RefValidator {
    pub(crate) fn new(
        schema: SchemaNode,
        instance: Value,
        path: JsonPointer,
    ) -> Result<Self, SchemaError> {
        let reference = match schema.value().get("$ref") {
            Some(Value::String(reference)) => reference.clone(),
            Some(other) => {
                return Err(SchemaError::malformed(
                    "$ref",
                    format!("expected a reference string, got {}", json_type(other)),
                ))
            }
            None => return Err(SchemaError::malformed("$ref", "keyword is absent")),
        };
        Ok(Self {
            reference,
            schema,
            instance,
            path,
            queue: ValidatorQueue::new(),
        })
    }

    pub(crate) fn queue(&self) -> &ValidatorQueue {
        &self.queue
    }

    pub(crate) fn queue_mut(&mut self) -> &mut ValidatorQueue {
        &mut self.queue
    }

    pub(crate) fn validate(
        &mut self,
        context: &mut ValidationContext,
        report: &mut ValidationReport,
    ) -> Result<bool, SchemaError> {
        let canonical = self.schema.container().canonicalize(&self.reference);

        if !context.push_reference(&canonical) {
            report.add_message(format!(
                "{}: reference cycle detected at '{}'",
                self.path.location(),
                canonical
            ));
            return Ok(false);
        }

        let outcome = self.delegate(context, report);
        context.pop_reference();
        outcome
    }

    /// Resolves the target and drives its validator. Resolution failure is a
    /// schema error, terminal for this branch.
    fn delegate(
        &mut self,
        context: &mut ValidationContext,
        report: &mut ValidationReport,
    ) -> Result<bool, SchemaError> {
        let target = self.schema.container().resolve(&self.reference)?;

        // The target may live in another document; the context tracks the
        // active container for the duration of the delegated subtree.
        let previous = context.set_container(Arc::clone(target.container()));

        self.queue.enqueue(PendingValidation {
            schema: target,
            instance: self.instance.clone(),
            path: self.path.clone(),
        });

        let result = match self.queue.next_element(context) {
            Ok(mut child) => child.validate(context, report),
            Err(e) => Err(e),
        };

        context.set_container(previous);
        result
    }
}

//! Validator traversal protocol and validation entry points.
//!
//! Every validator follows the same contract: run its own direct checks,
//! then drain its queue of pending child validations, driving each child the
//! same way. Queues hold lightweight descriptors and construct child
//! validators on demand through the context's factory, so expansion of the
//! validation tree stays demand-driven and bounded to one level of pending
//! children at a time.
//!
//! Sibling children all run even after one fails, so the report is
//! exhaustive; only reference resolution short-circuits (see
//! [`RefValidator`]).

mod factory;
mod keyword;
mod refs;

pub use factory::KeywordValidatorFactory;
pub use refs::RefValidator;

use std::collections::VecDeque;
use std::sync::Arc;

use serde_json::Value;

use crate::container::{SchemaContainer, SchemaNode};
use crate::context::ValidationContext;
use crate::error::SchemaError;
use crate::pointer::JsonPointer;
use crate::report::ValidationReport;

use keyword::KeywordCheck;

/// Validates an instance document against a registered schema.
///
/// Constructs a fresh [`ValidationContext`], obtains the root validator for
/// the (root schema, instance) pair and drives it to completion. Every
/// violation accumulates into the returned report; success is
/// [`ValidationReport::is_success`] after the full drain.
///
/// # Errors
///
/// Returns a [`SchemaError`] for structural problems with the schema itself
/// (malformed keywords, unresolvable references). Instance violations are
/// never errors; they are messages in the report.
///
/// # Example
///
/// ```rust
/// use inquest::{validate, SchemaContainer};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let container = Arc::new(SchemaContainer::register(json!({
///     "type": "integer",
///     "divisibleBy": 3
/// })).unwrap());
///
/// assert!(validate(&container, &json!(9)).unwrap().is_success());
///
/// let report = validate(&container, &json!(10)).unwrap();
/// assert_eq!(report.messages(), &["(root): 10 is not a multiple of 3"]);
/// ```
pub fn validate(
    container: &Arc<SchemaContainer>,
    instance: &Value,
) -> Result<ValidationReport, SchemaError> {
    let mut context = ValidationContext::new(Arc::clone(container));
    let mut report = ValidationReport::new();

    let root = container.root_node();
    let mut validator = context
        .factory()
        .get_validator(&root, instance.clone(), JsonPointer::root())?;
    validator.validate(&mut context, &mut report)?;

    Ok(report)
}

/// Shorthand for [`validate`] when only the outcome matters.
pub fn is_valid(container: &Arc<SchemaContainer>, instance: &Value) -> Result<bool, SchemaError> {
    Ok(validate(container, instance)?.is_success())
}

/// The polymorphic unit of validation work.
///
/// A closed enumeration over the validator variants: a boolean schema's
/// unconditional accept/reject, a composed set of keyword checks, and the
/// reference resolver. Each validator is created by the factory for one
/// (schema fragment, instance) pair, consumed by exactly one `validate`
/// call, and discarded.
pub enum Validator {
    /// A boolean schema: `true` accepts everything, `false` rejects everything.
    Always(AlwaysValidator),
    /// The keyword checks and delegations of one schema object.
    Keywords(KeywordSetValidator),
    /// A `$ref` delegation to another schema node.
    Ref(RefValidator),
}

impl Validator {
    /// Runs this validator's own check, then drains its queue.
    ///
    /// Returns `Ok(true)` iff the instance satisfied this validator and all
    /// of its children. Messages for every violation are added to `report`.
    pub fn validate(
        &mut self,
        context: &mut ValidationContext,
        report: &mut ValidationReport,
    ) -> Result<bool, SchemaError> {
        match self {
            Self::Always(v) => Ok(v.validate(report)),
            Self::Keywords(v) => v.validate(context, report),
            Self::Ref(v) => v.validate(context, report),
        }
    }

    /// Returns true while the queue still holds pending child validations.
    pub fn has_more_elements(&self) -> bool {
        self.queue().has_more_elements()
    }

    /// Dequeues and constructs the next child validator.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::QueueExhausted`] if the queue is empty;
    /// callers check [`Validator::has_more_elements`] first.
    pub fn next_element(&mut self, context: &ValidationContext) -> Result<Validator, SchemaError> {
        self.queue_mut().next_element(context)
    }

    fn queue(&self) -> &ValidatorQueue {
        match self {
            Self::Always(v) => &v.queue,
            Self::Keywords(v) => &v.queue,
            Self::Ref(v) => v.queue(),
        }
    }

    fn queue_mut(&mut self) -> &mut ValidatorQueue {
        match self {
            Self::Always(v) => &mut v.queue,
            Self::Keywords(v) => &mut v.queue,
            Self::Ref(v) => v.queue_mut(),
        }
    }
}

/// One not-yet-run child validation: a schema fragment paired with the
/// instance fragment it will check and that fragment's location.
pub struct PendingValidation {
    pub(crate) schema: SchemaNode,
    pub(crate) instance: Value,
    pub(crate) path: JsonPointer,
}

/// The queue bookkeeping shared by every validator variant.
///
/// A FIFO of [`PendingValidation`] descriptors. Dequeuing constructs the
/// child validator through the context's factory, so a validator tree only
/// ever materializes one level of children ahead of the drive loop. Once
/// drained, a queue never refills.
#[derive(Default)]
pub struct ValidatorQueue {
    pending: VecDeque<PendingValidation>,
}

impl ValidatorQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn enqueue(&mut self, pending: PendingValidation) {
        self.pending.push_back(pending);
    }

    /// Returns true while pending child validations remain.
    pub fn has_more_elements(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Dequeues the next descriptor and builds its validator.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::QueueExhausted`] when called on an empty
    /// queue, and any construction error from the factory.
    pub fn next_element(&mut self, context: &ValidationContext) -> Result<Validator, SchemaError> {
        let pending = self.pending.pop_front().ok_or(SchemaError::QueueExhausted)?;
        context
            .factory()
            .get_validator(&pending.schema, pending.instance, pending.path)
    }
}

/// Validator for boolean schemas. A pure leaf: the queue stays empty.
pub struct AlwaysValidator {
    valid: bool,
    path: JsonPointer,
    queue: ValidatorQueue,
}

impl AlwaysValidator {
    fn new(valid: bool, path: JsonPointer) -> Self {
        Self {
            valid,
            path,
            queue: ValidatorQueue::new(),
        }
    }

    fn validate(&mut self, report: &mut ValidationReport) -> bool {
        if !self.valid {
            report.add_message(format!(
                "{}: instance rejected by schema 'false'",
                self.path.location()
            ));
        }
        self.valid
    }
}

/// The composed validator for one schema object's recognized keywords.
///
/// Direct checks run first, all of them regardless of failures; then the
/// queue of delegations (from `properties`, `items`) drains the same way.
/// Nothing here short-circuits: a consuming application relies on the report
/// listing every violation.
pub struct KeywordSetValidator {
    checks: Vec<KeywordCheck>,
    instance: Value,
    path: JsonPointer,
    queue: ValidatorQueue,
}

impl KeywordSetValidator {
    fn new(
        checks: Vec<KeywordCheck>,
        instance: Value,
        path: JsonPointer,
        queue: ValidatorQueue,
    ) -> Self {
        Self {
            checks,
            instance,
            path,
            queue,
        }
    }

    fn validate(
        &mut self,
        context: &mut ValidationContext,
        report: &mut ValidationReport,
    ) -> Result<bool, SchemaError> {
        let mut ok = true;

        for check in &self.checks {
            ok &= check.check(&self.instance, &self.path, report);
        }

        while self.queue.has_more_elements() {
            let mut child = self.queue.next_element(context)?;
            ok &= child.validate(context, report)?;
        }

        Ok(ok)
    }
}

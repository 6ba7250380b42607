//! Keyword validator dispatch.
//!
//! The factory inspects which recognized keywords a schema fragment carries
//! and composes the matching checks and delegations into one validator.
//! Dispatch is a closed match over [`Keyword`]; unrecognized keywords fall
//! through to an explicit ignore arm, so unknown vocabulary never fails
//! validation (forward compatibility).

use serde_json::{Map, Value};

use crate::container::SchemaNode;
use crate::error::{json_type, SchemaError};
use crate::pointer::JsonPointer;

use super::keyword::KeywordCheck;
use super::refs::RefValidator;
use super::{AlwaysValidator, KeywordSetValidator, PendingValidation, Validator, ValidatorQueue};

/// The recognized schema keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Ref,
    Type,
    Enum,
    Required,
    Minimum,
    Maximum,
    ExclusiveMinimum,
    ExclusiveMaximum,
    MinLength,
    MaxLength,
    MinItems,
    MaxItems,
    Pattern,
    DivisibleBy,
    Properties,
    Items,
}

impl Keyword {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "$ref" => Some(Self::Ref),
            "type" => Some(Self::Type),
            "enum" => Some(Self::Enum),
            "required" => Some(Self::Required),
            "minimum" => Some(Self::Minimum),
            "maximum" => Some(Self::Maximum),
            "exclusiveMinimum" => Some(Self::ExclusiveMinimum),
            "exclusiveMaximum" => Some(Self::ExclusiveMaximum),
            "minLength" => Some(Self::MinLength),
            "maxLength" => Some(Self::MaxLength),
            "minItems" => Some(Self::MinItems),
            "maxItems" => Some(Self::MaxItems),
            "pattern" => Some(Self::Pattern),
            "divisibleBy" => Some(Self::DivisibleBy),
            "properties" => Some(Self::Properties),
            "items" => Some(Self::Items),
            _ => None,
        }
    }
}

/// Maps a schema fragment and instance to the validator that checks them.
///
/// Construction is where schema problems surface: a malformed keyword value
/// fails with a [`SchemaError`] before any instance is inspected, keeping
/// schema errors disjoint from validation failures.
#[derive(Debug, Clone, Default)]
pub struct KeywordValidatorFactory;

impl KeywordValidatorFactory {
    /// Builds the validator for one (schema fragment, instance) pair.
    ///
    /// Boolean schemas accept or reject everything. An object carrying
    /// `$ref` produces a reference resolver, ignoring sibling keywords.
    /// Any other object composes every recognized keyword present.
    pub fn get_validator(
        &self,
        schema: &SchemaNode,
        instance: Value,
        path: JsonPointer,
    ) -> Result<Validator, SchemaError> {
        match schema.value() {
            Value::Bool(valid) => Ok(Validator::Always(AlwaysValidator::new(*valid, path))),
            Value::Object(map) => {
                if map.contains_key("$ref") {
                    let validator = RefValidator::new(schema.clone(), instance, path)?;
                    Ok(Validator::Ref(validator))
                } else {
                    let validator = self.keyword_set(schema, map, instance, path)?;
                    Ok(Validator::Keywords(validator))
                }
            }
            other => Err(SchemaError::InvalidDocument(json_type(other))),
        }
    }

    fn keyword_set(
        &self,
        schema: &SchemaNode,
        map: &Map<String, Value>,
        instance: Value,
        path: JsonPointer,
    ) -> Result<KeywordSetValidator, SchemaError> {
        let mut checks = Vec::new();
        let mut queue = ValidatorQueue::new();

        for (name, value) in map {
            let Some(keyword) = Keyword::from_name(name) else {
                // Unrecognized keywords never fail validation.
                continue;
            };
            match keyword {
                Keyword::Ref => unreachable!("$ref fragments build a RefValidator"),
                Keyword::Type => checks.push(KeywordCheck::type_check(value)?),
                Keyword::Enum => checks.push(KeywordCheck::enumeration(value)?),
                Keyword::Required => checks.push(KeywordCheck::required(value)?),
                Keyword::Minimum => {
                    checks.push(KeywordCheck::minimum(value, map.get("exclusiveMinimum"))?)
                }
                Keyword::Maximum => {
                    checks.push(KeywordCheck::maximum(value, map.get("exclusiveMaximum"))?)
                }
                // Modifiers, consumed by minimum/maximum above.
                Keyword::ExclusiveMinimum | Keyword::ExclusiveMaximum => {}
                Keyword::MinLength => checks.push(KeywordCheck::min_length(value)?),
                Keyword::MaxLength => checks.push(KeywordCheck::max_length(value)?),
                Keyword::MinItems => checks.push(KeywordCheck::min_items(value)?),
                Keyword::MaxItems => checks.push(KeywordCheck::max_items(value)?),
                Keyword::Pattern => checks.push(KeywordCheck::pattern(value)?),
                Keyword::DivisibleBy => checks.push(KeywordCheck::divisible_by(value)?),
                Keyword::Properties => {
                    enqueue_properties(schema, value, &instance, &path, &mut queue)?
                }
                Keyword::Items => enqueue_items(schema, value, &instance, &path, &mut queue)?,
            }
        }

        Ok(KeywordSetValidator::new(checks, instance, path, queue))
    }
}

/// Enqueues one delegation per property that both the schema constrains and
/// the instance carries. How many children are needed cannot be known until
/// the instance is inspected, which is why fan-out happens here and not in a
/// static schema tree.
fn enqueue_properties(
    schema: &SchemaNode,
    value: &Value,
    instance: &Value,
    path: &JsonPointer,
    queue: &mut ValidatorQueue,
) -> Result<(), SchemaError> {
    let Value::Object(properties) = value else {
        return Err(SchemaError::malformed(
            "properties",
            format!("expected an object of sub-schemas, got {}", json_type(value)),
        ));
    };
    let Value::Object(members) = instance else {
        return Ok(());
    };
    let Some(parent) = schema.child("properties") else {
        return Ok(());
    };

    for name in properties.keys() {
        let (Some(member), Some(child)) = (members.get(name), parent.child(name)) else {
            continue;
        };
        queue.enqueue(PendingValidation {
            schema: child,
            instance: member.clone(),
            path: path.push(name),
        });
    }
    Ok(())
}

/// Enqueues one delegation per array element. The single-schema form applies
/// to every element; the tuple form pairs elements with positions and leaves
/// elements beyond the tuple unconstrained.
fn enqueue_items(
    schema: &SchemaNode,
    value: &Value,
    instance: &Value,
    path: &JsonPointer,
    queue: &mut ValidatorQueue,
) -> Result<(), SchemaError> {
    // The keyword value's shape is a schema concern; it must fail even when
    // the instance is not an array.
    if !matches!(value, Value::Object(_) | Value::Bool(_) | Value::Array(_)) {
        return Err(SchemaError::malformed(
            "items",
            format!("expected a schema or array of schemas, got {}", json_type(value)),
        ));
    }

    let Value::Array(elements) = instance else {
        return Ok(());
    };
    let Some(items) = schema.child("items") else {
        return Ok(());
    };

    match value {
        Value::Array(positions) => {
            for (i, element) in elements.iter().enumerate().take(positions.len()) {
                let Some(position) = items.child_index(i) else {
                    break;
                };
                queue.enqueue(PendingValidation {
                    schema: position,
                    instance: element.clone(),
                    path: path.push_index(i),
                });
            }
        }
        _ => {
            for (i, element) in elements.iter().enumerate() {
                queue.enqueue(PendingValidation {
                    schema: items.clone(),
                    instance: element.clone(),
                    path: path.push_index(i),
                });
            }
        }
    }
    Ok(())
}

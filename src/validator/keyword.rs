//! Keyword checks.
//!
//! Each recognized schema keyword that constrains an instance directly (as
//! opposed to delegating to sub-schemas) parses its configuration once at
//! validator-construction time into a [`KeywordCheck`]. Malformed keyword
//! values are schema errors and fail construction; a failing instance only
//! ever adds messages to the report.
//!
//! Numeric keywords use exact decimal arithmetic throughout: a remainder or
//! bound computed in floating point can misreport values near zero.

use bigdecimal::{BigDecimal, Zero};
use regex::Regex;
use serde_json::{Number, Value};

use crate::error::{json_type, SchemaError};
use crate::pointer::JsonPointer;
use crate::report::ValidationReport;

/// A parsed, ready-to-run check for one keyword.
///
/// Checks are pure leaves: they never enqueue child validators. A check that
/// does not apply to the instance's type passes, leaving type enforcement to
/// the `type` keyword.
pub(crate) enum KeywordCheck {
    Type { allowed: Vec<TypeName> },
    Enum { choices: Vec<Value> },
    Required { names: Vec<String> },
    Minimum { bound: BigDecimal, exclusive: bool },
    Maximum { bound: BigDecimal, exclusive: bool },
    MinLength { min: u64 },
    MaxLength { max: u64 },
    MinItems { min: u64 },
    MaxItems { max: u64 },
    Pattern { regex: Regex },
    DivisibleBy { divisor: BigDecimal },
}

impl KeywordCheck {
    pub(crate) fn type_check(value: &Value) -> Result<Self, SchemaError> {
        let allowed = match value {
            Value::String(name) => vec![TypeName::parse(name)?],
            Value::Array(names) => {
                if names.is_empty() {
                    return Err(SchemaError::malformed("type", "type list must not be empty"));
                }
                names
                    .iter()
                    .map(|name| match name {
                        Value::String(name) => TypeName::parse(name),
                        other => Err(SchemaError::malformed(
                            "type",
                            format!("expected a type name, got {}", json_type(other)),
                        )),
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
            other => {
                return Err(SchemaError::malformed(
                    "type",
                    format!("expected a type name or list of type names, got {}", json_type(other)),
                ))
            }
        };
        Ok(Self::Type { allowed })
    }

    pub(crate) fn enumeration(value: &Value) -> Result<Self, SchemaError> {
        match value {
            Value::Array(choices) if !choices.is_empty() => Ok(Self::Enum {
                choices: choices.clone(),
            }),
            Value::Array(_) => Err(SchemaError::malformed("enum", "choice list must not be empty")),
            other => Err(SchemaError::malformed(
                "enum",
                format!("expected an array of choices, got {}", json_type(other)),
            )),
        }
    }

    pub(crate) fn required(value: &Value) -> Result<Self, SchemaError> {
        let names = match value {
            Value::Array(names) => names
                .iter()
                .map(|name| match name {
                    Value::String(name) => Ok(name.clone()),
                    other => Err(SchemaError::malformed(
                        "required",
                        format!("expected a property name, got {}", json_type(other)),
                    )),
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => {
                return Err(SchemaError::malformed(
                    "required",
                    format!("expected an array of property names, got {}", json_type(other)),
                ))
            }
        };
        Ok(Self::Required { names })
    }

    pub(crate) fn minimum(value: &Value, exclusive: Option<&Value>) -> Result<Self, SchemaError> {
        Ok(Self::Minimum {
            bound: schema_decimal(value, "minimum")?,
            exclusive: exclusive_flag(exclusive, "exclusiveMinimum")?,
        })
    }

    pub(crate) fn maximum(value: &Value, exclusive: Option<&Value>) -> Result<Self, SchemaError> {
        Ok(Self::Maximum {
            bound: schema_decimal(value, "maximum")?,
            exclusive: exclusive_flag(exclusive, "exclusiveMaximum")?,
        })
    }

    pub(crate) fn min_length(value: &Value) -> Result<Self, SchemaError> {
        Ok(Self::MinLength {
            min: schema_count(value, "minLength")?,
        })
    }

    pub(crate) fn max_length(value: &Value) -> Result<Self, SchemaError> {
        Ok(Self::MaxLength {
            max: schema_count(value, "maxLength")?,
        })
    }

    pub(crate) fn min_items(value: &Value) -> Result<Self, SchemaError> {
        Ok(Self::MinItems {
            min: schema_count(value, "minItems")?,
        })
    }

    pub(crate) fn max_items(value: &Value) -> Result<Self, SchemaError> {
        Ok(Self::MaxItems {
            max: schema_count(value, "maxItems")?,
        })
    }

    pub(crate) fn pattern(value: &Value) -> Result<Self, SchemaError> {
        match value {
            Value::String(pattern) => Ok(Self::Pattern {
                regex: Regex::new(pattern)
                    .map_err(|e| SchemaError::malformed("pattern", e.to_string()))?,
            }),
            other => Err(SchemaError::malformed(
                "pattern",
                format!("expected a pattern string, got {}", json_type(other)),
            )),
        }
    }

    pub(crate) fn divisible_by(value: &Value) -> Result<Self, SchemaError> {
        let divisor = schema_decimal(value, "divisibleBy")?;
        if divisor.is_zero() {
            return Err(SchemaError::malformed("divisibleBy", "divisor must not be zero"));
        }
        Ok(Self::DivisibleBy { divisor })
    }

    /// Runs this check against the instance, adding a message per violation.
    ///
    /// Returns true if the instance passes. Checks never short-circuit one
    /// another; the caller runs every sibling check regardless of failures.
    pub(crate) fn check(
        &self,
        instance: &Value,
        path: &JsonPointer,
        report: &mut ValidationReport,
    ) -> bool {
        match self {
            Self::Type { allowed } => {
                if allowed.iter().any(|t| t.admits(instance)) {
                    return true;
                }
                let names: Vec<_> = allowed.iter().map(|t| t.name()).collect();
                report.add_message(format!(
                    "{}: expected {}, got {}",
                    path.location(),
                    names.join(" or "),
                    json_type(instance)
                ));
                false
            }
            Self::Enum { choices } => {
                if choices.contains(instance) {
                    return true;
                }
                report.add_message(format!(
                    "{}: instance is not one of the enumerated values",
                    path.location()
                ));
                false
            }
            Self::Required { names } => {
                let Value::Object(members) = instance else { return true };
                let mut ok = true;
                for name in names {
                    if !members.contains_key(name) {
                        report.add_message(format!(
                            "{}: missing required property '{}'",
                            path.location(),
                            name
                        ));
                        ok = false;
                    }
                }
                ok
            }
            Self::Minimum { bound, exclusive } => {
                let Value::Number(n) = instance else { return true };
                let Some(d) = instance_decimal(n, path, report) else { return false };
                let ok = if *exclusive { d > *bound } else { d >= *bound };
                if !ok {
                    let relation = if *exclusive { "greater than" } else { "at least" };
                    report.add_message(format!(
                        "{}: must be {} {}, got {}",
                        path.location(),
                        relation,
                        bound,
                        n
                    ));
                }
                ok
            }
            Self::Maximum { bound, exclusive } => {
                let Value::Number(n) = instance else { return true };
                let Some(d) = instance_decimal(n, path, report) else { return false };
                let ok = if *exclusive { d < *bound } else { d <= *bound };
                if !ok {
                    let relation = if *exclusive { "less than" } else { "at most" };
                    report.add_message(format!(
                        "{}: must be {} {}, got {}",
                        path.location(),
                        relation,
                        bound,
                        n
                    ));
                }
                ok
            }
            Self::MinLength { min } => {
                let Value::String(s) = instance else { return true };
                let len = s.chars().count() as u64;
                if len >= *min {
                    return true;
                }
                report.add_message(format!(
                    "{}: must have at least {} characters, got {}",
                    path.location(),
                    min,
                    len
                ));
                false
            }
            Self::MaxLength { max } => {
                let Value::String(s) = instance else { return true };
                let len = s.chars().count() as u64;
                if len <= *max {
                    return true;
                }
                report.add_message(format!(
                    "{}: must have at most {} characters, got {}",
                    path.location(),
                    max,
                    len
                ));
                false
            }
            Self::MinItems { min } => {
                let Value::Array(items) = instance else { return true };
                let len = items.len() as u64;
                if len >= *min {
                    return true;
                }
                report.add_message(format!(
                    "{}: must have at least {} items, got {}",
                    path.location(),
                    min,
                    len
                ));
                false
            }
            Self::MaxItems { max } => {
                let Value::Array(items) = instance else { return true };
                let len = items.len() as u64;
                if len <= *max {
                    return true;
                }
                report.add_message(format!(
                    "{}: must have at most {} items, got {}",
                    path.location(),
                    max,
                    len
                ));
                false
            }
            Self::Pattern { regex } => {
                let Value::String(s) = instance else { return true };
                if regex.is_match(s) {
                    return true;
                }
                report.add_message(format!(
                    "{}: '{}' does not match pattern '{}'",
                    path.location(),
                    s,
                    regex.as_str()
                ));
                false
            }
            Self::DivisibleBy { divisor } => {
                let Value::Number(n) = instance else { return true };
                let Some(d) = instance_decimal(n, path, report) else { return false };
                if (&d % divisor).is_zero() {
                    return true;
                }
                report.add_message(format!(
                    "{}: {} is not a multiple of {}",
                    path.location(),
                    n,
                    divisor
                ));
                false
            }
        }
    }
}

/// A JSON type name recognized by the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeName {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl TypeName {
    fn parse(name: &str) -> Result<Self, SchemaError> {
        match name {
            "null" => Ok(Self::Null),
            "boolean" => Ok(Self::Boolean),
            "integer" => Ok(Self::Integer),
            "number" => Ok(Self::Number),
            "string" => Ok(Self::String),
            "array" => Ok(Self::Array),
            "object" => Ok(Self::Object),
            other => Err(SchemaError::malformed(
                "type",
                format!("unknown type name '{}'", other),
            )),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    fn admits(&self, instance: &Value) -> bool {
        match self {
            Self::Null => instance.is_null(),
            Self::Boolean => instance.is_boolean(),
            Self::Number => instance.is_number(),
            Self::Integer => match instance {
                Value::Number(n) => {
                    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
                }
                _ => false,
            },
            Self::String => instance.is_string(),
            Self::Array => instance.is_array(),
            Self::Object => instance.is_object(),
        }
    }
}

/// Parses a keyword value that must be a number into an exact decimal.
fn schema_decimal(value: &Value, keyword: &'static str) -> Result<BigDecimal, SchemaError> {
    match value {
        Value::Number(n) => n
            .to_string()
            .parse()
            .map_err(|_| SchemaError::malformed(keyword, format!("'{}' is not a decimal number", n))),
        other => Err(SchemaError::malformed(
            keyword,
            format!("expected a number, got {}", json_type(other)),
        )),
    }
}

/// Parses a keyword value that must be a non-negative integer count.
fn schema_count(value: &Value, keyword: &'static str) -> Result<u64, SchemaError> {
    value.as_u64().ok_or_else(|| {
        SchemaError::malformed(keyword, format!("expected a non-negative integer, got {}", value))
    })
}

fn exclusive_flag(value: Option<&Value>, keyword: &'static str) -> Result<bool, SchemaError> {
    match value {
        None => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => Err(SchemaError::malformed(
            keyword,
            format!("expected a boolean, got {}", json_type(other)),
        )),
    }
}

/// Converts an instance number to an exact decimal, reporting the (in
/// practice unreachable) case of a number the decimal parser cannot take.
fn instance_decimal(
    n: &Number,
    path: &JsonPointer,
    report: &mut ValidationReport,
) -> Option<BigDecimal> {
    match n.to_string().parse() {
        Ok(d) => Some(d),
        Err(_) => {
            report.add_message(format!(
                "{}: {} cannot be represented as an exact decimal",
                path.location(),
                n
            ));
            None
        }
    }
}

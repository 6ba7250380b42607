//! Structural schema errors.
//!
//! [`SchemaError`] covers problems with the schema itself: malformed
//! documents, bad pointers, unresolvable references, and malformed keyword
//! values. These surface as `Err` values at registration, resolution, or
//! validator-construction time and are never folded into a
//! [`ValidationReport`](crate::ValidationReport), which only ever records
//! instance violations.

/// An error in the schema itself, as opposed to a failing instance.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The document (or a reference target) is not an object or a boolean.
    #[error("schema must be an object or a boolean, got {0}")]
    InvalidDocument(&'static str),

    /// A pointer string could not be parsed.
    #[error("invalid JSON pointer '{0}'")]
    InvalidPointer(String),

    /// A reference pointer designates no sub-schema in its container.
    #[error("no schema at pointer '{0}'")]
    PointerNotFound(String),

    /// A reference names a base identifier this container cannot reach.
    #[error("no loader available for schemas under base '{0}'")]
    UnknownBase(String),

    /// A recognized keyword carries a value it cannot work with.
    #[error("malformed value for keyword '{keyword}': {reason}")]
    MalformedKeyword {
        /// The offending keyword name.
        keyword: &'static str,
        /// What is wrong with its value.
        reason: String,
    },

    /// `next_element` was called on a drained validator queue.
    #[error("validator queue is exhausted")]
    QueueExhausted,
}

impl SchemaError {
    /// Shorthand for a [`SchemaError::MalformedKeyword`].
    pub(crate) fn malformed(keyword: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedKeyword {
            keyword,
            reason: reason.into(),
        }
    }
}

/// Returns the JSON type name of a value, for error messages.
pub(crate) fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let error = SchemaError::malformed("divisibleBy", "divisor must not be zero");
        assert_eq!(
            error.to_string(),
            "malformed value for keyword 'divisibleBy': divisor must not be zero"
        );

        let error = SchemaError::PointerNotFound("/definitions/missing".to_string());
        assert_eq!(error.to_string(), "no schema at pointer '/definitions/missing'");
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type(&json!(null)), "null");
        assert_eq!(json_type(&json!(true)), "boolean");
        assert_eq!(json_type(&json!(1.5)), "number");
        assert_eq!(json_type(&json!("x")), "string");
        assert_eq!(json_type(&json!([])), "array");
        assert_eq!(json_type(&json!({})), "object");
    }
}

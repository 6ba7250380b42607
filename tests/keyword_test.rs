//! Tests for keyword validation through the full engine.

use std::sync::Arc;

use inquest::{is_valid, validate, SchemaContainer, SchemaError};
use serde_json::json;

fn container(document: serde_json::Value) -> Arc<SchemaContainer> {
    Arc::new(SchemaContainer::register(document).unwrap())
}

#[test]
fn test_divisible_by() {
    let schema = container(json!({ "divisibleBy": 3 }));

    assert!(validate(&schema, &json!(9)).unwrap().is_success());

    let report = validate(&schema, &json!(10)).unwrap();
    assert!(!report.is_success());
    assert_eq!(report.messages(), &["(root): 10 is not a multiple of 3"]);
}

#[test]
fn test_divisible_by_zero_is_a_schema_error_not_a_report_entry() {
    let schema = container(json!({ "divisibleBy": 0 }));

    match validate(&schema, &json!(9)) {
        Err(SchemaError::MalformedKeyword { keyword, .. }) => assert_eq!(keyword, "divisibleBy"),
        other => panic!("expected MalformedKeyword, got {:?}", other),
    }
}

#[test]
fn test_divisible_by_uses_exact_decimal_arithmetic() {
    // 0.1 has no exact binary representation; a float remainder would
    // misreport these.
    let schema = container(json!({ "divisibleBy": 0.1 }));

    assert!(is_valid(&schema, &json!(0.3)).unwrap());
    assert!(is_valid(&schema, &json!(1.7)).unwrap());
    assert!(!is_valid(&schema, &json!(0.35)).unwrap());
}

#[test]
fn test_two_failing_keywords_give_two_messages() {
    let schema = container(json!({ "divisibleBy": 3, "maximum": 5 }));

    let report = validate(&schema, &json!(10)).unwrap();
    assert!(!report.is_success());
    assert_eq!(report.messages().len(), 2);
    // Sibling keyword validators all run even after one fails.
    assert!(report.messages().contains(&"(root): 10 is not a multiple of 3".to_string()));
    assert!(report.messages().contains(&"(root): must be at most 5, got 10".to_string()));
}

#[test]
fn test_unknown_keywords_never_affect_the_outcome() {
    let plain = container(json!({ "divisibleBy": 2 }));
    let decorated = container(json!({
        "divisibleBy": 2,
        "x-vendor-extension": { "anything": [1, 2, 3] },
        "description": "counts by two"
    }));

    for instance in [json!(4), json!(5), json!("other")] {
        assert_eq!(
            validate(&plain, &instance).unwrap(),
            validate(&decorated, &instance).unwrap()
        );
    }
}

#[test]
fn test_properties_delegation_reports_member_paths() {
    let schema = container(json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "minLength": 1 },
            "age": { "type": "integer", "minimum": 0 }
        }
    }));

    assert!(is_valid(&schema, &json!({ "name": "Ada", "age": 36 })).unwrap());

    let report = validate(&schema, &json!({ "name": "", "age": -1 })).unwrap();
    assert_eq!(
        report.messages(),
        &[
            "/age: must be at least 0, got -1",
            "/name: must have at least 1 characters, got 0",
        ]
    );
}

#[test]
fn test_absent_properties_are_not_validated() {
    let schema = container(json!({
        "properties": { "name": { "type": "string" } }
    }));

    // No "required" keyword: a missing member is simply not delegated to.
    assert!(is_valid(&schema, &json!({})).unwrap());
}

#[test]
fn test_required_and_properties_compose() {
    let schema = container(json!({
        "required": ["name"],
        "properties": { "name": { "minLength": 2 } }
    }));

    let report = validate(&schema, &json!({})).unwrap();
    assert_eq!(report.messages(), &["(root): missing required property 'name'"]);

    let report = validate(&schema, &json!({ "name": "x" })).unwrap();
    assert_eq!(report.messages(), &["/name: must have at least 2 characters, got 1"]);
}

#[test]
fn test_items_single_schema_applies_to_every_element() {
    let schema = container(json!({
        "items": { "type": "integer", "divisibleBy": 2 }
    }));

    assert!(is_valid(&schema, &json!([2, 4, 6])).unwrap());

    let report = validate(&schema, &json!([2, 3, "x"])).unwrap();
    assert_eq!(
        report.messages(),
        &[
            "/1: 3 is not a multiple of 2",
            "/2: expected integer, got string",
        ]
    );
}

#[test]
fn test_items_tuple_form() {
    let schema = container(json!({
        "items": [{ "type": "string" }, { "type": "integer" }]
    }));

    assert!(is_valid(&schema, &json!(["id", 3])).unwrap());
    // Elements beyond the tuple are unconstrained.
    assert!(is_valid(&schema, &json!(["id", 3, null, {}])).unwrap());

    let report = validate(&schema, &json!([7, "three"])).unwrap();
    assert_eq!(
        report.messages(),
        &[
            "/0: expected string, got number",
            "/1: expected integer, got string",
        ]
    );
}

#[test]
fn test_boolean_sub_schemas_in_items() {
    let schema = container(json!({ "items": false }));

    assert!(is_valid(&schema, &json!([])).unwrap());

    let report = validate(&schema, &json!([1, 2])).unwrap();
    assert_eq!(report.messages().len(), 2);
}

#[test]
fn test_nested_delegation_paths() {
    let schema = container(json!({
        "properties": {
            "users": {
                "items": {
                    "properties": { "email": { "pattern": "@" } }
                }
            }
        }
    }));

    let instance = json!({ "users": [{ "email": "a@b" }, { "email": "nope" }] });
    let report = validate(&schema, &instance).unwrap();
    assert_eq!(
        report.messages(),
        &["/users/1/email: 'nope' does not match pattern '@'"]
    );
}

#[test]
fn test_enum_and_type_compose() {
    let schema = container(json!({
        "type": "string",
        "enum": ["red", "green", "blue"]
    }));

    assert!(is_valid(&schema, &json!("green")).unwrap());

    let report = validate(&schema, &json!(3)).unwrap();
    assert_eq!(report.messages().len(), 2);
}

#[test]
fn test_exclusive_bounds() {
    let schema = container(json!({
        "minimum": 0,
        "exclusiveMinimum": true,
        "maximum": 10
    }));

    assert!(is_valid(&schema, &json!(1)).unwrap());
    assert!(is_valid(&schema, &json!(10)).unwrap());
    assert!(!is_valid(&schema, &json!(0)).unwrap());
    assert!(!is_valid(&schema, &json!(11)).unwrap());
}

#[test]
fn test_malformed_keyword_values_fail_before_any_report() {
    for document in [
        json!({ "type": "whatever" }),
        json!({ "pattern": "(" }),
        json!({ "minLength": -1 }),
        json!({ "enum": [] }),
        json!({ "required": [1] }),
        json!({ "minimum": "low" }),
        json!({ "properties": [] }),
        json!({ "items": 3 }),
    ] {
        let schema = container(document.clone());
        assert!(
            validate(&schema, &json!(null)).is_err(),
            "expected schema error for {}",
            document
        );
    }
}

#[test]
fn test_array_length_bounds() {
    let schema = container(json!({ "minItems": 1, "maxItems": 2 }));

    assert!(!is_valid(&schema, &json!([])).unwrap());
    assert!(is_valid(&schema, &json!([1])).unwrap());
    assert!(!is_valid(&schema, &json!([1, 2, 3])).unwrap());
}

//! Integration tests for number schemas.

use jsonguard::{Schema, SchemaErrorKind};
use serde_json::json;

#[test]
fn test_inclusive_bounds() {
    let schema = Schema::compile(&json!({"type": "number", "minimum": 0, "maximum": 1.5})).unwrap();

    assert!(schema.validate(&json!(0)).is_ok());
    assert!(schema.validate(&json!(1.5)).is_ok());

    let error = schema.validate(&json!(-0.5)).unwrap_err();
    assert_eq!(error.keyword(), Some("minimum"));
    assert_eq!(error.expected, "at least 0");
    assert_eq!(error.got, "-0.5");

    let error = schema.validate(&json!(2)).unwrap_err();
    assert_eq!(error.keyword(), Some("maximum"));
}

#[test]
fn test_exclusive_bounds_reject_the_bound() {
    let schema = Schema::compile(&json!({"type": "number", "exclusiveMaximum": 5})).unwrap();
    assert!(schema.validate(&json!(4.999)).is_ok());

    let error = schema.validate(&json!(5)).unwrap_err();
    assert_eq!(error.keyword(), Some("exclusiveMaximum"));
    assert_eq!(error.expected, "less than 5");

    let schema = Schema::compile(&json!({"type": "number", "exclusiveMinimum": 0})).unwrap();
    assert!(schema.validate(&json!(0.001)).is_ok());
    assert!(schema.validate(&json!(0)).is_err());
}

#[test]
fn test_multiple_of() {
    let schema = Schema::compile(&json!({"type": "number", "multipleOf": 0.5})).unwrap();
    assert!(schema.validate(&json!(1.5)).is_ok());
    assert!(schema.validate(&json!(-2)).is_ok());

    let error = schema.validate(&json!(1.2)).unwrap_err();
    assert_eq!(error.keyword(), Some("multipleOf"));
    assert_eq!(error.expected, "a multiple of 0.5");
}

#[test]
fn test_zero_divisor_is_a_configuration_error() {
    let errors = Schema::compile(&json!({"type": "number", "multipleOf": 0})).unwrap_err();
    assert_eq!(errors.first().kind, SchemaErrorKind::ZeroDivisor("multipleOf"));
    assert_eq!(errors.first().path.to_string(), "multipleOf");
}

#[test]
fn test_non_numeric_bound() {
    let errors = Schema::compile(&json!({"type": "number", "minimum": "0"})).unwrap_err();
    assert!(matches!(
        errors.first().kind,
        SchemaErrorKind::InvalidKeyword { keyword: "minimum", .. }
    ));
}

#[test]
fn test_integers_are_numbers() {
    let schema = Schema::compile(&json!({"type": "number"})).unwrap();
    assert!(schema.validate(&json!(3)).is_ok());
    assert!(schema.validate(&json!(3.25)).is_ok());

    let error = schema.validate(&json!("3")).unwrap_err();
    assert_eq!(error.keyword(), Some("type"));
    assert_eq!(error.got, "string");
}

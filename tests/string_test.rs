//! Integration tests for string schemas.

use jsonguard::{Schema, SchemaErrorKind};
use serde_json::json;

#[test]
fn test_length_bounds() {
    let schema =
        Schema::compile(&json!({"type": "string", "minLength": 2, "maxLength": 4})).unwrap();

    assert!(schema.validate(&json!("ab")).is_ok());
    assert!(schema.validate(&json!("abcd")).is_ok());

    let error = schema.validate(&json!("a")).unwrap_err();
    assert_eq!(error.keyword(), Some("minLength"));
    assert_eq!(error.expected, "at least 2 characters");
    assert_eq!(error.got, "1 characters");

    let error = schema.validate(&json!("abcde")).unwrap_err();
    assert_eq!(error.keyword(), Some("maxLength"));
}

#[test]
fn test_length_counts_characters_not_bytes() {
    let schema = Schema::compile(&json!({"type": "string", "maxLength": 3})).unwrap();
    assert!(schema.validate(&json!("日本語")).is_ok());
    assert!(schema.validate(&json!("日本語だ")).is_err());
}

#[test]
fn test_pattern_matches_anywhere() {
    let schema = Schema::compile(&json!({"type": "string", "pattern": "b"})).unwrap();
    assert!(schema.validate(&json!("abc")).is_ok());

    let error = schema.validate(&json!("xyz")).unwrap_err();
    assert_eq!(error.keyword(), Some("pattern"));
    assert_eq!(error.got, "xyz");
}

#[test]
fn test_anchored_pattern() {
    let schema = Schema::compile(&json!({"type": "string", "pattern": "^[a-z]+$"})).unwrap();
    assert!(schema.validate(&json!("abc")).is_ok());
    assert!(schema.validate(&json!("abc1")).is_err());
}

#[test]
fn test_formats() {
    let cases = [
        ("date-time", "2024-05-01T10:00:00Z", "yesterday"),
        ("date", "2024-05-01", "05/01/2024"),
        ("time", "10:00:00", "10am"),
        ("duration", "P1DT2H", "2 hours"),
        ("email", "ada@example.com", "ada"),
        ("uri", "https://example.com", "http://[::1"),
        ("ipv4", "10.0.0.1", "10.0.0"),
        ("ipv6", "fe80::1", "fe80::g"),
        ("uuid", "67e55044-10b1-426f-9247-bb680e5fe0c8", "67e55044"),
        ("regex", "[a-z]+", "[a-z"),
    ];

    for (format, good, bad) in cases {
        let schema = Schema::compile(&json!({"type": "string", "format": format})).unwrap();
        assert!(schema.validate(&json!(good)).is_ok(), "{format} should accept {good}");

        let error = schema.validate(&json!(bad)).unwrap_err();
        assert_eq!(error.keyword(), Some("format"));
        assert_eq!(error.expected, format);
        assert_eq!(error.got, bad);
    }
}

#[test]
fn test_unknown_format_is_a_configuration_error() {
    let errors = Schema::compile(&json!({"type": "string", "format": "colour"})).unwrap_err();
    assert_eq!(
        errors.first().kind,
        SchemaErrorKind::UnknownFormat("colour".to_string())
    );
}

#[test]
fn test_invalid_pattern_is_a_configuration_error() {
    let errors = Schema::compile(&json!({"type": "string", "pattern": "(unclosed"})).unwrap_err();
    assert!(matches!(
        errors.first().kind,
        SchemaErrorKind::InvalidPattern { keyword: "pattern", .. }
    ));
}

#[test]
fn test_type_mismatch() {
    let schema = Schema::compile(&json!({"type": "string", "minLength": 1})).unwrap();

    let error = schema.validate(&json!(5)).unwrap_err();
    assert_eq!(error.keyword(), Some("type"));
    assert_eq!(error.expected, "string");
    assert_eq!(error.got, "number");

    assert!(schema.validate(&json!(null)).is_err());
    assert!(schema.validate(&json!(["a"])).is_err());
}

#[test]
fn test_error_display() {
    let schema = Schema::compile(&json!({"type": "string", "minLength": 2})).unwrap();
    let error = schema.validate(&json!("a")).unwrap_err();
    assert_eq!(
        error.to_string(),
        "(root): failed to validate minLength; got: 1 characters, expected: at least 2 characters"
    );
}

//! Integration tests for the schema registry.

use std::fs;

use jsonguard::{Error, RegistryError, SchemaRegistry, SourceError};
use serde_json::json;

#[test]
fn test_register_and_get() {
    let registry = SchemaRegistry::new();
    registry
        .register("Email", &json!({"type": "string", "format": "email"}))
        .unwrap();

    assert!(registry.get("Email").is_some());
    assert!(registry.get("Phone").is_none());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_duplicate_registration_fails() {
    let registry = SchemaRegistry::new();
    registry.register("Id", &json!({"type": "integer"})).unwrap();

    let err = registry.register("Id", &json!({"type": "string"})).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName(ref name) if name == "Id"));
    assert_eq!(err.to_string(), "schema 'Id' already registered");
}

#[test]
fn test_validate_with_registry() {
    let registry = SchemaRegistry::new();
    registry
        .register("Age", &json!({"type": "integer", "minimum": 0, "maximum": 150}))
        .unwrap();

    assert!(registry.validate("Age", &json!(30)).is_ok());

    let err = registry.validate("Age", &json!(-1)).unwrap_err();
    assert_eq!(err.as_validation().unwrap().keyword(), Some("minimum"));
}

#[test]
fn test_validate_missing_schema() {
    let registry = SchemaRegistry::new();
    let err = registry.validate("Nope", &json!(1)).unwrap_err();
    assert!(matches!(
        err,
        Error::Registry(RegistryError::SchemaNotFound(ref name)) if name == "Nope"
    ));
}

#[test]
fn test_load_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("user.json"), r#"{"type": "object", "required": ["id"]}"#).unwrap();
    fs::write(dir.path().join("tag.json"), r#"{"type": "string", "maxLength": 10}"#).unwrap();
    fs::write(dir.path().join("notes.txt"), "not a schema").unwrap();

    let registry = SchemaRegistry::new();
    assert_eq!(registry.load_dir(dir.path()).unwrap(), 2);
    assert_eq!(registry.names(), vec!["tag".to_string(), "user".to_string()]);

    assert!(registry.validate("user", &json!({"id": 1})).is_ok());
    assert!(registry.validate("tag", &json!("far too long a tag")).is_err());
}

#[test]
fn test_load_dir_keeps_good_files_and_reports_bad_ones() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("good.json"), r#"{"type": "boolean"}"#).unwrap();
    fs::write(dir.path().join("bad_type.json"), r#"{"type": "colour"}"#).unwrap();
    fs::write(dir.path().join("bad_json.json"), "{ nope").unwrap();

    let registry = SchemaRegistry::new();
    let err = registry.load_dir(dir.path()).unwrap_err();

    let RegistryError::Multiple(errors) = err else {
        panic!("expected multiple errors");
    };
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().any(|e| matches!(
        e,
        RegistryError::Source {
            source: SourceError::ParseFile(..),
            ..
        }
    )));
    assert!(errors
        .iter()
        .any(|e| matches!(e, RegistryError::Schema { name, .. } if name == "bad_type")));

    assert_eq!(registry.names(), vec!["good".to_string()]);
}

#[test]
fn test_load_dir_single_failure_is_not_wrapped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), r#"{"type": "number", "multipleOf": 0}"#).unwrap();

    let err = SchemaRegistry::new().load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, RegistryError::Schema { .. }));
}

#[test]
fn test_load_missing_dir() {
    let err = SchemaRegistry::new()
        .load_dir("/definitely/not/here")
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Source {
            source: SourceError::Io(..),
            ..
        }
    ));
}

//! # jsonguard
//!
//! Compiles a practical subset of JSON Schema into an immutable tree of
//! typed predicates, then checks JSON values against it.
//!
//! ## Overview
//!
//! A raw schema declares one `"type"` per node (`string`, `integer`,
//! `number`, `boolean`, `null`, `array` or `object`) and a set of keywords
//! for that type. Compilation rejects malformed configuration up front and
//! reports every problem it finds as [`SchemaErrors`]. Validation stops at
//! the first violated keyword and reports it as a [`ValidationError`] with
//! the path of the offending value, what was expected and what was found.
//!
//! Keywords run in a fixed order per type, so the reported violation is the
//! same on every call.
//!
//! ## Core Types
//!
//! - [`Schema`]: a compiled schema, `Send + Sync`, cheap to share in an `Arc`
//! - [`Compiler`]: compiles raw schemas, with a configurable nesting limit
//! - [`SchemaRegistry`]: named compiled schemas, loadable from a directory
//! - [`Source`]: a JSON document as a value, text, bytes or a file path
//! - [`Error`]: any failure of the top-level entry points
//!
//! ## Example
//!
//! ```rust
//! use jsonguard::validate;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "required": ["id"],
//!     "properties": {
//!         "id": {"type": "integer", "minimum": 1},
//!         "tags": {"type": "array", "items": {"type": "string"}, "uniqueItems": true}
//!     }
//! });
//!
//! assert!(validate(&json!({"id": 7, "tags": ["a", "b"]}), &schema).is_ok());
//!
//! let error = validate(&json!({"id": 7, "tags": ["a", 1]}), &schema).unwrap_err();
//! let violation = error.as_validation().unwrap();
//! assert_eq!(violation.path.to_string(), "tags[1]");
//! assert_eq!(violation.keyword(), Some("type"));
//! ```

pub mod error;
pub mod path;
pub mod registry;
pub mod schema;
pub mod source;

mod keywords;

pub use error::{Error, SchemaError, SchemaErrorKind, SchemaErrors, ValidationError};
pub use path::{JsonPath, PathSegment};
pub use registry::{RegistryError, SchemaRegistry};
pub use schema::{kind_name, Compiler, Schema, ValueType};
pub use source::{Source, SourceError};

/// Compiles `schema` and validates `target` against it.
///
/// Compile the schema once with [`Schema::compile`] instead when validating
/// many targets.
pub fn validate(target: &serde_json::Value, schema: &serde_json::Value) -> Result<(), Error> {
    let schema = Schema::compile(schema)?;
    schema.validate(target)?;
    Ok(())
}

/// Loads both documents, then behaves like [`validate`].
///
/// # Example
///
/// ```rust
/// use jsonguard::validate_source;
///
/// let result = validate_source(r#"{"n": 3}"#, r#"{"type": "object", "maxProperties": 0}"#);
/// assert!(result.is_err());
/// ```
pub fn validate_source(
    target: impl Into<Source>,
    schema: impl Into<Source>,
) -> Result<(), Error> {
    let schema = schema.into().load()?;
    let target = target.into().load()?;
    validate(&target, &schema)
}

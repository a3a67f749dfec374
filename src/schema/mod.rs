//! Compiled schemas and the validation engine.
//!
//! A [`Schema`] is an immutable tree: one declared [`ValueType`], the keyword
//! predicates compiled for that type, and (for objects) the compiled schemas
//! of its declared properties. Validation type-checks the target against the
//! declared type, then runs each keyword predicate in canonical order and
//! stops at the first failure.
//!
//! # Example
//!
//! ```rust
//! use jsonguard::Schema;
//! use serde_json::json;
//!
//! let schema = Schema::compile(&json!({
//!     "type": "object",
//!     "required": ["name"],
//!     "properties": {
//!         "name": {"type": "string", "minLength": 1}
//!     }
//! })).unwrap();
//!
//! assert!(schema.validate(&json!({"name": "Ada"})).is_ok());
//!
//! let error = schema.validate(&json!({"name": ""})).unwrap_err();
//! assert_eq!(error.keyword(), Some("minLength"));
//! assert_eq!(error.path.to_string(), "name");
//! ```

mod compiler;
mod value_type;

pub use compiler::Compiler;
pub(crate) use compiler::BuildContext;
pub use value_type::{kind_name, ValueType};

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::{Map, Number, Value};

use crate::error::{SchemaErrors, ValidationError};
use crate::path::JsonPath;

pub(crate) type StringCheck =
    Box<dyn Fn(&str, &JsonPath) -> Result<(), ValidationError> + Send + Sync>;
pub(crate) type NumberCheck =
    Box<dyn Fn(f64, &JsonPath) -> Result<(), ValidationError> + Send + Sync>;
pub(crate) type IntegerCheck =
    Box<dyn Fn(i64, &JsonPath) -> Result<(), ValidationError> + Send + Sync>;
pub(crate) type ArrayCheck =
    Box<dyn Fn(&[Value], &JsonPath) -> Result<(), ValidationError> + Send + Sync>;
pub(crate) type ObjectCheck =
    Box<dyn Fn(&Map<String, Value>, &JsonPath) -> Result<(), ValidationError> + Send + Sync>;

/// A compiled predicate together with the keyword it enforces.
pub(crate) struct Keyword<C> {
    pub name: &'static str,
    pub check: C,
}

/// Per-type payload of a schema node.
///
/// Each variant only holds predicates over the representation its type
/// guarantees, so a predicate never sees a value of the wrong kind.
pub(crate) enum Node {
    String(Vec<Keyword<StringCheck>>),
    Integer(Vec<Keyword<IntegerCheck>>),
    Number(Vec<Keyword<NumberCheck>>),
    Boolean,
    Null,
    Array(Vec<Keyword<ArrayCheck>>),
    Object {
        keywords: Vec<Keyword<ObjectCheck>>,
        properties: IndexMap<String, Arc<Schema>>,
    },
}

/// A compiled schema node.
///
/// Schemas are never mutated after compilation and are `Send + Sync`; wrap
/// one in an `Arc` to validate from many threads at once.
pub struct Schema {
    node: Node,
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Schema>();
    assert_sync::<Schema>();
};

impl Schema {
    pub(crate) fn from_node(node: Node) -> Self {
        Self { node }
    }

    /// Compiles a raw schema with the default [`Compiler`].
    pub fn compile(raw: &Value) -> Result<Self, SchemaErrors> {
        Compiler::default().compile(raw)
    }

    pub fn value_type(&self) -> ValueType {
        match &self.node {
            Node::String(_) => ValueType::String,
            Node::Integer(_) => ValueType::Integer,
            Node::Number(_) => ValueType::Number,
            Node::Boolean => ValueType::Boolean,
            Node::Null => ValueType::Null,
            Node::Array(_) => ValueType::Array,
            Node::Object { .. } => ValueType::Object,
        }
    }

    /// Names of the compiled keywords, in the order they are evaluated.
    pub fn keywords(&self) -> Vec<&'static str> {
        fn names<C>(keywords: &[Keyword<C>]) -> Vec<&'static str> {
            keywords.iter().map(|k| k.name).collect()
        }

        match &self.node {
            Node::String(k) => names(k),
            Node::Integer(k) => names(k),
            Node::Number(k) => names(k),
            Node::Array(k) => names(k),
            Node::Object { keywords, .. } => names(keywords),
            Node::Boolean | Node::Null => Vec::new(),
        }
    }

    /// The compiled property schemas of an object node.
    ///
    /// Returns `None` for every other type. An object node without a
    /// `"properties"` keyword has an empty map.
    pub fn properties(&self) -> Option<&IndexMap<String, Arc<Schema>>> {
        match &self.node {
            Node::Object { properties, .. } => Some(properties),
            _ => None,
        }
    }

    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties()?.get(name).map(Arc::as_ref)
    }

    /// Validates a target, reporting the first violation.
    pub fn validate(&self, target: &Value) -> Result<(), ValidationError> {
        let result = self.validate_at(target, &JsonPath::root());
        if let Err(error) = &result {
            tracing::trace!(
                keyword = error.keyword().unwrap_or("value"),
                path = %error.path,
                "target rejected"
            );
        }
        result
    }

    /// Validates a target located at `path` inside a larger document.
    ///
    /// Errors carry `path` extended by whatever the nested keywords descend
    /// into.
    pub fn validate_at(&self, target: &Value, path: &JsonPath) -> Result<(), ValidationError> {
        match (&self.node, target) {
            (Node::String(keywords), Value::String(s)) => {
                apply(keywords, |check| check(s.as_str(), path))
            }
            (Node::Number(keywords), Value::Number(n)) => match n.as_f64() {
                Some(f) => apply(keywords, |check| check(f, path)),
                None => Err(self.mismatch(target, path)),
            },
            (Node::Integer(keywords), Value::Number(n)) => match as_integer(n) {
                Some(i) => apply(keywords, |check| check(i, path)),
                None => Err(self.mismatch(target, path)),
            },
            (Node::Boolean, Value::Bool(_)) | (Node::Null, Value::Null) => Ok(()),
            (Node::Array(keywords), Value::Array(items)) => {
                apply(keywords, |check| check(items.as_slice(), path))
            }
            (Node::Object { keywords, .. }, Value::Object(map)) => {
                apply(keywords, |check| check(map, path))
            }
            _ => Err(self.mismatch(target, path)),
        }
    }

    /// Validates an object key against a `propertyNames` schema without
    /// allocating a JSON string for it.
    pub(crate) fn validate_str(&self, s: &str, path: &JsonPath) -> Result<(), ValidationError> {
        match &self.node {
            Node::String(keywords) => apply(keywords, |check| check(s, path)),
            _ => Err(
                ValidationError::new(path.clone(), self.value_type().as_str(), "string")
                    .with_keyword("type"),
            ),
        }
    }

    /// Validates many targets against this schema in parallel.
    ///
    /// Results are returned in the order of `targets`.
    pub fn validate_all(&self, targets: &[Value]) -> Vec<Result<(), ValidationError>> {
        targets.par_iter().map(|target| self.validate(target)).collect()
    }

    fn mismatch(&self, target: &Value, path: &JsonPath) -> ValidationError {
        ValidationError::new(path.clone(), self.value_type().as_str(), kind_name(target))
            .with_keyword("type")
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Schema");
        debug
            .field("type", &self.value_type())
            .field("keywords", &self.keywords());
        if let Some(properties) = self.properties() {
            debug.field("properties", properties);
        }
        debug.finish()
    }
}

/// Runs keyword predicates in order, labeling the first failure with its
/// keyword.
fn apply<C>(
    keywords: &[Keyword<C>],
    mut run: impl FnMut(&C) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    for keyword in keywords {
        run(&keyword.check).map_err(|e| e.with_keyword(keyword.name))?;
    }
    Ok(())
}

/// A JSON number that is a whole value representable as `i64`.
pub(crate) fn as_integer(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_as_integer() {
        let n = |v: Value| match v {
            Value::Number(n) => n,
            _ => unreachable!(),
        };
        assert_eq!(as_integer(&n(json!(42))), Some(42));
        assert_eq!(as_integer(&n(json!(-7))), Some(-7));
        assert_eq!(as_integer(&n(json!(3.0))), Some(3));
        assert_eq!(as_integer(&n(json!(3.5))), None);
        assert_eq!(as_integer(&n(json!(u64::MAX))), None);
        assert_eq!(as_integer(&n(json!(1e300))), None);
    }

    #[test]
    fn test_keywords_in_canonical_order() {
        let schema = Schema::compile(&json!({
            "type": "string",
            "pattern": "^a",
            "maxLength": 4,
            "minLength": 1
        }))
        .unwrap();
        assert_eq!(schema.keywords(), vec!["minLength", "maxLength", "pattern"]);
    }

    #[test]
    fn test_first_failure_is_deterministic() {
        let schema = Schema::compile(&json!({
            "type": "string",
            "pattern": "^[0-9]+$",
            "maxLength": 2
        }))
        .unwrap();

        for _ in 0..10 {
            let error = schema.validate(&json!("abcd")).unwrap_err();
            assert_eq!(error.keyword(), Some("maxLength"));
        }
    }

    #[test]
    fn test_validate_at_prefixes_path() {
        let schema = Schema::compile(&json!({"type": "boolean"})).unwrap();
        let base = JsonPath::root().push_key("flags").push_index(1);
        let error = schema.validate_at(&json!("yes"), &base).unwrap_err();
        assert_eq!(error.path, base);
        assert_eq!(error.keyword(), Some("type"));
    }

    #[test]
    fn test_validate_str_on_non_string_schema() {
        let schema = Schema::compile(&json!({"type": "integer"})).unwrap();
        let error = schema.validate_str("k", &JsonPath::root()).unwrap_err();
        assert_eq!(error.expected, "integer");
        assert_eq!(error.got, "string");
    }

    #[test]
    fn test_debug_lists_keywords() {
        let schema = Schema::compile(&json!({"type": "array", "minItems": 1})).unwrap();
        let debug = format!("{:?}", schema);
        assert!(debug.contains("Array"));
        assert!(debug.contains("minItems"));
    }
}

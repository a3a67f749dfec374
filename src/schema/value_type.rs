//! The seven kinds a schema node can declare.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde_json::Value;

use crate::error::SchemaErrorKind;

/// The declared `"type"` of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    /// A whole number that fits `i64`. `3.0` qualifies; `1e19` does not and
    /// is reported as a type mismatch.
    Integer,
    Number,
    Object,
    Array,
    Boolean,
    Null,
}

impl ValueType {
    pub const ALL: [ValueType; 7] = [
        ValueType::String,
        ValueType::Integer,
        ValueType::Number,
        ValueType::Object,
        ValueType::Array,
        ValueType::Boolean,
        ValueType::Null,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Number => "number",
            ValueType::Object => "object",
            ValueType::Array => "array",
            ValueType::Boolean => "boolean",
            ValueType::Null => "null",
        }
    }

    /// Resolves the `"type"` entry of a raw schema.
    ///
    /// Fails when the entry is absent, is not a string, or names an
    /// unsupported kind.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jsonguard::ValueType;
    /// use serde_json::json;
    ///
    /// assert_eq!(ValueType::classify(Some(&json!("array"))), Ok(ValueType::Array));
    /// assert!(ValueType::classify(Some(&json!("unknown"))).is_err());
    /// assert!(ValueType::classify(None).is_err());
    /// ```
    pub fn classify(raw: Option<&Value>) -> Result<Self, SchemaErrorKind> {
        match raw {
            None => Err(SchemaErrorKind::MissingType),
            Some(Value::String(name)) => name.parse(),
            Some(other) => Err(SchemaErrorKind::NonStringType(kind_name(other))),
        }
    }
}

impl FromStr for ValueType {
    type Err = SchemaErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SchemaErrorKind::UnknownType(s.to_string()))
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The observed kind of a decoded value, as reported in type mismatches.
///
/// Numbers are always reported as `number`; whether one is integral is a
/// property of the value, not of its representation.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_name_round_trips() {
        for ty in ValueType::ALL {
            assert_eq!(ty.as_str().parse::<ValueType>(), Ok(ty));
            assert_eq!(ValueType::classify(Some(&json!(ty.as_str()))), Ok(ty));
        }
    }

    #[test]
    fn test_classify_failures() {
        assert_eq!(ValueType::classify(None), Err(SchemaErrorKind::MissingType));
        assert_eq!(
            ValueType::classify(Some(&json!(7))),
            Err(SchemaErrorKind::NonStringType("number"))
        );
        assert_eq!(
            ValueType::classify(Some(&json!("String"))),
            Err(SchemaErrorKind::UnknownType("String".to_string()))
        );
        assert_eq!(
            ValueType::classify(Some(&json!(["string", "null"]))),
            Err(SchemaErrorKind::NonStringType("array"))
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(kind_name(&json!(null)), "null");
        assert_eq!(kind_name(&json!(1.5)), "number");
        assert_eq!(kind_name(&json!({})), "object");
    }
}

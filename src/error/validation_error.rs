//! The error produced when a target fails a compiled schema.

use std::fmt::{self, Display};

use crate::path::JsonPath;

/// A single keyword violation.
///
/// Predicates only know what they expected and what they saw; the engine
/// attributes the failure to a keyword afterwards. The keyword is assigned at
/// most once, so an error raised deep inside a nested schema keeps the name
/// of the innermost keyword even after it bubbles up through `items` or
/// `properties`.
///
/// # Example
///
/// ```rust
/// use jsonguard::{JsonPath, ValidationError};
///
/// let error = ValidationError::new(JsonPath::root().push_key("age"), "at most 120", "130")
///     .with_keyword("maximum")
///     .with_keyword("properties");
///
/// assert_eq!(error.keyword(), Some("maximum"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Where in the target the violation happened.
    pub path: JsonPath,
    /// Description of what the keyword required.
    pub expected: String,
    /// Description of what the target actually held.
    pub got: String,
    keyword: Option<String>,
}

impl ValidationError {
    pub fn new(path: JsonPath, expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self {
            path,
            expected: expected.into(),
            got: got.into(),
            keyword: None,
        }
    }

    /// Labels the error with the keyword that raised it.
    ///
    /// Does nothing if a keyword was already assigned.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        if self.keyword.is_none() {
            self.keyword = Some(keyword.into());
        }
        self
    }

    /// The keyword this failure is attributed to, once labeled.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): ")?;
        } else {
            write!(f, "{}: ", self.path)?;
        }

        write!(
            f,
            "failed to validate {}; got: {}, expected: {}",
            self.keyword().unwrap_or("value"),
            self.got,
            self.expected
        )
    }
}

impl std::error::Error for ValidationError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error_is_unlabeled() {
        let error = ValidationError::new(JsonPath::root(), "string", "number");
        assert_eq!(error.keyword(), None);
        assert_eq!(error.expected, "string");
        assert_eq!(error.got, "number");
    }

    #[test]
    fn test_first_keyword_wins() {
        let error = ValidationError::new(JsonPath::root(), "3", "4")
            .with_keyword("maxLength")
            .with_keyword("items");
        assert_eq!(error.keyword(), Some("maxLength"));
    }

    #[test]
    fn test_display_root() {
        let error = ValidationError::new(JsonPath::root(), "at least 2 items", "1 items")
            .with_keyword("minItems");
        assert_eq!(
            error.to_string(),
            "(root): failed to validate minItems; got: 1 items, expected: at least 2 items"
        );
    }

    #[test]
    fn test_display_nested() {
        let path = JsonPath::root().push_key("tags").push_index(2);
        let error = ValidationError::new(path, "string", "null").with_keyword("type");
        let display = error.to_string();
        assert!(display.starts_with("tags[2]: failed to validate type"));
    }

    #[test]
    fn test_display_unlabeled() {
        let error = ValidationError::new(JsonPath::root(), "a", "b");
        assert!(error.to_string().contains("failed to validate value"));
    }
}

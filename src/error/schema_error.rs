//! Configuration errors raised while compiling a raw schema.
//!
//! This module provides [`SchemaError`] for a single malformed keyword and
//! [`SchemaErrors`] for the full list found in one compilation.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::JsonPath;

/// What was wrong with a raw schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaErrorKind {
    /// The raw schema (or sub-schema) is not a key/value mapping.
    #[error("schema must be an object, got {0}")]
    NotAnObject(&'static str),

    /// No `"type"` key.
    #[error("schema has no type")]
    MissingType,

    /// `"type"` is present but is not a string.
    #[error("schema type must be a string, got {0}")]
    NonStringType(&'static str),

    /// `"type"` names none of the supported kinds.
    #[error("unknown schema type '{0}'")]
    UnknownType(String),

    /// A sub-schema declares a type other than the one its keyword demands.
    #[error("schema type must be '{expected}', got '{got}'")]
    ConflictingType {
        expected: &'static str,
        got: String,
    },

    /// A keyword's value has the wrong shape.
    #[error("{keyword} requires {expected}, got {got}")]
    InvalidKeyword {
        keyword: &'static str,
        expected: &'static str,
        got: String,
    },

    /// A keyword depends on a sibling keyword that is absent.
    #[error("{keyword} requires {requires}")]
    MissingSibling {
        keyword: &'static str,
        requires: &'static str,
    },

    /// `format` names a format that is not supported.
    #[error("unknown format '{0}'")]
    UnknownFormat(String),

    /// A regular expression does not compile.
    #[error("{keyword} has invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        keyword: &'static str,
        pattern: String,
        reason: String,
    },

    /// `multipleOf` of zero.
    #[error("{0} must not be zero")]
    ZeroDivisor(&'static str),

    /// Sub-schemas nest deeper than the compiler allows.
    #[error("schema nesting exceeds maximum depth of {0}")]
    DepthExceeded(usize),
}

/// A single configuration error with its location in the raw schema.
///
/// # Example
///
/// ```rust
/// use jsonguard::{JsonPath, SchemaError, SchemaErrorKind};
///
/// let error = SchemaError::new(
///     JsonPath::root().push_key("minLength"),
///     SchemaErrorKind::InvalidKeyword {
///         keyword: "minLength",
///         expected: "a non-negative integer",
///         got: "1.5".to_string(),
///     },
/// );
///
/// assert_eq!(error.to_string(), "minLength: minLength requires a non-negative integer, got 1.5");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// Location of the offending keyword inside the raw schema.
    pub path: JsonPath,
    pub kind: SchemaErrorKind,
}

impl SchemaError {
    pub fn new(path: JsonPath, kind: SchemaErrorKind) -> Self {
        Self { path, kind }
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.kind)
        } else {
            write!(f, "{}: {}", self.path, self.kind)
        }
    }
}

impl std::error::Error for SchemaError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaError>();
    assert_sync::<SchemaError>();
};

/// Every configuration error found while compiling one raw schema.
///
/// Compilation never returns a partial schema; it keeps going after the
/// first malformed keyword only to report the rest together. The collection
/// is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors(NonEmptyVec<SchemaError>);

impl SchemaErrors {
    pub fn single(error: SchemaError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Builds the collection from a list, or `None` if the list is empty.
    pub fn from_vec(errors: Vec<SchemaError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let first = Self::single(errors.next()?);
        Some(errors.fold(first, |acc, error| acc.combine(Self::single(error))))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.0.iter()
    }

    pub fn first(&self) -> &SchemaError {
        self.0.head()
    }

    /// Errors raised at the given schema location.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    pub fn into_vec(self) -> Vec<SchemaError> {
        self.0.into_vec()
    }

    /// Drops repeated errors, keeping first occurrences in order.
    ///
    /// A malformed `contains` is compiled again by `minContains` and
    /// `maxContains`, which would otherwise report it up to three times.
    pub(crate) fn dedup(self) -> Self {
        let head = self.first().clone();
        let mut rest: Vec<SchemaError> = Vec::new();
        for error in self.into_iter().skip(1) {
            if error != head && !rest.contains(&error) {
                rest.push(error);
            }
        }
        rest.into_iter()
            .fold(Self::single(head), |acc, error| acc.combine(Self::single(error)))
    }
}

impl Semigroup for SchemaErrors {
    fn combine(self, other: Self) -> Self {
        SchemaErrors(self.0.combine(other.0))
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() == 1 {
            return write!(f, "invalid schema: {}", self.first());
        }

        writeln!(f, "invalid schema, {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl From<SchemaError> for SchemaErrors {
    fn from(error: SchemaError) -> Self {
        Self::single(error)
    }
}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaErrors>();
    assert_sync::<SchemaErrors>();
};

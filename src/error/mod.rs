//! Error types.
//!
//! Compilation fails with [`SchemaErrors`] (the raw schema is malformed);
//! validation fails with a [`ValidationError`] (the target violates a
//! keyword). [`Error`] unifies both with the acquisition and registry
//! failures for the top-level entry points.

mod schema_error;
mod validation_error;

pub use schema_error::{SchemaError, SchemaErrorKind, SchemaErrors};
pub use validation_error::ValidationError;

use crate::registry::RegistryError;
use crate::source::SourceError;

/// Any failure of a top-level validation call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The schema could not be compiled.
    #[error(transparent)]
    Schema(#[from] SchemaErrors),

    /// The target violated the schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The target or schema document could not be read or decoded.
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl Error {
    /// The keyword violation, if this is a validation failure.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(e) => Some(e),
            _ => None,
        }
    }

    /// The configuration errors, if the schema failed to compile.
    pub fn as_schema(&self) -> Option<&SchemaErrors> {
        match self {
            Error::Schema(e) => Some(e),
            _ => None,
        }
    }
}

//! Where targets and raw schemas come from.
//!
//! A [`Source`] is decoded into a [`serde_json::Value`] before anything is
//! compiled or validated; nothing past this module ever sees text or bytes.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

/// Failure to turn a [`Source`] into a value.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot read {path}: {err}", path = .0.display(), err = .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("invalid JSON in {path}: {err}", path = .0.display(), err = .1)]
    ParseFile(PathBuf, #[source] serde_json::Error),

    #[error("cannot convert record to JSON: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A JSON document, decoded or not yet decoded.
///
/// Conversions from `&str` and `String` follow a simple rule: if the string
/// names an existing file it is read from disk, otherwise it is parsed as
/// JSON text. Use [`Source::Text`] or [`Source::Path`] directly to avoid the
/// guess.
///
/// # Example
///
/// ```rust
/// use jsonguard::Source;
/// use serde_json::json;
///
/// let value = Source::from(r#"{"name": "Ada"}"#).load().unwrap();
/// assert_eq!(value, json!({"name": "Ada"}));
/// ```
#[derive(Debug, Clone)]
pub enum Source {
    Value(Value),
    Text(String),
    Bytes(Vec<u8>),
    Path(PathBuf),
}

impl Source {
    /// Flattens any serializable record into its JSON value.
    pub fn from_serialize<T: Serialize + ?Sized>(record: &T) -> Result<Self, SourceError> {
        serde_json::to_value(record)
            .map(Source::Value)
            .map_err(SourceError::Serialize)
    }

    /// Decodes the document.
    pub fn load(self) -> Result<Value, SourceError> {
        match self {
            Source::Value(value) => Ok(value),
            Source::Text(text) => serde_json::from_str(&text).map_err(SourceError::Parse),
            Source::Bytes(bytes) => serde_json::from_slice(&bytes).map_err(SourceError::Parse),
            Source::Path(path) => {
                tracing::debug!(path = %path.display(), "reading JSON document");
                let text = std::fs::read_to_string(&path)
                    .map_err(|e| SourceError::Io(path.clone(), e))?;
                serde_json::from_str(&text).map_err(|e| SourceError::ParseFile(path, e))
            }
        }
    }

    fn guess(s: String) -> Self {
        if Path::new(&s).is_file() {
            Source::Path(PathBuf::from(s))
        } else {
            Source::Text(s)
        }
    }
}

impl From<Value> for Source {
    fn from(value: Value) -> Self {
        Source::Value(value)
    }
}

impl From<&Value> for Source {
    fn from(value: &Value) -> Self {
        Source::Value(value.clone())
    }
}

impl From<&str> for Source {
    fn from(s: &str) -> Self {
        Source::guess(s.to_string())
    }
}

impl From<String> for Source {
    fn from(s: String) -> Self {
        Source::guess(s)
    }
}

impl From<&[u8]> for Source {
    fn from(bytes: &[u8]) -> Self {
        Source::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Source::Bytes(bytes)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_and_bytes() {
        assert_eq!(Source::from("[1, 2]").load().unwrap(), json!([1, 2]));
        assert_eq!(Source::from(&b"true"[..]).load().unwrap(), json!(true));
    }

    #[test]
    fn test_missing_file_is_parsed_as_text() {
        let err = Source::from("no/such/file.json").load().unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_explicit_path_reports_io_error() {
        let err = Source::Path(PathBuf::from("no/such/file.json"))
            .load()
            .unwrap_err();
        assert!(matches!(err, SourceError::Io(..)));
        assert!(err.to_string().contains("no/such/file.json"));
    }

    #[test]
    fn test_existing_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, r#"{"a": 1}"#).unwrap();

        let source = Source::from(path.to_str().unwrap());
        assert!(matches!(source, Source::Path(_)));
        assert_eq!(source.load().unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_from_serialize() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let value = Source::from_serialize(&Point { x: 1, y: 2 })
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(value, json!({"x": 1, "y": 2}));
    }
}

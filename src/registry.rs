//! Named storage for compiled schemas.
//!
//! A [`SchemaRegistry`] compiles each raw schema once and hands out shared
//! [`Arc<Schema>`] handles, so many threads can validate against the same
//! schemas without recompiling them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{Error, SchemaErrors};
use crate::schema::{Compiler, Schema};
use crate::source::{Source, SourceError};

type SchemaMap = Arc<RwLock<HashMap<String, Arc<Schema>>>>;

/// A thread-safe map of names to compiled schemas.
///
/// Clones share the same storage.
///
/// # Example
///
/// ```rust
/// use jsonguard::SchemaRegistry;
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// registry
///     .register("User", &json!({
///         "type": "object",
///         "required": ["email"],
///         "properties": {"email": {"type": "string", "format": "email"}}
///     }))
///     .unwrap();
///
/// assert!(registry.validate("User", &json!({"email": "ada@example.com"})).is_ok());
/// assert!(registry.validate("User", &json!({"email": "nope"})).is_err());
/// assert!(registry.validate("Order", &json!({})).is_err());
/// ```
#[derive(Clone)]
pub struct SchemaRegistry {
    schemas: SchemaMap,
    compiler: Compiler,
}

impl SchemaRegistry {
    /// Creates an empty registry whose compiler uses the default max depth
    /// (100).
    pub fn new() -> Self {
        Self {
            schemas: Arc::new(RwLock::new(HashMap::new())),
            compiler: Compiler::new(),
        }
    }

    /// Limits sub-schema nesting for every schema registered afterwards.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.compiler = self.compiler.with_max_depth(depth);
        self
    }

    /// Compiles `raw` and stores it under `name`.
    ///
    /// # Errors
    ///
    /// `DuplicateName` if the name is taken, `Schema` if `raw` does not
    /// compile. Nothing is stored on failure.
    pub fn register(
        &self,
        name: impl Into<String>,
        raw: &Value,
    ) -> Result<Arc<Schema>, RegistryError> {
        let name = name.into();
        if self.schemas.read().contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        let schema = match self.compiler.compile(raw) {
            Ok(schema) => Arc::new(schema),
            Err(errors) => return Err(RegistryError::Schema { name, errors }),
        };

        let mut schemas = self.schemas.write();
        // Another thread may have registered the name while we compiled.
        if schemas.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        tracing::debug!(name = %name, "registered schema");
        schemas.insert(name, Arc::clone(&schema));
        Ok(schema)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.read().get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }

    /// Validates `target` against the schema registered as `name`.
    pub fn validate(&self, name: &str, target: &Value) -> Result<(), Error> {
        let schema = self
            .get(name)
            .ok_or_else(|| RegistryError::SchemaNotFound(name.to_string()))?;
        schema.validate(target)?;
        Ok(())
    }

    /// Registers every `*.json` file in `dir` under its file stem.
    ///
    /// Files that load are kept even when others fail; the failures are
    /// returned together. Returns the number of schemas registered.
    pub fn load_dir(&self, dir: impl AsRef<Path>) -> Result<usize, RegistryError> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir)
            .map_err(|e| RegistryError::from_source(dir, SourceError::Io(dir.to_path_buf(), e)))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        let mut loaded = 0;
        let mut errors = Vec::new();
        for file in files {
            match self.load_file(&file) {
                Ok(()) => loaded += 1,
                Err(e) => errors.push(e),
            }
        }

        tracing::debug!(
            dir = %dir.display(),
            loaded,
            failed = errors.len(),
            "loaded schema directory"
        );

        match errors.len() {
            0 => Ok(loaded),
            1 => Err(errors.remove(0)),
            _ => Err(RegistryError::Multiple(errors)),
        }
    }

    fn load_file(&self, path: &Path) -> Result<(), RegistryError> {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| RegistryError::InvalidFileName(path.to_path_buf()))?;
        let raw = Source::Path(path.to_path_buf())
            .load()
            .map_err(|e| RegistryError::from_source(path, e))?;
        self.register(name, &raw)?;
        Ok(())
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from registering, loading or looking up schemas.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("schema '{0}' already registered")]
    DuplicateName(String),

    #[error("schema '{0}' not found")]
    SchemaNotFound(String),

    #[error("schema '{name}': {errors}")]
    Schema { name: String, errors: SchemaErrors },

    #[error("{}: {source}", .path.display())]
    Source { path: PathBuf, source: SourceError },

    #[error("file name is not valid UTF-8: {}", .0.display())]
    InvalidFileName(PathBuf),

    #[error("{} schema files failed to load", .0.len())]
    Multiple(Vec<RegistryError>),
}

impl RegistryError {
    fn from_source(path: &Path, source: SourceError) -> Self {
        RegistryError::Source {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_returns_shared_handle() {
        let registry = SchemaRegistry::new();
        let schema = registry.register("Flag", &json!({"type": "boolean"})).unwrap();
        let fetched = registry.get("Flag").unwrap();
        assert!(Arc::ptr_eq(&schema, &fetched));
    }

    #[test]
    fn test_failed_registration_stores_nothing() {
        let registry = SchemaRegistry::new();
        let err = registry.register("Bad", &json!({"type": "nope"})).unwrap_err();
        assert!(matches!(err, RegistryError::Schema { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_max_depth_applies_to_registration() {
        let registry = SchemaRegistry::new().with_max_depth(0);
        let raw = json!({"type": "array", "items": {"type": "null"}});
        assert!(registry.register("Nested", &raw).is_err());
    }

    #[test]
    fn test_clones_share_storage() {
        let registry = SchemaRegistry::new();
        let clone = registry.clone();
        clone.register("Nothing", &json!({"type": "null"})).unwrap();
        assert_eq!(registry.names(), vec!["Nothing".to_string()]);
    }
}

//! Locations inside targets and raw schemas.
//!
//! [`JsonPath`] is carried by every [`ValidationError`](crate::ValidationError)
//! (where in the target the violation happened) and every
//! [`SchemaError`](crate::SchemaError) (which keyword of the raw schema was
//! malformed).

use std::fmt::{self, Display};

/// One step of a [`JsonPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Descent into an object member.
    Key(String),
    /// Descent into an array element.
    Index(usize),
}

/// A path from the root of a document to one of its values.
///
/// Paths are immutable: `push_key` and `push_index` return extended copies,
/// so a parent path can be shared by every child being validated.
///
/// # Example
///
/// ```rust
/// use jsonguard::JsonPath;
///
/// let path = JsonPath::root()
///     .push_key("users")
///     .push_index(0)
///     .push_key("email");
///
/// assert_eq!(path.to_string(), "users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The empty path, pointing at the document itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with an object key appended.
    pub fn push_key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// Returns a new path with an array index appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

/// Keys that would be ambiguous in dotted notation are rendered as `["..."]`.
fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '$')
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if is_plain_key(key) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", key)?;
                }
                PathSegment::Key(key) => write!(f, "[{:?}]", key)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_empty() {
        let path = JsonPath::root();
        assert!(path.is_root());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_keys_and_indices() {
        let path = JsonPath::root()
            .push_key("body")
            .push_key("items")
            .push_index(3)
            .push_key("name");
        assert_eq!(path.to_string(), "body.items[3].name");
        assert_eq!(path.last(), Some(&PathSegment::Key("name".to_string())));
    }

    #[test]
    fn test_segments_in_order() {
        let path = JsonPath::root().push_key("items").push_index(1);
        let segments: Vec<_> = path.segments().cloned().collect();
        assert_eq!(
            segments,
            vec![PathSegment::Key("items".to_string()), PathSegment::Index(1)]
        );
    }

    #[test]
    fn test_leading_index() {
        let path = JsonPath::root().push_index(0).push_key("id");
        assert_eq!(path.to_string(), "[0].id");
    }

    #[test]
    fn test_awkward_keys_are_quoted() {
        let path = JsonPath::root().push_key("a.b").push_key("c d");
        assert_eq!(path.to_string(), r#"["a.b"]["c d"]"#);

        let path = JsonPath::root().push_key("");
        assert_eq!(path.to_string(), r#"[""]"#);
    }

    #[test]
    fn test_push_does_not_mutate_parent() {
        let base = JsonPath::root().push_key("tags");
        let first = base.push_index(0);
        let second = base.push_index(1);

        assert_eq!(base.to_string(), "tags");
        assert_eq!(first.to_string(), "tags[0]");
        assert_eq!(second.to_string(), "tags[1]");
    }
}

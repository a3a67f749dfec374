//! Turns raw schema values into compiled [`Schema`] trees.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::prelude::*;

use crate::error::{SchemaError, SchemaErrorKind, SchemaErrors};
use crate::keywords::{self, KeywordBuilder};
use crate::path::JsonPath;

use super::value_type::{kind_name, ValueType};
use super::{Keyword, Node, Schema};

/// Compiles raw schemas.
///
/// The only setting is the maximum nesting depth of sub-schemas (the
/// `properties`, `items`, `contains` and `patternProperties` keywords each
/// descend one level). The default is 100.
///
/// # Example
///
/// ```rust
/// use jsonguard::Compiler;
/// use serde_json::json;
///
/// let compiler = Compiler::new().with_max_depth(1);
///
/// let shallow = json!({"type": "array", "items": {"type": "string"}});
/// assert!(compiler.compile(&shallow).is_ok());
///
/// let deep = json!({"type": "array", "items": {"type": "array", "items": {"type": "null"}}});
/// assert!(compiler.compile(&deep).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Compiler {
    max_depth: usize,
}

impl Compiler {
    pub fn new() -> Self {
        Self { max_depth: 100 }
    }

    /// Sets how many levels of sub-schemas may nest below the root.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Compiles a raw schema into an immutable [`Schema`].
    ///
    /// Every malformed keyword in the tree is reported; no partial schema
    /// is ever returned.
    pub fn compile(&self, raw: &Value) -> Result<Schema, SchemaErrors> {
        let result = self
            .compile_node(raw, None, &JsonPath::root(), 0)
            .map_err(SchemaErrors::dedup);
        match &result {
            Ok(schema) => tracing::debug!(
                value_type = %schema.value_type(),
                keywords = schema.keywords().len(),
                "compiled schema"
            ),
            Err(errors) => tracing::debug!(errors = errors.len(), "schema rejected"),
        }
        result
    }

    fn compile_node(
        &self,
        raw: &Value,
        required_type: Option<ValueType>,
        path: &JsonPath,
        depth: usize,
    ) -> Result<Schema, SchemaErrors> {
        if depth > self.max_depth {
            return Err(at(path, SchemaErrorKind::DepthExceeded(self.max_depth)));
        }

        let Value::Object(raw) = raw else {
            return Err(at(path, SchemaErrorKind::NotAnObject(kind_name(raw))));
        };

        let type_path = path.push_key("type");
        let value_type = match (required_type, raw.get("type")) {
            (Some(required), None) => required,
            (required, declared) => {
                let declared = ValueType::classify(declared).map_err(|kind| at(&type_path, kind))?;
                match required {
                    Some(required) if required != declared => {
                        return Err(at(
                            &type_path,
                            SchemaErrorKind::ConflictingType {
                                expected: required.as_str(),
                                got: declared.as_str().to_string(),
                            },
                        ));
                    }
                    _ => declared,
                }
            }
        };

        let ctx = BuildContext {
            compiler: self,
            path: path.clone(),
            depth,
        };

        let node = match value_type {
            ValueType::String => {
                Node::String(build_keywords(keywords::string::KEYWORDS, raw, &ctx)?)
            }
            ValueType::Integer => {
                Node::Integer(build_keywords(keywords::integer::KEYWORDS, raw, &ctx)?)
            }
            ValueType::Number => {
                Node::Number(build_keywords(keywords::number::KEYWORDS, raw, &ctx)?)
            }
            ValueType::Boolean => Node::Boolean,
            ValueType::Null => Node::Null,
            ValueType::Array => {
                Node::Array(build_keywords(keywords::array::KEYWORDS, raw, &ctx)?)
            }
            ValueType::Object => compile_object(raw, &ctx)?,
        };

        tracing::trace!(path = %path, value_type = %value_type, "compiled schema node");
        Ok(Schema::from_node(node))
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// What a keyword builder gets besides its raw value: where it sits in the
/// raw schema, and a way to compile nested sub-schemas one level deeper.
pub(crate) struct BuildContext<'a> {
    compiler: &'a Compiler,
    path: JsonPath,
    depth: usize,
}

impl BuildContext<'_> {
    /// Location of `keyword` inside the schema being compiled.
    pub fn at(&self, keyword: &str) -> JsonPath {
        self.path.push_key(keyword)
    }

    /// A configuration error attributed to `keyword`.
    pub fn error(&self, keyword: &str, kind: SchemaErrorKind) -> SchemaErrors {
        at(&self.at(keyword), kind)
    }

    /// Compiles a nested schema found at `location`.
    pub fn subschema(&self, raw: &Value, location: &JsonPath) -> Result<Schema, SchemaErrors> {
        self.compiler.compile_node(raw, None, location, self.depth + 1)
    }

    /// Compiles a nested schema that must be of type `value_type`.
    ///
    /// The raw schema may omit `"type"`; declaring a different one is an
    /// error.
    pub fn subschema_as(
        &self,
        value_type: ValueType,
        raw: &Value,
        location: &JsonPath,
    ) -> Result<Schema, SchemaErrors> {
        self.compiler
            .compile_node(raw, Some(value_type), location, self.depth + 1)
    }
}

fn at(path: &JsonPath, kind: SchemaErrorKind) -> SchemaErrors {
    SchemaErrors::single(SchemaError::new(path.clone(), kind))
}

/// Folds a new failure into the running error list.
fn merge(errors: Option<SchemaErrors>, more: SchemaErrors) -> Option<SchemaErrors> {
    Some(match errors {
        Some(errors) => errors.combine(more),
        None => more,
    })
}

/// Builds every registry keyword present in `raw`, in registry order.
///
/// Keys the registry does not know are ignored.
fn build_keywords<C>(
    registry: &[KeywordBuilder<C>],
    raw: &Map<String, Value>,
    ctx: &BuildContext<'_>,
) -> Result<Vec<Keyword<C>>, SchemaErrors> {
    let mut built = Vec::new();
    let mut errors = None;

    for builder in registry {
        let Some(value) = raw.get(builder.name) else {
            continue;
        };
        match builder.build(value, raw, ctx) {
            Ok(check) => built.push(Keyword {
                name: builder.name,
                check,
            }),
            Err(e) => errors = merge(errors, e),
        }
    }

    match errors {
        Some(errors) => Err(errors),
        None => Ok(built),
    }
}

/// Object nodes get their property tree compiled here, at full depth; the
/// `properties` keyword predicate validates against that same tree.
fn compile_object(raw: &Map<String, Value>, ctx: &BuildContext<'_>) -> Result<Node, SchemaErrors> {
    let properties = compile_properties(raw.get("properties"), ctx);
    let built = build_keywords(keywords::object::KEYWORDS, raw, ctx);

    match (properties, built) {
        (Ok(properties), Ok(mut checks)) => {
            if !properties.is_empty() {
                checks.insert(
                    0,
                    Keyword {
                        name: "properties",
                        check: keywords::object::properties(properties.clone()),
                    },
                );
            }
            Ok(Node::Object {
                keywords: checks,
                properties,
            })
        }
        (Err(a), Err(b)) => Err(a.combine(b)),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
    }
}

fn compile_properties(
    raw: Option<&Value>,
    ctx: &BuildContext<'_>,
) -> Result<IndexMap<String, Arc<Schema>>, SchemaErrors> {
    let mut compiled = IndexMap::new();
    let declared = match raw {
        None => return Ok(compiled),
        Some(Value::Object(declared)) => declared,
        Some(other) => {
            return Err(ctx.error(
                "properties",
                SchemaErrorKind::InvalidKeyword {
                    keyword: "properties",
                    expected: "an object",
                    got: kind_name(other).to_string(),
                },
            ))
        }
    };

    let mut errors = None;
    let base = ctx.at("properties");
    for (name, schema) in declared {
        // Entries that are not mappings cannot be schemas and are skipped.
        if !schema.is_object() {
            continue;
        }
        match ctx.subschema(schema, &base.push_key(name.as_str())) {
            Ok(schema) => {
                compiled.insert(name.clone(), Arc::new(schema));
            }
            Err(e) => errors = merge(errors, e),
        }
    }

    match errors {
        Some(errors) => Err(errors),
        None => Ok(compiled),
    }
}

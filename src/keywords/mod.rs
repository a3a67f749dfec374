//! Per-type keyword registries.
//!
//! Each value type with keywords has a static table of [`KeywordBuilder`]s.
//! A builder turns the raw value of one keyword (plus the raw values of any
//! sibling keywords it depends on) into a compiled predicate, or rejects a
//! malformed configuration. Table order is evaluation order.

pub(crate) mod array;
pub(crate) mod format;
pub(crate) mod integer;
pub(crate) mod number;
pub(crate) mod object;
pub(crate) mod string;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{SchemaErrorKind, SchemaErrors};
use crate::schema::{as_integer, BuildContext};

type BuildFn<C> = fn(&Value, &[&Value], &BuildContext<'_>) -> Result<C, SchemaErrors>;

/// How to compile one keyword.
pub(crate) struct KeywordBuilder<C> {
    pub name: &'static str,
    /// Sibling keywords whose raw values are passed to the builder, in this
    /// order. Compilation fails if any is absent.
    pub requires: &'static [&'static str],
    build: BuildFn<C>,
}

impl<C> KeywordBuilder<C> {
    pub const fn new(name: &'static str, build: BuildFn<C>) -> Self {
        Self {
            name,
            requires: &[],
            build,
        }
    }

    pub const fn requiring(
        name: &'static str,
        requires: &'static [&'static str],
        build: BuildFn<C>,
    ) -> Self {
        Self {
            name,
            requires,
            build,
        }
    }

    /// Resolves the required siblings from `raw` and runs the builder.
    pub fn build(
        &self,
        value: &Value,
        raw: &Map<String, Value>,
        ctx: &BuildContext<'_>,
    ) -> Result<C, SchemaErrors> {
        let mut siblings = Vec::with_capacity(self.requires.len());
        for &sibling in self.requires {
            match raw.get(sibling) {
                Some(v) => siblings.push(v),
                None => {
                    return Err(ctx.error(
                        self.name,
                        SchemaErrorKind::MissingSibling {
                            keyword: self.name,
                            requires: sibling,
                        },
                    ))
                }
            }
        }
        (self.build)(value, &siblings, ctx)
    }
}

pub(crate) fn invalid(
    ctx: &BuildContext<'_>,
    keyword: &'static str,
    expected: &'static str,
    got: &Value,
) -> SchemaErrors {
    ctx.error(
        keyword,
        SchemaErrorKind::InvalidKeyword {
            keyword,
            expected,
            got: got.to_string(),
        },
    )
}

/// A non-negative whole number, used by every length and count bound.
pub(crate) fn count(
    value: &Value,
    ctx: &BuildContext<'_>,
    keyword: &'static str,
) -> Result<usize, SchemaErrors> {
    match value.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= usize::MAX as f64 => Ok(f as usize),
        _ => Err(invalid(ctx, keyword, "a non-negative integer", value)),
    }
}

pub(crate) fn number(
    value: &Value,
    ctx: &BuildContext<'_>,
    keyword: &'static str,
) -> Result<f64, SchemaErrors> {
    value
        .as_f64()
        .ok_or_else(|| invalid(ctx, keyword, "a number", value))
}

pub(crate) fn integer(
    value: &Value,
    ctx: &BuildContext<'_>,
    keyword: &'static str,
) -> Result<i64, SchemaErrors> {
    match value {
        Value::Number(n) => as_integer(n),
        _ => None,
    }
    .ok_or_else(|| invalid(ctx, keyword, "an integer", value))
}

pub(crate) fn string<'v>(
    value: &'v Value,
    ctx: &BuildContext<'_>,
    keyword: &'static str,
) -> Result<&'v str, SchemaErrors> {
    value
        .as_str()
        .ok_or_else(|| invalid(ctx, keyword, "a string", value))
}

pub(crate) fn object<'v>(
    value: &'v Value,
    ctx: &BuildContext<'_>,
    keyword: &'static str,
) -> Result<&'v Map<String, Value>, SchemaErrors> {
    value
        .as_object()
        .ok_or_else(|| invalid(ctx, keyword, "an object", value))
}

pub(crate) fn string_list(
    value: &Value,
    ctx: &BuildContext<'_>,
    keyword: &'static str,
) -> Result<Vec<String>, SchemaErrors> {
    let not_a_list = || invalid(ctx, keyword, "an array of strings", value);
    value
        .as_array()
        .ok_or_else(not_a_list)?
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(not_a_list))
        .collect()
}

pub(crate) fn regex(
    pattern: &str,
    ctx: &BuildContext<'_>,
    keyword: &'static str,
) -> Result<Regex, SchemaErrors> {
    Regex::new(pattern).map_err(|e| {
        ctx.error(
            keyword,
            SchemaErrorKind::InvalidPattern {
                keyword,
                pattern: pattern.to_string(),
                reason: e.to_string(),
            },
        )
    })
}

/// A hashable form of a JSON value in the float number model: `1` and
/// `1.0` share a key, as do `0` and `-0.0`. Object keys are sorted.
#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) enum Canonical<'a> {
    Null,
    Bool(bool),
    Number(Option<u64>),
    String(&'a str),
    Array(Vec<Canonical<'a>>),
    Object(Vec<(&'a str, Canonical<'a>)>),
}

impl<'a> Canonical<'a> {
    pub(crate) fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => Canonical::Null,
            Value::Bool(b) => Canonical::Bool(*b),
            // -0.0 == 0.0, so both fold to the bits of 0.0.
            Value::Number(n) => Canonical::Number(
                n.as_f64()
                    .map(|f| if f == 0.0 { 0.0_f64.to_bits() } else { f.to_bits() }),
            ),
            Value::String(s) => Canonical::String(s),
            Value::Array(items) => Canonical::Array(items.iter().map(Canonical::of).collect()),
            Value::Object(map) => {
                let mut entries: Vec<_> = map
                    .iter()
                    .map(|(k, v)| (k.as_str(), Canonical::of(v)))
                    .collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                Canonical::Object(entries)
            }
        }
    }
}

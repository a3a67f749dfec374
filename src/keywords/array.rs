//! Keywords for `"type": "array"`.

use std::collections::{BTreeSet, HashSet};

use serde_json::Value;
use stillwater::prelude::*;

use crate::error::{SchemaErrors, ValidationError};
use crate::path::JsonPath;
use crate::schema::{kind_name, ArrayCheck, BuildContext, Schema};

use super::{Canonical, KeywordBuilder};

pub(crate) static KEYWORDS: &[KeywordBuilder<ArrayCheck>] = &[
    KeywordBuilder::new("minItems", min_items),
    KeywordBuilder::new("maxItems", max_items),
    KeywordBuilder::new("uniqueItems", unique_items),
    KeywordBuilder::new("items", items),
    KeywordBuilder::new("contains", contains),
    KeywordBuilder::requiring("minContains", &["contains"], min_contains),
    KeywordBuilder::requiring("maxContains", &["contains"], max_contains),
];

fn min_items(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<ArrayCheck, SchemaErrors> {
    let min = super::count(value, ctx, "minItems")?;
    Ok(Box::new(move |items: &[Value], path: &JsonPath| {
        if items.len() >= min {
            Ok(())
        } else {
            Err(ValidationError::new(
                path.clone(),
                format!("at least {} items", min),
                format!("{} items", items.len()),
            ))
        }
    }))
}

fn max_items(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<ArrayCheck, SchemaErrors> {
    let max = super::count(value, ctx, "maxItems")?;
    Ok(Box::new(move |items: &[Value], path: &JsonPath| {
        if items.len() <= max {
            Ok(())
        } else {
            Err(ValidationError::new(
                path.clone(),
                format!("at most {} items", max),
                format!("{} items", items.len()),
            ))
        }
    }))
}

/// Reports the second occurrence of the first repeated element.
fn unique_items(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<ArrayCheck, SchemaErrors> {
    let unique = value
        .as_bool()
        .ok_or_else(|| super::invalid(ctx, "uniqueItems", "a boolean", value))?;
    if !unique {
        return Ok(Box::new(|_: &[Value], _: &JsonPath| Ok(())));
    }
    Ok(Box::new(|items: &[Value], path: &JsonPath| {
        let mut seen = HashSet::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if !seen.insert(Canonical::of(item)) {
                return Err(ValidationError::new(
                    path.push_index(i),
                    "unique items",
                    format!("duplicate item {}", item),
                ));
            }
        }
        Ok(())
    }))
}

/// A single schema applies to every element; a list of schemas applies
/// position by position to as many elements as both sides have.
fn items(value: &Value, _: &[&Value], ctx: &BuildContext<'_>) -> Result<ArrayCheck, SchemaErrors> {
    let location = ctx.at("items");
    match value {
        Value::Object(_) => {
            let schema = ctx.subschema(value, &location)?;
            Ok(Box::new(move |items: &[Value], path: &JsonPath| {
                items
                    .iter()
                    .enumerate()
                    .try_for_each(|(i, item)| schema.validate_at(item, &path.push_index(i)))
            }))
        }
        Value::Array(raw) => {
            let mut schemas = Vec::with_capacity(raw.len());
            let mut errors: Option<SchemaErrors> = None;
            for (i, raw) in raw.iter().enumerate() {
                match ctx.subschema(raw, &location.push_index(i)) {
                    Ok(schema) => schemas.push(schema),
                    Err(e) => {
                        errors = Some(match errors {
                            Some(errors) => errors.combine(e),
                            None => e,
                        })
                    }
                }
            }
            if let Some(errors) = errors {
                return Err(errors);
            }
            Ok(Box::new(move |items: &[Value], path: &JsonPath| {
                schemas
                    .iter()
                    .zip(items)
                    .enumerate()
                    .try_for_each(|(i, (schema, item))| {
                        schema.validate_at(item, &path.push_index(i))
                    })
            }))
        }
        _ => Err(super::invalid(
            ctx,
            "items",
            "an object or an array of objects",
            value,
        )),
    }
}

fn contains(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<ArrayCheck, SchemaErrors> {
    let schema = ctx.subschema(value, &ctx.at("contains"))?;
    Ok(Box::new(move |items: &[Value], path: &JsonPath| {
        if items.iter().any(|item| schema.validate_at(item, path).is_ok()) {
            return Ok(());
        }
        let seen: BTreeSet<&str> = items.iter().map(kind_name).collect();
        let seen: Vec<&str> = seen.into_iter().collect();
        Err(ValidationError::new(
            path.clone(),
            schema.value_type().as_str(),
            format!("[{}]", seen.join(", ")),
        ))
    }))
}

fn matching(schema: &Schema, items: &[Value], path: &JsonPath) -> usize {
    items
        .iter()
        .filter(|item| schema.validate_at(item, path).is_ok())
        .count()
}

fn min_contains(
    value: &Value,
    siblings: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<ArrayCheck, SchemaErrors> {
    let min = super::count(value, ctx, "minContains");
    let schema = ctx.subschema(siblings[0], &ctx.at("contains"));
    let (min, schema) = match (min, schema) {
        (Ok(min), Ok(schema)) => (min, schema),
        (Err(a), Err(b)) => return Err(a.combine(b)),
        (Err(e), _) | (_, Err(e)) => return Err(e),
    };
    Ok(Box::new(move |items: &[Value], path: &JsonPath| {
        let found = matching(&schema, items, path);
        if found >= min {
            Ok(())
        } else {
            Err(ValidationError::new(
                path.clone(),
                format!("at least {} matching items", min),
                format!("{} matching items", found),
            ))
        }
    }))
}

fn max_contains(
    value: &Value,
    siblings: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<ArrayCheck, SchemaErrors> {
    let max = super::count(value, ctx, "maxContains");
    let schema = ctx.subschema(siblings[0], &ctx.at("contains"));
    let (max, schema) = match (max, schema) {
        (Ok(max), Ok(schema)) => (max, schema),
        (Err(a), Err(b)) => return Err(a.combine(b)),
        (Err(e), _) | (_, Err(e)) => return Err(e),
    };
    Ok(Box::new(move |items: &[Value], path: &JsonPath| {
        let found = matching(&schema, items, path);
        if found <= max {
            Ok(())
        } else {
            Err(ValidationError::new(
                path.clone(),
                format!("at most {} matching items", max),
                format!("{} matching items", found),
            ))
        }
    }))
}

//! Keywords for `"type": "object"`.
//!
//! `properties` is not in the table: the compiler builds the property tree
//! itself and installs the predicate from [`properties`] ahead of the rest.

use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Value};
use stillwater::prelude::*;

use crate::error::{SchemaError, SchemaErrorKind, SchemaErrors, ValidationError};
use crate::path::JsonPath;
use crate::schema::{BuildContext, ObjectCheck, Schema, ValueType};

use super::KeywordBuilder;

pub(crate) static KEYWORDS: &[KeywordBuilder<ObjectCheck>] = &[
    KeywordBuilder::new("required", required),
    KeywordBuilder::new("dependentRequired", dependent_required),
    KeywordBuilder::new("minProperties", min_properties),
    KeywordBuilder::new("maxProperties", max_properties),
    KeywordBuilder::new("propertyNames", property_names),
    KeywordBuilder::new("patternProperties", pattern_properties),
];

/// Validates each declared property that is present in the target.
/// Absent properties are left to `required`.
pub(crate) fn properties(tree: IndexMap<String, Arc<Schema>>) -> ObjectCheck {
    Box::new(move |map: &Map<String, Value>, path: &JsonPath| {
        for (name, schema) in &tree {
            if let Some(value) = map.get(name) {
                schema.validate_at(value, &path.push_key(name.as_str()))?;
            }
        }
        Ok(())
    })
}

fn missing(path: &JsonPath, expected: String) -> ValidationError {
    ValidationError::new(path.clone(), expected, "missing")
}

fn required(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<ObjectCheck, SchemaErrors> {
    let names = super::string_list(value, ctx, "required")?;
    Ok(Box::new(move |map: &Map<String, Value>, path: &JsonPath| {
        match names.iter().find(|name| !map.contains_key(name.as_str())) {
            Some(name) => Err(missing(path, format!("property '{}'", name))),
            None => Ok(()),
        }
    }))
}

fn dependent_required(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<ObjectCheck, SchemaErrors> {
    let raw = super::object(value, ctx, "dependentRequired")?;
    let mut dependencies = Vec::with_capacity(raw.len());
    for (trigger, dependents) in raw {
        let dependents = dependents
            .as_array()
            .and_then(|list| {
                list.iter()
                    .map(|d| d.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
            })
            .ok_or_else(|| {
                super::invalid(ctx, "dependentRequired", "an object of string arrays", value)
            })?;
        dependencies.push((trigger.clone(), dependents));
    }

    Ok(Box::new(move |map: &Map<String, Value>, path: &JsonPath| {
        for (trigger, dependents) in &dependencies {
            if !map.contains_key(trigger) {
                continue;
            }
            if let Some(name) = dependents.iter().find(|d| !map.contains_key(d.as_str())) {
                return Err(missing(
                    path,
                    format!("property '{}' (required by '{}')", name, trigger),
                ));
            }
        }
        Ok(())
    }))
}

fn min_properties(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<ObjectCheck, SchemaErrors> {
    let min = super::count(value, ctx, "minProperties")?;
    Ok(Box::new(move |map: &Map<String, Value>, path: &JsonPath| {
        if map.len() >= min {
            Ok(())
        } else {
            Err(ValidationError::new(
                path.clone(),
                format!("at least {} properties", min),
                format!("{} properties", map.len()),
            ))
        }
    }))
}

fn max_properties(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<ObjectCheck, SchemaErrors> {
    let max = super::count(value, ctx, "maxProperties")?;
    Ok(Box::new(move |map: &Map<String, Value>, path: &JsonPath| {
        if map.len() <= max {
            Ok(())
        } else {
            Err(ValidationError::new(
                path.clone(),
                format!("at most {} properties", max),
                format!("{} properties", map.len()),
            ))
        }
    }))
}

/// Keys are checked as strings; the schema may leave out `"type"`.
fn property_names(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<ObjectCheck, SchemaErrors> {
    let schema = ctx.subschema_as(ValueType::String, value, &ctx.at("propertyNames"))?;
    Ok(Box::new(move |map: &Map<String, Value>, path: &JsonPath| {
        map.keys()
            .try_for_each(|key| schema.validate_str(key, &path.push_key(key.as_str())))
    }))
}

/// Every key matching a pattern is checked against that pattern's schema; a
/// key may match several.
fn pattern_properties(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<ObjectCheck, SchemaErrors> {
    let raw = super::object(value, ctx, "patternProperties")?;
    let base = ctx.at("patternProperties");

    let mut compiled: Vec<(Regex, Schema)> = Vec::with_capacity(raw.len());
    let mut errors: Option<SchemaErrors> = None;
    let mut fail = |e: SchemaErrors| {
        errors = Some(match errors.take() {
            Some(errors) => errors.combine(e),
            None => e,
        })
    };

    for (pattern, raw_schema) in raw {
        let location = base.push_key(pattern.as_str());
        let regex = Regex::new(pattern).map_err(|e| {
            SchemaErrors::single(SchemaError::new(
                location.clone(),
                SchemaErrorKind::InvalidPattern {
                    keyword: "patternProperties",
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                },
            ))
        });
        let schema = ctx.subschema(raw_schema, &location);
        match (regex, schema) {
            (Ok(regex), Ok(schema)) => compiled.push((regex, schema)),
            (Err(a), Err(b)) => fail(a.combine(b)),
            (Err(e), _) | (_, Err(e)) => fail(e),
        }
    }

    if let Some(errors) = errors {
        return Err(errors);
    }

    Ok(Box::new(move |map: &Map<String, Value>, path: &JsonPath| {
        for (key, value) in map {
            for (regex, schema) in &compiled {
                if regex.is_match(key) {
                    schema.validate_at(value, &path.push_key(key.as_str()))?;
                }
            }
        }
        Ok(())
    }))
}

//! Keywords for `"type": "string"`.

use serde_json::Value;

use crate::error::{SchemaErrorKind, SchemaErrors, ValidationError};
use crate::path::JsonPath;
use crate::schema::{BuildContext, StringCheck};

use super::format::Format;
use super::KeywordBuilder;

pub(crate) static KEYWORDS: &[KeywordBuilder<StringCheck>] = &[
    KeywordBuilder::new("minLength", min_length),
    KeywordBuilder::new("maxLength", max_length),
    KeywordBuilder::new("pattern", pattern),
    KeywordBuilder::new("format", format),
];

/// Lengths are counted in Unicode scalar values, not bytes.
fn min_length(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<StringCheck, SchemaErrors> {
    let min = super::count(value, ctx, "minLength")?;
    Ok(Box::new(move |s: &str, path: &JsonPath| {
        let len = s.chars().count();
        if len >= min {
            Ok(())
        } else {
            Err(ValidationError::new(
                path.clone(),
                format!("at least {} characters", min),
                format!("{} characters", len),
            ))
        }
    }))
}

fn max_length(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<StringCheck, SchemaErrors> {
    let max = super::count(value, ctx, "maxLength")?;
    Ok(Box::new(move |s: &str, path: &JsonPath| {
        let len = s.chars().count();
        if len <= max {
            Ok(())
        } else {
            Err(ValidationError::new(
                path.clone(),
                format!("at most {} characters", max),
                format!("{} characters", len),
            ))
        }
    }))
}

/// Unanchored: the pattern may match anywhere in the string.
fn pattern(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<StringCheck, SchemaErrors> {
    let source = super::string(value, ctx, "pattern")?;
    let regex = super::regex(source, ctx, "pattern")?;
    Ok(Box::new(move |s: &str, path: &JsonPath| {
        if regex.is_match(s) {
            Ok(())
        } else {
            Err(ValidationError::new(
                path.clone(),
                format!("string matching '{}'", regex.as_str()),
                s,
            ))
        }
    }))
}

fn format(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<StringCheck, SchemaErrors> {
    let name = super::string(value, ctx, "format")?;
    let format: Format = name
        .parse()
        .map_err(|_| ctx.error("format", SchemaErrorKind::UnknownFormat(name.to_string())))?;
    Ok(Box::new(move |s: &str, path: &JsonPath| {
        if format.matches(s) {
            Ok(())
        } else {
            Err(ValidationError::new(path.clone(), format.as_str(), s))
        }
    }))
}

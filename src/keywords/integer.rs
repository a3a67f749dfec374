//! Keywords for `"type": "integer"`.
//!
//! Same keywords as `number`, but every configured value must itself be a
//! whole number in `i64` range and targets are compared as `i64`. Use
//! `"type": "number"` for whole values beyond that range.

use serde_json::Value;

use crate::error::{SchemaErrorKind, SchemaErrors, ValidationError};
use crate::path::JsonPath;
use crate::schema::{BuildContext, IntegerCheck};

use super::KeywordBuilder;

pub(crate) static KEYWORDS: &[KeywordBuilder<IntegerCheck>] = &[
    KeywordBuilder::new("minimum", minimum),
    KeywordBuilder::new("exclusiveMinimum", exclusive_minimum),
    KeywordBuilder::new("maximum", maximum),
    KeywordBuilder::new("exclusiveMaximum", exclusive_maximum),
    KeywordBuilder::new("multipleOf", multiple_of),
];

fn bound(bound: i64, holds: fn(i64, i64) -> bool, describe: &'static str) -> IntegerCheck {
    Box::new(move |n: i64, path: &JsonPath| {
        if holds(n, bound) {
            Ok(())
        } else {
            Err(ValidationError::new(
                path.clone(),
                format!("{} {}", describe, bound),
                n.to_string(),
            ))
        }
    })
}

fn minimum(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<IntegerCheck, SchemaErrors> {
    let min = super::integer(value, ctx, "minimum")?;
    Ok(bound(min, |n, min| n >= min, "at least"))
}

fn exclusive_minimum(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<IntegerCheck, SchemaErrors> {
    let min = super::integer(value, ctx, "exclusiveMinimum")?;
    Ok(bound(min, |n, min| n > min, "greater than"))
}

fn maximum(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<IntegerCheck, SchemaErrors> {
    let max = super::integer(value, ctx, "maximum")?;
    Ok(bound(max, |n, max| n <= max, "at most"))
}

fn exclusive_maximum(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<IntegerCheck, SchemaErrors> {
    let max = super::integer(value, ctx, "exclusiveMaximum")?;
    Ok(bound(max, |n, max| n < max, "less than"))
}

fn multiple_of(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<IntegerCheck, SchemaErrors> {
    let divisor = super::integer(value, ctx, "multipleOf")?;
    if divisor == 0 {
        return Err(ctx.error("multipleOf", SchemaErrorKind::ZeroDivisor("multipleOf")));
    }
    Ok(Box::new(move |n: i64, path: &JsonPath| {
        // Only i64::MIN % -1 overflows, and that quotient is whole.
        if n.checked_rem(divisor).map_or(true, |r| r == 0) {
            Ok(())
        } else {
            Err(ValidationError::new(
                path.clone(),
                format!("a multiple of {}", divisor),
                n.to_string(),
            ))
        }
    }))
}

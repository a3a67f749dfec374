//! Keywords for `"type": "number"`.

use serde_json::Value;

use crate::error::{SchemaErrorKind, SchemaErrors, ValidationError};
use crate::path::JsonPath;
use crate::schema::{BuildContext, NumberCheck};

use super::KeywordBuilder;

pub(crate) static KEYWORDS: &[KeywordBuilder<NumberCheck>] = &[
    KeywordBuilder::new("minimum", minimum),
    KeywordBuilder::new("exclusiveMinimum", exclusive_minimum),
    KeywordBuilder::new("maximum", maximum),
    KeywordBuilder::new("exclusiveMaximum", exclusive_maximum),
    KeywordBuilder::new("multipleOf", multiple_of),
];

/// Builds a check that passes when `holds(target, bound)`.
fn bound(
    bound: f64,
    holds: fn(f64, f64) -> bool,
    describe: &'static str,
) -> NumberCheck {
    Box::new(move |n: f64, path: &JsonPath| {
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
) -> Result<NumberCheck, SchemaErrors> {
    let min = super::number(value, ctx, "minimum")?;
    Ok(bound(min, |n, min| n >= min, "at least"))
}

fn exclusive_minimum(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<NumberCheck, SchemaErrors> {
    let min = super::number(value, ctx, "exclusiveMinimum")?;
    Ok(bound(min, |n, min| n > min, "greater than"))
}

fn maximum(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<NumberCheck, SchemaErrors> {
    let max = super::number(value, ctx, "maximum")?;
    Ok(bound(max, |n, max| n <= max, "at most"))
}

fn exclusive_maximum(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<NumberCheck, SchemaErrors> {
    let max = super::number(value, ctx, "exclusiveMaximum")?;
    Ok(bound(max, |n, max| n < max, "less than"))
}

/// The quotient must be a whole number. Floating-point division is used as
/// is, so `0.3` is not a multiple of `0.1`.
fn multiple_of(
    value: &Value,
    _: &[&Value],
    ctx: &BuildContext<'_>,
) -> Result<NumberCheck, SchemaErrors> {
    let divisor = super::number(value, ctx, "multipleOf")?;
    if divisor == 0.0 {
        return Err(ctx.error("multipleOf", SchemaErrorKind::ZeroDivisor("multipleOf")));
    }
    Ok(Box::new(move |n: f64, path: &JsonPath| {
        let quotient = n / divisor;
        if quotient.is_finite() && quotient.fract() == 0.0 {
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

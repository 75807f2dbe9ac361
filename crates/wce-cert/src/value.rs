//! Tolerant scalar and bound-value readers.
//!
//! Upstream artifacts encode real quantities as decimal strings, as
//! `"[lo, hi]"` interval strings, as `{ "lo": ..., "hi": ... }` objects, or
//! as plain JSON numbers. Each reader selects the face the consuming
//! direction demands: the lo face for proven lower bounds and exponents, the
//! hi face for error terms.

use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive};
use serde_json::Value;
use wce_core::errors::{ErrorInfo, WceError};

fn value_error(code: &str, message: impl Into<String>) -> WceError {
    WceError::Input(ErrorInfo::new(code, message.into()))
}

/// Which face of a two-sided quantity a consumer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// Lower face (proven lower bounds, worst-case exponents).
    Lo,
    /// Upper face (error terms and other upper bounds).
    Hi,
}

fn parse_decimal(text: &str) -> Result<BigDecimal, WceError> {
    BigDecimal::from_str(text.trim()).map_err(|err| {
        value_error("decimal-parse", format!("cannot parse `{text}` as a decimal: {err}"))
    })
}

fn looks_interval(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.len() >= 5 && trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.contains(',')
}

fn split_interval(text: &str, face: Face) -> Result<BigDecimal, WceError> {
    let trimmed = text.trim();
    let inner = &trimmed[1..trimmed.len() - 1];
    let (lo, hi) = inner.split_once(',').ok_or_else(|| {
        value_error("interval-parse", format!("malformed interval string `{text}`"))
    })?;
    match face {
        Face::Lo => parse_decimal(lo),
        Face::Hi => parse_decimal(hi),
    }
}

/// Reads the requested face of a tolerant scalar as an exact decimal.
pub fn decimal_face(value: &Value, face: Face) -> Result<BigDecimal, WceError> {
    match value {
        Value::String(text) => {
            if looks_interval(text) {
                split_interval(text, face)
            } else {
                parse_decimal(text)
            }
        }
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::Object(map) => {
            let key = match face {
                Face::Lo => "lo",
                Face::Hi => "hi",
            };
            let inner = map.get(key).ok_or_else(|| {
                value_error("bound-face-missing", format!("bound object missing `{key}` face"))
            })?;
            decimal_face(inner, face)
        }
        other => Err(value_error(
            "bound-shape",
            format!("cannot read a bound from JSON value `{other}`"),
        )),
    }
}

/// Reads the requested face as an `f64`, nudged outward one ulp so the
/// binary conversion can never round the bound inward.
pub fn f64_face(value: &Value, face: Face) -> Result<f64, WceError> {
    let decimal = decimal_face(value, face)?;
    let approx = decimal
        .to_f64()
        .ok_or_else(|| value_error("bound-f64", format!("decimal `{decimal}` outside f64 range")))?;
    Ok(match face {
        Face::Lo => approx.next_down(),
        Face::Hi => approx.next_up(),
    })
}

/// Reads a tolerant boolean flag (`true`/`false` JSON booleans or strings).
pub fn flag_face(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

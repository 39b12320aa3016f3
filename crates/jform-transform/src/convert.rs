//! # Native Type Conversion
//!
//! Submitted values arrive as strings. Numbers are parsed according to the
//! field declaration; every other type passes through unchanged.
//!
//! Conversion assumes the value was validated first. A value that does not
//! parse is returned as submitted rather than replaced with a default.

use serde_json::{Number, Value};

use jform_core::{FieldDescriptor, FieldType};

/// Converts a raw submitted value to the field's native type.
///
/// - `number` with `integer_only`: integer; float input truncates toward zero.
/// - `number`: float.
/// - `date` and everything else: unchanged.
pub fn convert_to_native(field: &FieldDescriptor, raw: &Value) -> Value {
    match field.kind {
        FieldType::Number if field.is_integer_only() => to_integer(raw),
        FieldType::Number => to_float(raw),
        // Date layouts are not interpreted; callers receive the submitted text.
        FieldType::Date => raw.clone(),
        _ => raw.clone(),
    }
}

fn to_integer(raw: &Value) -> Value {
    let parsed = match raw {
        Value::Number(n) if n.is_i64() || n.is_u64() => return raw.clone(),
        Value::Number(n) => n.as_f64().and_then(truncate),
        Value::String(s) => parse_integer(s.trim()),
        _ => None,
    };
    parsed.map_or_else(|| raw.clone(), Value::from)
}

fn parse_integer(text: &str) -> Option<i64> {
    text.parse::<i64>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().and_then(truncate))
}

fn truncate(f: f64) -> Option<i64> {
    // i64::MAX is not exactly representable; the bound is exclusive.
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

fn to_float(raw: &Value) -> Value {
    let parsed = match raw {
        Value::Number(n) if n.is_f64() => return raw.clone(),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .and_then(Number::from_f64)
        .map_or_else(|| raw.clone(), Value::Number)
}

//! Scalar conversion helpers for payload code.
//!
//! These return a [`PayloadFault`] for values that have no sensible conversion instead of guessing.

use dyncheck_core::numeric::{Number, float_to_string, parse_numeric_str};
use dyncheck_core::{PayloadFault, Value};

/// Convert a value to its string form (`null` → `""`, `true` → `"1"`, `false` → `""`).
///
/// ## Errors
/// - `TypeError` for lists, maps and objects.
pub fn to_string(value: &Value) -> Result<String, PayloadFault> {
    match value {
        Value::Null | Value::Bool(false) => Ok(String::new()),
        Value::Bool(true) => Ok("1".to_string()),
        Value::Int(n) => Ok(n.to_string()),
        Value::Float(f) => Ok(float_to_string(*f)),
        Value::String(s) => Ok(s.clone()),
        other => Err(PayloadFault::type_error(format!(
            "cannot convert {} to string",
            other.type_name()
        ))),
    }
}

/// Convert a value to an int.
///
/// ## Errors
/// - `ValueError` for non-numeric strings.
/// - `TypeError` for lists, maps and objects.
pub fn to_int(value: &Value) -> Result<i64, PayloadFault> {
    match value {
        Value::Null => Ok(0),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Int(n) => Ok(*n),
        Value::Float(f) => Ok(f.trunc() as i64),
        Value::String(s) => match parse_numeric_str(s) {
            Some(Number::Int(n)) => Ok(n),
            Some(Number::Float(f)) => Ok(f.trunc() as i64),
            None => Err(PayloadFault::value_error(format!("cannot convert '{s}' to int"))),
        },
        other => Err(PayloadFault::type_error(format!(
            "cannot convert {} to int",
            other.type_name()
        ))),
    }
}

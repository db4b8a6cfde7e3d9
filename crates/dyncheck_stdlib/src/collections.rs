//! Array helpers used by example payloads.
//!
//! Every helper takes a [`Value`] and returns a `TypeError` fault when it is not a list or map, so a
//! type-confused payload ends its case as an error instead of producing a bogus result.

use dyncheck_core::value::insert_entry;
use dyncheck_core::{MapKey, PayloadFault, Value, strict_equal};

fn require_array<'a>(operation: &str, value: &'a Value) -> Result<&'a Value, PayloadFault> {
    match value {
        Value::List(_) | Value::Map(_) => Ok(value),
        other => Err(PayloadFault::unexpected_type(operation, "array", other.type_name())),
    }
}

/// Number of elements.
pub fn count(value: &Value) -> Result<i64, PayloadFault> {
    let arr = require_array("count", value)?;
    Ok(arr.count().unwrap_or(0) as i64)
}

/// The keys of an array, as a list.
pub fn array_keys(value: &Value) -> Result<Value, PayloadFault> {
    let arr = require_array("array_keys", value)?;
    Ok(arr.entries().into_iter().map(|(k, _)| k.to_value()).collect())
}

/// Inclusive integer range; descends when `start > end`.
///
/// ## Examples
/// ```rust
/// use dyncheck_core::Value;
/// use dyncheck_stdlib::collections::range;
///
/// assert_eq!(range(0, 2), Value::list([Value::from(0), Value::from(1), Value::from(2)]));
/// assert_eq!(range(0, -1), Value::list([Value::from(0), Value::from(-1)]));
/// ```
pub fn range(start: i64, end: i64) -> Value {
    if start <= end {
        (start..=end).map(Value::Int).collect()
    } else {
        (end..=start).rev().map(Value::Int).collect()
    }
}

/// Whether the keys are exactly `0..n` in order.
pub fn is_list(value: &Value) -> Result<bool, PayloadFault> {
    let n = count(value)?;
    if n == 0 {
        return Ok(true);
    }
    Ok(strict_equal(&array_keys(value)?, &range(0, n - 1)))
}

pub fn is_assoc(value: &Value) -> Result<bool, PayloadFault> {
    is_list(value).map(|b| !b)
}

/// Number of string keys.
pub fn count_string_keys(value: &Value) -> Result<i64, PayloadFault> {
    let arr = require_array("count_string_keys", value)?;
    Ok(arr.entries().iter().filter(|(k, _)| k.is_str()).count() as i64)
}

/// Merge arrays: int keys are renumbered in order, string keys overwrite earlier values.
pub fn array_merge(arrays: &[&Value]) -> Result<Value, PayloadFault> {
    let mut entries: Vec<(MapKey, Value)> = Vec::new();
    let mut next_index = 0i64;
    for arr in arrays {
        let arr = require_array("array_merge", arr)?;
        for (k, v) in arr.entries() {
            match k {
                MapKey::Int(_) => {
                    entries.push((MapKey::Int(next_index), v.clone()));
                    next_index += 1;
                }
                key @ MapKey::Str(_) => insert_entry(&mut entries, key, v.clone()),
            }
        }
    }
    Ok(Value::array(entries))
}

/// Merge the children of an array of arrays.
pub fn flatten(value: &Value) -> Result<Value, PayloadFault> {
    let outer = require_array("flatten", value)?;
    let children = outer.entries();
    let refs: Vec<&Value> = children.iter().map(|(_, v)| *v).collect();
    array_merge(&refs)
}

/// First element of an array, or `null` when empty.
pub fn get_first(value: &Value) -> Result<Value, PayloadFault> {
    let arr = require_array("get_first", value)?;
    Ok(arr.entries().first().map(|(_, v)| (*v).clone()).unwrap_or(Value::Null))
}

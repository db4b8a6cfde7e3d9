//! String helpers used by example payloads.

use dyncheck_core::{PayloadFault, Value};

use crate::conversions;

/// Join the elements of a collection with `sep` (implode).
///
/// ## Errors
/// - `TypeError` when `parts` is not a list or map, or an element has no string form.
///
/// ## Examples
/// ```rust
/// use dyncheck_core::Value;
/// use dyncheck_stdlib::strings::join;
///
/// let parts = Value::list([Value::from("a"), Value::from(1)]);
/// assert_eq!(join(&parts, "-").unwrap(), "a-1");
/// ```
pub fn join(parts: &Value, sep: &str) -> Result<String, PayloadFault> {
    if parts.count().is_none() {
        return Err(PayloadFault::unexpected_type("implode", "array", parts.type_name()));
    }
    let pieces = parts
        .entries()
        .into_iter()
        .map(|(_, v)| conversions::to_string(v))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(pieces.join(sep))
}

/// Whether `s` contains `needle`. The empty needle is contained in every string.
pub fn contains(s: &str, needle: &str) -> bool {
    s.contains(needle)
}

/// Whether `s` starts with `prefix`.
pub fn has_prefix(s: &str, prefix: &str) -> bool {
    s.as_bytes().starts_with(prefix.as_bytes())
}

/// Concatenate the string forms of all `parts`.
pub fn concat(parts: &[Value]) -> Result<String, PayloadFault> {
    let mut out = String::new();
    for p in parts {
        out.push_str(&conversions::to_string(p)?);
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn join_cases() {
        let ab = Value::list([Value::from("a"), Value::from("b")]);
        assert_eq!(join(&ab, "").unwrap(), "ab");
        assert_eq!(join(&ab, "-").unwrap(), "a-b");
        assert_eq!(join(&Value::list(Vec::new()), "-").unwrap(), "");
        assert_eq!(join(&Value::map([("k", "v")]), ",").unwrap(), "v");
        assert!(join(&Value::from("ab"), "").is_err());
        assert!(join(&Value::list([Value::list(Vec::new())]), "").is_err());
    }

    #[test]
    fn prefix_and_contains() {
        assert!(has_prefix("Hello World", "Hello"));
        assert!(!has_prefix("Hello World", "ello"));
        assert!(has_prefix("x", ""));
        assert!(contains("foo", "foo"));
        assert!(contains("foo", ""));
        assert!(!contains("foo", "bar"));
    }

    #[test]
    fn concat_converts_scalars() {
        let parts = [Value::from("a"), Value::from(1), Value::Null, Value::Bool(true)];
        assert_eq!(concat(&parts).unwrap(), "a11");
    }
}

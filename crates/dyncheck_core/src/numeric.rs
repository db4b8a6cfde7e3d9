//! Numeric-string policy and canonical number formatting.
//!
//! Loose equality needs to answer two questions about strings and numbers:
//! - is this string a numeric literal (and if so, which number is it)?
//! - what is the canonical string form of a number (used when a non-numeric string meets a number)?
//!
//! ## Notes
//! - The grammar accepted by [`parse_numeric_str`] is
//!   `ws* [+-]? (digits ('.' digits?)? | '.' digits) ([eE] [+-]? digits)? ws*`, where `ws` is one of
//!   space, `\t`, `\n`, `\r`, `\v` (0x0B) or `\f` (0x0C).
//! - Hex/binary prefixes, underscores, `INF` and `NAN` spellings are **not** numeric.

/// A number recovered from a numeric string.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }
}

impl PartialEq for Number {
    /// Int/Int compares exactly; every other pairing compares as floats via [`float_eq`].
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            _ => float_eq(self.to_f64(), other.to_f64()),
        }
    }
}

/// Check whether `s` is a numeric string.
///
/// ## Examples
/// ```rust
/// use dyncheck_core::numeric::is_numeric_str;
///
/// assert!(is_numeric_str("1"));
/// assert!(is_numeric_str(" 1.5e3 "));
/// assert!(!is_numeric_str("1e"));
/// assert!(!is_numeric_str("0x1A"));
/// ```
pub fn is_numeric_str(s: &str) -> bool {
    numeric_shape(s).is_some()
}

/// Parse a numeric string into a [`Number`].
///
/// ## Returns
/// - `Some(Number::Int)` for integer literals (no `.`, no exponent) that fit `i64`.
/// - `Some(Number::Float)` for every other numeric literal, including overflowing integers.
/// - `None` when `s` is not numeric.
pub fn parse_numeric_str(s: &str) -> Option<Number> {
    let (trimmed, integral) = numeric_shape(s)?;
    if integral {
        if let Ok(n) = trimmed.parse::<i64>() {
            return Some(Number::Int(n));
        }
    }
    trimmed.parse::<f64>().ok().map(Number::Float)
}

/// Whitespace allowed around a numeric literal: space, `\t`, `\n`, `\r`, `\v` and `\f`.
const NUMERIC_WHITESPACE: [char; 6] = [' ', '\t', '\n', '\r', '\x0B', '\x0C'];

/// Validate the numeric grammar, returning the trimmed literal and whether it is integral.
fn numeric_shape(s: &str) -> Option<(&str, bool)> {
    let t = s.trim_matches(NUMERIC_WHITESPACE);
    let bytes = t.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    let mut integral = true;
    if bytes.get(i) == Some(&b'.') {
        integral = false;
        i += 1;
        frac_digits = count_digits(&bytes[i..]);
        i += frac_digits;
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        integral = false;
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_digits = count_digits(&bytes[i..]);
        if exp_digits == 0 {
            return None;
        }
        i += exp_digits;
    }

    (i == bytes.len()).then_some((t, integral))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Canonical decimal form of an int.
pub fn int_to_string(n: i64) -> String {
    n.to_string()
}

/// Canonical string form of a float.
///
/// ## Notes
/// - Non-finite values print as `INF`, `-INF`, `NAN`.
/// - Magnitudes `>= 1e15` or `< 1e-4` (non-zero) use exponent form: `1.0E+25`, `1.5E-5`.
/// - Everything else prints the shortest round-trip decimal without a trailing `.0` (`1.0` → `1`).
///
/// ## Examples
/// ```rust
/// use dyncheck_core::numeric::float_to_string;
///
/// assert_eq!(float_to_string(1.0), "1");
/// assert_eq!(float_to_string(0.1), "0.1");
/// assert_eq!(float_to_string(1e25), "1.0E+25");
/// assert_eq!(float_to_string(f64::NEG_INFINITY), "-INF");
/// ```
pub fn float_to_string(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    let abs = f.abs();
    if abs != 0.0 && !(1e-4..1e15).contains(&abs) {
        return exponent_form(f);
    }
    if f == 0.0 && f.is_sign_negative() {
        return "-0".to_string();
    }
    f.to_string()
}

fn exponent_form(f: f64) -> String {
    let sci = format!("{f:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    if mantissa.contains('.') {
        format!("{mantissa}E{sign}{}", exp.unsigned_abs())
    } else {
        format!("{mantissa}.0E{sign}{}", exp.unsigned_abs())
    }
}

/// Float equality where NaN equals NaN and `0.0 == -0.0`.
#[inline]
pub fn float_eq(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_grammar_accepts() {
        for s in [
            "0", "1", "-1", "+1", "1.", ".5", "1.5", "1e3", "1E-3", "-.5e+2", " 12", "12 ", "\t7\n", "007",
        ] {
            assert!(is_numeric_str(s), "expected numeric: {s:?}");
        }
    }

    #[test]
    fn numeric_grammar_rejects() {
        for s in [
            "", " ", ".", "+", "-", "e3", "1e", "1e+", "0x1A", "0b1", "1_000", "INF", "NAN", "1.2.3", "abc", "1a",
            "1 2",
        ] {
            assert!(!is_numeric_str(s), "expected non-numeric: {s:?}");
        }
    }

    #[test]
    fn vertical_tab_and_form_feed_are_whitespace() {
        assert!(matches!(parse_numeric_str("1\x0B"), Some(Number::Int(1))));
        assert!(matches!(parse_numeric_str("\x0C2.5"), Some(Number::Float(f)) if f == 2.5));
        assert!(!is_numeric_str("1\u{a0}"));
    }

    #[test]
    fn parse_picks_int_or_float() {
        assert!(matches!(parse_numeric_str("42"), Some(Number::Int(42))));
        assert!(matches!(parse_numeric_str(" -7 "), Some(Number::Int(-7))));
        assert!(matches!(parse_numeric_str("+7"), Some(Number::Int(7))));
        assert!(matches!(parse_numeric_str("1.0"), Some(Number::Float(f)) if f == 1.0));
        assert!(matches!(parse_numeric_str("1e2"), Some(Number::Float(f)) if f == 100.0));
        assert!(matches!(
            parse_numeric_str("99999999999999999999"),
            Some(Number::Float(f)) if f == 1e20
        ));
        assert!(parse_numeric_str("foo").is_none());
    }

    #[test]
    fn number_equality_promotes() {
        assert_eq!(Number::Int(1), Number::Float(1.0));
        assert_ne!(Number::Int(1), Number::Int(2));
        assert_eq!(Number::Float(f64::NAN), Number::Float(f64::NAN));
    }

    #[test]
    fn float_canonical_strings() {
        assert_eq!(float_to_string(0.0), "0");
        assert_eq!(float_to_string(-0.0), "-0");
        assert_eq!(float_to_string(1.5), "1.5");
        assert_eq!(float_to_string(-2.0), "-2");
        assert_eq!(float_to_string(100000000000000.0), "100000000000000");
        assert_eq!(float_to_string(1e15), "1.0E+15");
        assert_eq!(float_to_string(1.5e-5), "1.5E-5");
        assert_eq!(float_to_string(0.0001), "0.0001");
        assert_eq!(float_to_string(-1.25e20), "-1.25E+20");
        assert_eq!(float_to_string(f64::NAN), "NAN");
        assert_eq!(float_to_string(f64::INFINITY), "INF");
    }

    #[test]
    fn float_eq_handles_nan_and_signed_zero() {
        assert!(float_eq(f64::NAN, f64::NAN));
        assert!(float_eq(0.0, -0.0));
        assert!(!float_eq(1.0, f64::NAN));
    }
}

//! Strict and loose equality over [`Value`].
//!
//! Loose equality is driven by an explicit table: [`loose_rule`] maps an (unordered) pair of tags to a
//! [`LooseRule`], and [`loose_equal`] applies that rule. Keeping the table as one exhaustive `match` makes the
//! coercion policy auditable in a single place.
//!
//! ## Notes
//! - Both operators are symmetric. Strict equality is reflexive (NaN equals NaN).
//! - `strict_equal(a, b)` implies `loose_equal(a, b)`.
//! - Loose equality is **not** transitive: `null == false` and `false == "0"` hold, `null == "0"` does not.
//!
//! ## Examples
//! ```rust
//! use dyncheck_core::{Value, loose_equal, strict_equal};
//!
//! assert!(loose_equal(&Value::from("1"), &Value::from(1)));
//! assert!(!strict_equal(&Value::from("1"), &Value::from(1)));
//! ```

use crate::numeric::{Number, float_eq, float_to_string, int_to_string, parse_numeric_str};
use crate::value::{MapKey, Tag, Value};

/// The coercion rule applied to a pair of tags by [`loose_equal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LooseRule {
    /// `null == null`.
    BothNull,
    /// One side is a bool: compare truthiness of both sides.
    Truthiness,
    /// `null` vs string: equal iff the string is empty.
    NullVsString,
    /// `null` vs int/float/list/map/object: equal iff the other side is falsy.
    NullVsFalsy,
    /// Exact integer comparison.
    IntExact,
    /// Numeric comparison after promoting to float.
    NumericPromoted,
    /// Numeric string → numeric comparison, otherwise compare canonical strings.
    NumericVsString,
    /// Exact byte comparison.
    StringExact,
    /// Same length, pairwise loose.
    ListPairwise,
    /// Same key set, loose per key.
    MapByKey,
    /// Same instance.
    ObjectIdentity,
    /// Never equal.
    Incomparable,
}

/// Look up the loose-comparison rule for a pair of tags.
///
/// ## Notes
/// - The result does not depend on operand order: `loose_rule(a, b) == loose_rule(b, a)`.
pub fn loose_rule(a: Tag, b: Tag) -> LooseRule {
    use Tag::*;

    match (a, b) {
        (Null, Null) => LooseRule::BothNull,
        (Bool, _) | (_, Bool) => LooseRule::Truthiness,
        (Null, String) | (String, Null) => LooseRule::NullVsString,
        (Null, Int | Float | List | Map | Object) | (Int | Float | List | Map | Object, Null) => LooseRule::NullVsFalsy,
        (Int, Int) => LooseRule::IntExact,
        (Int | Float, Int | Float) => LooseRule::NumericPromoted,
        (Int | Float, String) | (String, Int | Float) => LooseRule::NumericVsString,
        (String, String) => LooseRule::StringExact,
        (List, List) => LooseRule::ListPairwise,
        (Map, Map) => LooseRule::MapByKey,
        (Object, Object) => LooseRule::ObjectIdentity,
        (Int | Float | String | List | Map | Object, Int | Float | String | List | Map | Object) => {
            LooseRule::Incomparable
        }
    }
}

/// Type-coercing equality.
pub fn loose_equal(a: &Value, b: &Value) -> bool {
    match loose_rule(a.tag(), b.tag()) {
        LooseRule::BothNull => true,
        LooseRule::Truthiness => a.as_bool() == b.as_bool(),
        LooseRule::NullVsString => matches!((a, b), (Value::String(s), _) | (_, Value::String(s)) if s.is_empty()),
        LooseRule::NullVsFalsy => !a.as_bool() && !b.as_bool(),
        LooseRule::IntExact => a.as_int() == b.as_int(),
        LooseRule::NumericPromoted => match (a.as_float(), b.as_float()) {
            (Some(x), Some(y)) => float_eq(x, y),
            _ => false,
        },
        LooseRule::NumericVsString => match (a, b) {
            (Value::String(s), n) | (n, Value::String(s)) => number_vs_string(n, s),
            _ => false,
        },
        LooseRule::StringExact => a.as_str() == b.as_str(),
        LooseRule::ListPairwise => match (a, b) {
            (Value::List(x), Value::List(y)) => lists_equal(x, y, loose_equal),
            _ => false,
        },
        LooseRule::MapByKey => match (a, b) {
            (Value::Map(x), Value::Map(y)) => maps_equal(x, y, loose_equal),
            _ => false,
        },
        LooseRule::ObjectIdentity => match (a, b) {
            (Value::Object(x), Value::Object(y)) => x.same_instance(y),
            _ => false,
        },
        LooseRule::Incomparable => false,
    }
}

fn number_vs_string(n: &Value, s: &str) -> bool {
    let number = match n {
        Value::Int(i) => Number::Int(*i),
        Value::Float(f) => Number::Float(*f),
        _ => return false,
    };
    match parse_numeric_str(s) {
        Some(parsed) => number == parsed,
        None => canonical_number_string(number) == s,
    }
}

fn canonical_number_string(n: Number) -> String {
    match n {
        Number::Int(i) => int_to_string(i),
        Number::Float(f) => float_to_string(f),
    }
}

/// Type-and-structure equality with no coercion.
///
/// ## Notes
/// - Lists compare in order; maps compare by key set regardless of insertion order.
/// - Objects compare by identity.
pub fn strict_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => float_eq(*x, *y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::List(x), Value::List(y)) => lists_equal(x, y, strict_equal),
        (Value::Map(x), Value::Map(y)) => maps_equal(x, y, strict_equal),
        (Value::Object(x), Value::Object(y)) => x.same_instance(y),
        _ => false,
    }
}

fn lists_equal(x: &[Value], y: &[Value], eq: fn(&Value, &Value) -> bool) -> bool {
    x.len() == y.len() && x.iter().zip(y).all(|(a, b)| eq(a, b))
}

// Keys are unique within a map, so equal length plus "every key of x is in y" means equal key sets.
fn maps_equal(x: &[(MapKey, Value)], y: &[(MapKey, Value)], eq: fn(&Value, &Value) -> bool) -> bool {
    x.len() == y.len()
        && x.iter().all(|(k, va)| {
            y.iter()
                .find(|(other, _)| other == k)
                .is_some_and(|(_, vb)| eq(va, vb))
        })
}

//! Property-based tests for the comparison tables
//!
//! These tests use proptest to check the algebraic guarantees of strict and loose equality over randomly
//! generated values, including nested collections, numeric strings and non-finite floats.

use dyncheck_core::lang::assertions::{ASSERTIONS, negation_of};
use dyncheck_core::{MapKey, ObjectId, ObjectRef, Value, evaluate, loose_equal, strict_equal};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn float_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(-0.0),
        Just(1.0),
        Just(1.5),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        (-1000i32..1000).prop_map(f64::from),
        any::<f64>(),
    ]
}

fn string_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("0".to_string()),
        Just("1".to_string()),
        Just("1.0".to_string()),
        Just(" 1".to_string()),
        Just("1e0".to_string()),
        Just("abc".to_string()),
        "[+-]?[0-9]{1,3}(\\.[0-9]{0,2})?",
        "[a-c0-9 .]{0,4}",
    ]
}

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-3i64..4).prop_map(Value::Int),
        any::<i64>().prop_map(Value::Int),
        float_strategy().prop_map(Value::Float),
        string_strategy().prop_map(Value::String),
        (0u64..3).prop_map(|id| Value::Object(ObjectRef::with_id(ObjectId(id), "Widget"))),
    ]
}

fn key_strategy() -> impl Strategy<Value = MapKey> {
    prop_oneof![(0i64..4).prop_map(MapKey::Int), "[a-c]".prop_map(MapKey::from)]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec((key_strategy(), inner), 0..4).prop_map(Value::map),
        ]
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn strict_is_reflexive(a in value_strategy()) {
        prop_assert!(strict_equal(&a, &a), "{a:?}");
    }

    #[test]
    fn strict_is_symmetric(a in value_strategy(), b in value_strategy()) {
        prop_assert_eq!(strict_equal(&a, &b), strict_equal(&b, &a));
    }

    #[test]
    fn loose_is_symmetric(a in value_strategy(), b in value_strategy()) {
        prop_assert_eq!(loose_equal(&a, &b), loose_equal(&b, &a), "{:?} vs {:?}", a, b);
    }

    #[test]
    fn strict_implies_loose(a in value_strategy(), b in value_strategy()) {
        if strict_equal(&a, &b) {
            prop_assert!(loose_equal(&a, &b), "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn clone_is_strictly_equal(a in value_strategy()) {
        prop_assert!(strict_equal(&a, &a.clone()));
    }

    /// Comparing against a bool is truthiness.
    #[test]
    fn loose_against_true_is_truthiness(a in value_strategy()) {
        prop_assert_eq!(loose_equal(&a, &Value::Bool(true)), a.as_bool());
        prop_assert_eq!(loose_equal(&Value::Bool(false), &a), !a.as_bool());
    }

    #[test]
    fn assertions_are_total_and_negations_disagree(a in value_strategy(), b in value_strategy()) {
        for info in ASSERTIONS {
            let id = info.item.id;
            let verdict = evaluate(id, &a, &b);
            let negated = evaluate(negation_of(id), &a, &b);
            prop_assert_ne!(verdict.is_pass(), negated.is_pass(), "{:?}", id);
            if let Some(reason) = verdict.reason() {
                prop_assert!(reason.starts_with("Failed asserting that "));
            }
        }
    }

    #[test]
    fn rendering_is_never_empty(a in value_strategy()) {
        prop_assert!(!a.render().is_empty());
    }
}

// =============================================================================
// Fixed witnesses
// =============================================================================

#[test]
fn loose_equality_is_not_transitive() {
    let (a, b, c) = (Value::Null, Value::from(0), Value::from("0"));
    assert!(loose_equal(&a, &b));
    assert!(loose_equal(&b, &c));
    assert!(!loose_equal(&a, &c));

    let (a, b, c) = (Value::from("1"), Value::from(true), Value::from("abc"));
    assert!(loose_equal(&a, &b));
    assert!(loose_equal(&b, &c));
    assert!(!loose_equal(&a, &c));
}

#[test]
fn nan_is_equal_to_itself() {
    let nan = Value::Float(f64::NAN);
    assert!(strict_equal(&nan, &nan));
    assert!(loose_equal(&nan, &nan));
}

#[test]
fn list_and_map_never_compare_equal() {
    let list = Value::list([Value::from(1)]);
    let map = Value::map([("0", 1)]);
    assert!(!loose_equal(&list, &map));
    assert!(!loose_equal(&Value::list(Vec::new()), &Value::Map(Vec::new())));
}

#[test]
fn map_comparison_ignores_order() {
    let a = Value::map([("x", 1), ("y", 2)]);
    let b = Value::map([("y", 2), ("x", 1)]);
    assert!(strict_equal(&a, &b));
    assert!(loose_equal(&a, &Value::map([("y", "2"), ("x", "1")])));
    assert!(!strict_equal(&a, &Value::map([("y", "2"), ("x", "1")])));
}

#[test]
fn objects_compare_by_identity() {
    let a = Value::object("Baz");
    let b = Value::object("Baz");
    assert!(strict_equal(&a, &a.clone()));
    assert!(!strict_equal(&a, &b));
    assert!(!loose_equal(&a, &b));
}

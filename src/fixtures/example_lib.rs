//! Tests for the string and array helpers of the runtime library. All cases pass.

use dyncheck_core::{MapKey, Value};
use dyncheck_stdlib::{collections, strings};

use crate::runner::units::TestUnit;

fn ints(xs: &[i64]) -> Value {
    xs.iter().copied().map(Value::Int).collect()
}

fn strs(xs: &[&str]) -> Value {
    xs.iter().copied().map(Value::from).collect()
}

fn arrays() -> TestUnit {
    TestUnit::new("ArraysTest")
        .case("testIsList", |t| {
            t.assert_same(collections::is_list(&Value::list(Vec::new()))?, true)?;
            t.assert_same(collections::is_list(&ints(&[1]))?, true)?;
            t.assert_same(collections::is_list(&Value::map([("x", 1)]))?, false)
        })
        .case("testIsAssoc", |t| {
            t.assert_same(collections::is_assoc(&Value::list(Vec::new()))?, false)?;
            t.assert_same(collections::is_assoc(&ints(&[1]))?, false)?;
            t.assert_same(collections::is_assoc(&Value::map([("x", 1)]))?, true)
        })
        .case("testFlatten", |t| {
            let nested = Value::list([ints(&[1]), ints(&[2]), ints(&[3])]);
            t.assert_same(ints(&[1, 2, 3]), collections::flatten(&nested)?)
        })
        .case("testCountStringKeys", |t| {
            let mixed = Value::map([(MapKey::from("x"), 4), (MapKey::from(3), 2)]);
            t.assert_equals(0, collections::count_string_keys(&Value::map([(3, 2)]))?)?;
            t.assert_equals(1, collections::count_string_keys(&mixed)?)?;
            t.assert_equals(2, collections::count_string_keys(&Value::map([("x", 4), ("y", 2)]))?)
        })
}

fn strings() -> TestUnit {
    TestUnit::new("StringsTest")
        .case("testContains", |t| {
            t.assert_same(strings::contains("foo", "bar"), false)?;
            t.assert_true(strings::contains("foo", "foo"))
        })
        .case("testHasPrefix", |t| {
            t.assert_same(strings::has_prefix("Hello World", "Hello"), true)?;
            t.assert_false(strings::has_prefix("Hello World", "ello"))
        })
        .case("testJoin", |t| {
            t.assert_equals(strings::join(&strs(&["a", "b"]), "")?, "ab")?;
            t.assert_equals(strings::join(&strs(&["a", "b"]), "-")?, "a-b")?;
            t.assert_equals(strings::join(&strs(&["a"]), "")?, "a")?;
            t.assert_equals(strings::join(&strs(&["a"]), "-")?, "a")?;
            t.assert_equals(strings::join(&strs(&[]), "")?, "")
        })
}

pub fn units() -> Vec<TestUnit> {
    vec![arrays(), strings()]
}

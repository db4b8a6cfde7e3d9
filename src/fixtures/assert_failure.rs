//! Samples of failing and erroring cases, used to exercise the failure report.

use dyncheck_stdlib::collections;
use dyncheck_stdlib::conversions::to_int;
use dyncheck_stdlib::prelude::*;

use crate::runner::units::TestUnit;

struct Baz;

impl Baz {
    fn add1(&self, x: impl Into<Value>) -> Result<i64, PayloadFault> {
        Ok(to_int(&x.into())? + 1)
    }
}

fn baz() -> TestUnit {
    TestUnit::new("BazTest")
        .case("testEquals1", |t| t.assert_equals(Baz.add1(2)?, "foo"))
        .case("testTrue", |t| t.assert_true(Baz.add1(10)?))
        .case("testFalse", |t| t.assert_false(Value::list([Value::from("a"), Value::from("b")])))
}

fn integers() -> TestUnit {
    TestUnit::new("IntegersTest")
        .case("testGetFirst", |t| {
            t.assert_same(collections::get_first(&Value::list(Vec::new()))?, Value::Null)?;
            t.assert_same(collections::get_first(&Value::list([Value::from(1)]))?, 1)
        })
        .case("testGetFirstOfScalar", |t| {
            t.assert_same(collections::get_first(&Value::from(1))?, 1)
        })
}

pub fn units() -> Vec<TestUnit> {
    vec![baz(), integers()]
}

//! One case per assertion primitive and outcome.
//!
//! Case names say whether the assertion passes under the truthiness, strict and loose tables. Each case
//! makes exactly one assertion, so the unit doubles as a golden sample for the console report.

use crate::runner::units::TestUnit;

pub fn units() -> Vec<TestUnit> {
    vec![
        TestUnit::new("BasicOpsTest")
            .case("testAssertTrueOk1", |t| t.assert_true(true))
            .case("testAssertTrueOk2", |t| t.assert_true(1))
            .case("testAssertTrueFail1", |t| t.assert_true(false))
            .case("testAssertTrueFail2", |t| t.assert_true(0))
            .case("testAssertFalseOk1", |t| t.assert_false(false))
            .case("testAssertFalseOk2", |t| t.assert_false(0))
            .case("testAssertFalseFail1", |t| t.assert_false(true))
            .case("testAssertFalseFail2", |t| t.assert_false(1))
            .case("testAssertSameOk1", |t| t.assert_same(10, 10))
            .case("testAssertSameFail1", |t| t.assert_same(true, false))
            .case("testAssertSameFail2", |t| t.assert_same(0, false))
            .case("testAssertSameFail3", |t| t.assert_same("0", 0))
            .case("testAssertNotSameOk1", |t| t.assert_not_same("0", 0))
            .case("testAssertNotSameOk2", |t| t.assert_not_same(0, 1))
            .case("testAssertNotSameFail1", |t| t.assert_not_same(1, 1))
            .case("testAssertNotSameFail2", |t| t.assert_not_same("1", "1"))
            .case("testAssertEqualsOk1", |t| t.assert_equals(1, 1))
            .case("testAssertEqualsOk2", |t| t.assert_equals("1", 1))
            .case("testAssertEqualsFail1", |t| t.assert_equals(1, 2))
            .case("testAssertEqualsFail2", |t| t.assert_equals(false, true))
            .case("testAssertNotEqualsOk1", |t| t.assert_not_equals(1, 2))
            .case("testAssertNotEqualsOk2", |t| t.assert_not_equals("foo", false))
            .case("testAssertNotEqualsFail1", |t| t.assert_not_equals(false, 0))
            .case("testAssertNotEqualsFail2", |t| t.assert_not_equals("1", 1)),
    ]
}

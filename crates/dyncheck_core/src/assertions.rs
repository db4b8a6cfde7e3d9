//! Assertion evaluation.
//!
//! Assertions take already-evaluated operands in `(expected, actual)` order and produce a [`Verdict`].
//! Evaluation is total: every assertion id and every pair of values yields a verdict without faulting.
//!
//! ## Examples
//! ```rust
//! use dyncheck_core::{AssertionId, Value, Verdict, evaluate};
//!
//! assert_eq!(evaluate(AssertionId::Equals, &Value::from("1"), &Value::from(1)), Verdict::Pass);
//! assert!(evaluate(AssertionId::Same, &Value::from(0), &Value::from(false)).is_fail());
//! ```

use crate::equality::{loose_equal, strict_equal};
use crate::lang::assertions::{AssertionId, Comparison, info_for};
use crate::value::Value;

/// Outcome of a single assertion evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// The assertion did not hold; `reason` is the xUnit-style `Failed asserting that ...` sentence
    /// (without a trailing period).
    Fail { reason: String },
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn is_fail(&self) -> bool {
        !self.is_pass()
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Pass => None,
            Verdict::Fail { reason } => Some(reason),
        }
    }
}

/// Evaluate an assertion.
///
/// ## Parameters
/// - `id`: which primitive to evaluate.
/// - `expected`: the expected operand. Ignored by single-operand assertions (`assertTrue`/`assertFalse`).
/// - `actual`: the value under test.
///
/// ## Returns
/// - [`Verdict::Pass`] when the pass condition holds, otherwise [`Verdict::Fail`] with a rendered reason.
pub fn evaluate(id: AssertionId, expected: &Value, actual: &Value) -> Verdict {
    if holds(id, expected, actual) {
        Verdict::Pass
    } else {
        Verdict::Fail {
            reason: failure_reason(id, expected, actual),
        }
    }
}

/// Evaluate a single-operand assertion.
pub fn evaluate_unary(id: AssertionId, actual: &Value) -> Verdict {
    evaluate(id, &Value::Null, actual)
}

fn holds(id: AssertionId, expected: &Value, actual: &Value) -> bool {
    let info = info_for(id);
    let compared = match info.comparison {
        Comparison::Truthiness => actual.as_bool(),
        Comparison::Strict => strict_equal(expected, actual),
        Comparison::Loose => loose_equal(expected, actual),
    };
    compared != info.negated
}

/// Render the failure sentence for an assertion, whether or not it actually failed.
///
/// ## Examples
/// ```rust
/// use dyncheck_core::{AssertionId, Value, failure_reason};
///
/// assert_eq!(
///     failure_reason(AssertionId::Equals, &Value::from(1), &Value::from(2)),
///     "Failed asserting that 2 matches expected 1"
/// );
/// assert_eq!(
///     failure_reason(AssertionId::True, &Value::Null, &Value::from(0)),
///     "Failed asserting that 0 is true"
/// );
/// ```
pub fn failure_reason(id: AssertionId, expected: &Value, actual: &Value) -> String {
    let info = info_for(id);
    match info.comparison {
        Comparison::Truthiness => format!("Failed asserting that {actual} {}", info.phrase),
        Comparison::Strict | Comparison::Loose => {
            format!("Failed asserting that {actual} {} {expected}", info.phrase)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v<T: Into<Value>>(x: T) -> Value {
        x.into()
    }

    #[test]
    fn literal_verdicts() {
        assert!(evaluate(AssertionId::Same, &v(0), &v(false)).is_fail());
        assert!(evaluate(AssertionId::Same, &v("0"), &v(0)).is_fail());
        assert!(evaluate(AssertionId::Equals, &v("1"), &v(1)).is_pass());
        assert!(evaluate(AssertionId::NotEquals, &v("foo"), &v(false)).is_pass());
        assert!(evaluate(AssertionId::NotEquals, &v(false), &v(0)).is_fail());
        assert!(evaluate_unary(AssertionId::True, &v(0)).is_fail());
        assert!(evaluate_unary(AssertionId::True, &v(1)).is_pass());
        assert!(evaluate_unary(AssertionId::False, &v(0)).is_pass());
        assert!(evaluate(AssertionId::NotSame, &v("1"), &v("1")).is_fail());
    }

    #[test]
    fn reasons_use_failed_asserting_wording() {
        assert_eq!(
            evaluate(AssertionId::Same, &v(true), &v(false)).reason(),
            Some("Failed asserting that false is identical to true")
        );
        assert_eq!(
            evaluate(AssertionId::NotSame, &v(1), &v(1)).reason(),
            Some("Failed asserting that 1 is not identical to 1")
        );
        assert_eq!(
            evaluate(AssertionId::NotEquals, &v("1"), &v(1)).reason(),
            Some("Failed asserting that 1 is not equal to '1'")
        );
        assert_eq!(
            evaluate_unary(AssertionId::False, &Value::list([v("a"), v("b")])).reason(),
            Some("Failed asserting that ['a', 'b'] is false")
        );
    }

    #[test]
    fn negated_pairs_disagree() {
        let values = [v(0), v("0"), v(false), Value::Null, v(1.0), v("a")];
        for a in &values {
            for b in &values {
                assert_ne!(
                    evaluate(AssertionId::Equals, a, b).is_pass(),
                    evaluate(AssertionId::NotEquals, a, b).is_pass()
                );
                assert_ne!(
                    evaluate(AssertionId::Same, a, b).is_pass(),
                    evaluate(AssertionId::NotSame, a, b).is_pass()
                );
            }
        }
    }
}

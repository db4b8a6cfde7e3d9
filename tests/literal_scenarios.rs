//! Literal assertion scenarios, checked both directly against the assertion engine and through the runner
//! with the built-in `basic-ops` suite.

use dyncheck::fixtures::basic_ops;
use dyncheck::runner::{CaseOutcome, InProcessExecutor, RunSummary, TestConfig, TestReporter, run_units};
use dyncheck_core::{AssertionId, Value, evaluate};

struct Quiet;

impl TestReporter for Quiet {
    fn on_collection_complete(&mut self, _unit_count: usize, _case_count: usize) -> std::io::Result<()> {
        Ok(())
    }

    fn on_case_complete(&mut self, _outcome: &CaseOutcome) -> std::io::Result<()> {
        Ok(())
    }

    fn on_run_complete(&mut self, _summary: &RunSummary) -> std::io::Result<()> {
        Ok(())
    }
}

fn passes(id: AssertionId, expected: impl Into<Value>, actual: impl Into<Value>) -> bool {
    evaluate(id, &expected.into(), &actual.into()).is_pass()
}

#[test]
fn documented_literals() {
    assert!(!passes(AssertionId::Same, 0, false));
    assert!(!passes(AssertionId::Same, "0", 0));
    assert!(passes(AssertionId::Equals, "1", 1));
    assert!(passes(AssertionId::NotEquals, "foo", false));
    assert!(!passes(AssertionId::NotEquals, false, 0));
    assert!(!passes(AssertionId::True, Value::Null, 0));
    assert!(passes(AssertionId::True, Value::Null, 1));
}

#[test]
fn failure_messages_render_both_operands() {
    let verdict = evaluate(AssertionId::Same, &Value::from("0"), &Value::from(0));
    assert_eq!(verdict.reason(), Some("Failed asserting that 0 is identical to '0'"));

    let verdict = evaluate(AssertionId::Equals, &Value::from(1), &Value::from(2));
    assert_eq!(verdict.reason(), Some("Failed asserting that 2 matches expected 1"));

    let verdict = evaluate(AssertionId::False, &Value::Null, &Value::list([Value::from("a")]));
    assert_eq!(verdict.reason(), Some("Failed asserting that ['a'] is false"));
}

#[test]
fn basic_ops_outcomes_follow_case_names() {
    let summary = run_units(basic_ops::units(), &TestConfig::new(), &InProcessExecutor, &mut Quiet).unwrap();
    let unit = &summary.units[0];
    assert_eq!(unit.cases.len(), 24);

    for case in &unit.cases {
        assert_eq!(case.assertion_count(), 1, "{}", case.case);
        let expect_pass = case.case.contains("Ok");
        assert_eq!(case.is_pass(), expect_pass, "{}", case.qualified_name());
    }
    assert_eq!(summary.failures().len(), 13);
    assert!(summary.errors().is_empty());
}

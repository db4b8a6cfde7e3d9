//! Runner I/O boundary interfaces
//!
//! The runner talks to two collaborators through traits:
//! - [`UnitLoader`] supplies unit descriptors (discovery input);
//! - [`CaseExecutor`] runs one test case in isolation and reports its outcome.
//!
//! Default implementations: [`StaticLoader`] (a pre-built descriptor list) and [`InProcessExecutor`]
//! (fresh context per case, panics contained with `catch_unwind`).

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use dyncheck_stdlib::errors::fault_from_panic;
use dyncheck_stdlib::testing::{Abort, TestContext};

use super::errors::HarnessResult;
use super::test_runner::{CaseOutcome, CaseState};
use super::units::{BenchmarkUnit, TestCase, TestUnit};

// ============================================================================
// Discovery Interface
// ============================================================================

/// Supplies the ordered unit descriptors for one invocation.
pub trait UnitLoader {
    fn test_units(&self) -> HarnessResult<Vec<TestUnit>>;

    fn bench_units(&self) -> HarnessResult<Vec<BenchmarkUnit>>;
}

/// Loader over descriptors registered up front.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    tests: Vec<TestUnit>,
    benches: Vec<BenchmarkUnit>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_test_unit(mut self, unit: TestUnit) -> Self {
        self.tests.push(unit);
        self
    }

    pub fn with_bench_unit(mut self, unit: BenchmarkUnit) -> Self {
        self.benches.push(unit);
        self
    }
}

impl UnitLoader for StaticLoader {
    fn test_units(&self) -> HarnessResult<Vec<TestUnit>> {
        Ok(self.tests.clone())
    }

    fn bench_units(&self) -> HarnessResult<Vec<BenchmarkUnit>> {
        Ok(self.benches.clone())
    }
}

// ============================================================================
// Execution Interface
// ============================================================================

/// Runs a single case and reports what happened. Must not let a payload fault escape.
pub trait CaseExecutor {
    fn execute(&self, unit: &str, case: &TestCase) -> CaseOutcome;
}

/// Runs cases on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct InProcessExecutor;

impl CaseExecutor for InProcessExecutor {
    fn execute(&self, unit: &str, case: &TestCase) -> CaseOutcome {
        let start = Instant::now();
        let mut ctx = TestContext::new(unit, case.name.as_str());
        let caught = panic::catch_unwind(AssertUnwindSafe(|| case.run(&mut ctx)));

        let fault = match caught {
            Ok(Ok(())) | Ok(Err(Abort::Failed)) => None,
            Ok(Err(Abort::Fault(fault))) => Some(fault),
            Err(payload) => Some(fault_from_panic(payload.as_ref())),
        };
        let state = match &fault {
            Some(fault) => {
                ctx.record_fault(fault);
                CaseState::Errored
            }
            None => CaseState::Completed,
        };

        CaseOutcome {
            unit: unit.to_string(),
            case: case.name.clone(),
            state,
            results: ctx.into_results(),
            fault,
            skip_reason: None,
            duration: start.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyncheck_core::{FaultKind, PayloadFault, Value};

    #[test]
    fn failed_assertion_still_completes() {
        let case = TestCase::new("testFalse", |t| {
            t.assert_false(Value::list([Value::from("a"), Value::from("b")]))
        });
        let outcome = InProcessExecutor.execute("BazTest", &case);
        assert_eq!(outcome.state, CaseState::Completed);
        assert_eq!(outcome.results.len(), 1);
        assert!(outcome.fault.is_none());
    }

    #[test]
    fn returned_fault_errors_the_case() {
        let case = TestCase::new("testFault", |t| {
            t.assert_true(true)?;
            Err(PayloadFault::key_error("'missing'").into())
        });
        let outcome = InProcessExecutor.execute("U", &case);
        assert_eq!(outcome.state, CaseState::Errored);
        assert_eq!(outcome.fault.as_ref().map(|f| f.kind), Some(FaultKind::KeyError));
        // the pass before the fault is kept, plus the fault record
        assert_eq!(outcome.results.len(), 2);
    }

    #[test]
    fn panics_are_contained() {
        let case = TestCase::new("testPanic", |_| panic!("index out of bounds"));
        let outcome = InProcessExecutor.execute("U", &case);
        assert_eq!(outcome.state, CaseState::Errored);
        assert_eq!(outcome.fault, Some(PayloadFault::panic("index out of bounds")));
    }

    #[test]
    fn static_loader_returns_registered_units() {
        let loader = StaticLoader::new()
            .with_test_unit(TestUnit::new("A").case("t", |_| Ok(())))
            .with_bench_unit(BenchmarkUnit::new("BenchmarkB"));
        assert_eq!(loader.test_units().map(|u| u.len()).ok(), Some(1));
        assert_eq!(loader.bench_units().map(|u| u.len()).ok(), Some(1));
    }
}

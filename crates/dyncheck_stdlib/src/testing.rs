//! Assertion recording for test cases.
//!
//! A [`TestContext`] is handed to every test case. Each assertion call evaluates through
//! `dyncheck_core::evaluate`, records an [`AssertionResult`] tagged with the calling source location, and
//! returns a [`CaseResult`]:
//! - `Ok(())` when the assertion passed;
//! - `Err(Abort::Failed)` when it failed (the failure is already recorded).
//!
//! Payload code decides whether a failure ends the case (`ctx.assert_true(x)?`) or not
//! (`let _ = ctx.assert_true(x);`).
//!
//! ## Examples
//! ```rust
//! use dyncheck_stdlib::testing::{CaseResult, TestContext};
//!
//! fn case(t: &mut TestContext) -> CaseResult {
//!     t.assert_equals("1", 1)?;
//!     t.assert_not_same("1", 1)
//! }
//!
//! let mut t = TestContext::new("BasicOpsTest", "testLoose");
//! assert!(case(&mut t).is_ok());
//! assert_eq!(t.assertion_count(), 2);
//! ```

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use dyncheck_core::{AssertionId, PayloadFault, Value, Verdict, evaluate};

/// Source position of an assertion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

impl SourceLocation {
    /// Capture the location of the caller.
    #[track_caller]
    pub fn caller() -> Self {
        let loc = Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }

    /// The file name without its directories.
    pub fn file_name(&self) -> &'static str {
        self.file.rsplit(['/', '\\']).next().unwrap_or(self.file)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Kind of a recorded result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    Pass,
    Fail,
    /// A payload fault ended the case.
    Error,
}

/// Where a result originated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultOrigin {
    pub unit: Arc<str>,
    pub case: Arc<str>,
    /// Absent for faults that did not come from an assertion call.
    pub source: Option<SourceLocation>,
}

impl ResultOrigin {
    /// `Unit::case`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.unit, self.case)
    }
}

/// One recorded assertion outcome (or a case-ending fault).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    pub kind: ResultKind,
    /// `None` for explicit `fail()` calls and faults.
    pub assertion: Option<AssertionId>,
    /// Failure reason or fault text; empty on pass.
    pub message: String,
    /// Optional message supplied by the caller.
    pub user_message: Option<String>,
    pub origin: ResultOrigin,
}

impl AssertionResult {
    pub fn is_pass(&self) -> bool {
        self.kind == ResultKind::Pass
    }
}

/// Why a case stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Abort {
    /// An assertion failed; the failure has been recorded.
    Failed,
    /// Payload code hit an unrecoverable fault.
    Fault(PayloadFault),
}

impl From<PayloadFault> for Abort {
    fn from(fault: PayloadFault) -> Self {
        Abort::Fault(fault)
    }
}

/// Result type of test case bodies and assertion calls.
pub type CaseResult = Result<(), Abort>;

/// Per-case assertion recorder. A fresh context is created for every case.
#[derive(Debug)]
pub struct TestContext {
    unit: Arc<str>,
    case: Arc<str>,
    results: Vec<AssertionResult>,
}

impl TestContext {
    pub fn new(unit: impl Into<Arc<str>>, case: impl Into<Arc<str>>) -> Self {
        Self {
            unit: unit.into(),
            case: case.into(),
            results: Vec::new(),
        }
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn case(&self) -> &str {
        &self.case
    }

    #[track_caller]
    pub fn assert_true(&mut self, actual: impl Into<Value>) -> CaseResult {
        self.check(AssertionId::True, Value::Null, actual.into(), None)
    }

    #[track_caller]
    pub fn assert_false(&mut self, actual: impl Into<Value>) -> CaseResult {
        self.check(AssertionId::False, Value::Null, actual.into(), None)
    }

    #[track_caller]
    pub fn assert_same(&mut self, expected: impl Into<Value>, actual: impl Into<Value>) -> CaseResult {
        self.check(AssertionId::Same, expected.into(), actual.into(), None)
    }

    #[track_caller]
    pub fn assert_not_same(&mut self, expected: impl Into<Value>, actual: impl Into<Value>) -> CaseResult {
        self.check(AssertionId::NotSame, expected.into(), actual.into(), None)
    }

    #[track_caller]
    pub fn assert_equals(&mut self, expected: impl Into<Value>, actual: impl Into<Value>) -> CaseResult {
        self.check(AssertionId::Equals, expected.into(), actual.into(), None)
    }

    #[track_caller]
    pub fn assert_not_equals(&mut self, expected: impl Into<Value>, actual: impl Into<Value>) -> CaseResult {
        self.check(AssertionId::NotEquals, expected.into(), actual.into(), None)
    }

    #[track_caller]
    pub fn assert_true_msg(&mut self, actual: impl Into<Value>, message: &str) -> CaseResult {
        self.check(AssertionId::True, Value::Null, actual.into(), Some(message))
    }

    #[track_caller]
    pub fn assert_false_msg(&mut self, actual: impl Into<Value>, message: &str) -> CaseResult {
        self.check(AssertionId::False, Value::Null, actual.into(), Some(message))
    }

    #[track_caller]
    pub fn assert_same_msg(
        &mut self,
        expected: impl Into<Value>,
        actual: impl Into<Value>,
        message: &str,
    ) -> CaseResult {
        self.check(AssertionId::Same, expected.into(), actual.into(), Some(message))
    }

    #[track_caller]
    pub fn assert_not_same_msg(
        &mut self,
        expected: impl Into<Value>,
        actual: impl Into<Value>,
        message: &str,
    ) -> CaseResult {
        self.check(AssertionId::NotSame, expected.into(), actual.into(), Some(message))
    }

    #[track_caller]
    pub fn assert_equals_msg(
        &mut self,
        expected: impl Into<Value>,
        actual: impl Into<Value>,
        message: &str,
    ) -> CaseResult {
        self.check(AssertionId::Equals, expected.into(), actual.into(), Some(message))
    }

    #[track_caller]
    pub fn assert_not_equals_msg(
        &mut self,
        expected: impl Into<Value>,
        actual: impl Into<Value>,
        message: &str,
    ) -> CaseResult {
        self.check(AssertionId::NotEquals, expected.into(), actual.into(), Some(message))
    }

    /// Evaluate any assertion primitive by id.
    ///
    /// ## Parameters
    /// - `expected`: ignored by single-operand assertions.
    /// - `message`: optional user message kept next to the failure reason.
    #[track_caller]
    pub fn check(
        &mut self,
        id: AssertionId,
        expected: Value,
        actual: Value,
        message: Option<&str>,
    ) -> CaseResult {
        let source = SourceLocation::caller();
        let verdict = evaluate(id, &expected, &actual);
        let (kind, text) = match verdict {
            Verdict::Pass => (ResultKind::Pass, String::new()),
            Verdict::Fail { reason } => (ResultKind::Fail, reason),
        };
        self.push(kind, Some(id), text, message.map(str::to_string), Some(source));
        match kind {
            ResultKind::Pass => Ok(()),
            _ => Err(Abort::Failed),
        }
    }

    /// Record an unconditional failure.
    #[track_caller]
    pub fn fail(&mut self, message: &str) -> CaseResult {
        let source = SourceLocation::caller();
        self.push(ResultKind::Fail, None, message.to_string(), None, Some(source));
        Err(Abort::Failed)
    }

    /// Record a case-ending fault. Called by the runner, not by payload code.
    pub fn record_fault(&mut self, fault: &PayloadFault) {
        self.push(ResultKind::Error, None, fault.to_string(), None, None);
    }

    fn push(
        &mut self,
        kind: ResultKind,
        assertion: Option<AssertionId>,
        message: String,
        user_message: Option<String>,
        source: Option<SourceLocation>,
    ) {
        self.results.push(AssertionResult {
            kind,
            assertion,
            message,
            user_message,
            origin: ResultOrigin {
                unit: Arc::clone(&self.unit),
                case: Arc::clone(&self.case),
                source,
            },
        });
    }

    pub fn results(&self) -> &[AssertionResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<AssertionResult> {
        self.results
    }

    /// Number of assertion calls made so far (faults are not assertions).
    pub fn assertion_count(&self) -> usize {
        self.results.iter().filter(|r| r.kind != ResultKind::Error).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &AssertionResult> {
        self.results.iter().filter(|r| r.kind == ResultKind::Fail)
    }
}

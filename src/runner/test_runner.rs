//! Test execution.
//!
//! ## Case lifecycle
//!
//! Every selected case moves `Pending → Running → {Completed, Errored}`; cases carrying a skip marker go
//! straight to `Skipped`. A case is `Completed` once its body returns, however many assertions failed; it is
//! `Errored` when the body returns a [`PayloadFault`] or panics. Either way the runner moves on to the next
//! case, so one bad case never hides the others.
//!
//! ## TestReporter Trait
//!
//! Reporting is separated from execution by [`TestReporter`]. Reporters write to whatever sink they own and
//! return `io::Result`; a write failure is the only thing that stops a run once it has started.

use std::io;
use std::time::{Duration, Instant};

use dyncheck_core::PayloadFault;
use dyncheck_stdlib::testing::{AssertionResult, ResultKind};
use tracing::{debug, info};

use super::config::TestConfig;
use super::errors::HarnessResult;
use super::interfaces::CaseExecutor;
use super::units::{TestCase, TestUnit, validate_test_units};

// ============================================================================
// Outcomes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseState {
    Pending,
    Running,
    Completed,
    Errored,
    Skipped,
}

impl CaseState {
    pub fn as_str(self) -> &'static str {
        match self {
            CaseState::Pending => "pending",
            CaseState::Running => "running",
            CaseState::Completed => "completed",
            CaseState::Errored => "errored",
            CaseState::Skipped => "skipped",
        }
    }
}

/// Everything recorded for one case.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub unit: String,
    pub case: String,
    pub state: CaseState,
    /// Results in call order; an errored case ends with an `Error` result.
    pub results: Vec<AssertionResult>,
    pub fault: Option<PayloadFault>,
    pub skip_reason: Option<String>,
    pub duration: Duration,
}

impl CaseOutcome {
    pub fn skipped(unit: &str, case: &TestCase, reason: &str) -> Self {
        Self {
            unit: unit.to_string(),
            case: case.name.clone(),
            state: CaseState::Skipped,
            results: Vec::new(),
            fault: None,
            skip_reason: Some(reason.to_string()),
            duration: Duration::ZERO,
        }
    }

    /// `Unit::case`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.unit, self.case)
    }

    pub fn failures(&self) -> impl Iterator<Item = &AssertionResult> {
        self.results.iter().filter(|r| r.kind == ResultKind::Fail)
    }

    pub fn assertion_count(&self) -> usize {
        self.results.iter().filter(|r| r.kind != ResultKind::Error).count()
    }

    pub fn is_error(&self) -> bool {
        self.state == CaseState::Errored
    }

    pub fn is_failure(&self) -> bool {
        self.state == CaseState::Completed && self.failures().next().is_some()
    }

    pub fn is_pass(&self) -> bool {
        self.state == CaseState::Completed && !self.is_failure()
    }
}

/// Outcomes of one unit, in case order.
#[derive(Debug, Clone)]
pub struct UnitSummary {
    pub unit: String,
    pub cases: Vec<CaseOutcome>,
    pub duration: Duration,
}

impl UnitSummary {
    /// Every recorded result of the unit, in order.
    pub fn results(&self) -> impl Iterator<Item = &AssertionResult> {
        self.cases.iter().flat_map(|c| c.results.iter())
    }

    pub fn errored(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.cases.iter().filter(|c| c.is_error())
    }

    pub fn is_success(&self) -> bool {
        self.cases.iter().all(|c| !c.is_error() && !c.is_failure())
    }
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub units: Vec<UnitSummary>,
    pub duration: Duration,
    /// Set when `stop_on_fail` cut the run short.
    pub stopped_early: bool,
}

impl RunSummary {
    fn cases(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.units.iter().flat_map(|u| u.cases.iter())
    }

    /// Cases reported, skipped ones included.
    pub fn tests(&self) -> usize {
        self.cases().count()
    }

    pub fn assertions(&self) -> usize {
        self.cases().map(CaseOutcome::assertion_count).sum()
    }

    /// Failed assertion results in run order.
    pub fn failures(&self) -> Vec<&AssertionResult> {
        self.cases().flat_map(CaseOutcome::failures).collect()
    }

    pub fn errors(&self) -> Vec<&CaseOutcome> {
        self.cases().filter(|c| c.is_error()).collect()
    }

    pub fn skipped(&self) -> usize {
        self.cases().filter(|c| c.state == CaseState::Skipped).count()
    }

    pub fn passed(&self) -> usize {
        self.cases().filter(|c| c.is_pass()).count()
    }

    pub fn is_success(&self) -> bool {
        self.units.iter().all(UnitSummary::is_success)
    }
}

// ============================================================================
// Test Reporter Trait
// ============================================================================

/// Unit progress after each unit completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> usize {
        if self.total == 0 { 100 } else { self.done * 100 / self.total }
    }
}

/// Receives run events. Implement this to add an output format.
pub trait TestReporter {
    /// Called once selection is known.
    fn on_collection_complete(&mut self, unit_count: usize, case_count: usize) -> io::Result<()>;

    fn on_unit_start(&mut self, _unit: &str) -> io::Result<()> {
        Ok(())
    }

    fn on_case_start(&mut self, _unit: &str, _case: &str) -> io::Result<()> {
        Ok(())
    }

    fn on_case_complete(&mut self, outcome: &CaseOutcome) -> io::Result<()>;

    fn on_unit_complete(&mut self, _summary: &UnitSummary, _progress: Progress) -> io::Result<()> {
        Ok(())
    }

    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()>;
}

// ============================================================================
// Runner
// ============================================================================

fn case_selected(filter: Option<&str>, unit: &str, case: &str) -> bool {
    match filter {
        None => true,
        Some(kw) => case.contains(kw) || format!("{unit}::{case}").contains(kw),
    }
}

/// Run test units and report every case.
///
/// ## Parameters
/// - `units`: descriptors from a loader; run in name order, cases in insertion order.
/// - `executor`: runs each case in isolation.
///
/// ## Errors
/// - Discovery faults (duplicate names, empty units) before any case runs.
/// - I/O errors from the reporter.
#[tracing::instrument(skip_all, fields(units = units.len()))]
pub fn run_units(
    mut units: Vec<TestUnit>,
    config: &TestConfig,
    executor: &dyn CaseExecutor,
    reporter: &mut dyn TestReporter,
) -> HarnessResult<RunSummary> {
    validate_test_units(&units)?;
    units.sort_by(|a, b| a.name.cmp(&b.name));

    let filter = config.filter.as_deref();
    let selected: Vec<(&TestUnit, Vec<&TestCase>)> = units
        .iter()
        .map(|u| {
            let cases = u
                .cases
                .iter()
                .filter(|c| case_selected(filter, &u.name, &c.name))
                .collect::<Vec<_>>();
            (u, cases)
        })
        .filter(|(_, cases)| !cases.is_empty())
        .collect();

    let case_count: usize = selected.iter().map(|(_, c)| c.len()).sum();
    info!(units = selected.len(), cases = case_count, "collected test cases");
    reporter.on_collection_complete(selected.len(), case_count)?;

    let start = Instant::now();
    let mut summary = RunSummary::default();
    let total = selected.len();

    for (index, (unit, cases)) in selected.iter().enumerate() {
        reporter.on_unit_start(&unit.name)?;
        let unit_start = Instant::now();
        let mut outcomes = Vec::with_capacity(cases.len());
        let mut stop = false;

        for case in cases {
            let outcome = match case.skip_reason() {
                Some(reason) => {
                    debug!(unit = %unit.name, case = %case.name, reason, "case skipped");
                    CaseOutcome::skipped(&unit.name, case, reason)
                }
                None => {
                    debug!(unit = %unit.name, case = %case.name, state = CaseState::Running.as_str());
                    reporter.on_case_start(&unit.name, &case.name)?;
                    let outcome = executor.execute(&unit.name, case);
                    debug!(unit = %unit.name, case = %case.name, state = outcome.state.as_str());
                    outcome
                }
            };
            reporter.on_case_complete(&outcome)?;
            stop = config.stop_on_fail && (outcome.is_error() || outcome.is_failure());
            outcomes.push(outcome);
            if stop {
                break;
            }
        }

        let unit_summary = UnitSummary {
            unit: unit.name.clone(),
            cases: outcomes,
            duration: unit_start.elapsed(),
        };
        reporter.on_unit_complete(&unit_summary, Progress { done: index + 1, total })?;
        summary.units.push(unit_summary);

        if stop {
            summary.stopped_early = true;
            break;
        }
    }

    summary.duration = start.elapsed();
    reporter.on_run_complete(&summary)?;
    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::runner::interfaces::InProcessExecutor;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl TestReporter for Recorder {
        fn on_collection_complete(&mut self, units: usize, cases: usize) -> io::Result<()> {
            self.events.push(format!("collected {units}/{cases}"));
            Ok(())
        }

        fn on_case_complete(&mut self, outcome: &CaseOutcome) -> io::Result<()> {
            self.events
                .push(format!("{} {}", outcome.qualified_name(), outcome.state.as_str()));
            Ok(())
        }

        fn on_unit_complete(&mut self, summary: &UnitSummary, progress: Progress) -> io::Result<()> {
            self.events.push(format!(
                "unit {} {}/{} ({}%)",
                summary.unit,
                progress.done,
                progress.total,
                progress.percent()
            ));
            Ok(())
        }

        fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
            self.events.push(format!("done {}", summary.tests()));
            Ok(())
        }
    }

    fn sample_units() -> Vec<TestUnit> {
        vec![
            TestUnit::new("ZetaTest").case("testOne", |t| t.assert_true(1)),
            TestUnit::new("AlphaTest")
                .case("testPass", |t| t.assert_equals("1", 1))
                .case("testFail", |t| t.assert_same(0, false))
                .case("testAfter", |t| t.assert_true(true)),
        ]
    }

    #[test]
    fn units_run_in_name_order_and_report_every_case() {
        let mut rec = Recorder::default();
        let summary = run_units(sample_units(), &TestConfig::new(), &InProcessExecutor, &mut rec).unwrap();
        assert_eq!(
            rec.events,
            vec![
                "collected 2/4",
                "AlphaTest::testPass completed",
                "AlphaTest::testFail completed",
                "AlphaTest::testAfter completed",
                "unit AlphaTest 1/2 (50%)",
                "ZetaTest::testOne completed",
                "unit ZetaTest 2/2 (100%)",
                "done 4",
            ]
        );
        assert_eq!(summary.assertions(), 4);
        assert_eq!(summary.failures().len(), 1);
        assert!(!summary.is_success());
    }

    #[test]
    fn stop_on_fail_cuts_the_run() {
        let mut rec = Recorder::default();
        let config = TestConfig::new().with_stop_on_fail(true);
        let summary = run_units(sample_units(), &config, &InProcessExecutor, &mut rec).unwrap();
        assert!(summary.stopped_early);
        assert_eq!(summary.tests(), 2);
        assert_eq!(summary.units.len(), 1);
    }

    #[test]
    fn keyword_filter_matches_case_or_qualified_name() {
        let mut rec = Recorder::default();
        let config = TestConfig::new().with_filter("Zeta");
        let summary = run_units(sample_units(), &config, &InProcessExecutor, &mut rec).unwrap();
        assert_eq!(summary.tests(), 1);

        let config = TestConfig::new().with_filter("testFail");
        let summary = run_units(sample_units(), &config, &InProcessExecutor, &mut rec).unwrap();
        assert_eq!(summary.tests(), 1);
        assert_eq!(summary.units[0].cases[0].case, "testFail");
    }

    #[test]
    fn skipped_cases_are_reported_but_not_run() {
        let unit = TestUnit::new("SkipTest")
            .with_case(TestCase::new("testLater", |_| panic!("must not run")).skip("pending"))
            .case("testNow", |t| t.assert_true(true));
        let mut rec = Recorder::default();
        let summary = run_units(vec![unit], &TestConfig::new(), &InProcessExecutor, &mut rec).unwrap();
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.tests(), 2);
        assert_eq!(summary.assertions(), 1);
        assert!(summary.is_success());
    }

    #[test]
    fn nothing_selected_is_an_empty_success() {
        let mut rec = Recorder::default();
        let config = TestConfig::new().with_filter("no-such-case");
        let summary = run_units(sample_units(), &config, &InProcessExecutor, &mut rec).unwrap();
        assert_eq!(summary.tests(), 0);
        assert!(summary.is_success());
    }
}

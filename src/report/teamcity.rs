//! TeamCity service messages.
//!
//! Units become test suites and cases/variants become tests. Benchmark names drop their `Benchmark`
//! prefix. Attribute values are escaped with `|` as TeamCity requires.

use std::io::{self, Write};
use std::time::Duration;

use crate::runner::bench_runner::{BenchReporter, BenchUnitSummary, VariantOutcome};
use crate::runner::test_runner::{CaseOutcome, CaseState, Progress, RunSummary, TestReporter, UnitSummary};

/// Escape a value for a service message attribute.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '|' => out.push_str("||"),
            '\'' => out.push_str("|'"),
            '\n' => out.push_str("|n"),
            '\r' => out.push_str("|r"),
            '[' => out.push_str("|["),
            ']' => out.push_str("|]"),
            c => out.push(c),
        }
    }
    out
}

fn bench_name(unit: &str) -> &str {
    unit.strip_prefix("Benchmark").unwrap_or(unit)
}

pub struct TeamcityReporter<W: Write> {
    out: W,
}

impl<W: Write> TeamcityReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn message(&mut self, name: &str, attrs: &[(&str, &str)]) -> io::Result<()> {
        write!(self.out, "##teamcity[{name}")?;
        for (key, value) in attrs {
            write!(self.out, " {key}='{}'", escape(value))?;
        }
        writeln!(self.out, "]")
    }

    fn finished(&mut self, kind: &str, name: &str, duration: Duration) -> io::Result<()> {
        let millis = duration.as_millis().to_string();
        self.message(kind, &[("name", name), ("duration", &millis)])
    }
}

impl<W: Write> TestReporter for TeamcityReporter<W> {
    fn on_collection_complete(&mut self, _unit_count: usize, case_count: usize) -> io::Result<()> {
        self.message("testCount", &[("count", &case_count.to_string())])
    }

    fn on_unit_start(&mut self, unit: &str) -> io::Result<()> {
        self.message("testSuiteStarted", &[("name", unit)])
    }

    fn on_case_start(&mut self, _unit: &str, case: &str) -> io::Result<()> {
        self.message("testStarted", &[("name", case)])
    }

    fn on_case_complete(&mut self, outcome: &CaseOutcome) -> io::Result<()> {
        let name = outcome.case.as_str();
        match outcome.state {
            CaseState::Skipped => {
                let reason = outcome.skip_reason.as_deref().unwrap_or("");
                return self.message("testIgnored", &[("name", name), ("message", reason)]);
            }
            CaseState::Errored => {
                let fault = outcome.fault.as_ref().map(|f| f.to_string()).unwrap_or_default();
                self.message("testFailed", &[("name", name), ("message", &fault)])?;
            }
            _ => {
                for failure in outcome.failures() {
                    let details = failure.origin.source.map(|s| s.to_string()).unwrap_or_default();
                    self.message(
                        "testFailed",
                        &[("name", name), ("message", &failure.message), ("details", &details)],
                    )?;
                }
            }
        }
        self.finished("testFinished", name, outcome.duration)
    }

    fn on_unit_complete(&mut self, summary: &UnitSummary, _progress: Progress) -> io::Result<()> {
        self.finished("testSuiteFinished", &summary.unit, summary.duration)
    }

    fn on_run_complete(&mut self, _summary: &RunSummary) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> BenchReporter for TeamcityReporter<W> {
    fn on_unit_start(&mut self, unit: &str) -> io::Result<()> {
        self.message("testSuiteStarted", &[("name", bench_name(unit))])
    }

    fn on_variant_complete(&mut self, outcome: &VariantOutcome) -> io::Result<()> {
        let key = outcome.key();
        self.message("testStarted", &[("name", key)])?;
        match outcome {
            VariantOutcome::Measured(m) => {
                let mean = format!("{:.1}", m.stats.mean);
                self.message(
                    "buildStatisticValue",
                    &[("key", &format!("{}.ns_per_op", m.qualified_name())), ("value", &mean)],
                )?;
                self.finished("testFinished", key, m.elapsed)
            }
            VariantOutcome::Errored { fault, .. } => {
                self.message("testFailed", &[("name", key), ("message", &fault.to_string())])?;
                self.finished("testFinished", key, Duration::ZERO)
            }
        }
    }

    fn on_unit_complete(&mut self, summary: &BenchUnitSummary) -> io::Result<()> {
        self.finished("testSuiteFinished", bench_name(&summary.unit), summary.elapsed)
    }
}

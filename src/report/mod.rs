//! Reporters: turn run events into output.
//!
//! - [`ConsoleReporter`] - xUnit-style progress and failure report
//! - [`ConsoleBenchReporter`] - `Unit::Key<TAB>iterations<TAB>mean ns/op` lines
//! - [`JsonReporter`] / [`JsonBenchReporter`] - one JSON document per run
//! - [`TeamcityReporter`] - `##teamcity[...]` service messages for both runners
//!
//! Reporters own their writer, so tests render into a `Vec<u8>` and the CLI into stdout. Two reporters can
//! be combined as a tuple; both receive every event.

pub mod bench_text;
pub mod console;
pub mod json;
pub mod teamcity;

use std::io;

pub use bench_text::{ConsoleBenchReporter, format_comparison};
pub use console::{ConsoleReporter, format_result};
pub use json::{JsonBenchReporter, JsonReporter, write_comparison};
pub use teamcity::TeamcityReporter;

use crate::runner::bench_runner::{BenchReporter, BenchRunSummary, BenchUnitSummary, VariantOutcome};
use crate::runner::test_runner::{CaseOutcome, Progress, RunSummary, TestReporter, UnitSummary};

/// Console output options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    /// Print the `Time: ...` line.
    pub print_time: bool,
    /// Print failure locations as `file.rs:line` instead of the full path.
    pub short_location: bool,
    /// One line per case instead of progress characters.
    pub verbose: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            print_time: true,
            short_location: false,
            verbose: false,
        }
    }
}

impl<A: TestReporter, B: TestReporter> TestReporter for (A, B) {
    fn on_collection_complete(&mut self, unit_count: usize, case_count: usize) -> io::Result<()> {
        self.0.on_collection_complete(unit_count, case_count)?;
        self.1.on_collection_complete(unit_count, case_count)
    }

    fn on_unit_start(&mut self, unit: &str) -> io::Result<()> {
        self.0.on_unit_start(unit)?;
        self.1.on_unit_start(unit)
    }

    fn on_case_start(&mut self, unit: &str, case: &str) -> io::Result<()> {
        self.0.on_case_start(unit, case)?;
        self.1.on_case_start(unit, case)
    }

    fn on_case_complete(&mut self, outcome: &CaseOutcome) -> io::Result<()> {
        self.0.on_case_complete(outcome)?;
        self.1.on_case_complete(outcome)
    }

    fn on_unit_complete(&mut self, summary: &UnitSummary, progress: Progress) -> io::Result<()> {
        self.0.on_unit_complete(summary, progress)?;
        self.1.on_unit_complete(summary, progress)
    }

    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
        self.0.on_run_complete(summary)?;
        self.1.on_run_complete(summary)
    }
}

impl<A: BenchReporter, B: BenchReporter> BenchReporter for (A, B) {
    fn on_run_start(&mut self, unit_count: usize, variant_count: usize) -> io::Result<()> {
        self.0.on_run_start(unit_count, variant_count)?;
        self.1.on_run_start(unit_count, variant_count)
    }

    fn on_unit_start(&mut self, unit: &str) -> io::Result<()> {
        self.0.on_unit_start(unit)?;
        self.1.on_unit_start(unit)
    }

    fn on_variant_complete(&mut self, outcome: &VariantOutcome) -> io::Result<()> {
        self.0.on_variant_complete(outcome)?;
        self.1.on_variant_complete(outcome)
    }

    fn on_unit_complete(&mut self, summary: &BenchUnitSummary) -> io::Result<()> {
        self.0.on_unit_complete(summary)?;
        self.1.on_unit_complete(summary)
    }

    fn on_run_complete(&mut self, summary: &BenchRunSummary) -> io::Result<()> {
        self.0.on_run_complete(summary)?;
        self.1.on_run_complete(summary)
    }
}

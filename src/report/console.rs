//! xUnit-style console output.
//!
//! Progress is one character per case (`.` pass, `F` failure, `E` error, `S` skipped) followed by a
//! ` done / total (pct%) OK|FAIL` marker after each unit. The closing report lists failures and errors and
//! ends with either `OK (T tests, A assertions)` or `FAILURES!` / `ERRORS!` and the counts.

use std::io::{self, Write};

use super::FormatConfig;
use crate::runner::test_runner::{CaseOutcome, CaseState, Progress, RunSummary, TestReporter, UnitSummary};

pub struct ConsoleReporter<W: Write> {
    out: W,
    config: FormatConfig,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, config: FormatConfig) -> Self {
        Self { out, config }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn progress_char(outcome: &CaseOutcome) -> char {
    match outcome.state {
        CaseState::Skipped => 'S',
        CaseState::Errored => 'E',
        _ if outcome.is_failure() => 'F',
        _ => '.',
    }
}

fn status_word(outcome: &CaseOutcome) -> &'static str {
    match outcome.state {
        CaseState::Skipped => "SKIPPED",
        CaseState::Errored => "ERROR",
        _ if outcome.is_failure() => "FAILED",
        _ => "PASSED",
    }
}

impl<W: Write> TestReporter for ConsoleReporter<W> {
    fn on_collection_complete(&mut self, unit_count: usize, case_count: usize) -> io::Result<()> {
        if self.config.verbose {
            writeln!(self.out, "collected {case_count} cases in {unit_count} units\n")?;
        }
        Ok(())
    }

    fn on_case_complete(&mut self, outcome: &CaseOutcome) -> io::Result<()> {
        if self.config.verbose {
            write!(self.out, "{} {}", outcome.qualified_name(), status_word(outcome))?;
            if let Some(reason) = &outcome.skip_reason {
                write!(self.out, " ({reason})")?;
            }
            writeln!(self.out)?;
        } else {
            write!(self.out, "{}", progress_char(outcome))?;
        }
        self.out.flush()
    }

    fn on_unit_complete(&mut self, summary: &UnitSummary, progress: Progress) -> io::Result<()> {
        if self.config.verbose {
            return Ok(());
        }
        let status = if summary.is_success() { "OK" } else { "FAIL" };
        writeln!(
            self.out,
            " {} / {} ({:>2}%) {status}",
            progress.done,
            progress.total,
            progress.percent()
        )
    }

    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
        format_result(&mut self.out, &self.config, summary)?;
        self.out.flush()
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("There was 1 {one}:\n\n")
    } else {
        format!("There were {count} {many}:\n\n")
    }
}

/// Write the closing report for a run.
///
/// ## Notes
/// - Failure entries are numbered in run order and show the user message (if any), the reason and the
///   `file:line` of the assertion call.
/// - Errored cases are listed separately with their fault.
pub fn format_result(w: &mut impl Write, config: &FormatConfig, summary: &RunSummary) -> io::Result<()> {
    if config.print_time {
        write!(w, "\nTime: {:?}\n\n", summary.duration)?;
    } else {
        writeln!(w)?;
    }

    let failures = summary.failures();
    if !failures.is_empty() {
        w.write_all(plural(failures.len(), "failure", "failures").as_bytes())?;
        for (i, failure) in failures.iter().enumerate() {
            writeln!(w, "{}) {}", i + 1, failure.origin.qualified_name())?;
            if let Some(msg) = failure.user_message.as_deref().filter(|m| !m.is_empty()) {
                writeln!(w, "{msg}")?;
            }
            write!(w, "{}.\n\n", failure.message)?;
            if let Some(source) = failure.origin.source {
                if config.short_location {
                    write!(w, "{}:{}\n\n", source.file_name(), source.line)?;
                } else {
                    write!(w, "{source}\n\n")?;
                }
            }
        }
    }

    let errors = summary.errors();
    if !errors.is_empty() {
        w.write_all(plural(errors.len(), "error", "errors").as_bytes())?;
        for (i, case) in errors.iter().enumerate() {
            writeln!(w, "{}) {}", i + 1, case.qualified_name())?;
            if let Some(fault) = &case.fault {
                write!(w, "{fault}\n\n")?;
            }
        }
    }

    let (tests, assertions, skipped) = (summary.tests(), summary.assertions(), summary.skipped());
    if !failures.is_empty() || !errors.is_empty() {
        let banner = if errors.is_empty() { "FAILURES!" } else { "ERRORS!" };
        write!(w, "{banner}\nTests: {tests}, Assertions: {assertions}, Failures: {}", failures.len())?;
        if !errors.is_empty() {
            write!(w, ", Errors: {}", errors.len())?;
        }
        if skipped > 0 {
            write!(w, ", Skipped: {skipped}")?;
        }
        writeln!(w, ".")
    } else if skipped > 0 {
        writeln!(w, "OK, but some tests were skipped!")?;
        writeln!(w, "Tests: {tests}, Assertions: {assertions}, Skipped: {skipped}.")
    } else {
        writeln!(w, "OK ({tests} tests, {assertions} assertions)")
    }
}

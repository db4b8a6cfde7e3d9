//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::io::{self, Write};

use tracing::{info, warn};

use crate::fixtures::{BuiltinLoader, SUITES};
use crate::report::{
    ConsoleBenchReporter, ConsoleReporter, FormatConfig, JsonBenchReporter, JsonReporter, TeamcityReporter,
    format_comparison, write_comparison,
};
use crate::runner::bench_runner::{BenchReporter, BenchRunSummary, BenchUnitSummary, VariantOutcome, run_benchmarks};
use crate::runner::clock::MonotonicClock;
use crate::runner::compare::{compare, find_measurement, restrict, select_pair};
use crate::runner::config::{BenchConfig, TestConfig};
use crate::runner::environment;
use crate::runner::errors::{HarnessFault, HarnessResult};
use crate::runner::interfaces::{InProcessExecutor, UnitLoader};
use crate::runner::test_runner::run_units;
use crate::runner::units::BenchmarkUnit;

use super::{AbArgs, BenchArgs, BenchFormat, CliResult, ExitCode, TestArgs, TestFormat};

fn exit_for(success: bool) -> ExitCode {
    if success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

// ============================================================================
// Tests
// ============================================================================

/// Run the selected built-in test suites.
pub fn run_tests(args: &TestArgs) -> CliResult<ExitCode> {
    let units = BuiltinLoader::with_suites(&args.suites)?.test_units()?;

    let mut config = TestConfig::new()
        .with_stop_on_fail(args.stop_on_fail)
        .with_verbose(args.verbose);
    if let Some(filter) = &args.filter {
        config = config.with_filter(filter.clone());
    }

    let out = io::stdout().lock();
    let summary = match args.format {
        TestFormat::Console => {
            let format = FormatConfig {
                print_time: !args.no_time,
                short_location: args.short_location,
                verbose: args.verbose,
            };
            run_units(units, &config, &InProcessExecutor, &mut ConsoleReporter::new(out, format))?
        }
        TestFormat::Json => run_units(units, &config, &InProcessExecutor, &mut JsonReporter::new(out))?,
        TestFormat::Teamcity => run_units(units, &config, &InProcessExecutor, &mut TeamcityReporter::new(out))?,
    };
    Ok(exit_for(summary.is_success()))
}

// ============================================================================
// Benchmarks
// ============================================================================

fn warn_environment() {
    for issue in environment::check_issues() {
        warn!("{issue}");
    }
}

fn measure<R: BenchReporter>(
    units: Vec<BenchmarkUnit>,
    config: &BenchConfig,
    mut reporter: R,
    teamcity: bool,
) -> HarnessResult<BenchRunSummary> {
    let clock = MonotonicClock::new();
    if teamcity {
        let mut both = (reporter, TeamcityReporter::new(io::stdout().lock()));
        run_benchmarks(units, config, &mut both, &clock)
    } else {
        run_benchmarks(units, config, &mut reporter, &clock)
    }
}

/// Measure the selected built-in benchmark suites.
pub fn run_bench(args: &BenchArgs) -> CliResult<ExitCode> {
    warn_environment();
    let units = BuiltinLoader::with_suites(&args.suites)?.bench_units()?;

    let mut config = args.measure.to_config().with_jobs(args.jobs);
    if let Some(filter) = &args.filter {
        config = config.with_filter(filter.clone());
    }
    if let Some(mode) = args.verify {
        config = config.with_verify(mode.into());
    }

    let out = io::stdout().lock();
    let summary = match args.format {
        BenchFormat::Text => measure(units, &config, ConsoleBenchReporter::new(out, args.verbose), args.teamcity)?,
        BenchFormat::Json => measure(units, &config, JsonBenchReporter::new(out), args.teamcity)?,
    };
    Ok(exit_for(summary.is_success()))
}

/// Measure two variants under identical configuration and compare them.
///
/// ## Notes
/// - Each pattern is a regular expression that must select exactly one `Unit::Key`; only those two
///   variants are measured.
/// - Each side runs `--count` times (default 10). Fewer than 5 run means per side makes the verdict
///   unreliable; a warning is logged.
pub fn run_bench_ab(args: &AbArgs) -> CliResult<ExitCode> {
    warn_environment();
    let units = BuiltinLoader::with_suites(&args.suites)?.bench_units()?;
    let (old, new) = select_pair(&units, &args.old, &args.new)?;
    info!(%old, %new, "comparing");
    let units = restrict(units, &[old.as_str(), new.as_str()]);

    let summary = measure(units, &args.to_config(), Silent, false)?;
    let cmp = compare(find_measurement(&summary, &old)?, find_measurement(&summary, &new)?);
    if cmp.low_samples() {
        warn!(
            old = cmp.old.stats.samples,
            new = cmp.new.stats.samples,
            "too few runs for a reliable comparison; raise --count"
        );
    }

    let mut out = io::stdout().lock();
    let written = match args.format {
        BenchFormat::Text => format_comparison(&mut out, &cmp),
        BenchFormat::Json => write_comparison(&mut out, &cmp),
    };
    written.map_err(HarnessFault::from)?;
    Ok(ExitCode::SUCCESS)
}

/// Swallows progress events; `bench-ab` prints only the comparison.
struct Silent;

impl BenchReporter for Silent {
    fn on_unit_start(&mut self, _unit: &str) -> io::Result<()> {
        Ok(())
    }

    fn on_variant_complete(&mut self, _outcome: &VariantOutcome) -> io::Result<()> {
        Ok(())
    }

    fn on_unit_complete(&mut self, _summary: &BenchUnitSummary) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Listing
// ============================================================================

/// Print every built-in suite with its units.
pub fn list_suites() -> CliResult<ExitCode> {
    let mut out = io::stdout().lock();
    write_listing(&mut out).map_err(HarnessFault::from)?;
    Ok(ExitCode::SUCCESS)
}

fn write_listing(out: &mut impl Write) -> io::Result<()> {
    for suite in SUITES {
        writeln!(out, "{}: {}", suite.name, suite.description)?;
        for unit in suite.test_units() {
            writeln!(out, "  {} ({} cases)", unit.name, unit.cases.len())?;
        }
        for unit in suite.bench_units() {
            writeln!(out, "  {} ({} variants)", unit.name, unit.variants.len())?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn listing_names_every_suite() {
        let mut out = Vec::new();
        write_listing(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("basic-ops: assertion primitives, one case per outcome\n  BasicOpsTest (24 cases)\n"));
        assert!(text.contains("  BenchmarkConcat (3 variants)\n  BenchmarkConcat3 (1 variants)\n"));
    }

    #[test]
    fn unknown_suite_is_a_harness_fault() {
        let args = TestArgs {
            suites: vec!["missing".into()],
            filter: None,
            stop_on_fail: false,
            verbose: false,
            format: TestFormat::Console,
            short_location: false,
            no_time: true,
        };
        let err = run_tests(&args).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::HARNESS_FAULT);
        assert!(err.message.contains("unknown suite 'missing'"));
    }
}

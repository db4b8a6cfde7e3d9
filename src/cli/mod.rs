//! CLI module for dyncheck
//!
//! ## Commands
//!
//! - `test [SUITES]` - Run test units and print an xUnit-style report
//! - `bench [SUITES]` - Measure benchmark variants
//! - `bench-ab OLD NEW` - Measure two variants and compare them
//! - `list` - List built-in suites and their units
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::runner::compare::DEFAULT_AB_COUNT;
use crate::runner::config::{BenchConfig, EqualityMode, Iterations};
use crate::runner::errors::HarnessFault;
use crate::version::DYNCHECK_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// Failed or errored cases, or failed variants.
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The run could not start or could not finish.
    pub const HARNESS_FAULT: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<HarnessFault> for CliError {
    fn from(fault: HarnessFault) -> Self {
        let report = miette::Report::new(fault);
        Self::new(format!("{report:?}"), ExitCode::HARNESS_FAULT)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Assertion and micro-benchmark harness for dynamically typed values
#[derive(Parser, Debug)]
#[command(name = "dyncheck")]
#[command(version = DYNCHECK_VERSION)]
#[command(about = "Assertion and micro-benchmark harness for dynamically typed values", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run test units
    Test(TestArgs),

    /// Measure benchmark variants
    Bench(BenchArgs),

    /// Measure two variants and report whether the new one is faster
    #[command(name = "bench-ab")]
    BenchAb(AbArgs),

    /// List built-in suites and their units
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestFormat {
    Console,
    Json,
    Teamcity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BenchFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VerifyMode {
    Loose,
    Strict,
}

impl From<VerifyMode> for EqualityMode {
    fn from(mode: VerifyMode) -> Self {
        match mode {
            VerifyMode::Loose => EqualityMode::Loose,
            VerifyMode::Strict => EqualityMode::Strict,
        }
    }
}

#[derive(Args, Debug)]
pub struct TestArgs {
    /// Built-in suites to run (default: all)
    #[arg(value_name = "SUITE")]
    pub suites: Vec<String>,
    /// Only run cases whose name or `Unit::case` contains EXPR
    #[arg(short = 'k', value_name = "EXPR")]
    pub filter: Option<String>,
    /// Stop on first failure
    #[arg(short = 'x', long = "exitfirst")]
    pub stop_on_fail: bool,
    /// One line per case
    #[arg(short, long)]
    pub verbose: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = TestFormat::Console)]
    pub format: TestFormat,
    /// Print failure locations as `file.rs:line`
    #[arg(long)]
    pub short_location: bool,
    /// Omit the `Time:` line
    #[arg(long)]
    pub no_time: bool,
}

/// Measurement options shared by `bench` and `bench-ab`.
#[derive(Args, Debug)]
pub struct MeasureArgs {
    /// Fixed number of timed iterations per variant
    #[arg(long, value_name = "N", conflicts_with = "calibrate")]
    pub iterations: Option<u64>,
    /// Derive the iteration count from one timed call
    #[arg(long)]
    pub calibrate: bool,
    /// Time budget for calibrated runs, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 100, requires = "calibrate")]
    pub calibrate_ms: u64,
    /// Lower bound for calibrated iteration counts
    #[arg(long, value_name = "N", default_value_t = 20, requires = "calibrate")]
    pub min_iterations: u64,
    /// Repeat each variant's timed loop N times; each run reports its own mean
    #[arg(long, value_name = "N")]
    pub count: Option<u64>,
    /// Untimed iterations before measuring
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub warmup: u64,
    /// Stop a variant's timed loop after MS milliseconds
    #[arg(long, value_name = "MS")]
    pub deadline_ms: Option<u64>,
    /// Drop samples outside the Tukey fences before computing statistics
    #[arg(long)]
    pub trim_outliers: bool,
    /// Fence factor for outlier trimming
    #[arg(long, value_name = "K", default_value_t = 1.5)]
    pub fence: f64,
    /// Round each sample down to a multiple of NS nanoseconds
    #[arg(long, value_name = "NS", default_value_t = 1)]
    pub resolution_ns: u64,
}

impl MeasureArgs {
    /// Build the measurement config, with one run per variant unless `--count` is given.
    pub fn to_config(&self) -> BenchConfig {
        self.to_config_with_count(1)
    }

    fn to_config_with_count(&self, default_count: u64) -> BenchConfig {
        let iterations = if self.calibrate {
            Iterations::Calibrated {
                budget: Duration::from_millis(self.calibrate_ms),
                min: self.min_iterations,
            }
        } else {
            Iterations::Fixed(self.iterations.unwrap_or(Iterations::DEFAULT_FIXED))
        };
        let mut config = BenchConfig::new()
            .with_iterations(iterations)
            .with_warmup(self.warmup)
            .with_count(self.count.unwrap_or(default_count))
            .with_trim_outliers(self.trim_outliers)
            .with_outlier_fence(self.fence)
            .with_clock_resolution(Duration::from_nanos(self.resolution_ns));
        if let Some(ms) = self.deadline_ms {
            config = config.with_deadline(Duration::from_millis(ms));
        }
        config
    }
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Built-in suites to measure (default: all)
    #[arg(value_name = "SUITE")]
    pub suites: Vec<String>,
    /// Only measure variants whose `Unit::Key` matches the regular expression PATTERN
    #[arg(long = "run", value_name = "PATTERN")]
    pub filter: Option<String>,
    #[command(flatten)]
    pub measure: MeasureArgs,
    /// Worker threads; each unit is measured on one worker
    #[arg(short = 'j', long, value_name = "N", default_value_t = 1)]
    pub jobs: usize,
    /// Check that all variants of a unit return equal results
    #[arg(long, value_enum, value_name = "MODE")]
    pub verify: Option<VerifyMode>,
    /// Output format
    #[arg(long, value_enum, default_value_t = BenchFormat::Text)]
    pub format: BenchFormat,
    /// Also print TeamCity service messages
    #[arg(long)]
    pub teamcity: bool,
    /// Print min/max/median/stddev per variant
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct AbArgs {
    /// Regular expression selecting the baseline variant by `Unit::Key`
    #[arg(value_name = "OLD")]
    pub old: String,
    /// Regular expression selecting the candidate variant
    #[arg(value_name = "NEW")]
    pub new: String,
    /// Built-in suites to search (default: all)
    #[arg(long = "suite", value_name = "SUITE")]
    pub suites: Vec<String>,
    #[command(flatten)]
    pub measure: MeasureArgs,
    /// Output format
    #[arg(long, value_enum, default_value_t = BenchFormat::Text)]
    pub format: BenchFormat,
}

impl AbArgs {
    /// Comparisons need several run means per side, so `--count` defaults to [`DEFAULT_AB_COUNT`].
    pub fn to_config(&self) -> BenchConfig {
        self.measure.to_config_with_count(DEFAULT_AB_COUNT)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Test(args) => commands::run_tests(&args),
        Command::Bench(args) => commands::run_bench(&args),
        Command::BenchAb(args) => commands::run_bench_ab(&args),
        Command::List => commands::list_suites(),
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Harness faults: configuration and discovery problems that abort a run.
//!
//! Assertion failures and payload faults are *results* and never show up here. A `HarnessFault` means the
//! harness itself cannot produce a trustworthy run, so it is raised before execution begins (or, for A/B
//! comparison, when the requested pair cannot be selected).

use miette::Diagnostic;
use thiserror::Error;

/// Fatal fault in configuration, discovery or selection.
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessFault {
    #[error("iteration count must be at least 1")]
    #[diagnostic(code(dyncheck::config::zero_iterations), help("pass `--iterations N` with N >= 1"))]
    ZeroIterations,

    #[error("run count must be at least 1")]
    #[diagnostic(code(dyncheck::config::zero_count), help("pass `--count N` with N >= 1"))]
    ZeroCount,

    #[error("calibration budget must be non-zero")]
    #[diagnostic(code(dyncheck::config::zero_budget), help("pass `--calibrate-ms N` with N >= 1"))]
    ZeroBudget,

    #[error("job count must be at least 1")]
    #[diagnostic(code(dyncheck::config::zero_jobs))]
    ZeroJobs,

    #[error("outlier fence factor must be a positive finite number, got {0}")]
    #[diagnostic(code(dyncheck::config::invalid_fence), help("the usual Tukey fence factor is 1.5"))]
    InvalidFence(f64),

    #[error("clock resolution must be non-zero")]
    #[diagnostic(code(dyncheck::config::zero_resolution))]
    ZeroClockResolution,

    #[error("duplicate unit name '{0}'")]
    #[diagnostic(code(dyncheck::discovery::duplicate_unit))]
    DuplicateUnit(String),

    #[error("duplicate case '{case}' in unit '{unit}'")]
    #[diagnostic(code(dyncheck::discovery::duplicate_case))]
    DuplicateCase { unit: String, case: String },

    #[error("duplicate variant key '{key}' in unit '{unit}'")]
    #[diagnostic(
        code(dyncheck::discovery::duplicate_variant),
        help("variant keys drop the `benchmark` prefix, so `benchmarkFoo` and `benchmark_Foo` collide")
    )]
    DuplicateVariant { unit: String, key: String },

    #[error("unit '{0}' has no cases or variants")]
    #[diagnostic(code(dyncheck::discovery::empty_unit))]
    EmptyUnit(String),

    #[error("unknown suite '{name}'")]
    #[diagnostic(code(dyncheck::discovery::unknown_suite), help("available suites: {available}"))]
    UnknownSuite { name: String, available: String },

    #[error("invalid pattern '{pattern}': {reason}")]
    #[diagnostic(
        code(dyncheck::selection::invalid_pattern),
        help("patterns are regular expressions matched against `Unit::Key`; escape literal metacharacters")
    )]
    InvalidPattern { pattern: String, reason: String },

    #[error("selected benchmarks set contains no variants to run")]
    #[diagnostic(code(dyncheck::selection::nothing_selected), help("check the `--run` filter"))]
    NothingSelected,

    #[error("{side} pattern '{pattern}' matched no benchmarks")]
    #[diagnostic(code(dyncheck::selection::no_match))]
    PatternMatchedNone { side: &'static str, pattern: String },

    #[error("{side} pattern '{pattern}' matched more than one benchmark: {first} and {second}")]
    #[diagnostic(code(dyncheck::selection::ambiguous), help("anchor the pattern, e.g. `^Unit::Key$`"))]
    PatternAmbiguous {
        side: &'static str,
        pattern: String,
        first: String,
        second: String,
    },

    #[error("old and new patterns both matched {0}")]
    #[diagnostic(code(dyncheck::selection::overlap))]
    PatternsOverlap(String),

    #[error("{name} could not be measured: {reason}")]
    #[diagnostic(code(dyncheck::compare::unmeasured))]
    Unmeasured { name: String, reason: String },

    #[error("failed to start worker pool: {0}")]
    #[diagnostic(code(dyncheck::pool))]
    Pool(String),

    #[error("failed to write report: {0}")]
    #[diagnostic(code(dyncheck::io))]
    Io(#[from] std::io::Error),
}

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessFault>;

//! Test and benchmark execution.
//!
//! ## Modules
//!
//! - `units` - unit descriptors (`TestUnit`, `BenchmarkUnit`) and their validation
//! - `interfaces` - loader/executor boundaries with in-process defaults
//! - `test_runner` - case state machine, summaries, `TestReporter`
//! - `bench_runner` - timed loops, verification pre-pass, `BenchReporter`
//! - `stats` / `compare` - statistics, outlier trimming and A/B verdicts
//! - `clock` / `sink` / `environment` - time source, ordered result sink, host checks
//! - `config` / `errors` - run configuration and harness faults
//!
//! ## Fault containment
//!
//! Assertion failures are recorded and never stop a case early unless the payload chooses to. Payload
//! faults (returned or panicked) end the case or variant they occur in and nothing else. Only a
//! [`HarnessFault`] aborts a run.

pub mod bench_runner;
pub mod clock;
pub mod compare;
pub mod config;
pub mod environment;
pub mod errors;
pub mod interfaces;
pub mod sink;
pub mod stats;
pub mod test_runner;
pub mod units;

pub use bench_runner::{
    BenchReporter, BenchRunSummary, BenchUnitSummary, Measurement, RunSample, VariantOutcome, VerificationIssue,
    measure_variant, run_benchmarks, verify_variants,
};
pub use clock::{Clock, MonotonicClock, SteppingClock};
pub use config::{BenchConfig, EqualityMode, Iterations, TestConfig, compile_pattern};
pub use errors::{HarnessFault, HarnessResult};
pub use interfaces::{CaseExecutor, InProcessExecutor, StaticLoader, UnitLoader};
pub use stats::Statistics;
pub use test_runner::{CaseOutcome, CaseState, Progress, RunSummary, TestReporter, UnitSummary, run_units};
pub use units::{BenchVariant, BenchmarkUnit, CaseMarker, TestCase, TestUnit};

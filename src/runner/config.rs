//! Run configuration.
//!
//! Configuration is built once (usually from CLI flags) and is read-only for the duration of a run. Every
//! field has a documented default; [`BenchConfig::validate`] rejects values the harness cannot honor before
//! any payload runs.

use std::time::Duration;

use regex::Regex;

use super::errors::{HarnessFault, HarnessResult};

// ============================================================================
// Tests
// ============================================================================

/// Configuration for a test run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestConfig {
    /// Keyword filter matched against `case` and `Unit::case` (substring).
    pub filter: Option<String>,
    /// Stop after the first failing or errored case.
    pub stop_on_fail: bool,
    pub verbose: bool,
}

impl TestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_stop_on_fail(mut self, stop: bool) -> Self {
        self.stop_on_fail = stop;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

// ============================================================================
// Benchmarks
// ============================================================================

/// How many timed iterations each variant runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iterations {
    /// Exactly this many iterations.
    Fixed(u64),
    /// Time one call, then run `max(budget / op_time, min)` iterations.
    Calibrated { budget: Duration, min: u64 },
}

impl Iterations {
    pub const DEFAULT_FIXED: u64 = 1000;
    pub const DEFAULT_BUDGET: Duration = Duration::from_millis(100);
    pub const DEFAULT_MIN: u64 = 20;

    /// Calibrated policy with the default budget and minimum.
    pub fn calibrated() -> Self {
        Iterations::Calibrated {
            budget: Self::DEFAULT_BUDGET,
            min: Self::DEFAULT_MIN,
        }
    }

    /// Iteration count for a measured per-op time.
    ///
    /// ## Notes
    /// - A zero `op_time` is treated as 1 ns so the division is defined.
    pub fn resolve(self, op_time: Duration) -> u64 {
        match self {
            Iterations::Fixed(n) => n,
            Iterations::Calibrated { budget, min } => {
                let per_op = op_time.as_nanos().max(1);
                let fitted = budget.as_nanos() / per_op;
                u64::try_from(fitted).unwrap_or(u64::MAX).max(min)
            }
        }
    }
}

impl Default for Iterations {
    fn default() -> Self {
        Iterations::Fixed(Self::DEFAULT_FIXED)
    }
}

/// Equality used by the variant verification pre-pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualityMode {
    Loose,
    Strict,
}

impl EqualityMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EqualityMode::Loose => "loose",
            EqualityMode::Strict => "strict",
        }
    }
}

/// Configuration for a benchmark run. All variants of a unit share it.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub iterations: Iterations,
    /// Timed runs per variant; each run records its own mean.
    pub count: u64,
    /// Untimed calls before the timed loop.
    pub warmup_iterations: u64,
    /// Wall-clock bound per variant; the loop stops early once exceeded.
    pub deadline: Option<Duration>,
    pub trim_outliers: bool,
    /// Tukey fence factor used when trimming.
    pub outlier_fence: f64,
    /// Per-iteration durations are rounded down to a multiple of this.
    pub clock_resolution: Duration,
    /// Worker threads; each unit runs entirely on one worker.
    pub jobs: usize,
    /// Regular expression matched against `Unit::Key`.
    pub filter: Option<String>,
    /// Compare variant results before timing.
    pub verify: Option<EqualityMode>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: Iterations::default(),
            count: 1,
            warmup_iterations: 10,
            deadline: None,
            trim_outliers: false,
            outlier_fence: 1.5,
            clock_resolution: Duration::from_nanos(1),
            jobs: 1,
            filter: None,
            verify: None,
        }
    }
}

impl BenchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iterations(mut self, iterations: Iterations) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    pub fn with_warmup(mut self, warmup: u64) -> Self {
        self.warmup_iterations = warmup;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_trim_outliers(mut self, trim: bool) -> Self {
        self.trim_outliers = trim;
        self
    }

    pub fn with_outlier_fence(mut self, fence: f64) -> Self {
        self.outlier_fence = fence;
        self
    }

    pub fn with_clock_resolution(mut self, resolution: Duration) -> Self {
        self.clock_resolution = resolution;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_verify(mut self, mode: EqualityMode) -> Self {
        self.verify = Some(mode);
        self
    }

    /// Reject configurations the harness cannot honor.
    ///
    /// ## Errors
    /// - [`HarnessFault::ZeroIterations`] for `Fixed(0)` or a calibrated minimum of 0.
    /// - [`HarnessFault::ZeroCount`] for a run count of 0.
    /// - [`HarnessFault::InvalidPattern`] for a filter that is not a valid regular expression.
    /// - [`HarnessFault::ZeroBudget`], [`HarnessFault::ZeroJobs`], [`HarnessFault::InvalidFence`],
    ///   [`HarnessFault::ZeroClockResolution`].
    pub fn validate(&self) -> HarnessResult<()> {
        match self.iterations {
            Iterations::Fixed(0) => return Err(HarnessFault::ZeroIterations),
            Iterations::Calibrated { min: 0, .. } => return Err(HarnessFault::ZeroIterations),
            Iterations::Calibrated { budget, .. } if budget.is_zero() => return Err(HarnessFault::ZeroBudget),
            _ => {}
        }
        if self.count == 0 {
            return Err(HarnessFault::ZeroCount);
        }
        if let Some(filter) = &self.filter {
            compile_pattern(filter)?;
        }
        if self.jobs == 0 {
            return Err(HarnessFault::ZeroJobs);
        }
        if !self.outlier_fence.is_finite() || self.outlier_fence <= 0.0 {
            return Err(HarnessFault::InvalidFence(self.outlier_fence));
        }
        if self.clock_resolution.is_zero() {
            return Err(HarnessFault::ZeroClockResolution);
        }
        Ok(())
    }
}

/// Compile a `Unit::Key` selection pattern.
///
/// ## Errors
/// - [`HarnessFault::InvalidPattern`] when `pattern` is not a valid regular expression.
pub fn compile_pattern(pattern: &str) -> HarnessResult<Regex> {
    Regex::new(pattern).map_err(|e| HarnessFault::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = BenchConfig::default();
        assert_eq!(config.iterations, Iterations::Fixed(1000));
        assert_eq!(config.warmup_iterations, 10);
        assert_eq!(config.count, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_iterations_is_a_harness_fault() {
        let config = BenchConfig::new().with_iterations(Iterations::Fixed(0));
        assert!(matches!(config.validate(), Err(HarnessFault::ZeroIterations)));

        let config = BenchConfig::new().with_iterations(Iterations::Calibrated {
            budget: Duration::from_millis(1),
            min: 0,
        });
        assert!(matches!(config.validate(), Err(HarnessFault::ZeroIterations)));
    }

    #[test]
    fn zero_count_is_a_harness_fault() {
        assert!(matches!(BenchConfig::new().with_count(0).validate(), Err(HarnessFault::ZeroCount)));
        assert!(BenchConfig::new().with_count(10).validate().is_ok());
    }

    #[test]
    fn filters_are_regular_expressions() {
        assert!(BenchConfig::new().with_filter("Implode|Concat3$").validate().is_ok());
        assert!(matches!(
            BenchConfig::new().with_filter("Concat(").validate(),
            Err(HarnessFault::InvalidPattern { pattern, .. }) if pattern == "Concat("
        ));
        let re = compile_pattern("^BenchmarkConcat::").unwrap_or_else(|e| panic!("{e}"));
        assert!(re.is_match("BenchmarkConcat::Implode"));
        assert!(!re.is_match("BenchmarkConcat3::Concat"));
    }

    #[test]
    fn other_invalid_settings() {
        let zero_budget = BenchConfig::new().with_iterations(Iterations::Calibrated {
            budget: Duration::ZERO,
            min: 5,
        });
        assert!(matches!(zero_budget.validate(), Err(HarnessFault::ZeroBudget)));
        assert!(matches!(BenchConfig::new().with_jobs(0).validate(), Err(HarnessFault::ZeroJobs)));
        assert!(matches!(
            BenchConfig::new().with_outlier_fence(f64::NAN).validate(),
            Err(HarnessFault::InvalidFence(_))
        ));
        assert!(matches!(
            BenchConfig::new().with_clock_resolution(Duration::ZERO).validate(),
            Err(HarnessFault::ZeroClockResolution)
        ));
    }

    #[test]
    fn calibration_fits_budget_with_floor() {
        let policy = Iterations::Calibrated {
            budget: Duration::from_millis(100),
            min: 20,
        };
        assert_eq!(policy.resolve(Duration::from_micros(1)), 100_000);
        assert_eq!(policy.resolve(Duration::from_millis(50)), 20);
        assert_eq!(policy.resolve(Duration::ZERO), 100_000_000);
        assert_eq!(Iterations::Fixed(7).resolve(Duration::from_secs(1)), 7);
    }
}

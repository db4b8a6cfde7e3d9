//! Benchmark harness.
//!
//! ## Per-variant flow
//!
//! 1. Pre-flight: one untimed call. A fault here marks the variant errored and it is not timed.
//! 2. Warm-up: `warmup_iterations` untimed calls.
//! 3. Iteration count: fixed, or calibrated from one timed call.
//! 4. Timed runs: `count` repetitions of the timed loop, one clock reading before and after every call,
//!    durations quantized to the clock resolution. Each run records its mean ns/op. A deadline stops the
//!    current run early (after at least one iteration) and skips the remaining runs.
//! 5. Statistics over every kept duration, optionally after Tukey outlier trimming.
//!
//! A/B comparison works on the per-run means, not on single iterations.
//!
//! Every variant of a unit sees the same configuration and the same fixture. The optional verification
//! pre-pass compares variant results with the equality engine and never overlaps with timing.
//!
//! ## Parallelism
//!
//! With `jobs > 1` units are spread over a rayon pool, one unit per task, so the timed loops of one unit
//! always run back to back on one worker. Results go through an [`OrderedSink`] and are reported in unit
//! order once every unit has finished.

use std::hint::black_box;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use dyncheck_core::{PayloadFault, Value, loose_equal, strict_equal};
use dyncheck_stdlib::errors::fault_from_panic;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::clock::{Clock, quantize};
use super::config::{BenchConfig, EqualityMode, Iterations, compile_pattern};
use super::errors::{HarnessFault, HarnessResult};
use super::sink::OrderedSink;
use super::stats::{Statistics, trim_outliers};
use super::units::{BenchVariant, BenchmarkUnit, naming_warning, validate_bench_units};

// ============================================================================
// Results
// ============================================================================

/// One repetition of a variant's timed loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSample {
    pub iterations: u64,
    /// Mean ns/op over this run's durations (before trimming).
    pub mean_ns: f64,
}

/// Timing of one variant. Produced once per run and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Measurement {
    pub unit: String,
    pub variant: String,
    pub key: String,
    /// Timed iterations completed, over all runs.
    pub iterations: u64,
    pub warmup_iterations: u64,
    /// Per-iteration durations in run order (before trimming).
    pub durations: Vec<Duration>,
    /// One entry per completed run.
    pub runs: Vec<RunSample>,
    /// Statistics over the kept durations.
    pub stats: Statistics,
    /// Durations dropped by outlier trimming.
    pub trimmed: usize,
    pub deadline_hit: bool,
    /// Wall time spent on the variant, pre-flight and warm-up included.
    pub elapsed: Duration,
}

impl Measurement {
    /// `Unit::Key`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.unit, self.key)
    }

    /// Statistics over the per-run means; falls back to the per-iteration statistics without runs.
    pub fn run_statistics(&self) -> Statistics {
        let means: Vec<f64> = self.runs.iter().map(|r| r.mean_ns).collect();
        Statistics::from_nanos(&means).unwrap_or(self.stats)
    }
}

#[derive(Debug, Clone)]
pub enum VariantOutcome {
    Measured(Measurement),
    /// The variant faulted; no (or no complete) timing exists.
    Errored {
        unit: String,
        variant: String,
        key: String,
        fault: PayloadFault,
    },
}

impl VariantOutcome {
    pub fn key(&self) -> &str {
        match self {
            VariantOutcome::Measured(m) => &m.key,
            VariantOutcome::Errored { key, .. } => key,
        }
    }

    pub fn qualified_name(&self) -> String {
        match self {
            VariantOutcome::Measured(m) => m.qualified_name(),
            VariantOutcome::Errored { unit, key, .. } => format!("{unit}::{key}"),
        }
    }

    pub fn measurement(&self) -> Option<&Measurement> {
        match self {
            VariantOutcome::Measured(m) => Some(m),
            VariantOutcome::Errored { .. } => None,
        }
    }
}

/// A variant whose result disagrees with the reference variant, or that faulted during verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationIssue {
    /// `Unit::Key`.
    pub variant: String,
    pub detail: String,
}

#[derive(Debug, Clone)]
pub struct BenchUnitSummary {
    pub unit: String,
    pub outcomes: Vec<VariantOutcome>,
    pub verification: Vec<VerificationIssue>,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct BenchRunSummary {
    pub units: Vec<BenchUnitSummary>,
    pub elapsed: Duration,
}

impl BenchRunSummary {
    pub fn measurements(&self) -> impl Iterator<Item = &Measurement> {
        self.units
            .iter()
            .flat_map(|u| u.outcomes.iter())
            .filter_map(VariantOutcome::measurement)
    }

    pub fn errored(&self) -> usize {
        self.units
            .iter()
            .flat_map(|u| u.outcomes.iter())
            .filter(|o| o.measurement().is_none())
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.errored() == 0 && self.units.iter().all(|u| u.verification.is_empty())
    }
}

// ============================================================================
// Bench Reporter Trait
// ============================================================================

pub trait BenchReporter {
    fn on_run_start(&mut self, _unit_count: usize, _variant_count: usize) -> io::Result<()> {
        Ok(())
    }

    fn on_unit_start(&mut self, unit: &str) -> io::Result<()>;

    fn on_variant_complete(&mut self, outcome: &VariantOutcome) -> io::Result<()>;

    fn on_unit_complete(&mut self, summary: &BenchUnitSummary) -> io::Result<()>;

    fn on_run_complete(&mut self, _summary: &BenchRunSummary) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Measuring
// ============================================================================

struct Timing {
    durations: Vec<Duration>,
    runs: Vec<RunSample>,
    deadline_hit: bool,
}

fn run_mean_ns(durations: &[Duration]) -> f64 {
    if durations.is_empty() {
        return 0.0;
    }
    durations.iter().map(|d| d.as_nanos() as f64).sum::<f64>() / durations.len() as f64
}

fn timed_loop<C: Clock + ?Sized>(
    fixture: &Value,
    variant: &BenchVariant,
    config: &BenchConfig,
    clock: &C,
    start: Duration,
) -> Result<Timing, PayloadFault> {
    black_box(variant.call(black_box(fixture))?);
    for _ in 0..config.warmup_iterations {
        black_box(variant.call(black_box(fixture))?);
    }

    let iterations = match config.iterations {
        Iterations::Fixed(n) => n,
        policy @ Iterations::Calibrated { .. } => {
            let t0 = clock.now();
            let out = variant.call(black_box(fixture));
            let op_time = clock.since(t0);
            black_box(out?);
            let n = policy.resolve(op_time);
            debug!(variant = %variant.name, op_ns = op_time.as_nanos() as u64, iterations = n, "calibrated");
            n
        }
    };

    let capacity = iterations.saturating_mul(config.count).min(1 << 20);
    let mut durations = Vec::with_capacity(usize::try_from(capacity).unwrap_or(0));
    let mut runs = Vec::new();
    let mut deadline_hit = false;
    for run in 0..config.count {
        let run_start = durations.len();
        for i in 0..iterations {
            if let Some(deadline) = config.deadline {
                if (run > 0 || i > 0) && clock.since(start) >= deadline {
                    deadline_hit = true;
                    break;
                }
            }
            let t0 = clock.now();
            let out = variant.call(black_box(fixture));
            let elapsed = clock.since(t0);
            black_box(out?);
            durations.push(quantize(elapsed, config.clock_resolution));
        }
        let run_durations = &durations[run_start..];
        if !run_durations.is_empty() {
            runs.push(RunSample {
                iterations: run_durations.len() as u64,
                mean_ns: run_mean_ns(run_durations),
            });
        }
        if deadline_hit {
            break;
        }
    }
    Ok(Timing {
        durations,
        runs,
        deadline_hit,
    })
}

/// Measure one variant of `unit` under `config`.
///
/// Faults (returned or panicked) anywhere in the pre-flight call, warm-up or timed loop produce
/// [`VariantOutcome::Errored`]; they never escape.
pub fn measure_variant<C: Clock + ?Sized>(
    unit: &BenchmarkUnit,
    variant: &BenchVariant,
    config: &BenchConfig,
    clock: &C,
) -> VariantOutcome {
    let start = clock.now();
    let caught = panic::catch_unwind(AssertUnwindSafe(|| {
        timed_loop(&unit.fixture, variant, config, clock, start)
    }));
    let result = caught.unwrap_or_else(|payload| Err(fault_from_panic(payload.as_ref())));

    let timing = match result {
        Ok(timing) => timing,
        Err(fault) => {
            warn!(unit = %unit.name, variant = %variant.name, %fault, "variant errored");
            return VariantOutcome::Errored {
                unit: unit.name.clone(),
                variant: variant.name.clone(),
                key: variant.key().to_string(),
                fault,
            };
        }
    };

    let (kept, trimmed) = if config.trim_outliers {
        trim_outliers(&timing.durations, config.outlier_fence)
    } else {
        (timing.durations.clone(), 0)
    };
    let stats = Statistics::from_samples(&kept)
        .or_else(|| Statistics::from_samples(&timing.durations))
        .unwrap_or(Statistics {
            samples: 0,
            min: 0.0,
            max: 0.0,
            mean: 0.0,
            stddev: 0.0,
            median: 0.0,
        });

    VariantOutcome::Measured(Measurement {
        unit: unit.name.clone(),
        variant: variant.name.clone(),
        key: variant.key().to_string(),
        iterations: timing.durations.len() as u64,
        warmup_iterations: config.warmup_iterations,
        durations: timing.durations,
        runs: timing.runs,
        stats,
        trimmed,
        deadline_hit: timing.deadline_hit,
        elapsed: clock.since(start),
    })
}

/// Compare every variant's result against the first variant that produced one.
///
/// ## Returns
/// One issue per mismatching or faulting variant; empty when all agree.
pub fn verify_variants(unit: &BenchmarkUnit, mode: EqualityMode) -> Vec<VerificationIssue> {
    let results: Vec<(&BenchVariant, Result<Value, PayloadFault>)> = unit
        .variants
        .iter()
        .map(|v| {
            let res = panic::catch_unwind(AssertUnwindSafe(|| v.call(&unit.fixture)))
                .unwrap_or_else(|payload| Err(fault_from_panic(payload.as_ref())));
            (v, res)
        })
        .collect();

    let reference = results
        .iter()
        .find_map(|(v, res)| res.as_ref().ok().map(|value| (*v, value)));
    let equal = match mode {
        EqualityMode::Loose => loose_equal,
        EqualityMode::Strict => strict_equal,
    };

    let mut issues = Vec::new();
    for (variant, res) in &results {
        match res {
            Err(fault) => issues.push(VerificationIssue {
                variant: unit.qualified(variant),
                detail: format!("faulted: {fault}"),
            }),
            Ok(value) => {
                let Some((ref_variant, expected)) = reference else {
                    continue;
                };
                if !std::ptr::eq(*variant, ref_variant) && !equal(expected, value) {
                    issues.push(VerificationIssue {
                        variant: unit.qualified(variant),
                        detail: format!(
                            "result {value} is not {} equal to {} result {expected}",
                            mode.as_str(),
                            ref_variant.key()
                        ),
                    });
                }
            }
        }
    }
    issues
}

fn measure_unit<C, F>(
    unit: &BenchmarkUnit,
    config: &BenchConfig,
    clock: &C,
    mut on_variant: F,
) -> io::Result<BenchUnitSummary>
where
    C: Clock + ?Sized,
    F: FnMut(&VariantOutcome) -> io::Result<()>,
{
    let start = clock.now();
    let verification = match config.verify {
        Some(mode) => verify_variants(unit, mode),
        None => Vec::new(),
    };
    for issue in &verification {
        warn!(variant = %issue.variant, detail = %issue.detail, "variant results differ");
    }

    let mut outcomes = Vec::with_capacity(unit.variants.len());
    for variant in &unit.variants {
        let outcome = measure_variant(unit, variant, config, clock);
        on_variant(&outcome)?;
        outcomes.push(outcome);
    }
    Ok(BenchUnitSummary {
        unit: unit.name.clone(),
        outcomes,
        verification,
        elapsed: clock.since(start),
    })
}

fn replay(reporter: &mut dyn BenchReporter, summary: &BenchUnitSummary) -> io::Result<()> {
    reporter.on_unit_start(&summary.unit)?;
    for outcome in &summary.outcomes {
        reporter.on_variant_complete(outcome)?;
    }
    reporter.on_unit_complete(summary)
}

/// Measure every selected variant of every unit.
///
/// ## Errors
/// - Configuration faults from [`BenchConfig::validate`] and discovery faults from unit validation.
/// - [`HarnessFault::NothingSelected`] when the filter leaves no variant.
/// - [`HarnessFault::Pool`] when the worker pool cannot start; I/O errors from the reporter.
#[tracing::instrument(skip_all, fields(units = units.len(), jobs = config.jobs))]
pub fn run_benchmarks<C: Clock>(
    mut units: Vec<BenchmarkUnit>,
    config: &BenchConfig,
    reporter: &mut dyn BenchReporter,
    clock: &C,
) -> HarnessResult<BenchRunSummary> {
    config.validate()?;
    validate_bench_units(&units)?;
    for unit in &units {
        if let Some(warning) = naming_warning(&unit.name) {
            warn!(unit = %unit.name, "{warning}");
        }
    }

    if let Some(pattern) = config.filter.as_deref() {
        let filter = compile_pattern(pattern)?;
        for unit in &mut units {
            unit.retain_variants(|qualified| filter.is_match(qualified));
        }
        units.retain(|u| !u.variants.is_empty());
    }
    if units.is_empty() {
        return Err(HarnessFault::NothingSelected);
    }
    units.sort_by(|a, b| a.name.cmp(&b.name));

    let variant_count: usize = units.iter().map(|u| u.variants.len()).sum();
    info!(units = units.len(), variants = variant_count, "selected benchmarks");
    reporter.on_run_start(units.len(), variant_count)?;

    let start = clock.now();
    let mut summary = BenchRunSummary::default();

    if config.jobs <= 1 || units.len() == 1 {
        for unit in &units {
            reporter.on_unit_start(&unit.name)?;
            let unit_summary = measure_unit(unit, config, clock, |o| reporter.on_variant_complete(o))?;
            reporter.on_unit_complete(&unit_summary)?;
            summary.units.push(unit_summary);
        }
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.jobs)
            .thread_name(|i| format!("dyncheck-bench-{i}"))
            .build()
            .map_err(|e| HarnessFault::Pool(e.to_string()))?;
        let sink = OrderedSink::new();
        pool.install(|| {
            units.par_iter().enumerate().for_each(|(index, unit)| {
                debug!(unit = %unit.name, index, "measuring on worker");
                sink.push(index, measure_unit(unit, config, clock, |_| Ok(())));
            });
        });
        for unit_summary in sink.into_inner() {
            let unit_summary = unit_summary?;
            replay(reporter, &unit_summary)?;
            summary.units.push(unit_summary);
        }
    }

    summary.elapsed = clock.since(start);
    reporter.on_run_complete(&summary)?;
    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::runner::clock::SteppingClock;
    use dyncheck_core::FaultKind;

    fn echo_unit() -> BenchmarkUnit {
        BenchmarkUnit::new("BenchmarkEcho")
            .with_fixture(Value::from("x"))
            .variant("benchmarkClone", |f| Ok(f.clone()))
            .variant("benchmarkUpper", |f| Ok(Value::from(f.as_str().unwrap_or("").to_uppercase())))
    }

    #[test]
    fn stepping_clock_gives_exact_statistics() {
        let clock = SteppingClock::new(Duration::from_nanos(7));
        let unit = echo_unit();
        let config = BenchConfig::new().with_iterations(Iterations::Fixed(50)).with_warmup(0);
        let outcome = measure_variant(&unit, &unit.variants[0], &config, &clock);
        let m = outcome.measurement().unwrap();
        assert_eq!(m.iterations, 50);
        assert_eq!(m.key, "Clone");
        assert_eq!(m.stats.min, 7.0);
        assert_eq!(m.stats.max, 7.0);
        assert_eq!(m.stats.stddev, 0.0);
    }

    #[test]
    fn calibrated_count_respects_minimum() {
        let clock = SteppingClock::new(Duration::from_millis(10));
        let unit = echo_unit();
        let config = BenchConfig::new().with_iterations(Iterations::calibrated());
        let m = measure_variant(&unit, &unit.variants[0], &config, &clock);
        // 100ms budget / 10ms calibration call = 10, raised to the minimum of 20
        assert_eq!(m.measurement().unwrap().iterations, 20);
    }

    #[test]
    fn each_run_records_its_own_mean() {
        let clock = SteppingClock::new(Duration::from_nanos(4));
        let unit = echo_unit();
        let config = BenchConfig::new()
            .with_iterations(Iterations::Fixed(10))
            .with_warmup(0)
            .with_count(4);
        let outcome = measure_variant(&unit, &unit.variants[0], &config, &clock);
        let m = outcome.measurement().unwrap();
        assert_eq!(m.iterations, 40);
        assert_eq!(m.runs.len(), 4);
        assert!(m.runs.iter().all(|r| r.iterations == 10 && r.mean_ns == 4.0));
        let per_run = m.run_statistics();
        assert_eq!(per_run.samples, 4);
        assert_eq!(per_run.mean, 4.0);
    }

    #[test]
    fn deadline_skips_remaining_runs() {
        let clock = SteppingClock::new(Duration::from_millis(1));
        let unit = echo_unit();
        let config = BenchConfig::new()
            .with_iterations(Iterations::Fixed(10))
            .with_warmup(0)
            .with_count(5)
            .with_deadline(Duration::from_millis(40));
        let m = measure_variant(&unit, &unit.variants[0], &config, &clock);
        let m = m.measurement().unwrap();
        assert!(m.deadline_hit);
        assert!(!m.runs.is_empty() && m.runs.len() < 5);
        assert_eq!(m.runs.iter().map(|r| r.iterations).sum::<u64>(), m.iterations);
    }

    #[test]
    fn deadline_stops_the_loop_early() {
        let clock = SteppingClock::new(Duration::from_millis(1));
        let unit = echo_unit();
        let config = BenchConfig::new()
            .with_iterations(Iterations::Fixed(1_000))
            .with_warmup(0)
            .with_deadline(Duration::from_millis(30));
        let m = measure_variant(&unit, &unit.variants[0], &config, &clock);
        let m = m.measurement().unwrap();
        assert!(m.deadline_hit);
        assert!(m.iterations >= 1 && m.iterations < 1_000);
    }

    #[test]
    fn preflight_fault_skips_timing() {
        let unit = BenchmarkUnit::new("BenchmarkBad").variant("benchmarkBoom", |_| {
            Err(PayloadFault::type_error("implode(): expected array, got string"))
        });
        let clock = SteppingClock::new(Duration::from_nanos(1));
        let outcome = measure_variant(&unit, &unit.variants[0], &BenchConfig::new(), &clock);
        match outcome {
            VariantOutcome::Errored { key, fault, .. } => {
                assert_eq!(key, "Boom");
                assert_eq!(fault.kind, FaultKind::TypeError);
            }
            VariantOutcome::Measured(_) => panic!("expected an errored variant"),
        }
    }

    #[test]
    fn verification_reports_mismatches_only() {
        let unit = echo_unit();
        let issues = verify_variants(&unit, EqualityMode::Strict);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].variant, "BenchmarkEcho::Upper");
        assert_eq!(issues[0].detail, "result 'X' is not strict equal to Clone result 'x'");

        let agreeing = BenchmarkUnit::new("BenchmarkNum")
            .variant("benchmarkInt", |_| Ok(Value::from(1)))
            .variant("benchmarkStr", |_| Ok(Value::from("1")));
        assert!(verify_variants(&agreeing, EqualityMode::Loose).is_empty());
        assert_eq!(verify_variants(&agreeing, EqualityMode::Strict).len(), 1);
    }

    #[test]
    fn empty_selection_is_a_harness_fault() {
        struct Silent;
        impl BenchReporter for Silent {
            fn on_unit_start(&mut self, _: &str) -> io::Result<()> {
                Ok(())
            }
            fn on_variant_complete(&mut self, _: &VariantOutcome) -> io::Result<()> {
                Ok(())
            }
            fn on_unit_complete(&mut self, _: &BenchUnitSummary) -> io::Result<()> {
                Ok(())
            }
        }
        let config = BenchConfig::new().with_filter("NoSuchKey");
        let clock = SteppingClock::new(Duration::from_nanos(1));
        let err = run_benchmarks(vec![echo_unit()], &config, &mut Silent, &clock).unwrap_err();
        assert!(matches!(err, HarnessFault::NothingSelected));
    }
}

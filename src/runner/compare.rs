//! A/B comparison of two variants.
//!
//! Each side is selected by a regular expression over `Unit::Key` that must match exactly one variant.
//! Both sides are measured over repeated runs (`count`), and every statistic here is taken over the
//! per-run means so that a single slow iteration cannot widen the threshold. The verdict is the percent
//! change of the means, judged against a noise threshold derived from each side's spread:
//!
//! ```text
//! threshold = sum over sides with max != min of 100 * max(1 - min/mean, max/mean - 1)
//!             (doubled when both means are below 32 ns) + 1
//! ```
//!
//! A change inside the threshold is reported as `~`.

use std::fmt;

use super::bench_runner::{BenchRunSummary, Measurement, VariantOutcome};
use super::config::compile_pattern;
use super::errors::{HarnessFault, HarnessResult};
use super::stats::Statistics;
use super::units::BenchmarkUnit;

/// Fewer runs than this on either side triggers a warning.
pub const MIN_SAMPLES: usize = 5;

/// Runs per variant when `bench-ab` is not given an explicit count.
pub const DEFAULT_AB_COUNT: u64 = 10;

/// Means below this (in ns) count as "tiny" and get a doubled threshold.
const TINY_MEAN_NS: f64 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Faster,
    Slower,
    /// Within noise.
    NoChange,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Faster => "faster",
            Verdict::Slower => "slower",
            Verdict::NoChange => "~",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Side {
    /// `Unit::Key`.
    pub name: String,
    /// Statistics over the per-run means.
    pub stats: Statistics,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub old: Side,
    pub new: Side,
    /// `(new - old) / old * 100`; negative means the new side is faster.
    pub delta_pct: f64,
    pub threshold_pct: f64,
    pub verdict: Verdict,
}

impl Comparison {
    pub fn low_samples(&self) -> bool {
        self.old.stats.samples < MIN_SAMPLES || self.new.stats.samples < MIN_SAMPLES
    }
}

/// Noise threshold in percentage points.
pub fn noise_threshold(old: &Statistics, new: &Statistics) -> f64 {
    let mut threshold: f64 = [old, new]
        .into_iter()
        .filter(|s| s.max != s.min)
        .map(Statistics::spread_pct)
        .sum();
    if old.mean < TINY_MEAN_NS && new.mean < TINY_MEAN_NS {
        threshold *= 2.0;
    }
    threshold + 1.0
}

/// Compare two measurements by their per-run means.
pub fn compare(old: &Measurement, new: &Measurement) -> Comparison {
    let (old_stats, new_stats) = (old.run_statistics(), new.run_statistics());
    let delta_pct = if old_stats.mean == 0.0 {
        0.0
    } else {
        (new_stats.mean - old_stats.mean) / old_stats.mean * 100.0
    };
    let threshold_pct = noise_threshold(&old_stats, &new_stats);
    let verdict = if delta_pct.abs() < threshold_pct {
        Verdict::NoChange
    } else if delta_pct < 0.0 {
        Verdict::Faster
    } else {
        Verdict::Slower
    };
    Comparison {
        old: Side {
            name: old.qualified_name(),
            stats: old_stats,
        },
        new: Side {
            name: new.qualified_name(),
            stats: new_stats,
        },
        delta_pct,
        threshold_pct,
        verdict,
    }
}

fn select_variant(units: &[&BenchmarkUnit], side: &'static str, pattern: &str) -> HarnessResult<String> {
    let re = compile_pattern(pattern)?;
    let mut matches = units
        .iter()
        .flat_map(|u| u.variants.iter().map(move |v| u.qualified(v)))
        .filter(|q| re.is_match(q));
    let Some(first) = matches.next() else {
        return Err(HarnessFault::PatternMatchedNone {
            side,
            pattern: pattern.to_string(),
        });
    };
    if let Some(second) = matches.next() {
        return Err(HarnessFault::PatternAmbiguous {
            side,
            pattern: pattern.to_string(),
            first,
            second,
        });
    }
    Ok(first)
}

/// Resolve the old and new patterns to two distinct `Unit::Key` names.
///
/// ## Errors
/// - [`HarnessFault::InvalidPattern`] when a pattern is not a valid regular expression.
/// - [`HarnessFault::PatternMatchedNone`] / [`HarnessFault::PatternAmbiguous`] per side.
/// - [`HarnessFault::PatternsOverlap`] when both patterns select the same variant.
pub fn select_pair(units: &[BenchmarkUnit], old: &str, new: &str) -> HarnessResult<(String, String)> {
    let mut sorted: Vec<&BenchmarkUnit> = units.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let old_name = select_variant(&sorted, "old", old)?;
    let new_name = select_variant(&sorted, "new", new)?;
    if old_name == new_name {
        return Err(HarnessFault::PatternsOverlap(old_name));
    }
    Ok((old_name, new_name))
}

/// Keep only the named variants (and the units that still have any).
pub fn restrict(units: Vec<BenchmarkUnit>, names: &[&str]) -> Vec<BenchmarkUnit> {
    units
        .into_iter()
        .filter_map(|mut unit| {
            unit.retain_variants(|q| names.contains(&q));
            (!unit.variants.is_empty()).then_some(unit)
        })
        .collect()
}

/// The measurement recorded under `name`.
///
/// ## Errors
/// - [`HarnessFault::Unmeasured`] when the variant errored or was not part of the run.
pub fn find_measurement<'a>(summary: &'a BenchRunSummary, name: &str) -> HarnessResult<&'a Measurement> {
    let outcome = summary
        .units
        .iter()
        .flat_map(|u| u.outcomes.iter())
        .find(|o| o.qualified_name() == name);
    match outcome {
        Some(VariantOutcome::Measured(m)) => Ok(m),
        Some(VariantOutcome::Errored { fault, .. }) => Err(HarnessFault::Unmeasured {
            name: name.to_string(),
            reason: fault.to_string(),
        }),
        None => Err(HarnessFault::Unmeasured {
            name: name.to_string(),
            reason: "not part of the run".to_string(),
        }),
    }
}

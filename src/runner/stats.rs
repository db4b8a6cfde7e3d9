//! Summary statistics over per-iteration durations.
//!
//! All statistics are in nanoseconds as `f64`. The standard deviation is the sample deviation (`n - 1`
//! denominator) and is 0 for fewer than two samples.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub samples: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub stddev: f64,
    pub median: f64,
}

impl Statistics {
    /// Summarize durations. Returns `None` for an empty slice.
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        let nanos: Vec<f64> = samples.iter().map(|d| d.as_nanos() as f64).collect();
        Self::from_nanos(&nanos)
    }

    pub fn from_nanos(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let stddev = if sorted.len() < 2 {
            0.0
        } else {
            let var = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
            var.sqrt()
        };

        Some(Self {
            samples: sorted.len(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean,
            stddev,
            median: percentile(&sorted, 50.0),
        })
    }

    /// Relative spread around the mean, in percent: `100 * max(1 - min/mean, max/mean - 1)`.
    pub fn spread_pct(&self) -> f64 {
        if self.mean == 0.0 || self.max == 0.0 {
            return 0.0;
        }
        100.0 * (1.0 - self.min / self.mean).max(self.max / self.mean - 1.0)
    }
}

/// Linear-interpolated percentile of an ascending slice.
///
/// ## Parameters
/// - `p`: percentile in `[0, 100]`; values outside are clamped.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        len => {
            let rank = p.clamp(0.0, 100.0) / 100.0 * (len - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Drop samples outside the Tukey fences `[Q1 - k*IQR, Q3 + k*IQR]`.
///
/// ## Returns
/// The kept samples in their original order and the number of samples dropped.
///
/// ## Notes
/// - With fewer than four samples nothing is trimmed.
pub fn trim_outliers(samples: &[Duration], fence: f64) -> (Vec<Duration>, usize) {
    if samples.len() < 4 {
        return (samples.to_vec(), 0);
    }
    let mut sorted: Vec<f64> = samples.iter().map(|d| d.as_nanos() as f64).collect();
    sorted.sort_by(f64::total_cmp);
    let q1 = percentile(&sorted, 25.0);
    let q3 = percentile(&sorted, 75.0);
    let iqr = q3 - q1;
    let (lo, hi) = (q1 - fence * iqr, q3 + fence * iqr);

    let kept: Vec<Duration> = samples
        .iter()
        .copied()
        .filter(|d| {
            let x = d.as_nanos() as f64;
            x >= lo && x <= hi
        })
        .collect();
    let dropped = samples.len() - kept.len();
    (kept, dropped)
}

//! Plain-text benchmark output. Each run of a variant gets its own line, so `--count 3` prints three lines
//! per variant.
//!
//! ```text
//! class: BenchmarkConcat
//! BenchmarkConcat::Concat3	1000	52.0 ns/op
//! BenchmarkConcat::Implode	1000	61.3 ns/op
//! ok BenchmarkConcat 1.283ms
//! ```

use std::io::{self, Write};

use crate::runner::bench_runner::{BenchReporter, BenchRunSummary, BenchUnitSummary, VariantOutcome};
use crate::runner::compare::Comparison;

pub struct ConsoleBenchReporter<W: Write> {
    out: W,
    verbose: bool,
}

impl<W: Write> ConsoleBenchReporter<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self { out, verbose }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> BenchReporter for ConsoleBenchReporter<W> {
    fn on_unit_start(&mut self, unit: &str) -> io::Result<()> {
        writeln!(self.out, "class: {unit}")
    }

    fn on_variant_complete(&mut self, outcome: &VariantOutcome) -> io::Result<()> {
        match outcome {
            VariantOutcome::Measured(m) => {
                let name = m.qualified_name();
                match m.runs.split_last() {
                    Some((last, earlier)) => {
                        for run in earlier {
                            writeln!(self.out, "{name}\t{}\t{:.1} ns/op", run.iterations, run.mean_ns)?;
                        }
                        write!(self.out, "{name}\t{}\t{:.1} ns/op", last.iterations, last.mean_ns)?;
                    }
                    None => write!(self.out, "{name}\t{}\t{:.1} ns/op", m.iterations, m.stats.mean)?,
                }
                if self.verbose {
                    write!(
                        self.out,
                        "\tmin {:.0} max {:.0} median {:.1} stddev {:.1}",
                        m.stats.min, m.stats.max, m.stats.median, m.stats.stddev
                    )?;
                    if m.trimmed > 0 {
                        write!(self.out, " ({} trimmed)", m.trimmed)?;
                    }
                }
                if m.deadline_hit {
                    write!(self.out, "\t(deadline reached)")?;
                }
                writeln!(self.out)?;
            }
            VariantOutcome::Errored { fault, .. } => {
                writeln!(self.out, "{}\tERROR\t{fault}", outcome.qualified_name())?;
            }
        }
        self.out.flush()
    }

    fn on_unit_complete(&mut self, summary: &BenchUnitSummary) -> io::Result<()> {
        for issue in &summary.verification {
            writeln!(self.out, "verify: {}: {}", issue.variant, issue.detail)?;
        }
        let errored = summary.outcomes.iter().any(|o| o.measurement().is_none());
        let status = if errored || !summary.verification.is_empty() { "FAIL" } else { "ok" };
        writeln!(self.out, "{status} {} {:?}", summary.unit, summary.elapsed)
    }

    fn on_run_complete(&mut self, summary: &BenchRunSummary) -> io::Result<()> {
        if self.verbose {
            writeln!(self.out, "total {:?}", summary.elapsed)?;
        }
        self.out.flush()
    }
}

/// Write an A/B comparison.
///
/// ```text
/// old	BenchmarkConcat::Concat3	52.0 ns/op ±3%
/// new	BenchmarkConcat::Implode	61.3 ns/op ±4%
/// delta	+17.88%	slower (noise 8.00%)
/// ```
pub fn format_comparison(w: &mut impl Write, cmp: &Comparison) -> io::Result<()> {
    for (label, side) in [("old", &cmp.old), ("new", &cmp.new)] {
        writeln!(
            w,
            "{label}\t{}\t{:.1} ns/op ±{:.0}%",
            side.name,
            side.stats.mean,
            side.stats.spread_pct()
        )?;
    }
    writeln!(
        w,
        "delta\t{:+.2}%\t{} (noise {:.2}%)",
        cmp.delta_pct, cmp.verdict, cmp.threshold_pct
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::runner::bench_runner::{Measurement, RunSample};
    use crate::runner::compare::compare;
    use crate::runner::stats::Statistics;
    use dyncheck_core::PayloadFault;
    use std::time::Duration;

    fn measured(key: &str, nanos: &[f64]) -> Measurement {
        Measurement {
            unit: "BenchmarkConcat".into(),
            variant: format!("benchmark{key}"),
            key: key.into(),
            iterations: nanos.len() as u64,
            warmup_iterations: 0,
            durations: Vec::new(),
            runs: vec![RunSample {
                iterations: nanos.len() as u64,
                mean_ns: nanos.iter().sum::<f64>() / nanos.len() as f64,
            }],
            stats: Statistics::from_nanos(nanos).unwrap(),
            trimmed: 0,
            deadline_hit: false,
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn unit_block() {
        let mut r = ConsoleBenchReporter::new(Vec::new(), false);
        let summary = BenchUnitSummary {
            unit: "BenchmarkConcat".into(),
            outcomes: vec![
                VariantOutcome::Measured(measured("Concat3", &[50.0, 54.0])),
                VariantOutcome::Errored {
                    unit: "BenchmarkConcat".into(),
                    variant: "benchmarkBroken".into(),
                    key: "Broken".into(),
                    fault: PayloadFault::type_error("bad"),
                },
            ],
            verification: Vec::new(),
            elapsed: Duration::from_millis(3),
        };
        r.on_unit_start(&summary.unit).unwrap();
        for o in &summary.outcomes {
            r.on_variant_complete(o).unwrap();
        }
        r.on_unit_complete(&summary).unwrap();
        let out = String::from_utf8(r.into_inner()).unwrap();
        insta::assert_snapshot!(out, @r"
class: BenchmarkConcat
BenchmarkConcat::Concat3	2	52.0 ns/op
BenchmarkConcat::Broken	ERROR	TypeError: bad
FAIL BenchmarkConcat 3ms
");
    }

    #[test]
    fn one_line_per_run() {
        let mut m = measured("Concat3", &[50.0, 54.0]);
        m.runs = vec![
            RunSample {
                iterations: 1000,
                mean_ns: 51.0,
            },
            RunSample {
                iterations: 1000,
                mean_ns: 53.4,
            },
            RunSample {
                iterations: 400,
                mean_ns: 52.0,
            },
        ];
        m.deadline_hit = true;
        let mut r = ConsoleBenchReporter::new(Vec::new(), false);
        r.on_variant_complete(&VariantOutcome::Measured(m)).unwrap();
        let out = String::from_utf8(r.into_inner()).unwrap();
        insta::assert_snapshot!(out, @r"
BenchmarkConcat::Concat3	1000	51.0 ns/op
BenchmarkConcat::Concat3	1000	53.4 ns/op
BenchmarkConcat::Concat3	400	52.0 ns/op	(deadline reached)
");
    }

    #[test]
    fn comparison_block() {
        let old = measured("Concat3", &[100.0, 100.0, 100.0, 100.0, 100.0]);
        let new = measured("Implode", &[150.0, 150.0, 150.0, 150.0, 150.0]);
        let mut out = Vec::new();
        format_comparison(&mut out, &compare(&old, &new)).unwrap();
        insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r"
old	BenchmarkConcat::Concat3	100.0 ns/op ±0%
new	BenchmarkConcat::Implode	150.0 ns/op ±0%
delta	+50.00%	slower (noise 1.00%)
");
    }
}

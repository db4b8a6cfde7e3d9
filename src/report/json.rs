//! JSON output: one document per run, written when the run completes.

use std::io::{self, Write};
use std::time::Duration;

use dyncheck_core::lang::assertions;
use dyncheck_stdlib::testing::{AssertionResult, ResultKind};
use serde::Serialize;

use crate::runner::bench_runner::{BenchReporter, BenchRunSummary, BenchUnitSummary, VariantOutcome};
use crate::runner::compare::Comparison;
use crate::runner::stats::Statistics;
use crate::runner::test_runner::{CaseOutcome, RunSummary, TestReporter};

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()
}

// ============================================================================
// Test runs
// ============================================================================

#[derive(Serialize)]
struct JsonRun<'a> {
    tests: usize,
    assertions: usize,
    failures: usize,
    errors: usize,
    skipped: usize,
    duration_ms: f64,
    stopped_early: bool,
    units: Vec<JsonUnit<'a>>,
}

#[derive(Serialize)]
struct JsonUnit<'a> {
    name: &'a str,
    duration_ms: f64,
    cases: Vec<JsonCase<'a>>,
}

#[derive(Serialize)]
struct JsonCase<'a> {
    name: &'a str,
    state: &'static str,
    duration_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    fault: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_reason: Option<&'a str>,
    results: Vec<JsonResult<'a>>,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    assertion: Option<&'static str>,
    #[serde(skip_serializing_if = "str::is_empty")]
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

fn kind_name(kind: ResultKind) -> &'static str {
    match kind {
        ResultKind::Pass => "pass",
        ResultKind::Fail => "fail",
        ResultKind::Error => "error",
    }
}

impl<'a> From<&'a AssertionResult> for JsonResult<'a> {
    fn from(r: &'a AssertionResult) -> Self {
        Self {
            kind: kind_name(r.kind),
            assertion: r.assertion.map(assertions::as_str),
            message: &r.message,
            user_message: r.user_message.as_deref(),
            location: r.origin.source.map(|s| s.to_string()),
        }
    }
}

impl<'a> From<&'a CaseOutcome> for JsonCase<'a> {
    fn from(c: &'a CaseOutcome) -> Self {
        Self {
            name: &c.case,
            state: c.state.as_str(),
            duration_ms: millis(c.duration),
            fault: c.fault.as_ref().map(|f| f.to_string()),
            skip_reason: c.skip_reason.as_deref(),
            results: c.results.iter().map(JsonResult::from).collect(),
        }
    }
}

pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TestReporter for JsonReporter<W> {
    fn on_collection_complete(&mut self, _unit_count: usize, _case_count: usize) -> io::Result<()> {
        Ok(())
    }

    fn on_case_complete(&mut self, _outcome: &CaseOutcome) -> io::Result<()> {
        Ok(())
    }

    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
        let run = JsonRun {
            tests: summary.tests(),
            assertions: summary.assertions(),
            failures: summary.failures().len(),
            errors: summary.errors().len(),
            skipped: summary.skipped(),
            duration_ms: millis(summary.duration),
            stopped_early: summary.stopped_early,
            units: summary
                .units
                .iter()
                .map(|u| JsonUnit {
                    name: &u.unit,
                    duration_ms: millis(u.duration),
                    cases: u.cases.iter().map(JsonCase::from).collect(),
                })
                .collect(),
        };
        write_json(&mut self.out, &run)
    }
}

// ============================================================================
// Benchmark runs
// ============================================================================

#[derive(Serialize)]
struct JsonStats {
    samples: usize,
    min_ns: f64,
    max_ns: f64,
    mean_ns: f64,
    median_ns: f64,
    stddev_ns: f64,
}

impl From<&Statistics> for JsonStats {
    fn from(s: &Statistics) -> Self {
        Self {
            samples: s.samples,
            min_ns: s.min,
            max_ns: s.max,
            mean_ns: s.mean,
            median_ns: s.median,
            stddev_ns: s.stddev,
        }
    }
}

#[derive(Serialize)]
struct JsonRunSample {
    iterations: u64,
    mean_ns: f64,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum JsonVariant<'a> {
    Measured {
        name: &'a str,
        key: &'a str,
        iterations: u64,
        warmup_iterations: u64,
        trimmed: usize,
        deadline_hit: bool,
        elapsed_ms: f64,
        stats: JsonStats,
        runs: Vec<JsonRunSample>,
    },
    Errored {
        name: &'a str,
        key: &'a str,
        fault: String,
    },
}

impl<'a> From<&'a VariantOutcome> for JsonVariant<'a> {
    fn from(o: &'a VariantOutcome) -> Self {
        match o {
            VariantOutcome::Measured(m) => JsonVariant::Measured {
                name: &m.variant,
                key: &m.key,
                iterations: m.iterations,
                warmup_iterations: m.warmup_iterations,
                trimmed: m.trimmed,
                deadline_hit: m.deadline_hit,
                elapsed_ms: millis(m.elapsed),
                stats: JsonStats::from(&m.stats),
                runs: m
                    .runs
                    .iter()
                    .map(|r| JsonRunSample {
                        iterations: r.iterations,
                        mean_ns: r.mean_ns,
                    })
                    .collect(),
            },
            VariantOutcome::Errored {
                variant, key, fault, ..
            } => JsonVariant::Errored {
                name: variant,
                key,
                fault: fault.to_string(),
            },
        }
    }
}

#[derive(Serialize)]
struct JsonIssue<'a> {
    variant: &'a str,
    detail: &'a str,
}

#[derive(Serialize)]
struct JsonBenchUnit<'a> {
    name: &'a str,
    elapsed_ms: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    verification: Vec<JsonIssue<'a>>,
    variants: Vec<JsonVariant<'a>>,
}

impl<'a> From<&'a BenchUnitSummary> for JsonBenchUnit<'a> {
    fn from(u: &'a BenchUnitSummary) -> Self {
        Self {
            name: &u.unit,
            elapsed_ms: millis(u.elapsed),
            verification: u
                .verification
                .iter()
                .map(|i| JsonIssue {
                    variant: &i.variant,
                    detail: &i.detail,
                })
                .collect(),
            variants: u.outcomes.iter().map(JsonVariant::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct JsonBenchRun<'a> {
    elapsed_ms: f64,
    units: Vec<JsonBenchUnit<'a>>,
}

pub struct JsonBenchReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonBenchReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> BenchReporter for JsonBenchReporter<W> {
    fn on_unit_start(&mut self, _unit: &str) -> io::Result<()> {
        Ok(())
    }

    fn on_variant_complete(&mut self, _outcome: &VariantOutcome) -> io::Result<()> {
        Ok(())
    }

    fn on_unit_complete(&mut self, _summary: &BenchUnitSummary) -> io::Result<()> {
        Ok(())
    }

    fn on_run_complete(&mut self, summary: &BenchRunSummary) -> io::Result<()> {
        let run = JsonBenchRun {
            elapsed_ms: millis(summary.elapsed),
            units: summary.units.iter().map(JsonBenchUnit::from).collect(),
        };
        write_json(&mut self.out, &run)
    }
}

#[derive(Serialize)]
struct JsonSide<'a> {
    name: &'a str,
    stats: JsonStats,
}

#[derive(Serialize)]
struct JsonComparison<'a> {
    old: JsonSide<'a>,
    new: JsonSide<'a>,
    delta_pct: f64,
    threshold_pct: f64,
    verdict: &'static str,
    low_samples: bool,
}

/// Write an A/B comparison as JSON.
pub fn write_comparison(out: &mut impl Write, cmp: &Comparison) -> io::Result<()> {
    let doc = JsonComparison {
        old: JsonSide {
            name: &cmp.old.name,
            stats: JsonStats::from(&cmp.old.stats),
        },
        new: JsonSide {
            name: &cmp.new.name,
            stats: JsonStats::from(&cmp.new.stats),
        },
        delta_pct: cmp.delta_pct,
        threshold_pct: cmp.threshold_pct,
        verdict: cmp.verdict.as_str(),
        low_samples: cmp.low_samples(),
    };
    write_json(out, &doc)
}

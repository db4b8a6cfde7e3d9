//! Built-in example suites.
//!
//! The suites ship with the binary so `dyncheck test` and `dyncheck bench` run out of the box:
//! - `basic-ops`: one case per assertion primitive and outcome;
//! - `example-lib`: passing tests for the runtime's string and array helpers;
//! - `assert-failure`: failing and erroring samples;
//! - `concat`: string concatenation benchmarks.
//!
//! [`BuiltinLoader`] exposes a selection of suites through the runner's [`UnitLoader`] interface.

pub mod assert_failure;
pub mod basic_ops;
pub mod concat;
pub mod example_lib;

use crate::runner::errors::{HarnessFault, HarnessResult};
use crate::runner::interfaces::UnitLoader;
use crate::runner::units::{BenchmarkUnit, TestUnit};

/// A named group of test and benchmark units.
#[derive(Debug, Clone, Copy)]
pub struct Suite {
    pub name: &'static str,
    pub description: &'static str,
    tests: fn() -> Vec<TestUnit>,
    benches: fn() -> Vec<BenchmarkUnit>,
}

impl Suite {
    pub fn test_units(&self) -> Vec<TestUnit> {
        (self.tests)()
    }

    pub fn bench_units(&self) -> Vec<BenchmarkUnit> {
        (self.benches)()
    }
}

pub const SUITES: &[Suite] = &[
    Suite {
        name: "basic-ops",
        description: "assertion primitives, one case per outcome",
        tests: basic_ops::units,
        benches: Vec::new,
    },
    Suite {
        name: "example-lib",
        description: "string and array helper tests",
        tests: example_lib::units,
        benches: Vec::new,
    },
    Suite {
        name: "assert-failure",
        description: "failing and erroring samples",
        tests: assert_failure::units,
        benches: Vec::new,
    },
    Suite {
        name: "concat",
        description: "string concatenation benchmarks",
        tests: Vec::new,
        benches: concat::units,
    },
];

pub fn find_suite(name: &str) -> Option<&'static Suite> {
    SUITES.iter().find(|s| s.name == name)
}

/// Test units of every built-in suite.
pub fn test_units() -> Vec<TestUnit> {
    SUITES.iter().flat_map(Suite::test_units).collect()
}

/// Benchmark units of every built-in suite.
pub fn bench_units() -> Vec<BenchmarkUnit> {
    SUITES.iter().flat_map(Suite::bench_units).collect()
}

/// Loader over a selection of built-in suites.
#[derive(Debug, Clone)]
pub struct BuiltinLoader {
    suites: Vec<&'static Suite>,
}

impl Default for BuiltinLoader {
    fn default() -> Self {
        Self {
            suites: SUITES.iter().collect(),
        }
    }
}

impl BuiltinLoader {
    /// Every built-in suite.
    pub fn new() -> Self {
        Self::default()
    }

    /// The named suites, in the order given. An empty selection means every suite.
    ///
    /// ## Errors
    /// - [`HarnessFault::UnknownSuite`] for a name that is not built in.
    pub fn with_suites<S: AsRef<str>>(names: &[S]) -> HarnessResult<Self> {
        if names.is_empty() {
            return Ok(Self::new());
        }
        let suites = names
            .iter()
            .map(|name| {
                find_suite(name.as_ref()).ok_or_else(|| HarnessFault::UnknownSuite {
                    name: name.as_ref().to_string(),
                    available: suite_names().join(", "),
                })
            })
            .collect::<HarnessResult<Vec<_>>>()?;
        Ok(Self { suites })
    }

    pub fn suites(&self) -> &[&'static Suite] {
        &self.suites
    }
}

pub fn suite_names() -> Vec<&'static str> {
    SUITES.iter().map(|s| s.name).collect()
}

impl UnitLoader for BuiltinLoader {
    fn test_units(&self) -> HarnessResult<Vec<TestUnit>> {
        Ok(self.suites.iter().flat_map(|s| s.test_units()).collect())
    }

    fn bench_units(&self) -> HarnessResult<Vec<BenchmarkUnit>> {
        Ok(self.suites.iter().flat_map(|s| s.bench_units()).collect())
    }
}

#![forbid(unsafe_code)]
//! dyncheck: an assertion engine and micro-benchmark harness for dynamically typed values.
//!
//! The value model and the loose/strict comparison tables live in `dyncheck_core`; payload code links
//! against `dyncheck_stdlib`. This crate holds the runner (discovery, execution, measurement,
//! comparison), the reporters, the built-in example suites and the CLI.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Payload code**: panics inside test cases and benchmark variants are caught by the runner and recorded
//!   as `Panic` faults on that case or variant; they never abort the run.

pub mod cli;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod version;

pub use dyncheck_core::{PayloadFault, Value, loose_equal, strict_equal};
pub use runner::{BenchConfig, HarnessFault, HarnessResult, TestConfig, run_benchmarks, run_units};

//! Runtime library for dyncheck payloads.
//!
//! Test cases and benchmark variants link against this crate: it provides the per-case assertion recorder,
//! scoped output capture, fault helpers, and the small string/array helpers exercised by the built-in
//! example suites.

#![deny(clippy::unwrap_used)]

pub mod capture;
pub mod collections;
pub mod conversions;
pub mod errors;
pub mod prelude;
pub mod strings;
pub mod testing;

pub use capture::{OutputBuffer, capture, echo};
pub use errors::fault_from_panic;
pub use testing::{Abort, AssertionResult, CaseResult, ResultKind, ResultOrigin, SourceLocation, TestContext};

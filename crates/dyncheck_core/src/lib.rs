//! Provide the dynamic value model and the comparison semantics shared by the dyncheck runner and runtime.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic helpers that both:
//! - the runner uses to evaluate assertions and verify benchmark variants, and
//! - payload code (through `dyncheck_stdlib`) uses to build and inspect values.
//!
//! ## Notes
//!
//! - This is a “semantic core” crate: **no IO**, no global mutable state beyond the object id counter.
//! - Current scope: the tagged [`Value`] union, truthiness, numeric-string policy, strict and loose equality,
//!   canonical rendering, the assertion vocabulary registry and assertion evaluation, and the payload fault
//!   taxonomy.
//!
//! ## Examples
//! ```rust
//! use dyncheck_core::{Value, loose_equal, strict_equal};
//!
//! assert!(loose_equal(&Value::from("1"), &Value::from(1)));
//! assert!(!strict_equal(&Value::from("1"), &Value::from(1)));
//! ```

pub mod assertions;
pub mod equality;
pub mod errors;
pub mod lang;
pub mod numeric;
pub mod render;
pub mod value;

pub use assertions::{Verdict, evaluate, evaluate_unary, failure_reason};
pub use equality::{LooseRule, loose_equal, loose_rule, strict_equal};
pub use errors::{FaultKind, PayloadFault};
pub use lang::assertions::AssertionId;
pub use value::{MapKey, ObjectId, ObjectRef, Tag, Value};

//! Vocabulary registries.
//!
//! Callers work with stable ids (e.g. [`assertions::AssertionId`]) and look up spellings and metadata via
//! registry tables instead of scattering string checks across the runner and reporters.
//!
//! ## Examples
//! ```rust
//! use dyncheck_core::lang::assertions::{self, AssertionId};
//!
//! assert_eq!(assertions::from_str("assertSame"), Some(AssertionId::Same));
//! assert_eq!(assertions::as_str(AssertionId::Same), "assertSame");
//! ```

pub mod assertions;
pub mod registry;

//! Prelude for payload code.
//!
//! ```ignore
//! use dyncheck_stdlib::prelude::*;
//! ```

pub use crate::capture::{OutputBuffer, capture, echo};
pub use crate::errors::{raise, raise_index_error, raise_key_error, raise_type_error, raise_value_error};
pub use crate::testing::{Abort, CaseResult, TestContext};
pub use dyncheck_core::{MapKey, ObjectRef, PayloadFault, Value};

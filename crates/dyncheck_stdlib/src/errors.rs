//! Fault helpers for payload code.
//!
//! The semantic core (`dyncheck_core`) owns the fault taxonomy and its canonical `Kind: message` formatting.
//! This module provides helpers to *raise* faults as panics (for payload code that cannot return a
//! `Result`) and to recover a [`PayloadFault`] from a caught panic payload.

use std::any::Any;
use std::fmt::Display;

use dyncheck_core::{FaultKind, PayloadFault};

/// Raise a fault (implemented as a panic) with canonical formatting.
#[cold]
#[track_caller]
pub fn raise(err: impl Display) -> ! {
    panic!("{err}");
}

/// Raise a `TypeError` with a canonical `TypeError: ...` prefix.
#[cold]
#[track_caller]
pub fn raise_type_error(msg: &str) -> ! {
    raise(PayloadFault::type_error(msg))
}

/// Raise a `ValueError` with a canonical `ValueError: ...` prefix.
#[cold]
#[track_caller]
pub fn raise_value_error(msg: &str) -> ! {
    raise(PayloadFault::value_error(msg))
}

/// Raise an `IndexError` with a canonical `IndexError: ...` prefix.
#[cold]
#[track_caller]
pub fn raise_index_error(msg: &str) -> ! {
    raise(PayloadFault::index_error(msg))
}

/// Raise a `KeyError` with a canonical `KeyError: ...` prefix.
#[cold]
#[track_caller]
pub fn raise_key_error(msg: &str) -> ! {
    raise(PayloadFault::key_error(msg))
}

/// Convert a caught panic payload into a [`PayloadFault`].
///
/// ## Notes
/// - Panics raised through [`raise`] keep their kind (`TypeError: ...` → [`FaultKind::TypeError`]).
/// - Any other panic becomes [`FaultKind::Panic`] carrying the panic message.
pub fn fault_from_panic(payload: &(dyn Any + Send)) -> PayloadFault {
    let text = if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        return PayloadFault::new(FaultKind::Panic, "non-string panic payload");
    };
    PayloadFault::parse_canonical(&text).unwrap_or_else(|| PayloadFault::panic(text))
}

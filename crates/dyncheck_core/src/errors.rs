//! Fault taxonomy for payload code.
//!
//! A [`PayloadFault`] is an unrecoverable fault raised inside a test case or benchmark variant (as opposed
//! to an assertion failure, which is an expected outcome). The runner contains it at case/variant
//! granularity. Display is the canonical `Kind: message` form.

use std::fmt;

/// Category of a payload fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    TypeError,
    ValueError,
    IndexError,
    KeyError,
    /// The payload panicked.
    Panic,
}

impl FaultKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FaultKind::TypeError => "TypeError",
            FaultKind::ValueError => "ValueError",
            FaultKind::IndexError => "IndexError",
            FaultKind::KeyError => "KeyError",
            FaultKind::Panic => "Panic",
        }
    }

    /// Resolve a kind from its canonical name (`"TypeError"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        [
            FaultKind::TypeError,
            FaultKind::ValueError,
            FaultKind::IndexError,
            FaultKind::KeyError,
            FaultKind::Panic,
        ]
        .into_iter()
        .find(|k| k.as_str() == name)
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unrecoverable fault raised by payload code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadFault {
    pub kind: FaultKind,
    pub message: String,
}

impl PayloadFault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(FaultKind::TypeError, message)
    }

    pub fn value_error(message: impl Into<String>) -> Self {
        Self::new(FaultKind::ValueError, message)
    }

    pub fn index_error(message: impl Into<String>) -> Self {
        Self::new(FaultKind::IndexError, message)
    }

    pub fn key_error(message: impl Into<String>) -> Self {
        Self::new(FaultKind::KeyError, message)
    }

    pub fn panic(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Panic, message)
    }

    /// A `TypeError` for an operation applied to a value of the wrong type.
    ///
    /// ## Examples
    /// ```rust
    /// use dyncheck_core::PayloadFault;
    ///
    /// let fault = PayloadFault::unexpected_type("implode", "list", "int");
    /// assert_eq!(fault.to_string(), "TypeError: implode(): expected list, got int");
    /// ```
    pub fn unexpected_type(operation: &str, expected: &str, got: &str) -> Self {
        Self::type_error(format!("{operation}(): expected {expected}, got {got}"))
    }

    /// Parse the canonical `Kind: message` form back into a fault.
    ///
    /// ## Returns
    /// - `None` when `text` does not start with a known kind name followed by `": "`.
    pub fn parse_canonical(text: &str) -> Option<Self> {
        let (kind, message) = text.split_once(": ")?;
        FaultKind::from_name(kind).map(|kind| Self::new(kind, message))
    }
}

impl fmt::Display for PayloadFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for PayloadFault {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_kind_colon_message() {
        assert_eq!(PayloadFault::key_error("'x'").to_string(), "KeyError: 'x'");
        assert_eq!(PayloadFault::panic("boom").to_string(), "Panic: boom");
    }

    #[test]
    fn canonical_form_parses_back() {
        let fault = PayloadFault::index_error("offset 3 out of range");
        assert_eq!(PayloadFault::parse_canonical(&fault.to_string()), Some(fault));
        assert_eq!(PayloadFault::parse_canonical("oops: nope"), None);
        assert_eq!(PayloadFault::parse_canonical("no separator"), None);
    }
}

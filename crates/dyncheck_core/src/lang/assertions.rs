//! Assertion primitive vocabulary.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**. Each primitive has a camelCase canonical spelling
//!   (`assertNotEquals`) and a snake_case alias (`assert_not_equals`).
//! - Every primitive has a negation partner; `negation_of(negation_of(id)) == id`.

use super::registry::{Example, LangItemInfo, Stability};

/// Stable identifier for every assertion primitive.
///
/// The discriminant order matches [`ASSERTIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssertionId {
    True,
    False,
    Same,
    NotSame,
    Equals,
    NotEquals,
}

/// Which comparison an assertion is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// Truthiness of a single operand.
    Truthiness,
    /// `strict_equal` over `(expected, actual)`.
    Strict,
    /// `loose_equal` over `(expected, actual)`.
    Loose,
}

/// Metadata for an assertion primitive.
#[derive(Debug, Clone, Copy)]
pub struct AssertionInfo {
    pub item: LangItemInfo<AssertionId>,
    /// Number of value operands (1 for truthiness, 2 for comparisons).
    pub arity: u8,
    pub comparison: Comparison,
    /// Whether the assertion passes when the comparison is `false`.
    pub negated: bool,
    pub negation: AssertionId,
    /// Verb phrase used in `Failed asserting that {actual} {phrase}`.
    pub phrase: &'static str,
}

/// Registry of all assertion primitives.
pub const ASSERTIONS: &[AssertionInfo] = &[
    info(
        AssertionId::True,
        "assertTrue",
        &["assert_true"],
        1,
        Comparison::Truthiness,
        false,
        AssertionId::False,
        "is true",
        "Passes when the value is truthy.",
        &[Example {
            code: "assertTrue(1)",
            note: None,
        }],
    ),
    info(
        AssertionId::False,
        "assertFalse",
        &["assert_false"],
        1,
        Comparison::Truthiness,
        true,
        AssertionId::True,
        "is false",
        "Passes when the value is falsy.",
        &[Example {
            code: "assertFalse('0')",
            note: Some("The string \"0\" is falsy."),
        }],
    ),
    info(
        AssertionId::Same,
        "assertSame",
        &["assert_same"],
        2,
        Comparison::Strict,
        false,
        AssertionId::NotSame,
        "is identical to",
        "Passes when both values have the same type and the same value.",
        &[Example {
            code: "assertSame(0, false)",
            note: Some("Fails: int and bool never compare identical."),
        }],
    ),
    info(
        AssertionId::NotSame,
        "assertNotSame",
        &["assert_not_same"],
        2,
        Comparison::Strict,
        true,
        AssertionId::Same,
        "is not identical to",
        "Passes when the values differ in type or value.",
        &[],
    ),
    info(
        AssertionId::Equals,
        "assertEquals",
        &["assert_equals"],
        2,
        Comparison::Loose,
        false,
        AssertionId::NotEquals,
        "matches expected",
        "Passes when the values are equal after type coercion.",
        &[Example {
            code: "assertEquals('1', 1)",
            note: Some("Passes: the numeric string coerces to 1."),
        }],
    ),
    info(
        AssertionId::NotEquals,
        "assertNotEquals",
        &["assert_not_equals"],
        2,
        Comparison::Loose,
        true,
        AssertionId::Equals,
        "is not equal to",
        "Passes when the values differ even after type coercion.",
        &[Example {
            code: "assertNotEquals(false, 0)",
            note: Some("Fails: both sides are falsy."),
        }],
    ),
];

/// Return the full metadata entry for an assertion.
pub fn info_for(id: AssertionId) -> &'static AssertionInfo {
    &ASSERTIONS[id as usize]
}

/// Resolve a spelling (canonical or alias) to its identifier.
///
/// ## Returns
/// - `Some(AssertionId)` if the spelling exists in [`ASSERTIONS`], `None` otherwise.
pub fn from_str(spelling: &str) -> Option<AssertionId> {
    ASSERTIONS
        .iter()
        .find(|a| a.item.canonical == spelling || a.item.aliases.contains(&spelling))
        .map(|a| a.item.id)
}

/// Return the canonical spelling for an assertion.
pub fn as_str(id: AssertionId) -> &'static str {
    info_for(id).item.canonical
}

/// Return the assertion with the opposite pass condition.
pub fn negation_of(id: AssertionId) -> AssertionId {
    info_for(id).negation
}

// --- helpers -----------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
const fn info(
    id: AssertionId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    arity: u8,
    comparison: Comparison,
    negated: bool,
    negation: AssertionId,
    phrase: &'static str,
    description: &'static str,
    examples: &'static [Example],
) -> AssertionInfo {
    AssertionInfo {
        item: LangItemInfo {
            id,
            canonical,
            aliases,
            description,
            since_version: Some("0.1.0"),
            stability: Stability::Stable,
            examples,
        },
        arity,
        comparison,
        negated,
        negation,
        phrase,
    }
}

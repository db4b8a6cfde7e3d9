//! Unit descriptors handed to the runner by a loader.
//!
//! A [`TestUnit`] is a named, ordered set of [`TestCase`]s; a [`BenchmarkUnit`] is a named, ordered set of
//! interchangeable [`BenchVariant`]s plus the immutable fixture value injected into every variant. The
//! runner never inspects source files: whatever registers units decides names and order.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use dyncheck_core::{PayloadFault, Value};
use dyncheck_stdlib::testing::{CaseResult, TestContext};

use super::errors::{HarnessFault, HarnessResult};

/// Body of a test case.
pub type CaseFn = Arc<dyn Fn(&mut TestContext) -> CaseResult + Send + Sync>;

/// Body of a benchmark variant: receives the unit fixture, returns the computed value.
pub type VariantFn = Arc<dyn Fn(&Value) -> Result<Value, PayloadFault> + Send + Sync>;

// ============================================================================
// Test units
// ============================================================================

/// Case markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseMarker {
    /// Never executed; reported as skipped with the reason.
    Skip(String),
}

#[derive(Clone)]
pub struct TestCase {
    pub name: String,
    pub markers: Vec<CaseMarker>,
    body: CaseFn,
}

impl TestCase {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut TestContext) -> CaseResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            markers: Vec::new(),
            body: Arc::new(body),
        }
    }

    /// Mark the case as skipped.
    pub fn skip(mut self, reason: impl Into<String>) -> Self {
        self.markers.push(CaseMarker::Skip(reason.into()));
        self
    }

    pub fn skip_reason(&self) -> Option<&str> {
        self.markers.iter().find_map(|m| match m {
            CaseMarker::Skip(reason) => Some(reason.as_str()),
        })
    }

    /// Invoke the body. Panics are the caller's concern.
    pub fn run(&self, ctx: &mut TestContext) -> CaseResult {
        (self.body)(ctx)
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("markers", &self.markers)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct TestUnit {
    pub name: String,
    pub cases: Vec<TestCase>,
}

impl TestUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Append a case (builder style).
    pub fn case<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut TestContext) -> CaseResult + Send + Sync + 'static,
    {
        self.cases.push(TestCase::new(name, body));
        self
    }

    pub fn with_case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Reject empty units and duplicate case names.
    pub fn validate(&self) -> HarnessResult<()> {
        if self.cases.is_empty() {
            return Err(HarnessFault::EmptyUnit(self.name.clone()));
        }
        let mut seen = HashSet::new();
        for case in &self.cases {
            if !seen.insert(case.name.as_str()) {
                return Err(HarnessFault::DuplicateCase {
                    unit: self.name.clone(),
                    case: case.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Validate every unit and reject duplicate unit names.
pub fn validate_test_units(units: &[TestUnit]) -> HarnessResult<()> {
    let mut seen = HashSet::new();
    for unit in units {
        if !seen.insert(unit.name.as_str()) {
            return Err(HarnessFault::DuplicateUnit(unit.name.clone()));
        }
        unit.validate()?;
    }
    Ok(())
}

// ============================================================================
// Benchmark units
// ============================================================================

/// Report key of a variant: the name without a leading `benchmark`, then without a leading `_`.
///
/// ## Examples
/// ```rust
/// use dyncheck::runner::units::variant_key;
///
/// assert_eq!(variant_key("benchmarkConcat3"), "Concat3");
/// assert_eq!(variant_key("benchmark_implode"), "implode");
/// assert_eq!(variant_key("plain"), "plain");
/// ```
pub fn variant_key(name: &str) -> &str {
    let rest = name.strip_prefix("benchmark").unwrap_or(name);
    rest.strip_prefix('_').unwrap_or(rest)
}

/// Warning for unit names that carry `Benchmark` as a suffix instead of a prefix.
pub fn naming_warning(unit_name: &str) -> Option<String> {
    if unit_name.starts_with("Benchmark") {
        return None;
    }
    let stem = unit_name.strip_suffix("Benchmark")?;
    Some(format!(
        "perhaps you meant 'Benchmark{stem}', unit name should be prefixed with 'Benchmark' and not suffixed"
    ))
}

#[derive(Clone)]
pub struct BenchVariant {
    pub name: String,
    body: VariantFn,
}

impl BenchVariant {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, PayloadFault> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            body: Arc::new(body),
        }
    }

    pub fn key(&self) -> &str {
        variant_key(&self.name)
    }

    /// Invoke the body once.
    #[inline]
    pub fn call(&self, fixture: &Value) -> Result<Value, PayloadFault> {
        (self.body)(fixture)
    }
}

impl fmt::Debug for BenchVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchVariant")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct BenchmarkUnit {
    pub name: String,
    pub variants: Vec<BenchVariant>,
    /// Shared, immutable input for every variant.
    pub fixture: Arc<Value>,
}

impl BenchmarkUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
            fixture: Arc::new(Value::Null),
        }
    }

    pub fn with_fixture(mut self, fixture: impl Into<Value>) -> Self {
        self.fixture = Arc::new(fixture.into());
        self
    }

    /// Append a variant (builder style).
    pub fn variant<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, PayloadFault> + Send + Sync + 'static,
    {
        self.variants.push(BenchVariant::new(name, body));
        self
    }

    /// `Unit::Key` for a variant of this unit.
    pub fn qualified(&self, variant: &BenchVariant) -> String {
        format!("{}::{}", self.name, variant.key())
    }

    /// Keep only the variants for which `keep` returns true.
    pub fn retain_variants(&mut self, mut keep: impl FnMut(&str) -> bool) {
        let name = self.name.clone();
        self.variants.retain(|v| keep(&format!("{name}::{}", v.key())));
    }

    /// Reject empty units and duplicate variant keys.
    pub fn validate(&self) -> HarnessResult<()> {
        if self.variants.is_empty() {
            return Err(HarnessFault::EmptyUnit(self.name.clone()));
        }
        let mut seen = HashSet::new();
        for variant in &self.variants {
            if !seen.insert(variant.key()) {
                return Err(HarnessFault::DuplicateVariant {
                    unit: self.name.clone(),
                    key: variant.key().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Validate every unit and reject duplicate unit names.
pub fn validate_bench_units(units: &[BenchmarkUnit]) -> HarnessResult<()> {
    let mut seen = HashSet::new();
    for unit in units {
        if !seen.insert(unit.name.as_str()) {
            return Err(HarnessFault::DuplicateUnit(unit.name.clone()));
        }
        unit.validate()?;
    }
    Ok(())
}

//! Layering guardrails for the workspace crates.
//!
//! - `dyncheck_core` stays dependency-free so the equality tables can be fuzzed and embedded anywhere.
//! - `dyncheck_stdlib` depends on `dyncheck_core` only; payload code must not pull in the harness stack.
//! - The root crate keeps test-only crates out of `[dependencies]`, and `insta` on its default features.

/// Dependency names listed in one table of a manifest.
fn table_entries(manifest: &str, table: &str) -> Vec<String> {
    table_lines(manifest, table)
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}

/// `(name, spec)` pairs for one table of a manifest, comments stripped.
fn table_lines(manifest: &str, table: &str) -> Vec<(String, String)> {
    let header = format!("[{table}]");
    let mut in_table = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        if line.starts_with('[') {
            if in_table {
                break;
            }
            in_table = line == header;
            continue;
        }
        if !in_table || line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, spec)) = line_no_comment.split_once('=') {
            names.push((name.trim().to_string(), spec.trim().to_string()));
        }
    }
    names
}

#[test]
fn core_has_no_dependencies() {
    let manifest = include_str!("../crates/dyncheck_core/Cargo.toml");
    assert!(
        table_entries(manifest, "dependencies").is_empty(),
        "`dyncheck_core` must not declare [dependencies]"
    );
}

#[test]
fn stdlib_depends_on_core_only() {
    let manifest = include_str!("../crates/dyncheck_stdlib/Cargo.toml");
    assert_eq!(table_entries(manifest, "dependencies"), ["dyncheck_core"]);
}

#[test]
fn test_crates_stay_in_dev_dependencies() {
    let manifest = include_str!("../Cargo.toml");
    let deps = table_entries(manifest, "dependencies");
    for dev_only in ["insta", "proptest"] {
        assert!(
            !deps.iter().any(|d| d == dev_only),
            "`{dev_only}` must not appear in [dependencies]; use [dev-dependencies] instead"
        );
    }
    let dev = table_entries(manifest, "dev-dependencies");
    assert!(dev.iter().any(|d| d == "insta"));
    assert!(deps.iter().any(|d| d == "dyncheck_core"));
}

#[test]
fn snapshot_crate_enables_no_extra_features() {
    let manifest = include_str!("../Cargo.toml");
    let dev = table_lines(manifest, "dev-dependencies");
    let (_, spec) = dev
        .iter()
        .find(|(name, _)| name == "insta")
        .unwrap_or_else(|| panic!("insta missing from [dev-dependencies]"));
    assert!(!spec.contains("features"), "insta is declared with features: {spec}");
}

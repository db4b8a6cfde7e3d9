//! Host checks that make timings less trustworthy.

use std::fs;
use std::path::Path;

/// (path relative to the filesystem root, content that means "boost enabled")
const BOOST_FLAGS: &[(&str, &str)] = &[
    ("sys/devices/system/cpu/intel_pstate/no_turbo", "0"),
    ("sys/devices/system/cpu/cpufreq/boost", "1"),
];

/// Issues found on this host. Empty when nothing suspicious was detected.
pub fn check_issues() -> Vec<String> {
    check_issues_at(Path::new("/"))
}

/// Same as [`check_issues`] with sysfs paths resolved under `root`.
pub fn check_issues_at(root: &Path) -> Vec<String> {
    let mut issues = Vec::new();
    for (rel, enabled) in BOOST_FLAGS {
        let path = root.join(rel);
        let Ok(contents) = fs::read_to_string(&path) else {
            continue;
        };
        if contents.trim() == *enabled {
            issues.push(format!("cpu boost is not disabled ({})", path.display()));
        }
    }
    issues
}

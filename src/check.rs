//! Requirement comparison

use colored::Colorize;

use crate::report::CoverageMap;
use crate::requirement::RequirementMap;

/// Compute the packages whose coverage falls below their requirement.
///
/// Only packages with an entry in the coverage map are compared; a
/// required package entirely absent from the report is not flagged.
/// The comparison is strict: `actual == minimum` passes. The result is
/// sorted by package name for deterministic output.
pub fn check_requirements(coverage: &CoverageMap, requirements: &RequirementMap) -> Vec<String> {
    let mut failed = Vec::new();

    for (package, minimum) in requirements {
        if let Some(actual) = coverage.get(package) {
            if actual < minimum {
                failed.push(package.clone());
            }
        }
    }

    failed.sort();
    failed
}

/// Number of required packages that have a coverage entry to compare.
///
/// Required packages absent from the report are never compared, so
/// this can be smaller than the requirement count.
pub fn checked_count(coverage: &CoverageMap, requirements: &RequirementMap) -> usize {
    requirements
        .keys()
        .filter(|package| coverage.contains_key(*package))
        .count()
}

/// Print the per-package failure listing on stderr
pub fn print_failures(
    failed: &[String],
    coverage: &CoverageMap,
    requirements: &RequirementMap,
) {
    eprintln!(
        "{} {} package(s) below required coverage:",
        "✗".red(),
        failed.len()
    );

    for package in failed {
        let actual = coverage.get(package).copied().unwrap_or(0.0);
        let minimum = requirements.get(package).copied().unwrap_or(0.0);
        eprintln!(
            "  {} {}",
            package.red(),
            format!("{:.1}% < {:.1}%", actual, minimum).dimmed()
        );
    }
}

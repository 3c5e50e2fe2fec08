//! Coverage report parser
//!
//! Extracts per-package coverage percentages from the text report a
//! test runner emits, one tab-separated result line per package.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::CheckError;

/// Package name -> measured coverage percent (0-100)
pub type CoverageMap = HashMap<String, f64>;

/// Marker identifying a line that carries a coverage figure
const COVERAGE_MARKER: &str = "coverage:";

/// Parse a coverage report file
pub fn parse_report(path: &Path) -> Result<CoverageMap, CheckError> {
    let content = fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_report_str(&content).map_err(|e| e.with_path(path))
}

/// Parse coverage report content from a string.
///
/// Only lines containing the `coverage:` marker are considered; lines
/// without it (`[no test files]`, build noise) are skipped. A relevant
/// line looks like:
///
/// ```text
/// ok  \tpilot/model\t1.3s\tcoverage: 90.2% of statements
/// ```
///
/// The package name is the second tab field, the percentage is the
/// numeric token before the `%` sign. Duplicate package names keep the
/// last value seen. A relevant line that cannot be parsed aborts the
/// whole run; there is no skip-and-continue.
pub fn parse_report_str(content: &str) -> Result<CoverageMap, CheckError> {
    let mut coverage = CoverageMap::new();

    for (idx, line) in content.lines().enumerate() {
        if !line.contains(COVERAGE_MARKER) {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let package = match fields.get(1) {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => return Err(CheckError::format(idx + 1, line, "missing package name field")),
        };

        let token = percent_token(line).ok_or_else(|| {
            CheckError::format(idx + 1, line, "no percentage after coverage marker")
        })?;

        let percent: f64 = token.parse().map_err(|_| {
            CheckError::format(idx + 1, line, format!("invalid percentage {:?}", token))
        })?;

        coverage.insert(package, percent);
    }

    Ok(coverage)
}

/// Numeric token between the `coverage:` marker and the `%` sign.
fn percent_token(line: &str) -> Option<&str> {
    let start = line.find(COVERAGE_MARKER)? + COVERAGE_MARKER.len();
    let rest = &line[start..];
    let end = rest.find('%')?;
    Some(rest[..end].trim())
}

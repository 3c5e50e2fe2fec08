//! Requirement table parser

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::CheckError;

/// Package name -> minimum required coverage percent (0-100)
pub type RequirementMap = HashMap<String, f64>;

/// Parse a requirement file
pub fn parse_requirement(path: &Path) -> Result<RequirementMap, CheckError> {
    let content = fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_requirement_str(&content).map_err(|e| e.with_path(path))
}

/// Parse requirement content from a string.
///
/// One record per line, exactly two tab-separated fields, no header:
///
/// ```text
/// pilot/model\t90
/// ```
///
/// A line with the wrong field count or a non-numeric minimum is a
/// fatal error for the whole file, never silently skipped. Duplicate
/// package names keep the last value seen.
pub fn parse_requirement_str(content: &str) -> Result<RequirementMap, CheckError> {
    let mut requirements = RequirementMap::new();

    for (idx, line) in content.lines().enumerate() {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 2 {
            return Err(CheckError::format(
                idx + 1,
                line,
                format!("expected 2 tab-separated fields, found {}", fields.len()),
            ));
        }

        let minimum: f64 = fields[1].trim().parse().map_err(|_| {
            CheckError::format(
                idx + 1,
                line,
                format!("invalid minimum percentage {:?}", fields[1]),
            )
        })?;

        requirements.insert(fields[0].to_string(), minimum);
    }

    Ok(requirements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requirement() {
        let requirements = parse_requirement_str("pilot/model\t90").unwrap();
        assert_eq!(requirements.len(), 1);
        assert_eq!(requirements["pilot/model"], 90.0);
    }

    #[test]
    fn test_fractional_minimum() {
        let requirements = parse_requirement_str("pilot/model\t92.3").unwrap();
        assert_eq!(requirements["pilot/model"], 92.3);
    }

    #[test]
    fn test_wrong_field_count_fails_fast() {
        let err = parse_requirement_str("pilot/model\t90\textra").unwrap_err();
        match err {
            CheckError::Format { line_no, ref reason, .. } => {
                assert_eq!(line_no, 1);
                assert!(reason.contains("found 3"));
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_single_field_fails_fast() {
        assert!(matches!(
            parse_requirement_str("pilot/model"),
            Err(CheckError::Format { .. })
        ));
    }

    #[test]
    fn test_non_numeric_minimum_fails_fast() {
        assert!(matches!(
            parse_requirement_str("pilot/model\tninety"),
            Err(CheckError::Format { .. })
        ));
    }

    #[test]
    fn test_duplicate_package_last_wins() {
        let requirements = parse_requirement_str("pilot/model\t80\npilot/model\t95").unwrap();
        assert_eq!(requirements.len(), 1);
        assert_eq!(requirements["pilot/model"], 95.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse_requirement(Path::new("/nonexistent/requirement")).unwrap_err();
        assert!(matches!(err, CheckError::Io { .. }));
    }
}

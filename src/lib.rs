//! Covcheck - package coverage gate
//!
//! A CI utility that:
//! - Parses per-package coverage out of a test runner's report
//! - Parses a per-package minimum-coverage requirement table
//! - Flags packages below their required minimum
//! - Uploads the computed coverage and exits with a pipeline-friendly code

pub mod check;
pub mod checker;
pub mod error;
pub mod report;
pub mod requirement;
pub mod upload;
pub mod workdir;

pub use check::check_requirements;
pub use checker::CoverageChecker;
pub use error::{CheckError, ExitCode};
pub use report::{parse_report, parse_report_str, CoverageMap};
pub use requirement::{parse_requirement, parse_requirement_str, RequirementMap};
pub use upload::{CoveragePayload, HttpUploader, NoopUploader, Uploader};
pub use workdir::WorkDir;

//! Coverage gate pipeline
//!
//! Runs the parse -> compare -> upload sequence and folds the outcome
//! into a single exit code. Any fatal parse or IO error aborts before
//! the comparison and surfaces with its own code; a coverage failure
//! always preempts an upload failure.

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::check;
use crate::error::{CheckError, ExitCode};
use crate::report::{self, CoverageMap};
use crate::requirement::{self, RequirementMap};
use crate::upload::{CoveragePayload, Uploader};
use crate::workdir::WorkDir;

pub struct CoverageChecker {
    report: PathBuf,
    requirement: PathBuf,
    job: String,
    build_id: String,
    coverage: CoverageMap,
    requirements: RequirementMap,
    failed: Vec<String>,
}

impl CoverageChecker {
    pub fn new(report: &Path, requirement: &Path, job: &str, build_id: &str) -> Self {
        Self {
            report: report.to_path_buf(),
            requirement: requirement.to_path_buf(),
            job: job.to_string(),
            build_id: build_id.to_string(),
            coverage: CoverageMap::new(),
            requirements: RequirementMap::new(),
            failed: Vec::new(),
        }
    }

    /// Run the full gate and return the process exit code.
    pub fn run(&mut self, workdir: &WorkDir, uploader: &dyn Uploader) -> ExitCode {
        match report::parse_report(&self.report) {
            Ok(coverage) => self.coverage = coverage,
            Err(e) => return abort("coverage report", &e),
        }

        match requirement::parse_requirement(&self.requirement) {
            Ok(requirements) => self.requirements = requirements,
            Err(e) => return abort("requirement file", &e),
        }

        self.failed = check::check_requirements(&self.coverage, &self.requirements);

        let code = if self.failed.is_empty() {
            println!(
                "{} {} checked package(s) meet their coverage minimums",
                "✓".green(),
                check::checked_count(&self.coverage, &self.requirements)
            );
            ExitCode::Success
        } else {
            check::print_failures(&self.failed, &self.coverage, &self.requirements);
            ExitCode::CoverageFailure
        };

        let payload = CoveragePayload::new(&self.job, &self.build_id, self.coverage.clone());
        if let Err(e) = self.store_and_upload(workdir, uploader, &payload) {
            eprintln!("{} {}", "Warning:".yellow().bold(), e);
            if code == ExitCode::Success {
                return ExitCode::UploadFailure;
            }
        }

        code
    }

    pub fn failed_packages(&self) -> &[String] {
        &self.failed
    }

    fn store_and_upload(
        &self,
        workdir: &WorkDir,
        uploader: &dyn Uploader,
        payload: &CoveragePayload,
    ) -> Result<(), CheckError> {
        workdir.write_payload(payload)?;
        uploader.upload(payload)
    }
}

fn abort(input: &str, err: &CheckError) -> ExitCode {
    eprintln!(
        "{} failed to parse {}: {}",
        "Error:".red().bold(),
        input,
        err
    );
    err.exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const EXAMPLE_REPORT: &str =
        "?   \tpilot/cmd\t[no test files]\nok  \tpilot/model\t1.3s\tcoverage: 90.2% of statements";

    /// Uploader that always fails, standing in for an unreachable
    /// storage endpoint.
    struct FailingUploader;

    impl Uploader for FailingUploader {
        fn upload(&self, _payload: &CoveragePayload) -> Result<(), CheckError> {
            Err(CheckError::Upload {
                reason: "storage endpoint unreachable".to_string(),
            })
        }
    }

    struct OkUploader;

    impl Uploader for OkUploader {
        fn upload(&self, _payload: &CoveragePayload) -> Result<(), CheckError> {
            Ok(())
        }
    }

    fn fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_pass_check_with_failed_upload() {
        let dir = TempDir::new().unwrap();
        let report = fixture(&dir, "report", EXAMPLE_REPORT);
        let requirement = fixture(&dir, "requirement", "pilot/model\t89");
        let workdir = WorkDir::create().unwrap();

        let mut checker = CoverageChecker::new(&report, &requirement, "job", "1");
        let code = checker.run(&workdir, &FailingUploader);
        assert_eq!(code, ExitCode::UploadFailure);
    }

    #[test]
    fn test_failed_check_preempts_upload_outcome() {
        let dir = TempDir::new().unwrap();
        let report = fixture(&dir, "report", EXAMPLE_REPORT);
        let requirement = fixture(&dir, "requirement", "pilot/model\t93");
        let workdir = WorkDir::create().unwrap();

        let mut checker = CoverageChecker::new(&report, &requirement, "job", "1");
        let code = checker.run(&workdir, &FailingUploader);
        assert_eq!(code, ExitCode::CoverageFailure);
        assert_eq!(checker.failed_packages(), ["pilot/model".to_string()]);
    }

    #[test]
    fn test_clean_run() {
        let dir = TempDir::new().unwrap();
        let report = fixture(&dir, "report", EXAMPLE_REPORT);
        let requirement = fixture(&dir, "requirement", "pilot/model\t89");
        let workdir = WorkDir::create().unwrap();

        let mut checker = CoverageChecker::new(&report, &requirement, "job", "1");
        let code = checker.run(&workdir, &OkUploader);
        assert_eq!(code, ExitCode::Success);
        assert!(checker.failed_packages().is_empty());
    }

    #[test]
    fn test_missing_report_aborts_with_setup_failure() {
        let dir = TempDir::new().unwrap();
        let requirement = fixture(&dir, "requirement", "pilot/model\t89");
        let workdir = WorkDir::create().unwrap();

        let missing = dir.path().join("no-such-report");
        let mut checker = CoverageChecker::new(&missing, &requirement, "job", "1");
        let code = checker.run(&workdir, &OkUploader);
        assert_eq!(code, ExitCode::SetupFailure);
    }

    #[test]
    fn test_malformed_requirement_aborts_before_compare() {
        let dir = TempDir::new().unwrap();
        let report = fixture(&dir, "report", EXAMPLE_REPORT);
        let requirement = fixture(&dir, "requirement", "pilot/model\t90\textra");
        let workdir = WorkDir::create().unwrap();

        let mut checker = CoverageChecker::new(&report, &requirement, "job", "1");
        let code = checker.run(&workdir, &OkUploader);
        assert_eq!(code, ExitCode::ParseFailure);
        assert!(checker.failed_packages().is_empty());
    }

    #[test]
    fn test_payload_artifact_written_to_workdir() {
        let dir = TempDir::new().unwrap();
        let report = fixture(&dir, "report", EXAMPLE_REPORT);
        let requirement = fixture(&dir, "requirement", "pilot/model\t89");
        let workdir = WorkDir::create().unwrap();

        let mut checker = CoverageChecker::new(&report, &requirement, "job", "1");
        checker.run(&workdir, &OkUploader);

        let artifact = workdir.path().join("coverage.json");
        assert!(artifact.exists());
    }
}

//! Error taxonomy and exit codes
//!
//! The exit code is the machine-readable contract with calling
//! pipelines; everything else on stderr is best-effort operator
//! diagnostics.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Discrete process exit status of a gate run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// No failing packages, upload succeeded
    Success = 0,
    /// Malformed line in an input file
    ParseFailure = 1,
    /// One or more packages below their required minimum
    CoverageFailure = 2,
    /// Coverage passed but uploading the results failed
    UploadFailure = 3,
    /// Input unreadable or working directory unavailable
    SetupFailure = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors raised along the parse-compare-upload pipeline.
///
/// All variants are fatal for the current run; nothing is retried and
/// no partial results are reported after a parse failure.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}, line {line_no}: {reason}: {line:?}")]
    Format {
        path: String,
        line_no: usize,
        line: String,
        reason: String,
    },

    #[error("upload failed: {reason}")]
    Upload { reason: String },

    #[error("failed to create working directory: {source}")]
    Workdir {
        #[source]
        source: std::io::Error,
    },
}

impl CheckError {
    /// Format error for an input consumed as an in-memory string.
    pub(crate) fn format(line_no: usize, line: &str, reason: impl Into<String>) -> Self {
        CheckError::Format {
            path: "<input>".to_string(),
            line_no,
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    /// Attach the source file path to a format error.
    pub(crate) fn with_path(mut self, file: &Path) -> Self {
        if let CheckError::Format { ref mut path, .. } = self {
            *path = file.display().to_string();
        }
        self
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            CheckError::Io { .. } | CheckError::Workdir { .. } => ExitCode::SetupFailure,
            CheckError::Format { .. } => ExitCode::ParseFailure,
            CheckError::Upload { .. } => ExitCode::UploadFailure,
        }
    }
}

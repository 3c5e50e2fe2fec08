//! Scoped working directory
//!
//! Each run operates on its own temporary working area, created before
//! the main logic and removed when the handle drops, success or not.
//! The handle is passed explicitly so nothing depends on process-wide
//! state.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::CheckError;
use crate::upload::CoveragePayload;

const WORKDIR_PREFIX: &str = "covcheck-";
const PAYLOAD_FILE: &str = "coverage.json";

pub struct WorkDir {
    dir: TempDir,
}

impl WorkDir {
    /// Create a fresh working directory under the system temp root.
    pub fn create() -> Result<Self, CheckError> {
        let dir = tempfile::Builder::new()
            .prefix(WORKDIR_PREFIX)
            .tempdir()
            .map_err(|source| CheckError::Workdir { source })?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write the serialized payload into the working directory and
    /// return the artifact path.
    pub fn write_payload(&self, payload: &CoveragePayload) -> Result<PathBuf, CheckError> {
        let path = self.dir.path().join(PAYLOAD_FILE);

        let json = serde_json::to_string_pretty(payload).map_err(|e| CheckError::Io {
            path: path.clone(),
            source: e.into(),
        })?;

        fs::write(&path, json).map_err(|source| CheckError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

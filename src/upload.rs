//! Result upload
//!
//! The gate hands its computed coverage to an external storage
//! endpoint. The endpoint is a black box: it either accepts the
//! payload or fails, and the gate never retries on its own.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::CheckError;

/// Coverage results handed to the uploader
#[derive(Debug, Clone, Serialize)]
pub struct CoveragePayload {
    pub job: String,
    pub build_id: String,
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub packages: HashMap<String, f64>,
}

impl CoveragePayload {
    pub fn new(job: &str, build_id: &str, packages: HashMap<String, f64>) -> Self {
        Self {
            job: job.to_string(),
            build_id: build_id.to_string(),
            run_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            packages,
        }
    }
}

/// External result-storage collaborator
pub trait Uploader {
    fn upload(&self, payload: &CoveragePayload) -> Result<(), CheckError>;
}

/// PUTs the payload as JSON to a storage endpoint
pub struct HttpUploader {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpUploader {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Uploader for HttpUploader {
    fn upload(&self, payload: &CoveragePayload) -> Result<(), CheckError> {
        let response = self
            .client
            .put(&self.url)
            .json(payload)
            .send()
            .map_err(|e| CheckError::Upload {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(CheckError::Upload {
                reason: format!("storage endpoint returned {}", response.status()),
            });
        }

        Ok(())
    }
}

/// Stands in when no upload endpoint is configured
pub struct NoopUploader;

impl Uploader for NoopUploader {
    fn upload(&self, _payload: &CoveragePayload) -> Result<(), CheckError> {
        Ok(())
    }
}

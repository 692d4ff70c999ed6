//! # Export Jobs
//!
//! The record a dispatcher hands to the kernel when an export runs in the
//! background. The kernel fills in the outcome; storing the record and
//! scheduling it are the caller's business.
//!
//! ```rust,no_run
//! use gear_core::export::ExportFormat;
//! use gear_core::gears::Gear;
//! use gear_core::jobs::{run_export_job, ExportJob, JobStatus};
//! use gear_core::params::GearParameters;
//! use gear_core::settings::KernelSettings;
//!
//! let gear = Gear::spur(GearParameters::new("Pinion", 2.0, 20))?;
//! let job = ExportJob::new("out/pinion.stl", ExportFormat::Stl, "user-42");
//! let job = run_export_job(job, &gear, &KernelSettings::default());
//! assert_eq!(job.status, JobStatus::Done);
//! # Ok::<(), gear_core::errors::GearError>(())
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::export::{self, ExportFormat};
use crate::gears::Gear;
use crate::settings::KernelSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Done,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportJob {
    pub job_id: Uuid,
    /// Target path of the exported file
    pub filename: String,
    pub format: ExportFormat,
    /// Opaque caller identity, never inspected here
    pub owner: String,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ExportJob {
    /// A pending job with a fresh id.
    pub fn new(filename: impl Into<String>, format: ExportFormat, owner: impl Into<String>) -> Self {
        ExportJob {
            job_id: Uuid::new_v4(),
            filename: filename.into(),
            format,
            owner: owner.into(),
            status: JobStatus::Pending,
            error: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status != JobStatus::Pending
    }
}

/// Run the export `job` describes and return it with the outcome recorded.
///
/// Failures land in `job.error` with status `Error`; nothing is retried.
pub fn run_export_job(mut job: ExportJob, gear: &Gear, settings: &KernelSettings) -> ExportJob {
    info!(job_id = %job.job_id, format = %job.format, filename = %job.filename, "export job started");

    match export::export(gear, Path::new(&job.filename), job.format, settings) {
        Ok(()) => {
            job.status = JobStatus::Done;
            job.error = None;
            info!(job_id = %job.job_id, "export job done");
        }
        Err(err) => {
            job.status = JobStatus::Error;
            job.error = Some(err.to_string());
            warn!(job_id = %job.job_id, error = %err, code = err.error_code(), "export job failed");
        }
    }
    job
}

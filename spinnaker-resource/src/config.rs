//! Resource configuration
//!
//! Everything a command needs to know is read once at startup: the request
//! envelope from stdin (including the source configuration), the polling
//! settings derived from it, and the build metadata the CI engine exposes
//! through environment variables.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use spinnaker_core::domain::source::Source;
use spinnaker_core::domain::status::Status;
use std::io::Read;
use std::time::Duration;

/// Interval between status checks when `status_check_interval` is not set
pub const DEFAULT_STATUS_CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Maximum wait for a target status when `status_check_timeout` is not set
pub const DEFAULT_STATUS_CHECK_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Reads and parses a request envelope
pub fn read_request<T: DeserializeOwned>(reader: impl Read) -> Result<T> {
    serde_json::from_reader(reader).context("Failed to parse request from stdin")
}

/// Validates the source configuration of a request
pub fn validate_source(source: &Source) -> Result<()> {
    source
        .validate()
        .context("Invalid source configuration")
}

/// How `out` waits for the triggered execution
#[derive(Debug, Clone, PartialEq)]
pub struct PollSettings {
    /// Statuses that end the wait successfully, never empty
    pub targets: Vec<Status>,
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollSettings {
    /// Polling settings for `source`, or `None` when no target status is configured
    pub fn from_source(source: &Source) -> Option<Self> {
        let targets = source.target_statuses();
        if targets.is_empty() {
            return None;
        }

        Some(Self {
            targets,
            interval: source
                .status_check_interval
                .unwrap_or(DEFAULT_STATUS_CHECK_INTERVAL),
            timeout: source
                .status_check_timeout
                .unwrap_or(DEFAULT_STATUS_CHECK_TIMEOUT),
        })
    }

    /// Targets rendered for messages, e.g. `SUCCEEDED, TERMINAL`
    pub fn targets_display(&self) -> String {
        self.targets
            .iter()
            .map(Status::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Build information exposed by the CI engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildMetadata {
    pub job_name: String,
    pub build_name: String,
}

impl BuildMetadata {
    /// Reads `BUILD_JOB_NAME` and `BUILD_NAME`, empty when unset
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("BUILD_JOB_NAME").unwrap_or_default(),
            std::env::var("BUILD_NAME").unwrap_or_default(),
        )
    }

    pub fn new(job_name: impl Into<String>, build_name: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            build_name: build_name.into(),
        }
    }
}

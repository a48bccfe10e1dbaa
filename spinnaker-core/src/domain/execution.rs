//! Execution domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::Status;

/// A single run of a Spinnaker pipeline
///
/// Snapshot read from the API. Single-execution responses may only carry the
/// `id` and `status`, so every other field defaults when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub id: String,
    /// Name of the pipeline this execution belongs to
    #[serde(default)]
    pub name: String,
    /// Build time in epoch milliseconds
    #[serde(default)]
    pub build_time: i64,
    #[serde(default)]
    pub stages: Vec<Stage>,
    #[serde(default)]
    pub status: Status,
}

impl Execution {
    /// Finds the stage with the given reference id
    pub fn stage(&self, ref_id: &str) -> Option<&Stage> {
        self.stages.iter().find(|stage| stage.ref_id == ref_id)
    }

    /// Whether any stage with `ref_id` is currently in one of `statuses`
    pub fn has_stage_in(&self, ref_id: &str, statuses: &[Status]) -> bool {
        self.stages
            .iter()
            .any(|stage| stage.ref_id == ref_id && statuses.contains(&stage.status))
    }

    /// Build time as a UTC timestamp, if it is representable
    pub fn build_time_utc(&self) -> Option<DateTime<Utc>> {
        if self.build_time <= 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.build_time)
    }
}

/// A step within an execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    /// Stage instance id, unique across executions
    #[serde(default)]
    pub id: String,
    /// Reference id from the pipeline definition
    #[serde(default)]
    pub ref_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Status,
}

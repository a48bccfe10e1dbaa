//! Execution status domain types
//!
//! Spinnaker reports statuses as upper-case strings. Only a handful of them
//! carry meaning for the resource; everything else is kept verbatim and treated
//! as still in flight unless the user lists it as a target status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an execution or stage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Running,
    Succeeded,
    Terminal,
    /// Any status outside the known vocabulary, kept as reported
    Other(String),
}

impl Status {
    /// Wire representation of the status
    pub fn as_str(&self) -> &str {
        match self {
            Status::Running => "RUNNING",
            Status::Succeeded => "SUCCEEDED",
            Status::Terminal => "TERMINAL",
            Status::Other(raw) => raw,
        }
    }

    /// Whether the execution can no longer change status
    pub fn is_final(&self) -> bool {
        matches!(self, Status::Succeeded | Status::Terminal)
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Other(String::new())
    }
}

impl From<&str> for Status {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "RUNNING" => Status::Running,
            "SUCCEEDED" => Status::Succeeded,
            "TERMINAL" => Status::Terminal,
            _ => Status::Other(raw.to_string()),
        }
    }
}

impl From<String> for Status {
    fn from(raw: String) -> Self {
        Status::from(raw.as_str())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of comparing an observed status against the target set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    /// The status is one of the targets
    Reached,
    /// The status is final but not one of the targets
    UnexpectedFinal,
    /// The execution may still move to another status
    InFlight,
}

/// Classifies an observed status against the configured targets
///
/// Targets win over finality, so listing `TERMINAL` as a target makes a failed
/// execution a successful wait.
pub fn classify(status: &Status, targets: &[Status]) -> StatusOutcome {
    if targets.contains(status) {
        StatusOutcome::Reached
    } else if status.is_final() {
        StatusOutcome::UnexpectedFinal
    } else {
        StatusOutcome::InFlight
    }
}

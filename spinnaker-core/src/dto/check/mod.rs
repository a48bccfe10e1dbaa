//! `check` envelope

use serde::{Deserialize, Serialize};

use crate::domain::source::Source;
use crate::domain::version::Version;

/// Request read by `check`
///
/// The CI engine sends no version (or `null`) on the very first check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    pub source: Source,
    #[serde(default)]
    pub version: Option<Version>,
}

impl CheckRequest {
    /// Reference of the last version seen by the engine, empty if none
    pub fn previous_ref(&self) -> &str {
        self.version
            .as_ref()
            .map(|v| v.reference.as_str())
            .unwrap_or_default()
    }
}

/// Versions emitted by `check`, oldest first
pub type CheckResponse = Vec<Version>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_request_without_version() {
        let json = r#"{"source": {
            "spinnaker_api": "http://localhost",
            "spinnaker_application": "bar",
            "spinnaker_pipeline": "foo"
        }, "version": null}"#;

        let request: CheckRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.previous_ref(), "");
    }

    #[test]
    fn test_check_request_with_version() {
        let json = r#"{"source": {
            "spinnaker_api": "http://localhost",
            "spinnaker_application": "bar",
            "spinnaker_pipeline": "foo"
        }, "version": {"ref": "EX2"}}"#;

        let request: CheckRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.previous_ref(), "EX2");
    }
}

//! Spinnaker API payloads

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Entry of `GET /applications/{app}/pipelineConfigs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Body of `POST /pipelines/{app}/{pipeline}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerRequest {
    #[serde(rename = "type")]
    pub trigger_type: String,
    #[serde(default)]
    pub parameters: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<serde_json::Value>,
}

impl TriggerRequest {
    pub fn new(parameters: HashMap<String, String>, artifacts: Vec<serde_json::Value>) -> Self {
        Self {
            trigger_type: "concourse".to_string(),
            parameters,
            artifacts,
        }
    }
}

impl Default for TriggerRequest {
    fn default() -> Self {
        Self::new(HashMap::new(), Vec::new())
    }
}

/// Accepted response of a trigger, e.g. `{"ref": "/pipelines/01CX"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerResponse {
    #[serde(rename = "ref")]
    pub reference: String,
}

impl TriggerResponse {
    /// Execution id embedded as the third segment of the reference path
    pub fn execution_id(&self) -> Option<&str> {
        self.reference
            .split('/')
            .nth(2)
            .filter(|id| !id.is_empty())
    }
}

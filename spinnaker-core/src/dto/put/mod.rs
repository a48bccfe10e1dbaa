//! `out` envelope

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::source::Source;
use crate::domain::version::{MetadataField, Version};
use crate::serde_ext::null_as_default;

/// Request read by `out`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutRequest {
    pub source: Source,
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: OutParams,
}

/// Parameters of a `put` step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutParams {
    /// Forwarded as the execution's `parameters`
    #[serde(default, deserialize_with = "null_as_default")]
    pub trigger_params: HashMap<String, String>,
    /// Forwarded verbatim as the execution's `artifacts`
    #[serde(default, deserialize_with = "null_as_default")]
    pub artifacts: Vec<serde_json::Value>,
}

/// Response written by `out`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutResponse {
    pub version: Version,
    pub metadata: Vec<MetadataField>,
}

//! `in` envelope

use serde::{Deserialize, Serialize};

use crate::domain::source::Source;
use crate::domain::version::{MetadataField, Version};

/// Request read by `in`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InRequest {
    pub source: Source,
    pub version: Version,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response written by `in`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InResponse {
    pub version: Version,
    pub metadata: Vec<MetadataField>,
}

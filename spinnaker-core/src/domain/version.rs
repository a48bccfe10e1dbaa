//! Version domain types

use serde::{Deserialize, Serialize};

use super::execution::Execution;

/// Version exchanged with the CI engine
///
/// A version is the id of a pipeline execution and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    #[serde(rename = "ref", default)]
    pub reference: String,
}

impl Version {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }
}

impl From<&Execution> for Version {
    fn from(execution: &Execution) -> Self {
        Self::new(execution.id.clone())
    }
}

/// Name/value pair shown next to a version in the CI engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    pub name: String,
    pub value: String,
}

impl MetadataField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

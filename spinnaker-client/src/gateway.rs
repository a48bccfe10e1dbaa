//! Gateway trait used by the resource logic
//!
//! The version resolver and the trigger/wait state machine only need three
//! operations. Keeping them behind a trait lets those parts run against fakes.

use async_trait::async_trait;
use spinnaker_core::domain::execution::Execution;
use spinnaker_core::dto::api::TriggerRequest;

use crate::SpinnakerClient;
use crate::error::Result;

/// Execution operations of the Spinnaker API
#[async_trait]
pub trait ExecutionGateway: Send + Sync {
    /// Most recent executions of the whole application
    async fn list_executions(&self) -> Result<Vec<Execution>>;

    /// Snapshot of one execution
    async fn get_execution(&self, execution_id: &str) -> Result<Execution>;

    /// Trigger the configured pipeline and return the new execution id
    async fn trigger_execution(&self, request: &TriggerRequest) -> Result<String>;
}

#[async_trait]
impl ExecutionGateway for SpinnakerClient {
    async fn list_executions(&self) -> Result<Vec<Execution>> {
        SpinnakerClient::list_executions(self).await
    }

    async fn get_execution(&self, execution_id: &str) -> Result<Execution> {
        SpinnakerClient::get_execution(self, execution_id).await
    }

    async fn trigger_execution(&self, request: &TriggerRequest) -> Result<String> {
        SpinnakerClient::trigger_execution(self, request).await
    }
}

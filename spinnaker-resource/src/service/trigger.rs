//! Execution trigger and status wait
//!
//! `out` triggers the configured pipeline. Without target statuses the new
//! execution id is the result. With targets, the execution is fetched on an
//! interval until it reaches a target, reaches another final status, or the
//! timeout elapses.

use spinnaker_client::{ClientError, ExecutionGateway};
use spinnaker_core::domain::status::{Status, StatusOutcome, classify};
use spinnaker_core::domain::version::MetadataField;
use spinnaker_core::dto::api::TriggerRequest;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::PollSettings;
use crate::service::clock::Clock;

/// Ways a trigger-and-wait can fail
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("timed out waiting for configured status(es) {statuses} after {timeout:?}")]
    TimedOut { statuses: String, timeout: Duration },

    #[error("Pipeline execution reached a final state: {state}")]
    UnexpectedFinal { state: Status },

    #[error(transparent)]
    Gateway(#[from] ClientError),
}

/// Result of a successful trigger
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerOutcome {
    pub execution_id: String,
    /// Status that ended the wait, when one was awaited
    pub status: Option<Status>,
}

impl TriggerOutcome {
    pub fn metadata(&self) -> Vec<MetadataField> {
        let mut metadata = vec![MetadataField::new("execution_id", self.execution_id.clone())];
        if let Some(status) = &self.status {
            metadata.push(MetadataField::new("status", status.as_str()));
        }
        metadata
    }
}

/// Triggers executions and waits for their status
pub struct TriggerService {
    gateway: Arc<dyn ExecutionGateway>,
    clock: Arc<dyn Clock>,
}

impl TriggerService {
    pub fn new(gateway: Arc<dyn ExecutionGateway>, clock: Arc<dyn Clock>) -> Self {
        Self { gateway, clock }
    }

    /// Triggers an execution, then waits for a target status if `poll` is set
    pub async fn trigger_and_wait(
        &self,
        request: &TriggerRequest,
        poll: Option<&PollSettings>,
    ) -> Result<TriggerOutcome, WaitError> {
        let execution_id = self.gateway.trigger_execution(request).await?;

        let Some(poll) = poll else {
            return Ok(TriggerOutcome {
                execution_id,
                status: None,
            });
        };

        let status = self.wait_for_status(&execution_id, poll).await?;

        Ok(TriggerOutcome {
            execution_id,
            status: Some(status),
        })
    }

    /// Polls an execution until its status is decided
    pub async fn wait_for_status(
        &self,
        execution_id: &str,
        poll: &PollSettings,
    ) -> Result<Status, WaitError> {
        info!(
            "Waiting for execution {} to reach {} (interval {:?}, timeout {:?})",
            execution_id,
            poll.targets_display(),
            poll.interval,
            poll.timeout
        );

        let started = self.clock.now();

        loop {
            let execution = self.gateway.get_execution(execution_id).await?;

            match classify(&execution.status, &poll.targets) {
                StatusOutcome::Reached => {
                    info!("Execution {} reached {}", execution_id, execution.status);
                    return Ok(execution.status);
                }
                StatusOutcome::UnexpectedFinal => {
                    return Err(WaitError::UnexpectedFinal {
                        state: execution.status,
                    });
                }
                StatusOutcome::InFlight => {
                    debug!("Execution {} is {}", execution_id, execution.status);

                    self.clock.sleep(poll.interval).await;

                    if self.clock.now().duration_since(started) >= poll.timeout {
                        return Err(WaitError::TimedOut {
                            statuses: poll.targets_display(),
                            timeout: poll.timeout,
                        });
                    }
                }
            }
        }
    }
}

//! In-memory gateway for service tests

use async_trait::async_trait;
use spinnaker_client::{ClientError, ExecutionGateway, Result};
use spinnaker_core::domain::execution::Execution;
use spinnaker_core::domain::status::Status;
use spinnaker_core::dto::api::TriggerRequest;
use std::collections::VecDeque;
use std::sync::Mutex;

type Canned<T> = std::result::Result<T, (u16, String)>;

fn replay<T: Clone>(canned: &Canned<T>) -> Result<T> {
    canned
        .clone()
        .map_err(|(status, body)| ClientError::api_error(status, body))
}

/// Gateway answering from canned data and recording calls
pub struct FakeGateway {
    history: Canned<Vec<Execution>>,
    trigger: Canned<String>,
    /// Status sequence; the last entry repeats forever
    statuses: Mutex<VecDeque<Status>>,
    fetches: Mutex<Vec<String>>,
    triggers: Mutex<Vec<TriggerRequest>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            history: Ok(Vec::new()),
            trigger: Ok("ABC123".to_string()),
            statuses: Mutex::new(VecDeque::new()),
            fetches: Mutex::new(Vec::new()),
            triggers: Mutex::new(Vec::new()),
        }
    }
}

impl FakeGateway {
    pub fn with_history(executions: Vec<Execution>) -> Self {
        Self {
            history: Ok(executions),
            ..Default::default()
        }
    }

    pub fn failing_history(status: u16, body: &str) -> Self {
        Self {
            history: Err((status, body.to_string())),
            ..Default::default()
        }
    }

    /// Gateway whose trigger returns `execution_id`
    pub fn triggering(execution_id: &str) -> Self {
        Self {
            trigger: Ok(execution_id.to_string()),
            ..Default::default()
        }
    }

    pub fn rejecting_trigger(status: u16, body: &str) -> Self {
        Self {
            trigger: Err((status, body.to_string())),
            ..Default::default()
        }
    }

    /// Statuses reported by successive execution fetches
    pub fn with_statuses(self, statuses: &[&str]) -> Self {
        *self.statuses.lock().unwrap() = statuses.iter().map(|s| Status::from(*s)).collect();
        self
    }

    /// Execution ids fetched so far
    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    /// Trigger requests received so far
    pub fn triggers(&self) -> Vec<TriggerRequest> {
        self.triggers.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExecutionGateway for FakeGateway {
    async fn list_executions(&self) -> Result<Vec<Execution>> {
        replay(&self.history)
    }

    async fn get_execution(&self, execution_id: &str) -> Result<Execution> {
        self.fetches.lock().unwrap().push(execution_id.to_string());

        let mut statuses = self.statuses.lock().unwrap();
        let status = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        };

        match status {
            Some(status) => Ok(Execution {
                id: execution_id.to_string(),
                name: String::new(),
                build_time: 0,
                stages: Vec::new(),
                status,
            }),
            None => Err(ClientError::NotFound(format!(
                "pipeline execution ID not found (ID: {execution_id})"
            ))),
        }
    }

    async fn trigger_execution(&self, request: &TriggerRequest) -> Result<String> {
        self.triggers.lock().unwrap().push(request.clone());
        replay(&self.trigger)
    }
}

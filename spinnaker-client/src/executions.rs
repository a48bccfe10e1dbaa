//! Execution-related API endpoints

use crate::SpinnakerClient;
use crate::error::{ClientError, Result};
use reqwest::StatusCode;
use spinnaker_core::domain::execution::Execution;
use spinnaker_core::domain::status::Status;
use spinnaker_core::dto::api::{TriggerRequest, TriggerResponse};
use tracing::{debug, info};

/// Number of executions requested from the application history
pub const EXECUTION_HISTORY_LIMIT: usize = 25;

impl SpinnakerClient {
    // =============================================================================
    // Execution Queries
    // =============================================================================

    /// List the most recent executions of every pipeline in the application
    ///
    /// The history is not filtered by pipeline name.
    pub async fn list_executions(&self) -> Result<Vec<Execution>> {
        let url = format!("{}/applications/{}/pipelines", self.base_url, self.application);
        let response = self
            .client
            .get(&url)
            .query(&[("limit", EXECUTION_HISTORY_LIMIT)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a single execution
    pub async fn get_execution(&self, execution_id: &str) -> Result<Execution> {
        let body = self.get_execution_raw(execution_id).await?;

        serde_json::from_str(&body).map_err(|e| ClientError::DecodeError(e.to_string()))
    }

    /// Get a single execution as the JSON document returned by the API
    pub async fn get_execution_raw(&self, execution_id: &str) -> Result<String> {
        let url = format!("{}/pipelines/{}", self.base_url, execution_id);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!(
                "pipeline execution ID not found (ID: {execution_id})"
            )));
        }

        self.handle_text_response(response).await
    }

    // =============================================================================
    // Execution Lifecycle
    // =============================================================================

    /// Trigger a new execution of the configured pipeline
    ///
    /// # Returns
    /// The id of the new execution
    pub async fn trigger_execution(&self, request: &TriggerRequest) -> Result<String> {
        let url = format!(
            "{}/pipelines/{}/{}",
            self.base_url, self.application, self.pipeline
        );
        let response = self.client.post(&url).json(request).send().await?;

        let accepted: TriggerResponse = self.handle_response(response).await?;
        let execution_id = accepted.execution_id().ok_or_else(|| {
            ClientError::DecodeError(format!(
                "unexpected execution reference: {:?}",
                accepted.reference
            ))
        })?;

        info!("Triggered {} execution {}", self.pipeline, execution_id);

        Ok(execution_id.to_string())
    }

    /// Tell Spinnaker that the CI build waited on by a stage has started
    ///
    /// # Arguments
    /// * `stage_id` - Instance id of the waiting stage
    /// * `job` - CI job name
    /// * `build_number` - CI build name or number
    pub async fn notify_stage_start(
        &self,
        stage_id: &str,
        job: &str,
        build_number: &str,
    ) -> Result<()> {
        let url = format!("{}/concourse/stage/start", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("stageId", stage_id), ("job", job), ("buildNumber", build_number)])
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        debug!("Notified stage {} start for {}/{}", stage_id, job, build_number);

        self.handle_empty_response(response).await
    }
}

/// Executions that have a stage `stage_ref` currently in one of `statuses`
///
/// Order is preserved and each execution appears at most once.
pub fn executions_with_running_stage(
    executions: Vec<Execution>,
    stage_ref: &str,
    statuses: &[Status],
) -> Vec<Execution> {
    executions
        .into_iter()
        .filter(|execution| execution.has_stage_in(stage_ref, statuses))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockSpinnaker, source_for};
    use axum::http::StatusCode;
    use serde_json::json;

    async fn connect(mock: MockSpinnaker) -> (SpinnakerClient, crate::test_support::RunningMock) {
        let server = mock.start().await;
        let client = SpinnakerClient::connect(&source_for(&server.url))
            .await
            .unwrap();
        (client, server)
    }

    #[tokio::test]
    async fn test_list_executions() {
        let (client, server) = connect(MockSpinnaker::verified().executions(
            StatusCode::OK,
            json!([
                {"id": "EX1", "name": "foo", "buildTime": 1543244670, "status": "SUCCEEDED"},
                {"id": "EX4", "name": "other-pipeline", "buildTime": 1543244690}
            ]),
        ))
        .await;

        let executions = client.list_executions().await.unwrap();
        assert_eq!(executions.len(), 2);
        assert_eq!(executions[0].id, "EX1");
        assert_eq!(executions[0].status, Status::Succeeded);
        assert_eq!(executions[1].name, "other-pipeline");
        assert_eq!(
            server.requests().last().map(String::as_str),
            Some("GET /applications/bar/pipelines?limit=25")
        );
    }

    #[tokio::test]
    async fn test_list_executions_api_error() {
        let (client, _server) = connect(
            MockSpinnaker::verified().executions(StatusCode::BAD_GATEWAY, json!({"error": "x"})),
        )
        .await;

        let err = client.list_executions().await.unwrap_err();
        assert!(err.is_server_error());
    }

    #[tokio::test]
    async fn test_list_executions_malformed() {
        let (client, _server) = connect(
            MockSpinnaker::verified().executions(StatusCode::OK, json!({"not": "a list"})),
        )
        .await;

        let err = client.list_executions().await.unwrap_err();
        assert!(matches!(err, ClientError::DecodeError(_)));
    }

    #[tokio::test]
    async fn test_get_execution() {
        let (client, server) = connect(
            MockSpinnaker::verified()
                .execution(StatusCode::OK, json!({"id": "ABC123", "status": "RUNNING"})),
        )
        .await;

        let execution = client.get_execution("ABC123").await.unwrap();
        assert_eq!(execution.id, "ABC123");
        assert_eq!(execution.status, Status::Running);
        assert_eq!(
            server.requests().last().map(String::as_str),
            Some("GET /pipelines/ABC123")
        );
    }

    #[tokio::test]
    async fn test_get_execution_not_found() {
        let (client, _server) =
            connect(MockSpinnaker::verified().execution(StatusCode::NOT_FOUND, json!({}))).await;

        let err = client.get_execution("ABC123").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "pipeline execution ID not found (ID: ABC123)"
        );
    }

    #[tokio::test]
    async fn test_trigger_execution() {
        let (client, server) = connect(
            MockSpinnaker::verified()
                .trigger(StatusCode::ACCEPTED, json!({"ref": "/pipelines/ABC123"})),
        )
        .await;

        let id = client
            .trigger_execution(&TriggerRequest::default())
            .await
            .unwrap();
        assert_eq!(id, "ABC123");
        assert_eq!(
            server.requests().last().map(String::as_str),
            Some("POST /pipelines/bar/foo")
        );

        let body: serde_json::Value = serde_json::from_str(&server.bodies()[0]).unwrap();
        assert_eq!(body["type"], "concourse");
    }

    #[tokio::test]
    async fn test_trigger_execution_rejected() {
        let (client, _server) = connect(
            MockSpinnaker::verified()
                .trigger(StatusCode::UNPROCESSABLE_ENTITY, json!({"message": "500 "})),
        )
        .await;

        let err = client
            .trigger_execution(&TriggerRequest::default())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"spinnaker api responded with status code: 422, body: {"message":"500 "}"#
        );
    }

    #[tokio::test]
    async fn test_trigger_execution_unexpected_reference() {
        let (client, _server) = connect(
            MockSpinnaker::verified().trigger(StatusCode::ACCEPTED, json!({"ref": "ABC123"})),
        )
        .await;

        let err = client
            .trigger_execution(&TriggerRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::DecodeError(_)));
    }

    #[tokio::test]
    async fn test_notify_stage_start() {
        let (client, server) =
            connect(MockSpinnaker::verified().stage_start(StatusCode::OK)).await;

        client
            .notify_stage_start("stage-1", "deploy-job", "42")
            .await
            .unwrap();
        assert_eq!(
            server.requests().last().map(String::as_str),
            Some("POST /concourse/stage/start?stageId=stage-1&job=deploy-job&buildNumber=42")
        );
    }

    #[test]
    fn test_executions_with_running_stage() {
        let executions: Vec<Execution> = serde_json::from_value(json!([
            {"id": "EX1", "stages": [{"refId": "1", "status": "RUNNING"}, {"refId": "1", "status": "RUNNING"}]},
            {"id": "EX2", "stages": [{"refId": "1", "status": "SUCCEEDED"}]},
            {"id": "EX3", "stages": [{"refId": "2", "status": "RUNNING"}]},
            {"id": "EX4", "stages": [{"refId": "1", "status": "RUNNING"}]}
        ]))
        .unwrap();

        let matching = executions_with_running_stage(executions, "1", &[Status::Running]);
        let ids: Vec<&str> = matching.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["EX1", "EX4"]);
    }
}

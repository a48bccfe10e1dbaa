//! Application and pipeline configuration lookups

use crate::SpinnakerClient;
use crate::error::{ClientError, Result};
use reqwest::StatusCode;
use spinnaker_core::dto::api::PipelineConfig;
use tracing::debug;

impl SpinnakerClient {
    // =============================================================================
    // Verification
    // =============================================================================

    /// Check that the application exists and has a pipeline with the configured name
    pub(crate) async fn verify_application_and_pipeline(&self) -> Result<()> {
        let url = format!("{}/applications/{}", self.base_url, self.application);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!(
                "spinnaker application {} not found",
                self.application
            )));
        }
        self.handle_empty_response(response).await?;

        let configs = self.list_pipeline_configs().await?;
        if !configs.iter().any(|config| config.name == self.pipeline) {
            return Err(ClientError::NotFound(format!(
                "spinnaker pipeline {} not found",
                self.pipeline
            )));
        }

        debug!(
            "Verified application {} and pipeline {}",
            self.application, self.pipeline
        );

        Ok(())
    }

    /// List the pipeline configurations of the application
    pub async fn list_pipeline_configs(&self) -> Result<Vec<PipelineConfig>> {
        let url = format!(
            "{}/applications/{}/pipelineConfigs",
            self.base_url, self.application
        );
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}

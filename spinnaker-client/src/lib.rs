//! Spinnaker HTTP Client
//!
//! A small, typed client for the parts of the Spinnaker API (Gate) used by the
//! resource: application and pipeline lookup, execution history, single
//! executions, triggers and stage notifications.
//!
//! A client can only be obtained through [`SpinnakerClient::connect`] (or
//! [`SpinnakerClient::connect_with_client`]), which verifies that the configured
//! application and pipeline exist. A misconfigured source therefore fails before
//! any command logic runs.
//!
//! # Example
//!
//! ```no_run
//! use spinnaker_client::SpinnakerClient;
//! use spinnaker_core::domain::source::Source;
//!
//! # async fn example(source: Source) -> Result<(), spinnaker_client::ClientError> {
//! let client = SpinnakerClient::connect(&source).await?;
//! let executions = client.list_executions().await?;
//! println!("{} execution(s) in history", executions.len());
//! # Ok(())
//! # }
//! ```

mod applications;
pub mod error;
mod executions;
mod gateway;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use executions::{EXECUTION_HISTORY_LIMIT, executions_with_running_stage};
pub use gateway::ExecutionGateway;

use reqwest::{Client, Identity, Response};
use serde::de::DeserializeOwned;
use spinnaker_core::domain::source::Source;
use tracing::warn;

/// HTTP client for the Spinnaker API, bound to one application and pipeline
#[derive(Debug, Clone)]
pub struct SpinnakerClient {
    /// Base URL of the API (e.g., "https://gate.example.com")
    base_url: String,
    application: String,
    pipeline: String,
    /// HTTP client instance
    client: Client,
}

impl SpinnakerClient {
    /// Build the transport described by `source` and verify the application
    /// and pipeline exist
    ///
    /// The transport presents the source's client certificate when one is
    /// configured. Server certificates are verified unless
    /// `skip_tls_validation` is set.
    pub async fn connect(source: &Source) -> Result<Self> {
        let client = build_http_client(source)?;
        Self::connect_with_client(source, client).await
    }

    /// Verify the application and pipeline over a caller-supplied transport
    pub async fn connect_with_client(source: &Source, client: Client) -> Result<Self> {
        let spinnaker = Self {
            base_url: source.api_url().to_string(),
            application: source.spinnaker_application.clone(),
            pipeline: source.spinnaker_pipeline.clone(),
            client,
        };

        spinnaker.verify_application_and_pipeline().await?;

        Ok(spinnaker)
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn pipeline(&self) -> &str {
        &self.pipeline
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Turn any status >= 400 into an [`ClientError::ApiError`] carrying the body
    async fn error_for_status(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::api_error(status.as_u16(), body));
        }

        Ok(response)
    }

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let body = self.handle_text_response(response).await?;

        serde_json::from_str(&body).map_err(|e| ClientError::DecodeError(e.to_string()))
    }

    /// Handle an API response and return the raw body
    async fn handle_text_response(&self, response: Response) -> Result<String> {
        let response = self.error_for_status(response).await?;
        Ok(response.text().await?)
    }

    /// Handle an API response whose body is ignored
    async fn handle_empty_response(&self, response: Response) -> Result<()> {
        self.error_for_status(response).await?;
        Ok(())
    }
}

/// Build the reqwest client for a source
fn build_http_client(source: &Source) -> Result<Client> {
    let mut builder = Client::builder().use_rustls_tls();

    let identity = source
        .client_identity()
        .map_err(|e| ClientError::InvalidIdentity(e.to_string()))?;

    if let Some((cert, key)) = identity {
        let pem = format!("{}\n{}", cert.trim_end(), key.trim_end());
        let identity = Identity::from_pem(pem.as_bytes())
            .map_err(|e| ClientError::InvalidIdentity(e.to_string()))?;
        builder = builder.identity(identity);
    }

    if source.skip_tls_validation {
        warn!(
            "TLS certificate validation is disabled for {}",
            source.api_url()
        );
        builder = builder.danger_accept_invalid_certs(true);
    }

    Ok(builder.build()?)
}

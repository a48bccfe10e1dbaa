//! `check` command
//!
//! Reports the executions of the configured pipeline that are new relative to
//! the version the CI engine saw last.

use anyhow::Result;
use spinnaker_core::dto::check::{CheckRequest, CheckResponse};

use crate::commands::connect;
use crate::service::discover_versions;

/// Handle a check request
pub async fn run(request: CheckRequest) -> Result<CheckResponse> {
    let client = connect(&request.source).await?;

    discover_versions(&client, &request.source, request.previous_ref()).await
}

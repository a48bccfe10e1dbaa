//! `in` command
//!
//! Fetches the execution behind a version and writes it into the destination
//! directory:
//! - `metadata.json`: the execution document as returned by Spinnaker
//! - `version`: the execution id
//!
//! When a stage is configured, Spinnaker is told that the CI build waited on
//! by that stage has started.

use anyhow::{Context, Result};
use spinnaker_client::SpinnakerClient;
use spinnaker_core::domain::execution::Execution;
use spinnaker_core::domain::version::MetadataField;
use spinnaker_core::dto::get::{InRequest, InResponse};
use std::path::Path;
use tracing::{info, warn};

use crate::commands::connect;
use crate::config::BuildMetadata;

/// Handle an in request
pub async fn run(
    request: InRequest,
    destination: &Path,
    build: &BuildMetadata,
) -> Result<InResponse> {
    let client = connect(&request.source).await?;
    let execution_id = request.version.reference.as_str();

    let raw = client
        .get_execution_raw(execution_id)
        .await
        .with_context(|| format!("Failed to fetch execution {execution_id}"))?;
    let execution: Execution =
        serde_json::from_str(&raw).context("Failed to parse execution document")?;

    tokio::fs::create_dir_all(destination)
        .await
        .with_context(|| format!("Failed to create {}", destination.display()))?;
    tokio::fs::write(destination.join("metadata.json"), &raw)
        .await
        .context("Failed to write metadata.json")?;
    tokio::fs::write(destination.join("version"), execution_id)
        .await
        .context("Failed to write version")?;

    if let Some(stage_ref) = &request.source.spinnaker_stage {
        notify_stage(&client, &execution, stage_ref, build).await?;
    }

    Ok(InResponse {
        version: request.version.clone(),
        metadata: metadata(&execution),
    })
}

async fn notify_stage(
    client: &SpinnakerClient,
    execution: &Execution,
    stage_ref: &str,
    build: &BuildMetadata,
) -> Result<()> {
    let Some(stage) = execution.stage(stage_ref) else {
        warn!(
            "Execution {} has no stage {}, skipping notification",
            execution.id, stage_ref
        );
        return Ok(());
    };

    client
        .notify_stage_start(&stage.id, &build.job_name, &build.build_name)
        .await
        .with_context(|| format!("Failed to notify stage {stage_ref}"))?;

    info!("Notified stage {} of build {}", stage_ref, build.build_name);

    Ok(())
}

fn metadata(execution: &Execution) -> Vec<MetadataField> {
    let mut metadata = vec![
        MetadataField::new("pipeline", execution.name.clone()),
        MetadataField::new("status", execution.status.as_str()),
    ];
    if let Some(build_time) = execution.build_time_utc() {
        metadata.push(MetadataField::new("build_time", build_time.to_rfc3339()));
    }
    metadata
}

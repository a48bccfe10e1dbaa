//! Version discovery
//!
//! Decides which executions are new versions for `check`:
//! 1. keep executions of the configured pipeline only
//! 2. order them by build time, oldest first (stable on ties)
//! 3. report everything from the previously seen execution onwards, or only
//!    the latest execution when there is no previous version or it has left
//!    the history window

use anyhow::{Context, Result};
use spinnaker_client::{ExecutionGateway, executions_with_running_stage};
use spinnaker_core::domain::execution::Execution;
use spinnaker_core::domain::source::Source;
use spinnaker_core::domain::version::Version;
use tracing::{debug, info};

/// Executions of `pipeline`, ordered by build time
pub fn pipeline_history(executions: Vec<Execution>, pipeline: &str) -> Vec<Execution> {
    let mut history: Vec<Execution> = executions
        .into_iter()
        .filter(|execution| execution.name == pipeline)
        .collect();
    history.sort_by_key(|execution| execution.build_time);
    history
}

/// Versions to report given the application history and the previous version
pub fn resolve_versions(
    executions: Vec<Execution>,
    pipeline: &str,
    previous_ref: &str,
) -> Vec<Version> {
    let history = pipeline_history(executions, pipeline);

    let start = if previous_ref.is_empty() {
        None
    } else {
        history
            .iter()
            .position(|execution| execution.id == previous_ref)
    };

    match start {
        Some(index) => history[index..].iter().map(Version::from).collect(),
        None => {
            if !previous_ref.is_empty() {
                debug!(
                    "Version {} is no longer in the execution history, resyncing to latest",
                    previous_ref
                );
            }
            history.last().map(Version::from).into_iter().collect()
        }
    }
}

/// Lists the application's executions and resolves the new versions
///
/// When a stage is configured, only executions whose stage is in one of the
/// configured statuses are considered.
pub async fn discover_versions(
    gateway: &dyn ExecutionGateway,
    source: &Source,
    previous_ref: &str,
) -> Result<Vec<Version>> {
    let mut executions = gateway
        .list_executions()
        .await
        .context("Failed to list pipeline executions")?;

    if let Some(stage_ref) = &source.spinnaker_stage {
        executions =
            executions_with_running_stage(executions, stage_ref, &source.target_statuses());
    }

    let versions = resolve_versions(executions, &source.spinnaker_pipeline, previous_ref);

    info!(
        "Found {} version(s) of {}",
        versions.len(),
        source.spinnaker_pipeline
    );

    Ok(versions)
}

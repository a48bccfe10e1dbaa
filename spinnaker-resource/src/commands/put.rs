//! `out` command
//!
//! Triggers the configured pipeline and, when target statuses are configured,
//! waits for the new execution to reach one of them.

use anyhow::{Context, Result};
use spinnaker_core::domain::version::Version;
use spinnaker_core::dto::api::TriggerRequest;
use spinnaker_core::dto::put::{OutRequest, OutResponse};
use std::sync::Arc;

use crate::commands::connect;
use crate::config::PollSettings;
use crate::service::{Clock, TokioClock, TriggerService};

/// Handle an out request
pub async fn run(request: OutRequest) -> Result<OutResponse> {
    run_with_clock(request, Arc::new(TokioClock)).await
}

/// Handle an out request, sleeping between status checks with `clock`
pub async fn run_with_clock(request: OutRequest, clock: Arc<dyn Clock>) -> Result<OutResponse> {
    let OutRequest { source, params } = request;
    let client = connect(&source).await?;

    let poll = PollSettings::from_source(&source);
    let trigger = TriggerRequest::new(params.trigger_params, params.artifacts);
    let service = TriggerService::new(Arc::new(client), clock);

    let outcome = service
        .trigger_and_wait(&trigger, poll.as_ref())
        .await
        .with_context(|| format!("Failed to run pipeline {}", source.spinnaker_pipeline))?;

    Ok(OutResponse {
        version: Version::new(outcome.execution_id.clone()),
        metadata: outcome.metadata(),
    })
}

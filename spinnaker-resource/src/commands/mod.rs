//! Commands module
//!
//! One handler per resource entry point, plus the plumbing shared by the
//! binaries: connecting to Spinnaker, writing the JSON response and reporting
//! failures.

pub mod check;
pub mod get;
pub mod put;

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use spinnaker_client::SpinnakerClient;
use spinnaker_core::domain::source::Source;
use std::fmt;
use std::io::Write;
use std::process::ExitCode;

use crate::config::validate_source;

/// Step of a CI build an entry point runs as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `check`
    Check,
    /// `in`
    Get,
    /// `out`
    Put,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Check => "check",
            Step::Get => "get",
            Step::Put => "put",
        };
        f.write_str(name)
    }
}

/// Validate the source and open a verified client
pub async fn connect(source: &Source) -> Result<SpinnakerClient> {
    validate_source(source)?;

    SpinnakerClient::connect(source)
        .await
        .with_context(|| format!("Failed to connect to Spinnaker at {}", source.api_url()))
}

/// Write a response as JSON on stdout
pub fn emit<T: Serialize>(response: &T) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, response).context("Failed to write response")?;
    writeln!(stdout).context("Failed to write response")?;
    Ok(())
}

/// Render the message printed on stderr when a step fails
pub fn failure_message(step: Step, err: &anyhow::Error) -> String {
    format!("error {step} step failed: {err:#}")
}

/// Report the outcome of a step and turn it into the process exit code
pub fn finish(step: Step, result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", failure_message(step, &err).red());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_names() {
        assert_eq!(Step::Check.to_string(), "check");
        assert_eq!(Step::Get.to_string(), "get");
        assert_eq!(Step::Put.to_string(), "put");
    }

    #[test]
    fn test_failure_message_includes_cause_chain() {
        let err = anyhow::anyhow!("spinnaker api responded with status code: 422, body: {{}}")
            .context("Failed to trigger pipeline foo");

        assert_eq!(
            failure_message(Step::Put, &err),
            "error put step failed: Failed to trigger pipeline foo: \
             spinnaker api responded with status code: 422, body: {}"
        );
    }
}

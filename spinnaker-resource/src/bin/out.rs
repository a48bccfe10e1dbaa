//! `out` entry point
//!
//! Reads `{source, params}` on stdin, triggers the pipeline, optionally waits
//! for a target status and prints the resulting version.

use anyhow::Result;
use clap::Parser;
use spinnaker_core::dto::put::OutRequest;
use spinnaker_resource::commands::{self, Step};
use spinnaker_resource::{config, logging};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(name = "out")]
#[command(about = "Trigger a Spinnaker pipeline", long_about = None)]
struct Cli {
    /// Build sources directory
    sources: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    if let Some(sources) = &cli.sources {
        debug!("Build sources in {}", sources.display());
    }

    let result: Result<()> = async {
        let request: OutRequest = config::read_request(std::io::stdin().lock())?;
        let response = commands::put::run(request).await?;
        commands::emit(&response)
    }
    .await;

    commands::finish(Step::Put, result)
}

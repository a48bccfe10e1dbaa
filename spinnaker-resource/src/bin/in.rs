//! `in` entry point
//!
//! Reads `{source, version}` on stdin, materializes the execution into the
//! destination directory and prints the version with its metadata.

use anyhow::Result;
use clap::Parser;
use spinnaker_core::dto::get::InRequest;
use spinnaker_resource::commands::{self, Step};
use spinnaker_resource::config::{self, BuildMetadata};
use spinnaker_resource::logging;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "in")]
#[command(about = "Fetch a Spinnaker pipeline execution", long_about = None)]
struct Cli {
    /// Directory the execution is written to
    destination: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    let result: Result<()> = async {
        let request: InRequest = config::read_request(std::io::stdin().lock())?;
        let build = BuildMetadata::from_env();
        let response = commands::get::run(request, &cli.destination, &build).await?;
        commands::emit(&response)
    }
    .await;

    commands::finish(Step::Get, result)
}

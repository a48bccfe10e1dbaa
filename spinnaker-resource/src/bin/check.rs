//! `check` entry point
//!
//! Reads `{source, version}` on stdin and prints the new versions on stdout.

use anyhow::Result;
use clap::Parser;
use spinnaker_core::dto::check::CheckRequest;
use spinnaker_resource::commands::{self, Step};
use spinnaker_resource::{config, logging};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "check")]
#[command(about = "Discover new Spinnaker pipeline executions", long_about = None)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _cli = Cli::parse();
    logging::init();

    let result: Result<()> = async {
        let request: CheckRequest = config::read_request(std::io::stdin().lock())?;
        let versions = commands::check::run(request).await?;
        commands::emit(&versions)
    }
    .await;

    commands::finish(Step::Check, result)
}

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::error::CliError;
use crate::logging::LoggingConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(error) = logging::init_logging(&LoggingConfig::from_env()) {
        eprintln!("warning: logging disabled: {error}");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(?error, "command failed");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let result = commands::run(&cli).await?;
    output::render(&result, cli.format, cli.pretty)
}

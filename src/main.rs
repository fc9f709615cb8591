use std::process::ExitCode;

use catalog_admin::cli::{Cli, execute_command, load_and_merge_config};
use catalog_admin::logger::init_logger;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_and_merge_config(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logger(&settings.logger) {
        eprintln!("Logger initialization error: {e:#}");
        return ExitCode::FAILURE;
    }

    match execute_command(&cli, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

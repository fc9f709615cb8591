//! Command-line interface for catalog-admin
//!
//! This module provides:
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files)
//! - Command handlers for the serve and migrate operations

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use anyhow::Context;

use crate::config::Settings;

/// Loads configuration for `cli` and applies its overrides.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let merger = ConfigurationMerger::load(cli).context("Failed to load configuration")?;
    merger
        .merge_cli_args(cli)
        .context("Invalid configuration after applying command-line overrides")
}

//! Configuration-related CLI commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{ConfigSource, DEFAULT_CONFIG_YAML};
use crate::drafter::Drafter;

/// Configuration operations.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Shows the built-in release configuration.
    Show(ShowCommand),
    /// Checks a release configuration and reports the first invalid rule.
    Validate(ValidateCommand),
}

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {}

/// Validate command options.
#[derive(Parser)]
pub struct ValidateCommand {
    /// Configuration file to check. Defaults to the same discovery as `draft`.
    #[arg(value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Repository used for configuration discovery.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub repo: PathBuf,
}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            ConfigSubcommands::Show(show_cmd) => show_cmd.execute(),
            ConfigSubcommands::Validate(validate_cmd) => validate_cmd.execute(),
        }
    }
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<()> {
        print!("{DEFAULT_CONFIG_YAML}");
        Ok(())
    }
}

impl ValidateCommand {
    /// Executes the validate command.
    pub fn execute(self) -> Result<()> {
        println!("{}", self.run()?);
        Ok(())
    }

    /// Validates the configuration and returns a one-line summary.
    pub fn run(&self) -> Result<String> {
        let source = ConfigSource::discover(self.config.as_deref(), &self.repo)?;
        let origin = source.origin();

        let config = source
            .load()
            .with_context(|| format!("Invalid release configuration: {origin}"))?;
        Drafter::from_config(&config, &origin)
            .with_context(|| format!("Invalid release configuration: {origin}"))?;

        Ok(format!(
            "✅ {origin}: {} autolabeler rules, {} replacers, {} categories",
            config.autolabeler.len(),
            config.replacers.len(),
            config.categories.len()
        ))
    }
}

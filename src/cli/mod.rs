//! CLI interface for relnotes.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod config;
pub mod draft;
pub mod help;
pub mod label;
pub mod source;

pub use source::SourceArgs;

/// relnotes: drafts release notes from merged pull requests.
#[derive(Parser)]
#[command(name = "relnotes")]
#[command(about = "Drafts release notes from merged pull requests", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Renders release notes.
    Draft(draft::DraftCommand),
    /// Shows the labels the autolabeler applies.
    Label(label::LabelCommand),
    /// Release configuration operations.
    Config(config::ConfigCommand),
    /// Displays comprehensive help for all commands.
    #[command(name = "help-all")]
    HelpAll(help::HelpCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Draft(draft_cmd) => draft_cmd.execute(),
            Commands::Label(label_cmd) => label_cmd.execute(),
            Commands::Config(config_cmd) => config_cmd.execute(),
            Commands::HelpAll(help_cmd) => help_cmd.execute(),
        }
    }
}

//! Label command: shows what the autolabeler does to each pull request.

use anyhow::Result;
use clap::Parser;

use super::SourceArgs;

/// Label command options.
#[derive(Parser)]
pub struct LabelCommand {
    /// Configuration and pull request sources.
    #[command(flatten)]
    pub source: SourceArgs,
}

impl LabelCommand {
    /// Executes the label command, printing the result as YAML.
    pub fn execute(self) -> Result<()> {
        println!("{}", self.run()?);
        Ok(())
    }

    /// Labels the pull requests and renders the result as YAML.
    pub fn run(&self) -> Result<String> {
        let drafter = self.source.drafter()?;
        let prs = self.source.pull_requests()?;
        let labeled = drafter.label(&prs);

        tracing::debug!(count = labeled.len(), "Labeled pull requests");
        crate::data::to_yaml(&labeled)
    }
}

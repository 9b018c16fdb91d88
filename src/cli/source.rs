//! Arguments shared by commands that read pull requests.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::ConfigSource;
use crate::data::{PullRequest, PullRequestFile};
use crate::drafter::Drafter;
use crate::git::{GitRepository, DEFAULT_RANGE};

/// Configuration and pull request source options.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Release configuration file. Defaults to $RELNOTES_CONFIG, then
    /// .github/release-drafter.yml, then the built-in configuration.
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// YAML or JSON file listing pull requests.
    #[arg(long, short = 'i', value_name = "FILE", conflicts_with = "range")]
    pub input: Option<PathBuf>,

    /// Git revision range to read squash-merged pull requests from
    /// (e.g., v1.0.0..HEAD). Used when --input is not given.
    #[arg(long, short = 'r', value_name = "RANGE")]
    pub range: Option<String>,

    /// Repository used for --range and configuration discovery.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub repo: PathBuf,
}

impl SourceArgs {
    /// Resolves where the configuration comes from.
    pub fn config_source(&self) -> Result<ConfigSource> {
        ConfigSource::discover(self.config.as_deref(), &self.repo)
    }

    /// Loads and compiles the release configuration.
    pub fn drafter(&self) -> Result<Drafter> {
        let source = self.config_source()?;
        Drafter::load(&source)
            .with_context(|| format!("Invalid release configuration: {}", source.origin()))
    }

    /// Reads the pull requests from the input file or git history.
    pub fn pull_requests(&self) -> Result<Vec<PullRequest>> {
        if let Some(input) = &self.input {
            return Ok(PullRequestFile::load_from_file(input)?.pull_requests);
        }

        let range = self.range.as_deref().unwrap_or(DEFAULT_RANGE);
        let repo = GitRepository::open_at(&self.repo)?;
        repo.pull_requests_in_range(range)
            .with_context(|| format!("Failed to read pull requests from range {range}"))
    }
}

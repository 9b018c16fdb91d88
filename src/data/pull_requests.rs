//! Pull request input files.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::PullRequest;

/// Input file listing the pull requests of a release.
///
/// Both YAML and JSON are accepted since JSON is a subset of YAML.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PullRequestFile {
    /// Pull requests to draft notes from.
    pub pull_requests: Vec<PullRequest>,
}

impl PullRequestFile {
    /// Loads pull requests from a YAML or JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file: Self = crate::data::read_yaml_file(&path).with_context(|| {
            format!(
                "Failed to load pull request file: {}",
                path.as_ref().display()
            )
        })?;

        file.validate()?;

        Ok(file)
    }

    /// Validates every entry.
    pub fn validate(&self) -> Result<()> {
        // An empty list is a release with no changes
        for (i, pr) in self.pull_requests.iter().enumerate() {
            if pr.title.trim().is_empty() {
                anyhow::bail!("Pull request at index {i} has an empty title");
            }
            if pr.labels.iter().any(|l| l.trim().is_empty()) {
                anyhow::bail!("Pull request at index {i} has an empty label");
            }
        }

        Ok(())
    }
}

//! Git repository operations.

use std::path::Path;

use anyhow::{Context, Result};
use git2::{Oid, Repository};

use crate::data::PullRequest;

use super::commit::pull_request_from_commit;

/// Git repository wrapper.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Opens the repository at `path`.
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path.as_ref()).with_context(|| {
            format!("Failed to open git repository at {}", path.as_ref().display())
        })?;

        Ok(Self { repo })
    }

    /// Returns commit ids for a revision range, oldest first.
    ///
    /// `A..B` walks everything reachable from `B` but not from `A` (an empty
    /// `B` means `HEAD`); a single revision yields just that commit. Merge
    /// commits are skipped.
    pub fn commits_in_range(&self, range: &str) -> Result<Vec<Oid>> {
        let Some((start_spec, end_spec)) = range.split_once("..") else {
            let commit = self
                .repo
                .revparse_single(range)
                .with_context(|| format!("Failed to parse commit: {range}"))?
                .peel_to_commit()
                .context("Failed to peel object to commit")?;
            return Ok(vec![commit.id()]);
        };

        if end_spec.contains("..") {
            anyhow::bail!("Invalid range format: {range}");
        }
        let end_spec = if end_spec.is_empty() { "HEAD" } else { end_spec };

        let start = self
            .repo
            .revparse_single(start_spec)
            .with_context(|| format!("Failed to parse start commit: {start_spec}"))?
            .peel_to_commit()
            .context("Failed to peel start object to commit")?;
        let end = self
            .repo
            .revparse_single(end_spec)
            .with_context(|| format!("Failed to parse end commit: {end_spec}"))?
            .peel_to_commit()
            .context("Failed to peel end object to commit")?;

        let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
        walker.push(end.id()).context("Failed to push end commit")?;
        walker.hide(start.id()).context("Failed to hide start commit")?;

        let mut commits = Vec::new();
        for oid in walker {
            let oid = oid.context("Failed to get commit OID from walker")?;
            let commit = self.repo.find_commit(oid).context("Failed to find commit")?;
            if commit.parent_count() > 1 {
                continue;
            }
            commits.push(oid);
        }

        commits.reverse();
        Ok(commits)
    }

    /// Collects pull request records from the commits of a range.
    pub fn pull_requests_in_range(&self, range: &str) -> Result<Vec<PullRequest>> {
        let mut prs = Vec::new();

        for oid in self.commits_in_range(range)? {
            let commit = self
                .repo
                .find_commit(oid)
                .with_context(|| format!("Failed to find commit {oid}"))?;
            if let Some(pr) = pull_request_from_commit(&commit)? {
                prs.push(pr);
            }
        }

        tracing::debug!(range, count = prs.len(), "Collected pull requests from git");
        Ok(prs)
    }
}

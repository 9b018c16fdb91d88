//! Data processing and serialization.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub mod draft;
pub mod pull_requests;
pub mod yaml;

pub use draft::*;
pub use pull_requests::*;
pub use yaml::*;

/// A merged pull request, the unit every release note entry is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    /// Title as written by the author.
    pub title: String,
    /// Description body.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    /// Author login, or the commit author name for git sources.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    /// Web URL of the pull request.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    /// Labels already present on the pull request.
    #[serde(default)]
    pub labels: Vec<String>,
    /// When the pull request was merged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<FixedOffset>>,
    /// Target branch.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_ref: String,
    /// Source branch.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub head_ref: String,
}

impl PullRequest {
    /// Creates a pull request with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Sets the number.
    #[must_use]
    pub fn with_number(mut self, number: u64) -> Self {
        self.number = Some(number);
        self
    }

    /// Sets the author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Adds a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Sets the merge time.
    #[must_use]
    pub fn with_merged_at(mut self, merged_at: DateTime<FixedOffset>) -> Self {
        self.merged_at = Some(merged_at);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let pr = PullRequest::new("fix: crash")
            .with_number(7)
            .with_author("alice")
            .with_label("fix");
        assert_eq!(pr.number, Some(7));
        assert_eq!(pr.author, "alice");
        assert_eq!(pr.labels, vec!["fix"]);
    }

    #[test]
    fn deserializes_minimal_entry() {
        let pr: PullRequest = serde_yaml::from_str("title: 'docs: typo'").unwrap();
        assert_eq!(pr.title, "docs: typo");
        assert!(pr.labels.is_empty());
        assert!(pr.merged_at.is_none());
    }
}

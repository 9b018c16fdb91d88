//! Release draft result types.

use serde::{Deserialize, Serialize};

/// A rendered release draft together with the entries it was built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseDraft {
    /// Rendered release body.
    pub body: String,
    /// Entries that made it into the body, in rendered order.
    pub entries: Vec<DraftEntry>,
    /// Contributors listed in the body.
    pub contributors: Vec<String>,
    /// Number of pull requests left out by label filters.
    pub excluded: usize,
}

/// A single pull request after labeling and title rewriting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftEntry {
    /// Pull request number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    /// Original title.
    pub title: String,
    /// Title after replacers and escaping.
    pub display_title: String,
    /// Author login or name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    /// Final label set.
    pub labels: Vec<String>,
    /// Categories the entry was rendered under.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

/// Labeling result for a single pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledPullRequest {
    /// Pull request number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    /// Original title.
    pub title: String,
    /// Title after replacers.
    pub display_title: String,
    /// Labels present before autolabeling.
    pub existing_labels: Vec<String>,
    /// Labels added by the autolabeler.
    pub added_labels: Vec<String>,
    /// Whether exclude/include label filters drop this pull request.
    pub excluded: bool,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The rendered body only.
    #[default]
    Text,
    /// Full draft as JSON.
    Json,
    /// Full draft as YAML.
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            _ => Err(()),
        }
    }
}

//! Release configuration loading and validation.
//!
//! The configuration follows the release-drafter YAML format. It is parsed
//! into [`ReleaseConfig`] and then compiled into a [`crate::drafter::Drafter`],
//! which is where every pattern is checked.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::utils::Settings;

pub mod pattern;

pub use pattern::Pattern;

/// Default configuration shipped with the binary.
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../templates/release-drafter.yml");

/// Origin label used in errors for the embedded configuration.
pub const EMBEDDED_ORIGIN: &str = "<embedded>";

/// Conventional location of the configuration inside a repository.
pub const REPOSITORY_CONFIG_PATH: &str = ".github/release-drafter.yml";

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "RELNOTES_CONFIG";

/// Release-drafter style configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Release body template with `$CHANGES` and `$CONTRIBUTORS`.
    pub template: String,

    /// Template rendered for each change.
    #[serde(default = "default_change_template")]
    pub change_template: String,

    /// Characters escaped in titles.
    #[serde(default)]
    pub change_title_escapes: String,

    /// Rendered in place of `$CHANGES` when nothing is left.
    #[serde(default = "default_no_changes_template")]
    pub no_changes_template: String,

    /// Rendered in place of `$CONTRIBUTORS` when nobody is left.
    #[serde(default = "default_no_contributors_template")]
    pub no_contributors_template: String,

    /// Heading rendered for each category.
    #[serde(default = "default_category_template")]
    pub category_template: String,

    /// Entries with any of these labels are left out.
    #[serde(default)]
    pub exclude_labels: Vec<String>,

    /// When non-empty, only entries with one of these labels are kept.
    #[serde(default)]
    pub include_labels: Vec<String>,

    /// Authors never listed as contributors.
    #[serde(default)]
    pub exclude_contributors: Vec<String>,

    /// Ordered title rewrite rules.
    #[serde(default)]
    pub replacers: Vec<ReplacerConfig>,

    /// Label rules.
    #[serde(default)]
    pub autolabeler: Vec<AutolabelerConfig>,

    /// Changelog sections.
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,

    /// Sort key for entries.
    #[serde(default)]
    pub sort_by: SortBy,

    /// Sort direction for entries.
    #[serde(default)]
    pub sort_direction: SortDirection,
}

/// A search/replace rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReplacerConfig {
    /// Pattern to search for.
    pub search: String,
    /// Replacement text (JavaScript replacement syntax).
    #[serde(default)]
    pub replace: String,
}

/// A rule that applies `label` when any of its patterns match.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AutolabelerConfig {
    /// Label to apply.
    pub label: String,
    /// Patterns tested against the title.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub title: Vec<String>,
    /// Patterns tested against the body.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<String>,
    /// Patterns tested against the head branch name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branch: Vec<String>,
}

/// A changelog section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CategoryConfig {
    /// Section heading.
    pub title: String,
    /// Single label shorthand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Labels routed to this section.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Collapses the section when it holds more entries than this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapse_after: Option<usize>,
}

impl CategoryConfig {
    /// Returns `label` and `labels` combined.
    pub fn all_labels(&self) -> Vec<String> {
        self.label
            .iter()
            .chain(self.labels.iter())
            .cloned()
            .collect()
    }
}

/// Sort key for entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Merge time.
    #[default]
    MergedAt,
    /// Title, case-insensitive.
    Title,
}

/// Sort direction for entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Oldest or alphabetically first.
    Ascending,
    /// Newest or alphabetically last.
    #[default]
    Descending,
}

fn default_change_template() -> String {
    "* $TITLE (#$NUMBER) @$AUTHOR".to_string()
}

fn default_no_changes_template() -> String {
    "* No changes".to_string()
}

fn default_no_contributors_template() -> String {
    "No contributors".to_string()
}

fn default_category_template() -> String {
    "## $TITLE".to_string()
}

/// Where a configuration was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// The configuration embedded in the binary.
    Embedded,
    /// A file on disk.
    File(PathBuf),
}

impl ConfigSource {
    /// Returns the label used in error messages.
    pub fn origin(&self) -> String {
        match self {
            Self::Embedded => EMBEDDED_ORIGIN.to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    /// Resolves the configuration to use.
    ///
    /// An explicit path wins, then `RELNOTES_CONFIG` (environment or
    /// settings file), then the repository configuration under `root`, then
    /// the embedded default. An unreadable settings file is an error.
    pub fn discover(explicit: Option<&Path>, root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(Self::File(path.to_path_buf()));
        }

        let settings = Settings::load().context("Failed to load relnotes settings")?;
        Ok(Self::discover_with(&settings, root))
    }

    /// Resolves the configuration without an explicit path, using
    /// `settings` for the `RELNOTES_CONFIG` fallback.
    pub fn discover_with(settings: &Settings, root: &Path) -> Self {
        if let Some(path) = settings.get_env_var(CONFIG_ENV_VAR) {
            tracing::debug!("Using configuration from {CONFIG_ENV_VAR}: {path}");
            return Self::File(PathBuf::from(path));
        }

        let repo_config = root.join(REPOSITORY_CONFIG_PATH);
        if repo_config.is_file() {
            tracing::debug!("Using repository configuration {}", repo_config.display());
            return Self::File(repo_config);
        }

        Self::Embedded
    }

    /// Loads the configuration from this source.
    pub fn load(&self) -> Result<ReleaseConfig, ConfigError> {
        match self {
            Self::Embedded => ReleaseConfig::from_yaml_str(DEFAULT_CONFIG_YAML, EMBEDDED_ORIGIN),
            Self::File(path) => ReleaseConfig::load_from_file(path),
        }
    }
}

impl ReleaseConfig {
    /// Parses a configuration from YAML text; `origin` labels errors.
    pub fn from_yaml_str(yaml: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;

        if config.template.trim().is_empty() {
            return Err(ConfigError::EmptyTemplate {
                origin: origin.to_string(),
            });
        }

        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml_str(&content, &path.display().to_string())
    }

    /// Returns the configuration embedded in the binary.
    pub fn default_embedded() -> Result<Self, ConfigError> {
        Self::from_yaml_str(DEFAULT_CONFIG_YAML, EMBEDDED_ORIGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn embedded_config_parses() {
        let config = ReleaseConfig::default_embedded().unwrap();
        assert_eq!(config.exclude_labels, vec!["skip changelog", "release"]);
        assert_eq!(config.change_template, "- $TITLE (#$NUMBER)");
        assert_eq!(config.replacers.len(), 1);
        assert!(config.autolabeler.iter().any(|r| r.label == "breaking"));
        assert!(config.template.contains("$CHANGES"));
        assert!(config.template.contains("$CONTRIBUTORS"));
    }

    #[test]
    fn defaults_apply_to_minimal_config() {
        let config = ReleaseConfig::from_yaml_str("template: $CHANGES\n", "test").unwrap();
        assert_eq!(config.change_template, "* $TITLE (#$NUMBER) @$AUTHOR");
        assert_eq!(config.no_changes_template, "* No changes");
        assert_eq!(config.no_contributors_template, "No contributors");
        assert_eq!(config.category_template, "## $TITLE");
        assert_eq!(config.sort_by, SortBy::MergedAt);
        assert_eq!(config.sort_direction, SortDirection::Descending);
        assert!(config.exclude_labels.is_empty());
    }

    #[test]
    fn malformed_yaml_names_origin() {
        let err = ReleaseConfig::from_yaml_str("template: [unclosed", "cfg.yml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("cfg.yml"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ReleaseConfig::from_yaml_str("template: x\nexclude-label: [a]\n", "cfg.yml")
            .unwrap_err();
        assert!(err.to_string().contains("exclude-label"));
    }

    #[test]
    fn empty_template_is_rejected() {
        let err = ReleaseConfig::from_yaml_str("template: '  '\n", "cfg.yml").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyTemplate { .. }));
    }

    #[test]
    fn sort_options_parse() {
        let yaml = "template: x\nsort-by: title\nsort-direction: ascending\n";
        let config = ReleaseConfig::from_yaml_str(yaml, "test").unwrap();
        assert_eq!(config.sort_by, SortBy::Title);
        assert_eq!(config.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn category_labels_combine() {
        let yaml = "template: x\ncategories:\n  - title: Fixes\n    label: fix\n    labels: [bug]\n    collapse-after: 3\n";
        let config = ReleaseConfig::from_yaml_str(yaml, "test").unwrap();
        let category = &config.categories[0];
        assert_eq!(category.all_labels(), vec!["fix", "bug"]);
        assert_eq!(category.collapse_after, Some(3));
    }

    #[test]
    fn load_from_missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.yml");
        let err = ReleaseConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("missing.yml"));
    }

    #[test]
    fn discover_prefers_explicit_path() {
        let dir = tempdir().unwrap();
        let explicit = dir.path().join("custom.yml");
        let source = ConfigSource::discover(Some(&explicit), dir.path()).unwrap();
        assert_eq!(source, ConfigSource::File(explicit));
    }

    #[test]
    fn discover_reads_config_variable_from_settings() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            env: HashMap::from([(CONFIG_ENV_VAR.to_string(), "/etc/drafter.yml".to_string())]),
        };

        assert_eq!(
            ConfigSource::discover_with(&settings, dir.path()),
            ConfigSource::File(PathBuf::from("/etc/drafter.yml"))
        );
    }

    #[test]
    fn discover_finds_repository_config() {
        let dir = tempdir().unwrap();
        let github = dir.path().join(".github");
        fs::create_dir_all(&github).unwrap();
        fs::write(github.join("release-drafter.yml"), "template: '$CHANGES'\n").unwrap();

        let source = ConfigSource::discover_with(&Settings::default(), dir.path());
        assert_eq!(source, ConfigSource::File(dir.path().join(REPOSITORY_CONFIG_PATH)));
        assert_eq!(source.load().unwrap().template, "$CHANGES");
    }

    #[test]
    fn discover_falls_back_to_embedded() {
        let dir = tempdir().unwrap();
        assert_eq!(
            ConfigSource::discover_with(&Settings::default(), dir.path()),
            ConfigSource::Embedded
        );
    }

    #[test]
    fn file_source_loads_and_labels_origin() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drafter.yml");
        fs::write(&path, "template: '$CHANGES'\n").unwrap();

        let source = ConfigSource::File(path.clone());
        assert_eq!(source.origin(), path.display().to_string());
        assert_eq!(source.load().unwrap().template, "$CHANGES");
        assert_eq!(ConfigSource::Embedded.origin(), EMBEDDED_ORIGIN);
    }
}

//! Configuration error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while parsing a single pattern string.
#[derive(Error, Debug)]
pub enum PatternError {
    /// The regular expression failed to compile.
    #[error("invalid regular expression '{pattern}': {source}")]
    InvalidRegex {
        /// Pattern text as written in the configuration.
        pattern: String,
        /// Underlying compile error.
        #[source]
        source: regex::Error,
    },

    /// A `/body/flags` pattern used a flag with no regex equivalent.
    #[error("unsupported regex flag '{flag}' in pattern '{pattern}'")]
    UnsupportedFlag {
        /// Pattern text as written in the configuration.
        pattern: String,
        /// The offending flag character.
        flag: char,
    },
}

/// Errors raised while loading or validating a release configuration.
///
/// Every variant names the configuration origin (a file path or
/// `<embedded>`) so a failing rule can be located without guesswork.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {}", .path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid YAML or does not match the schema.
    #[error("failed to parse configuration {origin}: {source}")]
    Parse {
        /// Configuration origin.
        origin: String,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A pattern inside a rule failed to compile.
    #[error("{origin}: rule {rule}: {source}")]
    Pattern {
        /// Configuration origin.
        origin: String,
        /// Path of the offending rule, e.g. `autolabeler[2].title[0]`.
        rule: String,
        /// Underlying pattern error.
        #[source]
        source: PatternError,
    },

    /// A rule is structurally invalid.
    #[error("{origin}: rule {rule}: {reason}")]
    InvalidRule {
        /// Configuration origin.
        origin: String,
        /// Path of the offending rule.
        rule: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The release template is missing or empty.
    #[error("{origin}: 'template' must not be empty")]
    EmptyTemplate {
        /// Configuration origin.
        origin: String,
    },
}

impl ConfigError {
    /// Builds an [`ConfigError::InvalidRule`] from borrowed parts.
    pub(crate) fn invalid_rule(origin: &str, rule: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRule {
            origin: origin.to_string(),
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}

//! Autolabeler: applies labels to pull requests whose title, body or branch
//! matches a rule.

use crate::config::{AutolabelerConfig, Pattern};
use crate::data::PullRequest;
use crate::error::ConfigError;

use super::compile_patterns;

/// A compiled autolabeler rule.
#[derive(Debug, Clone)]
pub struct LabelRule {
    label: String,
    title: Vec<Pattern>,
    body: Vec<Pattern>,
    branch: Vec<Pattern>,
}

impl LabelRule {
    /// Compiles the rule at `autolabeler[index]`.
    pub fn compile(
        config: &AutolabelerConfig,
        index: usize,
        origin: &str,
    ) -> Result<Self, ConfigError> {
        let rule = format!("autolabeler[{index}]");

        if config.label.trim().is_empty() {
            return Err(ConfigError::invalid_rule(origin, &rule, "label must not be empty"));
        }
        if config.title.is_empty() && config.body.is_empty() && config.branch.is_empty() {
            return Err(ConfigError::invalid_rule(
                origin,
                &rule,
                format!(
                    "label '{}' needs at least one title, body or branch pattern",
                    config.label
                ),
            ));
        }

        Ok(Self {
            label: config.label.clone(),
            title: compile_patterns(&config.title, &format!("{rule}.title"), origin)?,
            body: compile_patterns(&config.body, &format!("{rule}.body"), origin)?,
            branch: compile_patterns(&config.branch, &format!("{rule}.branch"), origin)?,
        })
    }

    /// Label applied by this rule.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether any pattern of this rule matches the pull request.
    pub fn matches(&self, pr: &PullRequest) -> bool {
        self.title.iter().any(|p| p.is_match(&pr.title))
            || (!pr.body.is_empty() && self.body.iter().any(|p| p.is_match(&pr.body)))
            || (!pr.head_ref.is_empty() && self.branch.iter().any(|p| p.is_match(&pr.head_ref)))
    }
}

/// Ordered set of autolabeler rules. Rules are evaluated independently.
#[derive(Debug, Clone, Default)]
pub struct Labeler {
    rules: Vec<LabelRule>,
}

impl Labeler {
    /// Compiles every rule, failing on the first invalid one.
    pub fn compile(configs: &[AutolabelerConfig], origin: &str) -> Result<Self, ConfigError> {
        let rules = configs
            .iter()
            .enumerate()
            .map(|(i, config)| LabelRule::compile(config, i, origin))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// Compiled rules in configuration order.
    pub fn rules(&self) -> &[LabelRule] {
        &self.rules
    }

    /// Labels of every matching rule, deduplicated, in rule order.
    pub fn matching_labels(&self, pr: &PullRequest) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for rule in self.rules.iter().filter(|r| r.matches(pr)) {
            if !labels.iter().any(|l| l == rule.label()) {
                labels.push(rule.label().to_string());
            }
        }
        labels
    }

    /// Final label set: existing labels first, then newly matched ones.
    pub fn apply(&self, pr: &PullRequest) -> Vec<String> {
        let mut labels: Vec<String> = Vec::with_capacity(pr.labels.len());
        for label in pr.labels.iter().chain(self.matching_labels(pr).iter()) {
            if !labels.contains(label) {
                labels.push(label.clone());
            }
        }

        tracing::debug!(title = %pr.title, ?labels, "Labeled pull request");
        labels
    }
}

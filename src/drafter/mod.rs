//! Release note drafting.
//!
//! A [`Drafter`] is a compiled [`ReleaseConfig`]: every pattern has been
//! checked, so drafting itself cannot fail. Drafting runs three passes over
//! the pull requests:
//!
//! 1. the [`Labeler`] adds labels from the autolabeler rules,
//! 2. the [`TitleRewriter`] applies the replacers to each title,
//! 3. the [`Composer`] groups the surviving entries and renders the body.

use std::cmp::Ordering;

use crate::config::{ConfigSource, Pattern, ReleaseConfig, SortBy, SortDirection};
use crate::data::{LabeledPullRequest, PullRequest, ReleaseDraft};
use crate::error::ConfigError;

pub mod composer;
pub mod labeler;
pub mod rewriter;
pub mod template;

pub use composer::{Category, ChangeEntry, Composer};
pub use labeler::{LabelRule, Labeler};
pub use rewriter::{escape_title, Replacer, TitleRewriter};

/// Compiles a list of patterns, naming each as `rule[i]` in errors.
pub(crate) fn compile_patterns(
    patterns: &[String],
    rule: &str,
    origin: &str,
) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .enumerate()
        .map(|(i, text)| {
            Pattern::parse(text).map_err(|source| ConfigError::Pattern {
                origin: origin.to_string(),
                rule: format!("{rule}[{i}]"),
                source,
            })
        })
        .collect()
}

/// A validated, ready to run release configuration.
#[derive(Debug, Clone)]
pub struct Drafter {
    labeler: Labeler,
    rewriter: TitleRewriter,
    composer: Composer,
    exclude_labels: Vec<String>,
    include_labels: Vec<String>,
    change_title_escapes: String,
    sort_by: SortBy,
    sort_direction: SortDirection,
}

impl Drafter {
    /// Compiles a configuration, rejecting it on the first invalid rule.
    pub fn from_config(config: &ReleaseConfig, origin: &str) -> Result<Self, ConfigError> {
        let drafter = Self {
            labeler: Labeler::compile(&config.autolabeler, origin)?,
            rewriter: TitleRewriter::compile(&config.replacers, origin)?,
            composer: Composer::compile(config, origin)?,
            exclude_labels: config.exclude_labels.clone(),
            include_labels: config.include_labels.clone(),
            change_title_escapes: config.change_title_escapes.clone(),
            sort_by: config.sort_by,
            sort_direction: config.sort_direction,
        };

        tracing::debug!(
            origin,
            rules = drafter.labeler.rules().len(),
            replacers = config.replacers.len(),
            categories = config.categories.len(),
            "Compiled release configuration"
        );

        Ok(drafter)
    }

    /// Loads and compiles the configuration from `source`.
    pub fn load(source: &ConfigSource) -> Result<Self, ConfigError> {
        let config = source.load()?;
        Self::from_config(&config, &source.origin())
    }

    /// Compiles the embedded default configuration.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::load(&ConfigSource::Embedded)
    }

    /// The autolabeler pass.
    pub fn labeler(&self) -> &Labeler {
        &self.labeler
    }

    /// The title rewriting pass.
    pub fn rewriter(&self) -> &TitleRewriter {
        &self.rewriter
    }

    /// The composition pass.
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Whether label filters drop an entry with these labels.
    pub fn is_excluded(&self, labels: &[String]) -> bool {
        if labels.iter().any(|l| self.exclude_labels.contains(l)) {
            return true;
        }
        !self.include_labels.is_empty() && !labels.iter().any(|l| self.include_labels.contains(l))
    }

    /// Rewrites and escapes a title for display.
    pub fn display_title(&self, title: &str) -> String {
        escape_title(&self.rewriter.rewrite(title), &self.change_title_escapes)
    }

    /// Labels every pull request without composing a release.
    pub fn label(&self, prs: &[PullRequest]) -> Vec<LabeledPullRequest> {
        prs.iter()
            .map(|pr| {
                let labels = self.labeler.apply(pr);
                let added_labels = labels
                    .iter()
                    .filter(|l| !pr.labels.contains(*l))
                    .cloned()
                    .collect();
                LabeledPullRequest {
                    number: pr.number,
                    title: pr.title.clone(),
                    display_title: self.rewriter.rewrite(&pr.title),
                    existing_labels: pr.labels.clone(),
                    added_labels,
                    excluded: self.is_excluded(&labels),
                }
            })
            .collect()
    }

    /// Drafts release notes from merged pull requests.
    pub fn draft(&self, prs: &[PullRequest]) -> ReleaseDraft {
        let mut excluded = 0;
        let mut entries = Vec::with_capacity(prs.len());

        for pr in prs {
            let labels = self.labeler.apply(pr);
            if self.is_excluded(&labels) {
                tracing::debug!(title = %pr.title, ?labels, "Excluded pull request");
                excluded += 1;
                continue;
            }
            entries.push(ChangeEntry {
                pr,
                labels,
                display_title: self.display_title(&pr.title),
            });
        }

        self.sort(&mut entries);

        tracing::info!(
            included = entries.len(),
            excluded,
            "Drafting release notes"
        );

        self.composer.compose(&entries, excluded)
    }

    fn sort(&self, entries: &mut [ChangeEntry<'_>]) {
        match self.sort_direction {
            SortDirection::Ascending => entries.sort_by(|a, b| self.compare(a, b)),
            SortDirection::Descending => entries.sort_by(|a, b| self.compare(b, a)),
        }
    }

    /// Ascending order; entries without a merge time sort as oldest.
    fn compare(&self, a: &ChangeEntry<'_>, b: &ChangeEntry<'_>) -> Ordering {
        match self.sort_by {
            SortBy::MergedAt => a.pr.merged_at.cmp(&b.pr.merged_at),
            SortBy::Title => a
                .pr
                .title
                .to_lowercase()
                .cmp(&b.pr.title.to_lowercase()),
        }
    }
}

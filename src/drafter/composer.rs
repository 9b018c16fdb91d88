//! Changelog composition: grouping entries into categories and rendering the
//! release body.

use std::collections::BTreeSet;

use crate::config::{CategoryConfig, ReleaseConfig};
use crate::data::{DraftEntry, PullRequest, ReleaseDraft};
use crate::error::ConfigError;

use super::template::render;

/// A pull request that survived label filtering, ready to render.
#[derive(Debug, Clone)]
pub struct ChangeEntry<'a> {
    /// Source pull request.
    pub pr: &'a PullRequest,
    /// Final label set.
    pub labels: Vec<String>,
    /// Rewritten and escaped title.
    pub display_title: String,
}

/// A validated changelog section.
#[derive(Debug, Clone)]
pub struct Category {
    title: String,
    labels: Vec<String>,
    collapse_after: Option<usize>,
}

impl Category {
    /// Validates the category at `categories[index]`.
    pub fn compile(config: &CategoryConfig, index: usize, origin: &str) -> Result<Self, ConfigError> {
        if config.title.trim().is_empty() {
            return Err(ConfigError::invalid_rule(
                origin,
                &format!("categories[{index}]"),
                "title must not be empty",
            ));
        }

        Ok(Self {
            title: config.title.clone(),
            labels: config.all_labels(),
            collapse_after: config.collapse_after,
        })
    }

    /// Section heading.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// A category without labels collects otherwise uncategorized entries.
    pub fn is_catch_all(&self) -> bool {
        self.labels.is_empty()
    }

    fn accepts(&self, labels: &[String]) -> bool {
        self.labels.iter().any(|l| labels.contains(l))
    }
}

/// Renders change lines, category sections and the final release body.
#[derive(Debug, Clone)]
pub struct Composer {
    template: String,
    change_template: String,
    category_template: String,
    no_changes_template: String,
    no_contributors_template: String,
    exclude_contributors: Vec<String>,
    categories: Vec<Category>,
}

impl Composer {
    /// Builds a composer from the configuration's templates and categories.
    pub fn compile(config: &ReleaseConfig, origin: &str) -> Result<Self, ConfigError> {
        let categories = config
            .categories
            .iter()
            .enumerate()
            .map(|(i, c)| Category::compile(c, i, origin))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(extra) = categories
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_catch_all())
            .nth(1)
            .map(|(i, _)| i)
        {
            return Err(ConfigError::invalid_rule(
                origin,
                &format!("categories[{extra}]"),
                "only one category may omit labels",
            ));
        }

        Ok(Self {
            template: config.template.clone(),
            change_template: config.change_template.clone(),
            category_template: config.category_template.clone(),
            no_changes_template: config.no_changes_template.clone(),
            no_contributors_template: config.no_contributors_template.clone(),
            exclude_contributors: config.exclude_contributors.clone(),
            categories,
        })
    }

    /// Renders a single change line.
    pub fn render_change(&self, entry: &ChangeEntry<'_>) -> String {
        let number = entry.pr.number.map(|n| n.to_string()).unwrap_or_default();
        render(
            &self.change_template,
            &[
                ("TITLE", entry.display_title.as_str()),
                ("NUMBER", number.as_str()),
                ("AUTHOR", entry.pr.author.as_str()),
                ("BODY", entry.pr.body.as_str()),
                ("URL", entry.pr.url.as_str()),
                ("BASE_REF_NAME", entry.pr.base_ref.as_str()),
                ("HEAD_REF_NAME", entry.pr.head_ref.as_str()),
            ],
        )
    }

    /// Renders the release template with already rendered values.
    pub fn render_release(&self, changes: &str, contributors: &str) -> String {
        render(
            &self.template,
            &[("CHANGES", changes), ("CONTRIBUTORS", contributors)],
        )
    }

    /// Indices of the categories an entry belongs to.
    fn categories_for(&self, labels: &[String]) -> Vec<usize> {
        let matched: Vec<usize> = self
            .categories
            .iter()
            .enumerate()
            .filter(|(_, c)| c.accepts(labels))
            .map(|(i, _)| i)
            .collect();

        if !matched.is_empty() {
            return matched;
        }

        self.categories
            .iter()
            .position(Category::is_catch_all)
            .into_iter()
            .collect()
    }

    /// Renders the `$CHANGES` block.
    ///
    /// Uncategorized lines come first, then each non-empty category in
    /// configuration order.
    pub fn render_changes(&self, entries: &[ChangeEntry<'_>]) -> String {
        if entries.is_empty() {
            return self.no_changes_template.clone();
        }

        let mut uncategorized = Vec::new();
        let mut sections: Vec<Vec<String>> = vec![Vec::new(); self.categories.len()];

        for entry in entries {
            let line = self.render_change(entry);
            let targets = self.categories_for(&entry.labels);
            if targets.is_empty() {
                uncategorized.push(line);
            } else {
                for i in targets {
                    sections[i].push(line.clone());
                }
            }
        }

        let mut changelog = String::new();
        if !uncategorized.is_empty() {
            changelog.push_str(&uncategorized.join("\n"));
            changelog.push_str("\n\n");
        }

        for (category, lines) in self.categories.iter().zip(&sections) {
            if lines.is_empty() {
                continue;
            }
            changelog.push_str(&render(
                &self.category_template,
                &[("TITLE", category.title.as_str())],
            ));
            changelog.push_str("\n\n");

            let body = lines.join("\n");
            match category.collapse_after {
                Some(limit) if lines.len() > limit => {
                    changelog.push_str(&format!(
                        "<details>\n<summary>{} changes</summary>\n\n{body}\n</details>",
                        lines.len()
                    ));
                }
                _ => changelog.push_str(&body),
            }
            changelog.push_str("\n\n");
        }

        changelog.trim().to_string()
    }

    /// Distinct contributors of the given entries, sorted case-insensitively.
    pub fn contributors(&self, entries: &[ChangeEntry<'_>]) -> Vec<String> {
        let distinct: BTreeSet<&str> = entries
            .iter()
            .map(|e| e.pr.author.trim())
            .filter(|a| !a.is_empty())
            .filter(|a| !self.exclude_contributors.iter().any(|x| x.as_str() == *a))
            .collect();

        let mut authors: Vec<String> = distinct.into_iter().map(str::to_string).collect();
        authors.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
        authors
    }

    /// Renders the `$CONTRIBUTORS` value.
    pub fn render_contributors(&self, contributors: &[String]) -> String {
        let names: Vec<String> = contributors
            .iter()
            .map(|c| display_contributor(c))
            .collect();
        match names.as_slice() {
            [] => self.no_contributors_template.clone(),
            [only] => only.clone(),
            [init @ .., last] => format!("{} and {last}", init.join(", ")),
        }
    }

    /// Composes the full release draft.
    pub fn compose(&self, entries: &[ChangeEntry<'_>], excluded: usize) -> ReleaseDraft {
        let changes = self.render_changes(entries);
        let contributors = self.contributors(entries);
        let body = self.render_release(&changes, &self.render_contributors(&contributors));

        let entries = entries
            .iter()
            .map(|e| DraftEntry {
                number: e.pr.number,
                title: e.pr.title.clone(),
                display_title: e.display_title.clone(),
                author: e.pr.author.clone(),
                labels: e.labels.clone(),
                categories: self
                    .categories_for(&e.labels)
                    .into_iter()
                    .map(|i| self.categories[i].title.clone())
                    .collect(),
            })
            .collect();

        ReleaseDraft {
            body,
            entries,
            contributors,
            excluded,
        }
    }
}

/// Logins are rendered as mentions; names with spaces come from git authors.
fn display_contributor(author: &str) -> String {
    if author.contains(char::is_whitespace) {
        author.to_string()
    } else {
        format!("@{author}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer(yaml: &str) -> Composer {
        let config = ReleaseConfig::from_yaml_str(yaml, "test").unwrap();
        Composer::compile(&config, "test").unwrap()
    }

    fn entry<'a>(pr: &'a PullRequest, title: &str) -> ChangeEntry<'a> {
        ChangeEntry {
            pr,
            labels: pr.labels.clone(),
            display_title: title.to_string(),
        }
    }

    #[test]
    fn no_entries_renders_no_changes_template() {
        let c = composer("template: $CHANGES\n");
        assert_eq!(c.render_changes(&[]), "* No changes");
    }

    #[test]
    fn change_line_substitutes_fields() {
        let c = composer("template: $CHANGES\n");
        let pr = PullRequest::new("fix: x").with_number(3).with_author("bob");
        assert_eq!(c.render_change(&entry(&pr, "x")), "* x (#3) @bob");
    }

    #[test]
    fn categories_group_entries() {
        let c = composer(
            "template: $CHANGES\nchange-template: '- $TITLE'\ncategories:\n  - title: Features\n    label: enhancement\n  - title: Fixes\n    labels: [fix, bug]\n",
        );
        let feat = PullRequest::new("feat").with_label("enhancement");
        let fix = PullRequest::new("fix").with_label("bug");
        let other = PullRequest::new("other");
        let entries = vec![entry(&feat, "a"), entry(&fix, "b"), entry(&other, "c")];

        assert_eq!(
            c.render_changes(&entries),
            "- c\n\n## Features\n\n- a\n\n## Fixes\n\n- b"
        );
    }

    #[test]
    fn entry_can_appear_in_several_categories() {
        let c = composer(
            "template: $CHANGES\nchange-template: '- $TITLE'\ncategories:\n  - title: Rust\n    label: rust\n  - title: Breaking\n    label: breaking\n",
        );
        let pr = PullRequest::new("x").with_label("rust").with_label("breaking");
        let draft = c.compose(&[entry(&pr, "x")], 0);
        assert_eq!(draft.entries[0].categories, vec!["Rust", "Breaking"]);
        assert!(draft.body.contains("## Rust\n\n- x\n\n## Breaking\n\n- x"));
    }

    #[test]
    fn catch_all_category_collects_unmatched() {
        let c = composer(
            "template: $CHANGES\nchange-template: '- $TITLE'\ncategories:\n  - title: Fixes\n    label: fix\n  - title: Other\n",
        );
        let pr = PullRequest::new("x");
        assert_eq!(c.render_changes(&[entry(&pr, "x")]), "## Other\n\n- x");
    }

    #[test]
    fn second_catch_all_is_rejected() {
        let config = ReleaseConfig::from_yaml_str(
            "template: x\ncategories:\n  - title: A\n  - title: B\n",
            "cfg.yml",
        )
        .unwrap();
        let err = Composer::compile(&config, "cfg.yml").unwrap_err();
        assert!(err.to_string().contains("categories[1]"));
    }

    #[test]
    fn large_category_collapses() {
        let c = composer(
            "template: $CHANGES\nchange-template: '- $TITLE'\ncategories:\n  - title: Fixes\n    label: fix\n    collapse-after: 1\n",
        );
        let a = PullRequest::new("a").with_label("fix");
        let b = PullRequest::new("b").with_label("fix");
        assert_eq!(
            c.render_changes(&[entry(&a, "a"), entry(&b, "b")]),
            "## Fixes\n\n<details>\n<summary>2 changes</summary>\n\n- a\n- b\n</details>"
        );
    }

    #[test]
    fn contributors_are_distinct_sorted_and_filtered() {
        let c = composer("template: x\nexclude-contributors: [dependabot]\n");
        let prs = [
            PullRequest::new("1").with_author("zoe"),
            PullRequest::new("2").with_author("Adam"),
            PullRequest::new("3").with_author("zoe"),
            PullRequest::new("4").with_author("dependabot"),
            PullRequest::new("5"),
        ];
        let entries: Vec<_> = prs.iter().map(|p| entry(p, "t")).collect();
        assert_eq!(c.contributors(&entries), vec!["Adam", "zoe"]);
    }

    #[test]
    fn case_variants_do_not_split_duplicates() {
        let c = composer("template: $CONTRIBUTORS\n");
        let prs = [
            PullRequest::new("1").with_author("zoe"),
            PullRequest::new("2").with_author("Zoe"),
            PullRequest::new("3").with_author("zoe"),
        ];
        let entries: Vec<_> = prs.iter().map(|p| entry(p, "t")).collect();

        let draft = c.compose(&entries, 0);
        assert_eq!(draft.contributors, vec!["Zoe", "zoe"]);
        assert_eq!(draft.body, "@Zoe and @zoe");
    }

    #[test]
    fn contributor_list_formatting() {
        let c = composer("template: x\n");
        let names = |v: &[&str]| v.iter().map(ToString::to_string).collect::<Vec<_>>();

        assert_eq!(c.render_contributors(&[]), "No contributors");
        assert_eq!(c.render_contributors(&names(&["a"])), "@a");
        assert_eq!(c.render_contributors(&names(&["a", "b"])), "@a and @b");
        assert_eq!(
            c.render_contributors(&names(&["a", "Jane Doe", "c"])),
            "@a, Jane Doe and @c"
        );
    }

    #[test]
    fn release_template_with_empty_values() {
        let c = composer("template: |\n  $CHANGES\n\n  Thanks!\n  $CONTRIBUTORS\n");
        assert_eq!(c.render_release("", ""), "\n\nThanks!\n\n");
    }
}

//! Behaviour of the built-in release configuration.

use proptest::prelude::*;
use relnotes::data::PullRequest;
use relnotes::Drafter;

const TYPES: &[&str] = &["build", "chore", "depr", "docs", "feat", "fix", "perf", "release"];

const LANGUAGES: &[&str] = &["rust", "python"];

const BOILERPLATE: &str =
    "\n\nThank you to all our contributors for making this release possible!\n\n";

fn drafter() -> Drafter {
    Drafter::embedded().unwrap()
}

fn labels(title: &str) -> Vec<String> {
    drafter().labeler().apply(&PullRequest::new(title))
}

fn commit_type() -> impl Strategy<Value = &'static str> {
    prop::sample::select(TYPES)
}

fn description() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9 ]{0,30}"
}

proptest! {
    #[test]
    fn fix_prefix_gets_fix_label(
        scope in prop::option::of("[a-z]{1,8}"),
        bang in any::<bool>(),
        desc in description(),
    ) {
        let scope = scope.map(|s| format!("({s})")).unwrap_or_default();
        let bang = if bang { "!" } else { "" };
        let title = format!("fix{scope}{bang}: {desc}");

        prop_assert!(labels(&title).contains(&"fix".to_string()), "{title}");
    }

    #[test]
    fn breaking_change_gets_breaking_and_language_labels(
        kind in commit_type(),
        language in prop::sample::select(LANGUAGES),
        desc in description(),
    ) {
        let title = format!("{kind}({language})!: {desc}");
        let labels = labels(&title);

        prop_assert!(labels.contains(&"breaking".to_string()), "{title}: {labels:?}");
        prop_assert!(labels.contains(&language.to_string()), "{title}: {labels:?}");
    }

    #[test]
    fn non_breaking_titles_are_not_breaking(
        kind in commit_type(),
        desc in description(),
    ) {
        let title = format!("{kind}(rust): {desc}");
        prop_assert!(!labels(&title).contains(&"breaking".to_string()));
    }

    #[test]
    fn rewriter_strips_any_conventional_prefix(
        kind in commit_type(),
        scope in prop::option::of("[a-z]{1,8}"),
        desc in description(),
    ) {
        let scope = scope.map(|s| format!("({s})")).unwrap_or_default();
        let title = format!("{kind}{scope}: {desc}");

        prop_assert_eq!(drafter().rewriter().rewrite(&title), desc);
    }

    #[test]
    fn excluded_entries_never_rendered(
        flags in prop::collection::vec(0u8..3, 0..12),
    ) {
        let prs: Vec<PullRequest> = flags
            .iter()
            .enumerate()
            .map(|(i, flag)| match flag {
                0 => PullRequest::new(format!("feat: keep{i}")).with_number(i as u64),
                1 => PullRequest::new(format!("feat: zzdrop{i}"))
                    .with_number(i as u64)
                    .with_label("skip changelog"),
                _ => PullRequest::new(format!("release: zzdrop{i}")).with_number(i as u64),
            })
            .collect();

        let draft = drafter().draft(&prs);
        let kept = flags.iter().filter(|f| **f == 0).count();

        prop_assert!(!draft.body.contains("zzdrop"), "{}", draft.body);
        prop_assert_eq!(draft.entries.len(), kept);
        prop_assert_eq!(draft.excluded, flags.len() - kept);
    }
}

#[test]
fn rewriter_example() {
    assert_eq!(drafter().rewriter().rewrite("feat(rust): add x"), "add x");
}

#[test]
fn breaking_rust_example() {
    assert_eq!(
        labels("feat(rust)!: remove deprecated x"),
        vec!["rust", "breaking", "enhancement"]
    );
}

#[test]
fn template_with_empty_values_is_boilerplate() {
    assert_eq!(drafter().composer().render_release("", ""), BOILERPLATE);
}

#[test]
fn empty_release_uses_fallback_templates() {
    let draft = drafter().draft(&[]);
    assert_eq!(
        draft.body,
        "* No changes\n\nThank you to all our contributors for making this release possible!\nNo contributors\n"
    );
    assert!(draft.entries.is_empty());
}

#[test]
fn unprefixed_titles_are_kept_verbatim() {
    let draft = drafter().draft(&[PullRequest::new("Bump version").with_number(9)]);
    assert!(draft.body.starts_with("- Bump version (#9)\n"));
    assert!(draft.entries[0].labels.is_empty());
}

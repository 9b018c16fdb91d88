//! Draft command: renders release notes.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::SourceArgs;
use crate::data::{OutputFormat, ReleaseDraft};

/// Draft command options.
#[derive(Parser)]
pub struct DraftCommand {
    /// Configuration and pull request sources.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format: text (release body only, default), yaml, json.
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// Writes the output to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl DraftCommand {
    /// Executes the draft command.
    pub fn execute(self) -> Result<()> {
        let rendered = self.run()?;

        match &self.output {
            Some(path) => {
                fs::write(path, &rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("✅ Wrote release notes to {}", path.display());
            }
            None => println!("{rendered}"),
        }

        Ok(())
    }

    /// Drafts the release and renders it in the requested format.
    pub fn run(&self) -> Result<String> {
        let format: OutputFormat = self
            .format
            .parse()
            .map_err(|()| anyhow::anyhow!("Unknown output format '{}'", self.format))?;

        let drafter = self.source.drafter()?;
        let prs = self.source.pull_requests()?;
        let draft = drafter.draft(&prs);

        render_draft(&draft, format)
    }
}

/// Renders a draft in the given format.
pub fn render_draft(draft: &ReleaseDraft, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(draft.body.clone()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(draft).context("Failed to serialize draft to JSON")
        }
        OutputFormat::Yaml => crate::data::to_yaml(draft),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ReleaseDraft {
        ReleaseDraft {
            body: "- add x (#1)\n\nThanks!\n@alice".to_string(),
            entries: Vec::new(),
            contributors: vec!["alice".to_string()],
            excluded: 2,
        }
    }

    #[test]
    fn text_format_is_body() {
        assert_eq!(
            render_draft(&draft(), OutputFormat::Text).unwrap(),
            "- add x (#1)\n\nThanks!\n@alice"
        );
    }

    #[test]
    fn json_format_has_all_fields() {
        let json = render_draft(&draft(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["excluded"], 2);
        assert_eq!(value["contributors"][0], "alice");
    }

    #[test]
    fn yaml_format_parses_back() {
        let yaml = render_draft(&draft(), OutputFormat::Yaml).unwrap();
        let parsed: ReleaseDraft = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.body.trim_end(), draft().body.trim_end());
        assert_eq!(parsed.excluded, 2);
    }
}

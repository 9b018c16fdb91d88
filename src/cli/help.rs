//! `help-all`: every command's help in one document.

use anyhow::Result;
use clap::{Command, CommandFactory, Parser};

/// Help command options.
#[derive(Parser)]
pub struct HelpCommand {}

/// Renders help for the whole command tree.
pub struct HelpGenerator {
    app: Command,
}

impl Default for HelpGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpGenerator {
    /// Creates a generator for the relnotes command tree.
    pub fn new() -> Self {
        Self {
            app: crate::cli::Cli::command(),
        }
    }

    /// Renders the root help followed by every subcommand, depth first.
    ///
    /// Subcommands are sorted by name so the output is stable.
    pub fn generate_all_help(&self) -> Result<String> {
        let mut sections = vec![render_section(&self.app, self.app.get_name())];
        collect_sections(&self.app, self.app.get_name(), &mut sections);

        let separator = format!("\n\n{}\n\n", "=".repeat(80));
        Ok(sections.join(&separator))
    }
}

fn collect_sections(cmd: &Command, path: &str, sections: &mut Vec<String>) {
    let mut subcommands: Vec<&Command> = cmd
        .get_subcommands()
        .filter(|c| c.get_name() != "help")
        .collect();
    subcommands.sort_by(|a, b| a.get_name().cmp(b.get_name()));

    for sub in subcommands {
        let sub_path = format!("{path} {}", sub.get_name());
        sections.push(render_section(sub, &sub_path));
        collect_sections(sub, &sub_path, sections);
    }
}

fn render_section(cmd: &Command, path: &str) -> String {
    let about = cmd
        .get_about()
        .map_or_else(|| "No description available".to_string(), ToString::to_string);
    format!("{path} - {about}\n\n{}", cmd.clone().render_help())
}

impl HelpCommand {
    /// Executes the help command.
    pub fn execute(self) -> Result<()> {
        println!("{}", HelpGenerator::new().generate_all_help()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_generator_default() {
        let gen = HelpGenerator::default();
        assert_eq!(gen.app.get_name(), "relnotes");
    }

    #[test]
    fn contains_all_commands() {
        let output = HelpGenerator::new().generate_all_help().unwrap();
        for path in [
            "relnotes draft",
            "relnotes label",
            "relnotes config",
            "relnotes config show",
            "relnotes config validate",
            "relnotes help-all",
        ] {
            assert!(output.contains(path), "missing {path}");
        }
    }

    #[test]
    fn root_section_includes_about() {
        let output = HelpGenerator::new().generate_all_help().unwrap();
        assert!(output.starts_with("relnotes - Drafts release notes"));
    }

    #[test]
    fn output_is_deterministic() {
        let first = HelpGenerator::new().generate_all_help().unwrap();
        let second = HelpGenerator::new().generate_all_help().unwrap();
        assert_eq!(first, second);
        assert!(first.contains(&"=".repeat(80)));
    }
}

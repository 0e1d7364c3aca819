use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{Commands, SchemaCommands};

/// Top-level CLI parser for the `grim` binary.
#[derive(Debug, Parser)]
#[command(name = "grim", version, about = "Grimoire - generated content pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON output style: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra config file layered above `.grimoire/config.toml`
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use grim_core::DomainTag;

    use super::{Cli, Commands, OutputFormat, SchemaCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["grim", "normalize", "npc.json", "--domain", "creature", "--verbose", "-f", "raw"])
            .expect("cli should parse");
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Raw);
        let Commands::Normalize(args) = cli.command else {
            panic!("expected normalize");
        };
        assert_eq!(args.target.domain, Some(DomainTag::Monster));
        assert_eq!(args.target.input, "npc.json");
    }

    #[test]
    fn input_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["grim", "classify"]).expect("cli should parse");
        let Commands::Classify(args) = cli.command else {
            panic!("expected classify");
        };
        assert_eq!(args.input, "-");
    }

    #[test]
    fn unknown_domain_is_rejected() {
        assert!(Cli::try_parse_from(["grim", "render", "x.json", "--domain", "spaceship"]).is_err());
    }

    #[test]
    fn schema_export_takes_a_domain() {
        let cli = Cli::try_parse_from(["grim", "schema", "export", "story_arc"]).expect("cli should parse");
        let Commands::Schema { action: SchemaCommands::Export(args) } = cli.command else {
            panic!("expected schema export");
        };
        assert_eq!(args.domain, DomainTag::StoryArc);
    }

    #[test]
    fn block_requires_title() {
        assert!(Cli::try_parse_from(["grim", "block", "x.json"]).is_err());
        let cli = Cli::try_parse_from(["grim", "block", "x.json", "--title", "Mira", "--deliverable", "npc"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Block(_)));
    }
}

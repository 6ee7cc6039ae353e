//! CLI argument parsing using clap derive

use std::path::PathBuf;

use blocks_core::HookPoint;
use clap::{Parser, Subcommand};

/// Block tree serializer with structural auto-insertion
#[derive(Parser, Debug)]
#[command(name = "blocks")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file
    #[arg(short, long, global = true, env = "BLOCKS_CONFIG", default_value = "blocks.toml")]
    pub config: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// Every command reads a JSON block tree: one block object or an array of
/// top-level blocks. Pass `-` to read standard input.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print serialized markup without applying any directives
    Serialize {
        /// JSON block tree
        input: PathBuf,
    },

    /// Apply auto-insert directives and print serialized markup
    ///
    /// Examples:
    ///   blocks render page.json --metadata blocks/
    ///   blocks render page.json --hook-point tree
    Render {
        /// JSON block tree
        input: PathBuf,

        /// Directory of block type metadata (overrides the config file)
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        /// Stage at which directives are applied (tree or render)
        #[arg(long)]
        hook_point: Option<HookPoint>,
    },

    /// Apply auto-insert directives to the tree and print it as JSON
    Rewrite {
        /// JSON block tree
        input: PathBuf,

        /// Directory of block type metadata (overrides the config file)
        #[arg(short, long)]
        metadata: Option<PathBuf>,
    },

    /// Validate a block tree and report its size
    Check {
        /// JSON block tree
        input: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_flags() {
        let cli = Cli::parse_from([
            "blocks",
            "render",
            "page.json",
            "--metadata",
            "blocks",
            "--hook-point",
            "render",
        ]);
        assert_eq!(
            cli.command,
            Some(Commands::Render {
                input: PathBuf::from("page.json"),
                metadata: Some(PathBuf::from("blocks")),
                hook_point: Some(HookPoint::Render),
            })
        );
        assert_eq!(cli.config, PathBuf::from("blocks.toml"));
    }

    #[test]
    fn test_reject_unknown_hook_point() {
        let result = Cli::try_parse_from(["blocks", "render", "p.json", "--hook-point", "later"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["blocks", "check", "p.json", "-v", "--config", "x.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("x.toml"));
    }
}

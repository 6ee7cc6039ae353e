//! Blocks CLI
//!
//! Serializes JSON block trees to comment-delimited markup and applies
//! auto-insert directives declared in block type metadata.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use blocks_meta::Config;
use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(&cli.config)?;
    tracing::debug!(path = ?cli.config, ?config, "loaded configuration");

    match cli.command {
        Some(cmd) => execute_command(&config, cmd),
        None => {
            // No command provided - show help hint
            println!("{} block tree serializer", "blocks".green().bold());
            println!();
            println!("Run {} for available commands.", "blocks --help".cyan());
            Ok(())
        }
    }
}

/// Logs go to stderr; stdout carries command output only.
fn init_tracing(verbose: bool) {
    if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn execute_command(config: &Config, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Serialize { input } => commands::run_serialize(config, &input),
        Commands::Render {
            input,
            metadata,
            hook_point,
        } => commands::run_render(config, &input, metadata.as_deref(), hook_point),
        Commands::Rewrite { input, metadata } => {
            commands::run_rewrite(config, &input, metadata.as_deref())
        }
        Commands::Check { input } => commands::run_check(config, &input),
    }
}

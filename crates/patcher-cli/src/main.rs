//! calc-patch CLI
//!
//! Batch patching of calculator components and translation of their content.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{BatchArgs, Cli, Commands};
use commands::TranslateMode;
use error::{CliError, Result};
use patcher_core::BatchOptions;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} Calculator patcher", "calc-patch".green().bold());
            println!();
            println!("Run {} for available commands.", "calc-patch --help".cyan());
            Ok(())
        }
    }
}

fn batch_options(batch: BatchArgs) -> BatchOptions {
    BatchOptions {
        dry_run: batch.dry_run,
        limit: batch.limit,
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Apply {
            dir,
            recipe,
            builtin,
            batch,
        } => commands::run_apply(
            &dir,
            recipe.as_deref(),
            builtin.as_deref(),
            batch_options(batch),
        ),
        Commands::Repair { dir, batch } => commands::run_repair(&dir, batch_options(batch)),
        Commands::Translate {
            dir,
            labels,
            languages,
            seed,
            check,
            batch,
        } => {
            let mode = if check {
                TranslateMode::Check
            } else {
                TranslateMode::Translate { seed }
            };
            commands::run_translate(
                &dir,
                labels.as_deref(),
                &languages,
                mode,
                batch_options(batch),
            )
        }
        Commands::Recipes => commands::run_recipes(),
    }
}

//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::session::Session;
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(author, version, about = "Interactive in-memory project and task board")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to a config.toml with limit overrides
    #[arg(long, short = 'c', global = true, env = "TASKBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Wrap width for descriptions in text views
    #[arg(
        long,
        global = true,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub width: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Default)]
pub enum Commands {
    /// Start the interactive session (default)
    #[default]
    Shell,

    /// Print the effective limits and exit
    Limits,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    // Before parsing, so TASKBOARD_CONFIG and RUST_LOG from `.env` apply
    let dotenv_path = dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);
    init_tracing(cli.verbose);

    output.verbose("taskboard starting");
    if let Some(path) = dotenv_path {
        output.verbose_ctx("config", &format!("Loaded environment from {}", path.display()));
    }

    let mut config =
        Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(width) = cli.width {
        config.display.width = width;
    }
    output.verbose_ctx("config", &format!("Effective config: {:?}", config));

    match cli.command.unwrap_or_default() {
        Commands::Shell => {
            let stdin = std::io::stdin();
            Session::new(stdin.lock(), &output, config).run()?
        }
        Commands::Limits => show_limits(&output, &config),
    }

    output.verbose("Session ended");
    Ok(())
}

/// Installs the stderr subscriber for library diagnostics
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("taskboard=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

fn show_limits(output: &Output, config: &Config) {
    if output.is_json() {
        output.data(config);
        return;
    }

    let limits = &config.limits;
    output.row(&["KIND", "MAX COUNT", "MAX NAME", "MAX DESCRIPTION"]);
    for (kind, entity) in [("project", &limits.project), ("task", &limits.task)] {
        output.row(&[
            kind,
            &entity.max_count.to_string(),
            &entity.max_name_len.to_string(),
            &entity.max_description_len.to_string(),
        ]);
    }
    output.blank();
    output.line(&format!("Display width: {}", config.display.width));
}

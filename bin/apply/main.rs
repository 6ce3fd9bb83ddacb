//! Ansyla WFH Application CLI

mod commands;
mod style;
mod wizard;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style as paint;
use std::path::PathBuf;
use wfh_apply::{AppConfig, PreferenceStore};

use crate::commands::theme::ThemeAction;

#[derive(Parser)]
#[command(name = "wfh-apply")]
#[command(about = "Ansyla WFH Application - apply to work from home, one question at a time")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true, env = "WFH_APPLY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in and submit the application (default)
    Apply,
    /// Show or change the stored theme
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
    /// Check a single answer against its rule
    Validate {
        /// Field name (name, email, phone, gender, country, city, qualification)
        #[arg(short, long)]
        field: String,
        /// Value to check
        value: String,
    },
    /// Show the effective configuration
    Config,
}

pub fn print_banner() {
    println!(
        "{}",
        paint(
            r#"
     _                    _
    / \   _ __  ___ _   _| | __ _
   / _ \ | '_ \/ __| | | | |/ _` |
  / ___ \| | | \__ \ |_| | | (_| |
 /_/   \_\_| |_|___/\__, |_|\__,_|
                    |___/
"#
        )
        .cyan()
    );
    println!("  {}", paint("Ansyla WFH Application").bold());
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let preferences = PreferenceStore::load(config.preferences_file());

    match cli.command.unwrap_or(Commands::Apply) {
        Commands::Apply => wizard::run_apply_wizard(&config, &preferences).await,
        Commands::Theme { action } => commands::theme::run(&preferences, action),
        Commands::Validate { field, value } => commands::validate::run(&field, &value),
        Commands::Config => commands::config::run(&config, &preferences),
    }
}

//! Vetter CLI - review work-plan applications from the terminal
//!
//! Shows an issue's applications grouped by review state and records
//! accept/reject decisions in the local ledger.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vetter_core::Config;
use vetter_db::DatabaseConfig;

use commands::{HistoryArgs, ReviewArgs, ShowArgs};

/// Vetter: review work-plan applications on bounty issues
#[derive(Parser, Debug)]
#[command(name = "vetter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Reviewer login (overrides config and GitHub sign-in)
    #[arg(long, global = true, env = "VETTER_REVIEWER")]
    reviewer: Option<String>,

    /// Path to the SQLite database (overrides config)
    #[arg(long, global = true, env = "VETTER_DB_PATH")]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Show the review panel for an issue
    #[command(visible_alias = "s")]
    Show(ShowArgs),

    /// Accept or reject an application
    #[command(visible_alias = "r")]
    Review(ReviewArgs),

    /// List recorded decisions for an issue
    History(HistoryArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let config = Config::load_with_overrides(cli.reviewer.clone(), cli.db_path.clone())?;

    if cli.verbose {
        tracing::info!(
            reviewer = ?config.reviewer.login,
            db_path = ?config.database.path,
            close_panel = %config.review.close_panel,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("vetter {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Show(args)) => {
            args.execute(cli.verbose, &config)?;
        }
        Some(Commands::Review(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::History(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Config) => {
            print_config(&config);
        }
        None => {
            println!("Vetter - review work-plan applications on bounty issues");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn print_config(config: &Config) {
    println!("Vetter Configuration");
    println!("====================");
    println!();
    println!("Reviewer:");
    println!(
        "  login: {}",
        config.reviewer.login.as_deref().unwrap_or("(GitHub sign-in)")
    );
    if let Some(name) = &config.reviewer.name {
        println!("  name: {}", name);
    }
    println!();
    println!("Database:");
    let db = DatabaseConfig::from_optional_path(config.database.path.clone());
    println!("  path: {}", db.path.display());
    println!();
    println!("Review:");
    println!("  close_panel: {}", config.review.close_panel);
    println!("  read_only: {}", config.review.read_only);
    println!();
    if let Some(path) = Config::default_config_path() {
        println!("Config file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - using defaults)");
        }
    }
}

//! # Reviewer CLI
//!
//! Command-line interface for the reviewer assignment service.
//!
//! ## Usage
//!
//! ```bash
//! reviewer serve     # Start the API server (runs migrations automatically)
//! reviewer migrate   # Run database migrations
//! reviewer validate  # Check configuration without starting anything
//! reviewer --help    # Show help
//! ```

mod commands;
mod config;
mod server;

use clap::{CommandFactory as _, Parser};
use error::Result;
use migration::DatabaseConfig;

use crate::commands::Commands;

/// Reviewer - automatic pull request reviewer assignment
#[derive(Parser, Debug)]
#[command(name = "reviewer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "REVIEWER_LOG_FORMAT", default_value = "pretty")]
    log_format: String,

    /// Optional log file; output is rotated hourly
    #[arg(long, env = "REVIEWER_LOG_FILE")]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    logging::init(&cli.log_level, &cli.log_format, cli.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    logging::info!(target: "app", command = ?cli.command, "Reviewer CLI starting...");

    match cli.command {
        Commands::Serve(args) => {
            let config = DatabaseConfig::from_env()?;
            server::serve(&config, &args).await?;
        },
        Commands::Migrate(args) => {
            let config = DatabaseConfig::from_env()?;
            commands::migrate::migrate(&config, args).await?;
        },
        Commands::Completions(args) => commands::completions::completions(args.shell, &mut Cli::command())?,
        Commands::Validate(args) => commands::validate::validate(&args).await?,
    }

    logging::info!(target: "app", "Reviewer CLI completed successfully");
    Ok(())
}

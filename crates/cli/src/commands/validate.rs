//! # CLI Validate Command
//!
//! Configuration validation for the reviewer CLI.

use error::{AppError, Result};
use migration::DatabaseConfig;
use tracing::info;

use crate::{commands::ValidateArgs, config::parse_socket_addr};

/// Validates the CLI configuration
///
/// Checks that the database settings and the bind address parse. With `--check-connection` it also
/// connects to the database.
///
/// # Returns
///
/// A `Result` indicating success or failure.
pub async fn validate(args: &ValidateArgs) -> Result<()> {
    info!(target: "validate", "Validating configuration...");

    let config = DatabaseConfig::from_env()?;
    check_bind_address()?;

    info!(
        target: "validate",
        database = %config.redacted_url(),
        pool_size = %config.pool_size,
        "Database configuration is valid"
    );

    if args.check_connection {
        let db = config.connect().await?;
        db.ping().await?;
        info!(target: "validate", "Database connection succeeded");
    }

    Ok(())
}

/// Checks `REVIEWER_HOST` and `REVIEWER_PORT` when they are set
fn check_bind_address() -> Result<()> {
    let host = std::env::var("REVIEWER_HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());
    let port = match std::env::var("REVIEWER_PORT") {
        Ok(value) => {
            value
                .parse::<u16>()
                .map_err(|_e| AppError::config(format!("Invalid REVIEWER_PORT: {}", value)))?
        },
        Err(_) => 8080,
    };

    parse_socket_addr(&host, port).map_err(|e| AppError::config(format!("Invalid bind address {}: {}", host, e)))?;
    Ok(())
}

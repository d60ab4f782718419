//! # Database Connection Management
//!
//! This module provides database connection utilities and management functions
//! for establishing connections using Sea-ORM.

use std::{str::FromStr, time::Duration};

use ::error::{AppError, ResultExt as _};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Database connection configuration
///
/// This struct holds all configuration options for establishing a database connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Full connection URL, used verbatim when set
    pub url:             Option<String>,
    /// Database host address
    pub host:            String,
    /// Database port number
    pub port:            u16,
    /// Database name
    pub database:        String,
    /// Database username
    pub username:        String,
    /// Database password
    pub password:        String,
    /// SSL mode for connection
    pub ssl_mode:        SslMode,
    /// Maximum connections in pool
    pub pool_size:       u32,
    /// Connection timeout in seconds
    pub connect_timeout: u64,
}

/// Errors that can occur when parsing database configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseConfigError {
    /// A numeric variable could not be parsed.
    #[error("Invalid value for {var}: {value}")]
    InvalidNumber {
        /// The variable name.
        var:   &'static str,
        /// The rejected value.
        value: String,
    },

    /// The SSL mode is not one PostgreSQL understands.
    #[error("Invalid SSL mode: {value}")]
    InvalidSslMode {
        /// The rejected value.
        value: String,
    },
}

impl From<DatabaseConfigError> for AppError {
    fn from(err: DatabaseConfigError) -> Self { AppError::config(err) }
}

/// SSL mode options for PostgreSQL connections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SslMode {
    /// No SSL - only use for development
    Disable,
    /// Prefer SSL if available
    #[default]
    Prefer,
    /// Require SSL connection
    Require,
    /// Verify SSL certificate
    VerifyCa,
    /// Verify full SSL certificate chain
    VerifyFull,
}

impl SslMode {
    /// Converts the SSL mode to a PostgreSQL connection string value
    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
            SslMode::VerifyCa => "verify-ca",
            SslMode::VerifyFull => "verify-full",
        }
    }
}

impl FromStr for SslMode {
    type Err = DatabaseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disable" => Ok(SslMode::Disable),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" => Ok(SslMode::VerifyCa),
            "verify-full" => Ok(SslMode::VerifyFull),
            other => {
                Err(DatabaseConfigError::InvalidSslMode {
                    value: other.to_string(),
                })
            },
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url:             None,
            host:            "localhost".to_string(),
            port:            5432,
            database:        "reviewer".to_string(),
            username:        "reviewer".to_string(),
            password:        String::new(),
            ssl_mode:        SslMode::default(),
            pool_size:       25,
            connect_timeout: 5,
        }
    }
}

impl DatabaseConfig {
    /// Loads database configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `REVIEWER_DATABASE_URL` (optional, wins over the individual parts)
    /// - `REVIEWER_DATABASE_HOST` (default: "localhost")
    /// - `REVIEWER_DATABASE_PORT` (default: "5432")
    /// - `REVIEWER_DATABASE_NAME` (default: "reviewer")
    /// - `REVIEWER_DATABASE_USER` (default: "reviewer")
    /// - `REVIEWER_DATABASE_PASSWORD` (default: "")
    /// - `REVIEWER_DATABASE_SSL_MODE` (default: "prefer")
    /// - `REVIEWER_DATABASE_POOL_SIZE` (default: "25")
    /// - `REVIEWER_DATABASE_CONNECT_TIMEOUT` (default: "5")
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable or the SSL mode does not parse.
    pub fn from_env() -> Result<Self, DatabaseConfigError> {
        let defaults = Self::default();
        let get_env = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());

        Ok(Self {
            url:             get_env("REVIEWER_DATABASE_URL"),
            host:            get_env("REVIEWER_DATABASE_HOST").unwrap_or(defaults.host),
            port:            parse_number("REVIEWER_DATABASE_PORT", get_env("REVIEWER_DATABASE_PORT"), defaults.port)?,
            database:        get_env("REVIEWER_DATABASE_NAME").unwrap_or(defaults.database),
            username:        get_env("REVIEWER_DATABASE_USER").unwrap_or(defaults.username),
            password:        std::env::var("REVIEWER_DATABASE_PASSWORD").unwrap_or_default(),
            ssl_mode:        match get_env("REVIEWER_DATABASE_SSL_MODE") {
                Some(value) => value.parse()?,
                None => defaults.ssl_mode,
            },
            pool_size:       parse_number(
                "REVIEWER_DATABASE_POOL_SIZE",
                get_env("REVIEWER_DATABASE_POOL_SIZE"),
                defaults.pool_size,
            )?,
            connect_timeout: parse_number(
                "REVIEWER_DATABASE_CONNECT_TIMEOUT",
                get_env("REVIEWER_DATABASE_CONNECT_TIMEOUT"),
                defaults.connect_timeout,
            )?,
        })
    }

    /// Builds the connection URL
    ///
    /// # Returns
    ///
    /// The explicit URL when configured, otherwise a PostgreSQL URL with percent-encoded credentials.
    #[must_use]
    pub fn connection_url(&self) -> String {
        if let Some(ref url) = self.url {
            return url.clone();
        }

        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            percent_encode_userinfo(&self.username),
            percent_encode_userinfo(&self.password),
            self.host,
            self.port,
            self.database,
            self.ssl_mode.as_str()
        )
    }

    /// The URL with the password masked, for logging.
    #[must_use]
    pub fn redacted_url(&self) -> String {
        match self.url {
            Some(ref url) => {
                match (url.find("://"), url.rfind('@')) {
                    (Some(scheme_end), Some(at)) if at > scheme_end => {
                        format!("{}://***{}", &url[.. scheme_end], &url[at ..])
                    },
                    _ => url.clone(),
                }
            },
            None => {
                format!(
                    "postgres://{}:***@{}:{}/{}",
                    self.username, self.host, self.port, self.database
                )
            },
        }
    }

    /// Pool options derived from this configuration.
    #[must_use]
    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.connection_url());
        options
            .max_connections(self.pool_size)
            .connect_timeout(Duration::from_secs(self.connect_timeout))
            .acquire_timeout(Duration::from_secs(self.connect_timeout))
            .sqlx_logging(false);
        options
    }

    /// Creates a database connection from this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub async fn connect(&self) -> Result<DatabaseConnection, AppError> {
        tracing::info!(target: "database", url = %self.redacted_url(), pool_size = self.pool_size, "Connecting to database");
        Database::connect(self.connect_options())
            .await
            .context("Failed to connect to database")
    }
}

fn parse_number<T: FromStr>(var: &'static str, value: Option<String>, default: T) -> Result<T, DatabaseConfigError> {
    match value {
        Some(value) => {
            value.parse().map_err(|_| {
                DatabaseConfigError::InvalidNumber {
                    var,
                    value,
                }
            })
        },
        None => Ok(default),
    }
}

/// Percent-encoding for username/password in PostgreSQL URIs.
///
/// Everything outside the RFC 3986 unreserved set is encoded byte by byte.
fn percent_encode_userinfo(s: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut result = String::with_capacity(s.len().saturating_mul(3));
    for byte in s.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            result.push(byte as char);
        }
        else {
            result.push('%');
            result.push(HEX[usize::from(byte >> 4)] as char);
            result.push(HEX[usize::from(byte & 0x0f)] as char);
        }
    }
    result
}

/// Database connection helper for a bare URL
pub async fn connect_to_database(database_url: &str) -> Result<DatabaseConnection, DbErr> { Database::connect(database_url).await }

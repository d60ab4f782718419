//! # Logging Configuration
//!
//! Configuration for the logging subsystem.
//! Supports environment variables and programmatic configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*, Registry};

/// Logging configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Log level or filter directive (debug, info, `review=debug,sqlx=warn`)
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format (json, pretty, compact)
    #[serde(default = "default_format")]
    pub format: String,

    /// Optional log file path, rotated hourly
    #[serde(default)]
    pub log_file: Option<String>,

    /// Environment (development, testing, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_level() -> String { "info".to_string() }

fn default_format() -> String { "compact".to_string() }

fn default_environment() -> String { "development".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level:       default_level(),
            format:      default_format(),
            log_file:    None,
            environment: default_environment(),
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables.
    ///
    /// `RUST_LOG`, `REVIEWER_LOG_FORMAT`, `REVIEWER_LOG_FILE` and `REVIEWER_ENV` take precedence over the
    /// supplied arguments.
    pub fn from_env(level: &str, format: &str, log_file: Option<&str>) -> Self {
        Self {
            level:       std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()),
            format:      std::env::var("REVIEWER_LOG_FORMAT").unwrap_or_else(|_| format.to_string()),
            log_file:    std::env::var("REVIEWER_LOG_FILE")
                .ok()
                .or(log_file.map(|s| s.to_string())),
            environment: std::env::var("REVIEWER_ENV").unwrap_or_else(|_| default_environment()),
        }
    }

    /// The filter built from `level`, falling back to `info` when the directive does not parse.
    fn filter(&self) -> EnvFilter { EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info")) }

    /// Build the tracing subscriber from this configuration.
    pub fn build(&self) -> Box<dyn tracing::Subscriber + Send + Sync> {
        match self.format.as_str() {
            "pretty" => self.build_pretty_subscriber(),
            "compact" => self.build_compact_subscriber(),
            _ => self.build_json_subscriber(),
        }
    }

    /// Build a JSON subscriber for production logging.
    fn build_json_subscriber(&self) -> Box<dyn tracing::Subscriber + Send + Sync> {
        let stdout = fmt::layer()
            .json()
            .with_timer(fmt::time::UtcTime::rfc_3339());

        if let Some(ref log_file) = self.log_file {
            let path = Path::new(log_file);
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "reviewer.log".to_string());
            let file_appender = tracing_appender::rolling::hourly(directory, file_name);
            let file_layer = fmt::layer()
                .json()
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_ansi(false)
                .with_writer(file_appender);
            Box::new(
                Registry::default()
                    .with(self.filter())
                    .with(stdout)
                    .with(file_layer),
            )
        }
        else {
            Box::new(Registry::default().with(self.filter()).with(stdout))
        }
    }

    /// Build a pretty subscriber for development logging.
    fn build_pretty_subscriber(&self) -> Box<dyn tracing::Subscriber + Send + Sync> {
        let subscriber = fmt::layer()
            .pretty()
            .with_timer(fmt::time::UtcTime::rfc_3339());
        Box::new(Registry::default().with(self.filter()).with(subscriber))
    }

    /// Build a compact subscriber for terminals and tests.
    fn build_compact_subscriber(&self) -> Box<dyn tracing::Subscriber + Send + Sync> {
        let subscriber = fmt::layer()
            .compact()
            .with_timer(fmt::time::UtcTime::rfc_3339());
        Box::new(Registry::default().with(self.filter()).with(subscriber))
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_config_from_args() {
        let config = LoggingConfig::from_env("info", "json", None);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "json");
        assert_eq!(config.environment, "development");
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        // Safe in test context: env mutation is serialized by #[serial]
        unsafe {
            std::env::set_var("RUST_LOG", "debug");
            std::env::set_var("REVIEWER_LOG_FORMAT", "pretty");
        }

        let config = LoggingConfig::from_env("info", "json", None);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, "pretty");

        unsafe {
            std::env::remove_var("RUST_LOG");
            std::env::remove_var("REVIEWER_LOG_FORMAT");
        }
    }

    #[test]
    fn test_build_each_format() {
        for format in ["json", "pretty", "compact", "unknown"] {
            let config = LoggingConfig {
                level: "review=debug,sqlx=warn".to_string(),
                format: format.to_string(),
                ..Default::default()
            };
            let _subscriber = config.build();
        }
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let config = LoggingConfig {
            level: "=not a directive=".to_string(),
            ..Default::default()
        };
        let _subscriber = config.build();
    }
}

//! # Logging Configuration Tests
//!
//! Tests for structured logging setup and configuration.

#[cfg(test)]
mod logging_config_tests {
    use logging::LoggingConfig;

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "compact");
        assert_eq!(config.environment, "development");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_logging_config_deserializes_kebab_case() {
        let config: LoggingConfig =
            serde_json::from_str(r#"{"level":"debug","format":"json","log-file":"/tmp/reviewer.log"}"#).unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.log_file.as_deref(), Some("/tmp/reviewer.log"));
        assert_eq!(config.environment, "development");
    }
}

#[cfg(test)]
mod request_id_tests {
    use logging::RequestId;

    #[test]
    fn test_request_id_uniqueness() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();
        assert_ne!(id1, id2, "Request IDs should be unique");
    }

    #[test]
    fn test_generated_id_round_trips_through_header() {
        let id = RequestId::new();
        let echoed = RequestId::from_header_or_new(Some(id.as_str()));
        assert_eq!(echoed, id);
    }
}

#[cfg(test)]
mod macro_tests {
    use logging::{log_api_request, log_directory_event, log_lifecycle_event, RequestId};

    #[test]
    fn test_macros_expand_without_subscriber() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        log_api_request!(RequestId::new(), "POST", "/pullRequest/create", 201, 3);
        log_lifecycle_event!("created", "pr-1", reviewers = 2usize);
        log_lifecycle_event!("merged", "pr-1");
        log_directory_event!("team_added", team_name = "backend", members = 3usize);
    }
}

//! # Reviewer Error Infrastructure
//!
//! Error types and API error rendering for the reviewer assignment service.
//!
//! Every failure is one [`AppError`] variant. Domain variants carry a stable
//! machine code (see [`codes::ErrorCode`]) and map to 4xx statuses, while store
//! and infrastructure failures collapse into an opaque 5xx outcome whose detail is
//! only ever logged.

pub mod codes;
pub mod middleware;
pub mod rejection;
pub mod response;
pub mod traits;

pub use codes::ErrorCode;
pub use response::{ErrorBody, ErrorResponse};
pub use traits::ResultExt;

/// Convenience type alias for Result with AppError.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Main application error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("EmptyField: {field} field is empty")]
    EmptyField {
        field: String,
    },

    #[error("NotFound: {message}")]
    NotFound {
        message: String,
    },

    #[error("TeamExists: team_name already exists")]
    TeamExists,

    #[error("UserExists: user {user_id} already exists")]
    UserExists {
        user_id: String,
    },

    #[error("PrExists: PR id already exists")]
    PrExists,

    #[error("PrMerged: cannot reassign on merged PR")]
    PrMerged,

    #[error("NotAssigned: reviewer is not assigned to this PR")]
    NotAssigned,

    #[error("NoCandidate: no active replacement candidate in team")]
    NoCandidate,

    #[error("BadRequest: {message}")]
    BadRequest {
        message: String,
    },

    #[error("Timeout: {operation} exceeded its deadline")]
    Timeout {
        operation: String,
    },

    #[error("Internal: {message}")]
    Internal {
        message: String,
    },

    #[error("Database: {message}")]
    Database {
        message: String,
    },

    #[error("IO: {message}")]
    Io {
        message: String,
    },

    #[error("Config: {message}")]
    Config {
        message: String,
    },

    #[error("Migration: {message}")]
    Migration {
        message: String,
    },
}

impl AppError {
    /// Create an empty field error naming the offending input.
    #[inline]
    pub fn empty_field(field: impl ToString) -> Self {
        Self::EmptyField {
            field: field.to_string(),
        }
    }

    /// Create a not found error.
    #[inline]
    pub fn not_found(resource: impl ToString) -> Self {
        Self::NotFound {
            message: resource.to_string(),
        }
    }

    /// Create a user collision error.
    #[inline]
    pub fn user_exists(user_id: impl ToString) -> Self {
        Self::UserExists {
            user_id: user_id.to_string(),
        }
    }

    /// Create a bad request error.
    #[inline]
    pub fn bad_request(message: impl ToString) -> Self {
        Self::BadRequest {
            message: message.to_string(),
        }
    }

    /// Create a deadline exceeded error.
    #[inline]
    pub fn timeout(operation: impl ToString) -> Self {
        Self::Timeout {
            operation: operation.to_string(),
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl ToString) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Create a database error.
    #[inline]
    pub fn database(message: impl ToString) -> Self {
        Self::Database {
            message: message.to_string(),
        }
    }

    /// Create a config error.
    #[inline]
    pub fn config(message: impl ToString) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    /// Create a migration error.
    #[inline]
    pub fn migration(message: impl ToString) -> Self {
        Self::Migration {
            message: message.to_string(),
        }
    }

    /// Get the error kind discriminant.
    pub fn kind(&self) -> ErrorCode {
        match self {
            AppError::EmptyField {
                ..
            } => ErrorCode::EmptyField,
            AppError::NotFound {
                ..
            } => ErrorCode::NotFound,
            AppError::TeamExists => ErrorCode::TeamExists,
            AppError::UserExists {
                ..
            } => ErrorCode::UserExists,
            AppError::PrExists => ErrorCode::PrExists,
            AppError::PrMerged => ErrorCode::PrMerged,
            AppError::NotAssigned => ErrorCode::NotAssigned,
            AppError::NoCandidate => ErrorCode::NoCandidate,
            AppError::BadRequest {
                ..
            } => ErrorCode::BadRequest,
            AppError::Timeout {
                ..
            } => ErrorCode::Timeout,
            AppError::Internal {
                ..
            } |
            AppError::Database {
                ..
            } |
            AppError::Io {
                ..
            } |
            AppError::Config {
                ..
            } |
            AppError::Migration {
                ..
            } => ErrorCode::Internal,
        }
    }

    /// Get the HTTP status code.
    #[inline]
    pub fn status(&self) -> http::StatusCode { self.kind().status() }

    /// Get the stable machine-readable error code.
    #[inline]
    pub fn code(&self) -> &'static str { self.kind().as_str() }

    /// Whether this error belongs to the opaque internal class.
    #[inline]
    pub fn is_internal(&self) -> bool { self.kind() == ErrorCode::Internal }

    /// Get the error message.
    ///
    /// For internal errors this is the detailed message, which must only be logged.
    pub fn message(&self) -> String {
        match self {
            AppError::EmptyField {
                field,
            } => format!("{} field is empty", field),
            AppError::NotFound {
                message,
            } => message.clone(),
            AppError::TeamExists => "team_name already exists".to_string(),
            AppError::UserExists {
                user_id,
            } => format!("user_id {} already exists", user_id),
            AppError::PrExists => "PR id already exists".to_string(),
            AppError::PrMerged => "cannot reassign on merged PR".to_string(),
            AppError::NotAssigned => "reviewer is not assigned to this PR".to_string(),
            AppError::NoCandidate => "no active replacement candidate in team".to_string(),
            AppError::BadRequest {
                message,
            } => message.clone(),
            AppError::Timeout {
                operation,
            } => format!("{} timed out, please retry", operation),
            AppError::Internal {
                message,
            } |
            AppError::Database {
                message,
            } |
            AppError::Io {
                message,
            } |
            AppError::Config {
                message,
            } |
            AppError::Migration {
                message,
            } => message.clone(),
        }
    }

    /// Add context to the error.
    ///
    /// Only free-form messages are prefixed. Domain variants with fixed messages are returned unchanged.
    #[inline]
    pub fn context(self, context: impl ToString) -> Self {
        let context_msg = context.to_string();
        match self {
            AppError::NotFound {
                message,
            } => {
                Self::NotFound {
                    message: format!("{}: {}", context_msg, message),
                }
            },
            AppError::BadRequest {
                message,
            } => {
                Self::BadRequest {
                    message: format!("{}: {}", context_msg, message),
                }
            },
            AppError::Internal {
                message,
            } => {
                Self::Internal {
                    message: format!("{}: {}", context_msg, message),
                }
            },
            AppError::Database {
                message,
            } => {
                Self::Database {
                    message: format!("{}: {}", context_msg, message),
                }
            },
            AppError::Io {
                message,
            } => {
                Self::Io {
                    message: format!("{}: {}", context_msg, message),
                }
            },
            AppError::Config {
                message,
            } => {
                Self::Config {
                    message: format!("{}: {}", context_msg, message),
                }
            },
            AppError::Migration {
                message,
            } => {
                Self::Migration {
                    message: format!("{}: {}", context_msg, message),
                }
            },
            other => other,
        }
    }
}

/// Convert anyhow errors to AppError.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Convert std::io errors to AppError.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

/// Convert Sea-ORM database errors to AppError.
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database {
            message: err.to_string(),
        }
    }
}

/// Convert validator validation errors to AppError.
///
/// A missing required field is reported as an empty field. When several fields fail, the
/// alphabetically first one is reported so the outcome does not depend on map ordering.
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = err
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort_unstable();

        match fields.first() {
            Some(field) => Self::empty_field(field),
            None => Self::bad_request("Validation failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_empty_field() {
        let err = AppError::empty_field("pull_request_id");
        assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "EMPTY_FIELD");
        assert_eq!(err.message(), "pull_request_id field is empty");
    }

    #[test]
    fn test_error_not_found() {
        let err = AppError::not_found("team not found");
        assert_eq!(err.status(), http::StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn test_error_team_exists() {
        let err = AppError::TeamExists;
        assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "TEAM_EXISTS");
        assert_eq!(err.message(), "team_name already exists");
    }

    #[test]
    fn test_error_user_exists() {
        let err = AppError::user_exists("u1");
        assert_eq!(err.status(), http::StatusCode::CONFLICT);
        assert_eq!(err.code(), "USER_EXISTS");
        assert!(err.message().contains("u1"));
    }

    #[test]
    fn test_lifecycle_conflicts() {
        for (err, code, message) in [
            (AppError::PrExists, "PR_EXISTS", "PR id already exists"),
            (AppError::PrMerged, "PR_MERGED", "cannot reassign on merged PR"),
            (
                AppError::NotAssigned,
                "NOT_ASSIGNED",
                "reviewer is not assigned to this PR",
            ),
            (
                AppError::NoCandidate,
                "NO_CANDIDATE",
                "no active replacement candidate in team",
            ),
        ] {
            assert_eq!(err.status(), http::StatusCode::CONFLICT);
            assert_eq!(err.code(), code);
            assert_eq!(err.message(), message);
        }
    }

    #[test]
    fn test_error_timeout() {
        let err = AppError::timeout("merge_pr");
        assert_eq!(err.status(), http::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code(), "TIMEOUT");
        assert!(!err.is_internal());
    }

    #[test]
    fn test_internal_variants_share_code() {
        for err in [
            AppError::internal("x"),
            AppError::database("x"),
            AppError::config("x"),
            AppError::migration("x"),
            AppError::Io {
                message: "x".to_string(),
            },
        ] {
            assert_eq!(err.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.code(), "INTERNAL_ERROR");
            assert!(err.is_internal());
        }
    }

    #[test]
    fn test_error_context_prefixes_free_form_messages() {
        let err = AppError::database("connection reset").context("Loading pull request");
        assert_eq!(err.message(), "Loading pull request: connection reset");
    }

    #[test]
    fn test_error_context_keeps_domain_messages() {
        let err = AppError::PrMerged.context("Reassigning");
        assert_eq!(err, AppError::PrMerged);
    }

    #[test]
    fn test_from_anyhow() {
        let err: AppError = anyhow::anyhow!("Test error").into();
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_from_db_err() {
        let err: AppError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, AppError::Database { .. }));
        assert!(err.is_internal());
    }

    #[test]
    fn test_from_validation_errors() {
        use validator::Validate;

        #[derive(Validate)]
        struct TestStruct {
            #[validate(length(min = 1))]
            team_name: String,
            #[validate(length(min = 1))]
            author_id: String,
        }

        let s = TestStruct {
            team_name: String::new(),
            author_id: String::new(),
        };
        let errors = s.validate().unwrap_err();
        let app_error: AppError = errors.into();

        assert_eq!(app_error, AppError::empty_field("author_id"));
    }
}

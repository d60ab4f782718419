//! # API Error Response Types
//!
//! The JSON envelope used for every failed request.
//!
//! ## Response Format
//!
//! ```json
//! {
//!   "error": {
//!     "code": "PR_MERGED",
//!     "message": "cannot reassign on merged PR"
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{AppError, ErrorCode};

/// Message shown to callers in place of internal failure details.
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// Error payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Stable machine-readable code.
    pub code:    ErrorCode,
    /// Human readable message.
    pub message: String,
}

/// Top-level error envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ErrorResponse {
    /// Build the envelope for an error, masking internal messages.
    pub fn from_error(err: &AppError) -> Self {
        let code = err.kind();
        let message = if code.expose_details() {
            err.message()
        }
        else {
            INTERNAL_MESSAGE.to_string()
        };

        Self {
            error: ErrorBody {
                code,
                message,
            },
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self { Self::from_error(err) }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_domain_error_shape() {
        let response = ErrorResponse::from(&AppError::NotAssigned);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"error": {"code": "NOT_ASSIGNED", "message": "reviewer is not assigned to this PR"}})
        );
    }

    #[test]
    fn test_empty_field_message() {
        let response = ErrorResponse::from(&AppError::empty_field("author_id"));
        assert_eq!(response.error.code, ErrorCode::EmptyField);
        assert_eq!(response.error.message, "author_id field is empty");
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::database("relation \"pr\" does not exist");
        let response = ErrorResponse::from(&err);
        assert_eq!(response.error.code, ErrorCode::Internal);
        assert_eq!(response.error.message, INTERNAL_MESSAGE);
    }
}

//! # Rejection Handlers
//!
//! Conversions from Axum extractor rejections into API errors.

use axum::extract::rejection::{JsonRejection, QueryRejection};

use crate::AppError;

/// Turn a deserializer message into a caller-facing one.
///
/// Messages like "missing field `author_id` at line 1 column 2" become
/// "Missing required field: author_id".
pub fn describe_body_error(error_message: &str) -> String {
    if let Some(start) = error_message.find("missing field `") {
        let rest = &error_message[start + 15 ..];
        if let Some(end) = rest.find('`') {
            return format!("Missing required field: {}", &rest[.. end]);
        }
    }
    error_message.to_string()
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self { AppError::bad_request(describe_body_error(&rejection.body_text())) }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(format!(
            "Query string deserialization error: {}",
            rejection.body_text()
        ))
    }
}

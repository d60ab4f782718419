//! # Error Rendering
//!
//! Converts [`AppError`] values into HTTP responses.
//!
//! ## Usage
//!
//! ```rust
//! use axum::response::IntoResponse;
//! use error::AppError;
//!
//! let response = AppError::PrMerged.into_response();
//! assert_eq!(response.status(), http::StatusCode::CONFLICT);
//! ```

use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::{response::ErrorResponse, AppError};

/// Internal failures are logged with their full message before being masked.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_internal() {
            tracing::error!(target: "api", code = %self.code(), error = %self, "Request failed");
        }
        else {
            tracing::debug!(target: "api", code = %self.code(), error = %self, "Request rejected");
        }

        let body = ErrorResponse::from_error(&self);
        (self.status(), Json(body)).into_response()
    }
}

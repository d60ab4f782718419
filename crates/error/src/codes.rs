//! # Error Codes
//!
//! Stable machine-readable error codes and their transport status mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminant of every error kind the service can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    EmptyField,
    NotFound,
    TeamExists,
    UserExists,
    PrExists,
    PrMerged,
    NotAssigned,
    NoCandidate,
    BadRequest,
    Timeout,
    #[serde(rename = "INTERNAL_ERROR")]
    Internal,
}

impl ErrorCode {
    /// All codes, in declaration order.
    pub const ALL: [ErrorCode; 11] = [
        ErrorCode::EmptyField,
        ErrorCode::NotFound,
        ErrorCode::TeamExists,
        ErrorCode::UserExists,
        ErrorCode::PrExists,
        ErrorCode::PrMerged,
        ErrorCode::NotAssigned,
        ErrorCode::NoCandidate,
        ErrorCode::BadRequest,
        ErrorCode::Timeout,
        ErrorCode::Internal,
    ];

    /// The wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::TeamExists => "TEAM_EXISTS",
            ErrorCode::UserExists => "USER_EXISTS",
            ErrorCode::PrExists => "PR_EXISTS",
            ErrorCode::PrMerged => "PR_MERGED",
            ErrorCode::NotAssigned => "NOT_ASSIGNED",
            ErrorCode::NoCandidate => "NO_CANDIDATE",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::Internal => "INTERNAL_ERROR",
        }
    }

    /// The HTTP status the code is rendered with.
    pub fn status(&self) -> http::StatusCode {
        match self {
            ErrorCode::EmptyField | ErrorCode::BadRequest | ErrorCode::TeamExists => http::StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => http::StatusCode::NOT_FOUND,
            ErrorCode::UserExists |
            ErrorCode::PrExists |
            ErrorCode::PrMerged |
            ErrorCode::NotAssigned |
            ErrorCode::NoCandidate => http::StatusCode::CONFLICT,
            ErrorCode::Timeout => http::StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::Internal => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the caller may see the detailed message.
    pub fn expose_details(&self) -> bool { !matches!(self, ErrorCode::Internal) }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

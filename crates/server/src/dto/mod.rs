//! # Data Transfer Objects
//!
//! Request and response types for the API endpoints. String fields of request bodies default to empty
//! so that a missing field is reported as an empty one by the core.

pub mod pull_requests;
pub mod teams;
pub mod users;

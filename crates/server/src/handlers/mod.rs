//! # Request Handlers
//!
//! Each handler takes the shared state and an already extracted request, and returns the JSON body the
//! router sends back. Errors render through [`error::AppError`].

pub mod pull_requests;
pub mod statistics;
pub mod teams;
pub mod users;

//! # Reviewer API Server
//!
//! Axum-based HTTP surface for the reviewer assignment service.
//!
//! ## Modules
//!
//! - [`dto`]: Request/response data transfer objects
//! - [`handlers`]: Request handlers calling into the review core
//! - [`middleware`]: HTTP middleware (request ids, access logging)
//! - [`router`]: API route configuration

use std::time::{Duration, Instant};

use review::{Deadline, DirectoryService, ReviewEngine, StatisticsService};

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use router::create_app_router;

/// Application state shared across request handlers
///
/// This is the composition root: every service shares the same connection pool.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db:              sea_orm::DbConn,
    /// Pull request lifecycle engine
    pub engine:          ReviewEngine,
    /// Team and user operations
    pub directory:       DirectoryService,
    /// Read-only counters
    pub statistics:      StatisticsService,
    /// Budget for a single request's unit of work
    pub request_timeout: Duration,
    /// Server start time for uptime calculation
    pub start_time:      Instant,
}

impl AppState {
    /// Builds the state over a connection pool with OS-seeded reviewer selection.
    pub fn new(db: sea_orm::DbConn, request_timeout: Duration) -> Self {
        Self::with_engine(db.clone(), ReviewEngine::new(db), request_timeout)
    }

    /// Builds the state around an explicit engine, for example one with a seeded selector.
    pub fn with_engine(db: sea_orm::DbConn, engine: ReviewEngine, request_timeout: Duration) -> Self {
        Self {
            directory: DirectoryService::new(db.clone()),
            statistics: StatisticsService::new(db.clone()),
            db,
            engine,
            request_timeout,
            start_time: Instant::now(),
        }
    }

    /// Deadline for a request starting now.
    pub fn deadline(&self) -> Deadline { Deadline::after(self.request_timeout) }
}

/// Server initialization result
#[derive(Debug)]
pub struct ServerResult {
    /// The address the server is bound to
    pub address:    String,
    /// Server start timestamp for logging
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl ServerResult {
    /// Creates a new server result
    #[must_use]
    pub fn new(address: &str) -> Self {
        Self {
            address:    address.to_string(),
            started_at: chrono::Utc::now(),
        }
    }
}

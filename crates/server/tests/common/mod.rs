//! # Common Test Utilities
//!
//! Provides shared test infrastructure: an in-memory database migrated by the real migrator, the full
//! application router, and fixtures for request bodies.

#![allow(dead_code)]

use std::{sync::Once, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use migration::{Migrator, MigratorTrait};
use review::{ReviewEngine, ReviewerSelector, SeaStore};
use sea_orm::{ConnectOptions, Database, DbConn};
use serde_json::{json, Value};
use server::{create_app_router, AppState};
use tower::ServiceExt;

/// Initialize test logging (run once per test session)
static INIT: Once = Once::new();

/// Initialize test environment including structured logging
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Router and state over a fresh in-memory database
pub struct TestApp {
    pub router: Router,
    pub state:  AppState,
}

/// Response captured from a one-shot request
#[derive(Debug)]
pub struct TestResponse {
    pub status:  StatusCode,
    pub headers: HeaderMap,
    pub body:    Value,
}

impl TestApp {
    /// Create a new application with a seeded reviewer selector
    pub async fn new(seed: u64) -> Self {
        init_test_env();

        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db: DbConn = Database::connect(options)
            .await
            .expect("Failed to open in-memory database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let engine = ReviewEngine::with_parts(db.clone(), SeaStore, ReviewerSelector::seeded(seed));
        let state = AppState::with_engine(db, engine, Duration::from_secs(5));

        Self {
            router: create_app_router(state.clone()),
            state,
        }
    }

    /// Send a request through the router
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        }
        else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// POST a JSON body
    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.send(request).await
    }

    /// GET a path with its query string
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Create a team through the API, asserting success
    pub async fn add_team(&self, fixture: &TeamFixture) {
        let response = self.post("/team/add", fixture.to_json()).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    }

    /// Create a pull request through the API
    pub async fn create_pr(&self, pr_id: &str, author_id: &str) -> TestResponse {
        self.post(
            "/pullRequest/create",
            json!({
                "pull_request_id": pr_id,
                "pull_request_name": format!("{} name", pr_id),
                "author_id": author_id,
            }),
        )
        .await
    }
}

/// Test fixtures for team data
pub struct TeamFixture {
    pub team_name: String,
    pub members:   Vec<(String, bool)>,
}

impl TeamFixture {
    /// Create an empty team fixture
    #[must_use]
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            members:   Vec::new(),
        }
    }

    /// Add a member
    #[must_use]
    pub fn with_member(mut self, user_id: impl Into<String>, is_active: bool) -> Self {
        self.members.push((user_id.into(), is_active));
        self
    }

    /// Request body for `/team/add`
    pub fn to_json(&self) -> Value {
        json!({
            "team_name": self.team_name,
            "members": self
                .members
                .iter()
                .map(|(id, active)| json!({ "user_id": id, "username": format!("{}-name", id), "is_active": active }))
                .collect::<Vec<_>>(),
        })
    }
}

/// Error code from an error body
pub fn error_code(body: &Value) -> &str { body["error"]["code"].as_str().unwrap_or_default() }

/// Reviewer ids from a pull request body
pub fn reviewers(pr: &Value) -> Vec<String> {
    pr["assigned_reviewers"]
        .as_array()
        .map(|ids| {
            ids.iter()
                .filter_map(|id| id.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

//! # API Router Configuration
//!
//! Configures API routes for the reviewer assignment service.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query,
        State as AxumState,
    },
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json,
    Router,
};
use error::Result;
use review::Team;

use crate::{
    dto::{
        pull_requests::{
            CreatePullRequestRequest,
            MergePullRequestRequest,
            PullRequestResponse,
            ReassignPullRequestRequest,
            ReassignResponse,
        },
        teams::{AddTeamRequest, TeamNameQuery, TeamResponse, TeamStatisticsResponse},
        users::{SetIsActiveRequest, UserIdQuery, UserResponse, UserReviewsResponse, UserStatisticsResponse},
    },
    handlers,
    AppState,
};

/// Creates the API router with all routes
///
/// # Arguments
///
/// * `state` - Application state containing the services and request timeout
///
/// # Returns
///
/// Configured Axum router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/team/add", post(add_team_handler))
        .route("/team/get", get(get_team_handler))
        .route("/users/setIsActive", post(set_is_active_handler))
        .route("/users/getReview", get(get_review_handler))
        .route("/pullRequest/create", post(create_pr_handler))
        .route("/pullRequest/merge", post(merge_pr_handler))
        .route("/pullRequest/reassign", post(reassign_pr_handler))
        .route("/statistics/user", get(user_statistics_handler))
        .route("/statistics/team", get(team_statistics_handler))
        .with_state(state)
}

/// Wrapper handler for team creation
async fn add_team_handler(
    AxumState(state): AxumState<AppState>,
    payload: std::result::Result<Json<AddTeamRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TeamResponse>)> {
    let Json(req) = payload?;
    handlers::teams::add_team_handler_inner(&state, req).await
}

/// Wrapper handler for team lookup
async fn get_team_handler(
    AxumState(state): AxumState<AppState>,
    query: std::result::Result<Query<TeamNameQuery>, QueryRejection>,
) -> Result<Json<Team>> {
    let Query(query) = query?;
    handlers::teams::get_team_handler_inner(&state, query).await
}

/// Wrapper handler for the activity toggle
async fn set_is_active_handler(
    AxumState(state): AxumState<AppState>,
    payload: std::result::Result<Json<SetIsActiveRequest>, JsonRejection>,
) -> Result<Json<UserResponse>> {
    let Json(req) = payload?;
    handlers::users::set_is_active_handler_inner(&state, req).await
}

/// Wrapper handler for a user's review queue
async fn get_review_handler(
    AxumState(state): AxumState<AppState>,
    query: std::result::Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<UserReviewsResponse>> {
    let Query(query) = query?;
    handlers::users::get_review_handler_inner(&state, query).await
}

/// Wrapper handler for pull request creation
async fn create_pr_handler(
    AxumState(state): AxumState<AppState>,
    payload: std::result::Result<Json<CreatePullRequestRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PullRequestResponse>)> {
    let Json(req) = payload?;
    handlers::pull_requests::create_pr_handler_inner(&state, req).await
}

/// Wrapper handler for merge
async fn merge_pr_handler(
    AxumState(state): AxumState<AppState>,
    payload: std::result::Result<Json<MergePullRequestRequest>, JsonRejection>,
) -> Result<Json<PullRequestResponse>> {
    let Json(req) = payload?;
    handlers::pull_requests::merge_pr_handler_inner(&state, req).await
}

/// Wrapper handler for reviewer reassignment
async fn reassign_pr_handler(
    AxumState(state): AxumState<AppState>,
    payload: std::result::Result<Json<ReassignPullRequestRequest>, JsonRejection>,
) -> Result<Json<ReassignResponse>> {
    let Json(req) = payload?;
    handlers::pull_requests::reassign_pr_handler_inner(&state, req).await
}

/// Wrapper handler for user statistics
async fn user_statistics_handler(
    AxumState(state): AxumState<AppState>,
    query: std::result::Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<UserStatisticsResponse>> {
    let Query(query) = query?;
    handlers::statistics::user_statistics_handler_inner(&state, query).await
}

/// Wrapper handler for team statistics
async fn team_statistics_handler(
    AxumState(state): AxumState<AppState>,
    query: std::result::Result<Query<TeamNameQuery>, QueryRejection>,
) -> Result<Json<TeamStatisticsResponse>> {
    let Query(query) = query?;
    handlers::statistics::team_statistics_handler_inner(&state, query).await
}

/// Creates the health check router
pub fn create_health_router() -> Router { Router::new().route("/health", get(|| async { "OK" })) }

/// Creates the main application router
///
/// # Arguments
///
/// * `state` - Application state containing the services and request timeout
///
/// # Returns
///
/// Main router with health checks and API routes, wrapped in request id tracking
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .merge(create_health_router())
        .merge(create_router(state))
        .layer(middleware::from_fn(
            crate::middleware::request_id::request_id_middleware,
        ))
}

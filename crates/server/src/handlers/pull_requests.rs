//! # Pull Request Handlers
//!
//! Thin wrappers over the lifecycle engine. Input validation happens in the engine so the reported field
//! order is the same for every caller.

use axum::{http::StatusCode, Json};
use error::Result;

use crate::{
    dto::pull_requests::{
        CreatePullRequestRequest,
        MergePullRequestRequest,
        PullRequestResponse,
        ReassignPullRequestRequest,
        ReassignResponse,
    },
    AppState,
};

/// Create a pull request and assign its initial reviewers
///
/// # Returns
///
/// `201 Created` with the new snapshot
pub async fn create_pr_handler_inner(
    state: &AppState,
    req: CreatePullRequestRequest,
) -> Result<(StatusCode, Json<PullRequestResponse>)> {
    let pr = state
        .engine
        .create_pr(
            &req.pull_request_id,
            &req.pull_request_name,
            &req.author_id,
            state.deadline(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PullRequestResponse {
            pr,
        }),
    ))
}

/// Merge a pull request; merging twice returns the same snapshot
pub async fn merge_pr_handler_inner(state: &AppState, req: MergePullRequestRequest) -> Result<Json<PullRequestResponse>> {
    let pr = state
        .engine
        .merge_pr(&req.pull_request_id, state.deadline())
        .await?;
    Ok(Json(PullRequestResponse {
        pr,
    }))
}

/// Replace one reviewer with another eligible teammate
pub async fn reassign_pr_handler_inner(
    state: &AppState,
    req: ReassignPullRequestRequest,
) -> Result<Json<ReassignResponse>> {
    let outcome = state
        .engine
        .reassign_pr(&req.pull_request_id, &req.old_user_id, state.deadline())
        .await?;
    Ok(Json(outcome.into()))
}

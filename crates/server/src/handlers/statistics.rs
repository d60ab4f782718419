//! # Statistics Handlers

use axum::Json;
use error::Result;
use validator::Validate;

use crate::{
    dto::{
        teams::{TeamNameQuery, TeamStatisticsResponse},
        users::{UserIdQuery, UserStatisticsResponse},
    },
    AppState,
};

/// Authored and assigned counts for a user
pub async fn user_statistics_handler_inner(state: &AppState, query: UserIdQuery) -> Result<Json<UserStatisticsResponse>> {
    query.validate()?;

    let stats = state
        .statistics
        .user_statistics(&query.user_id, state.deadline())
        .await?;
    Ok(Json(stats))
}

/// Pull request counts for a team
pub async fn team_statistics_handler_inner(
    state: &AppState,
    query: TeamNameQuery,
) -> Result<Json<TeamStatisticsResponse>> {
    query.validate()?;

    let stats = state
        .statistics
        .team_statistics(&query.team_name, state.deadline())
        .await?;
    Ok(Json(stats))
}

//! # Team Handlers

use axum::{http::StatusCode, Json};
use error::Result;
use review::Team;
use validator::Validate;

use crate::{
    dto::teams::{AddTeamRequest, TeamNameQuery, TeamResponse},
    AppState,
};

/// Create a team and its members
///
/// # Returns
///
/// `201 Created` with the team as submitted
pub async fn add_team_handler_inner(state: &AppState, req: AddTeamRequest) -> Result<(StatusCode, Json<TeamResponse>)> {
    let team = state
        .directory
        .add_team(req.into(), state.deadline())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TeamResponse {
            team,
        }),
    ))
}

/// Get a team with its members
pub async fn get_team_handler_inner(state: &AppState, query: TeamNameQuery) -> Result<Json<Team>> {
    query.validate()?;

    let team = state
        .directory
        .get_team(&query.team_name, state.deadline())
        .await?;
    Ok(Json(team))
}

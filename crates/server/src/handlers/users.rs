//! # User Handlers

use axum::Json;
use error::Result;
use validator::Validate;

use crate::{
    dto::users::{SetIsActiveRequest, UserIdQuery, UserResponse, UserReviewsResponse},
    AppState,
};

/// Toggle a user's activity flag
pub async fn set_is_active_handler_inner(state: &AppState, req: SetIsActiveRequest) -> Result<Json<UserResponse>> {
    req.validate()?;

    let user = state
        .directory
        .set_user_is_active(&req.user_id, req.is_active, state.deadline())
        .await?;
    Ok(Json(UserResponse {
        user,
    }))
}

/// List pull requests the user currently reviews
pub async fn get_review_handler_inner(state: &AppState, query: UserIdQuery) -> Result<Json<UserReviewsResponse>> {
    query.validate()?;

    let reviews = state
        .directory
        .get_user_review(&query.user_id, state.deadline())
        .await?;
    Ok(Json(reviews))
}

//! # User Data Transfer Objects
//!
//! Request and response types for user endpoints.

use review::{User, UserReviews, UserStatistics};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to toggle a user's activity flag
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct SetIsActiveRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub user_id:   String,
    #[serde(default)]
    pub is_active: bool,
}

/// Response wrapping a single user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

/// Query selecting a user by id
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserIdQuery {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub user_id: String,
}

/// Response listing the pull requests a user reviews
pub type UserReviewsResponse = UserReviews;

/// Response for user statistics
pub type UserStatisticsResponse = UserStatistics;

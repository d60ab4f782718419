//! # Team Data Transfer Objects
//!
//! Request and response types for team endpoints.

use review::{Team, TeamMember, TeamStatistics};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A member in a team creation request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamMemberRequest {
    #[serde(default)]
    pub user_id:   String,
    #[serde(default)]
    pub username:  String,
    #[serde(default)]
    pub is_active: bool,
}

/// Request to create a team with its members
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddTeamRequest {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub members:   Vec<TeamMemberRequest>,
}

impl From<AddTeamRequest> for Team {
    fn from(req: AddTeamRequest) -> Self {
        Self {
            team_name: req.team_name,
            members:   req
                .members
                .into_iter()
                .map(|m| {
                    TeamMember {
                        user_id:   m.user_id,
                        username:  m.username,
                        is_active: m.is_active,
                    }
                })
                .collect(),
        }
    }
}

/// Response for a created team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamResponse {
    pub team: Team,
}

/// Query selecting a team by name
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TeamNameQuery {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub team_name: String,
}

/// Response for team statistics
pub type TeamStatisticsResponse = TeamStatistics;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_team_request_defaults() {
        let req: AddTeamRequest = serde_json::from_str(r#"{"members":[{"user_id":"u1"}]}"#).unwrap();
        assert_eq!(req.team_name, "");
        assert_eq!(req.members[0].username, "");
        assert!(!req.members[0].is_active);
    }

    #[test]
    fn test_add_team_request_into_team() {
        let req: AddTeamRequest = serde_json::from_str(
            r#"{"team_name":"core","members":[{"user_id":"u1","username":"Alice","is_active":true}]}"#,
        )
        .unwrap();
        let team: Team = req.into();

        assert_eq!(team.team_name, "core");
        assert_eq!(team.members, vec![TeamMember {
            user_id:   "u1".to_string(),
            username:  "Alice".to_string(),
            is_active: true,
        }]);
    }

    #[test]
    fn test_team_name_query_validation() {
        let query = TeamNameQuery::default();
        let err: error::AppError = query.validate().unwrap_err().into();
        assert_eq!(err, error::AppError::empty_field("team_name"));
    }
}

//! # Snapshots
//!
//! Materialized values returned by the engine and the directory. They are built from store rows
//! after the unit of work commits and never hold references back into the store.

use chrono::{DateTime, Utc};
use entity::{pull_requests, users, PrStatus};
use serde::{Deserialize, Serialize};

/// A member as submitted with or listed under a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub user_id:   String,
    #[serde(default)]
    pub username:  String,
    #[serde(default)]
    pub is_active: bool,
}

impl From<users::Model> for TeamMember {
    fn from(user: users::Model) -> Self {
        Self {
            user_id:   user.user_id,
            username:  user.username,
            is_active: user.is_active,
        }
    }
}

/// A team with its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub members:   Vec<TeamMember>,
}

/// A user with the name of the team it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id:   String,
    pub username:  String,
    pub team_name: String,
    pub is_active: bool,
}

impl From<users::Model> for User {
    fn from(user: users::Model) -> Self {
        Self {
            user_id:   user.user_id,
            username:  user.username,
            team_name: user.team_name,
            is_active: user.is_active,
        }
    }
}

/// Full pull request snapshot including the current reviewer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub pull_request_id:    String,
    pub pull_request_name:  String,
    pub author_id:          String,
    pub status:             PrStatus,
    /// Sorted by user id.
    pub assigned_reviewers: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at:         DateTime<Utc>,
    #[serde(rename = "mergedAt")]
    pub merged_at:          Option<DateTime<Utc>>,
}

impl PullRequest {
    /// Build a snapshot from a row and the reviewer ids currently assigned to it.
    pub fn from_row(row: pull_requests::Model, mut reviewers: Vec<String>) -> Self {
        reviewers.sort_unstable();
        Self {
            pull_request_id:    row.pr_id,
            pull_request_name:  row.pr_name,
            author_id:          row.author_id,
            status:             row.status,
            assigned_reviewers: reviewers,
            created_at:         row.created_at,
            merged_at:          row.merged_at,
        }
    }

    /// Whether `user_id` is currently on the reviewer set.
    pub fn has_reviewer(&self, user_id: &str) -> bool { self.assigned_reviewers.iter().any(|r| r == user_id) }
}

/// Pull request without reviewers or timestamps, as listed for a reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestShort {
    pub pull_request_id:   String,
    pub pull_request_name: String,
    pub author_id:         String,
    pub status:            PrStatus,
}

impl From<pull_requests::Model> for PullRequestShort {
    fn from(row: pull_requests::Model) -> Self {
        Self {
            pull_request_id:   row.pr_id,
            pull_request_name: row.pr_name,
            author_id:         row.author_id,
            status:            row.status,
        }
    }
}

/// Pull requests a user is currently assigned to review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReviews {
    pub user_id:       String,
    pub pull_requests: Vec<PullRequestShort>,
}

/// Outcome of a successful reassignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reassignment {
    pub pr:          PullRequest,
    pub replaced_by: String,
}

/// Per-user counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatistics {
    pub user_id:                String,
    pub username:               String,
    pub team_name:              String,
    pub assigned_reviews_count: u64,
    pub authored_prs_count:     u64,
}

/// Per-team counters over pull requests authored by team members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStatistics {
    pub team_name:  String,
    pub total_prs:  u64,
    pub merged_prs: u64,
    pub open_prs:   u64,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn row() -> pull_requests::Model {
        pull_requests::Model {
            pr_id:      "pr-1".to_string(),
            pr_name:    "Add search".to_string(),
            author_id:  "u1".to_string(),
            status:     PrStatus::Open,
            created_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
            merged_at:  None,
        }
    }

    #[test]
    fn test_snapshot_sorts_reviewers() {
        let pr = PullRequest::from_row(row(), vec!["u3".to_string(), "u2".to_string()]);
        assert_eq!(pr.assigned_reviewers, vec!["u2", "u3"]);
        assert!(pr.has_reviewer("u3"));
        assert!(!pr.has_reviewer("u1"));
    }

    #[test]
    fn test_snapshot_json_shape() {
        let pr = PullRequest::from_row(row(), vec!["u2".to_string()]);
        let json = serde_json::to_value(&pr).unwrap();

        assert_eq!(json["pull_request_id"], "pr-1");
        assert_eq!(json["pull_request_name"], "Add search");
        assert_eq!(json["status"], "OPEN");
        assert_eq!(json["assigned_reviewers"][0], "u2");
        assert!(json["createdAt"].is_string());
        assert!(json["mergedAt"].is_null());
    }

    #[test]
    fn test_team_member_defaults() {
        let member: TeamMember = serde_json::from_str(r#"{"username":"bob"}"#).unwrap();
        assert_eq!(member.user_id, "");
        assert!(!member.is_active);
    }
}

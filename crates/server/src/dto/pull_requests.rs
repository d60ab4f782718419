//! # Pull Request Data Transfer Objects

use review::PullRequest;
use serde::{Deserialize, Serialize};

/// Request to create a pull request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePullRequestRequest {
    #[serde(default)]
    pub pull_request_id:   String,
    #[serde(default)]
    pub pull_request_name: String,
    #[serde(default)]
    pub author_id:         String,
}

/// Request to merge a pull request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MergePullRequestRequest {
    #[serde(default)]
    pub pull_request_id: String,
}

/// Request to replace one reviewer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReassignPullRequestRequest {
    #[serde(default)]
    pub pull_request_id: String,
    #[serde(default, alias = "old_reviewer_id")]
    pub old_user_id:     String,
}

/// Response wrapping a pull request snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestResponse {
    pub pr: PullRequest,
}

/// Response for a reassignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignResponse {
    pub pr:          PullRequest,
    pub replaced_by: String,
}

impl From<review::Reassignment> for ReassignResponse {
    fn from(outcome: review::Reassignment) -> Self {
        Self {
            pr:          outcome.pr,
            replaced_by: outcome.replaced_by,
        }
    }
}

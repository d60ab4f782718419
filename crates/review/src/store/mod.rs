//! # Stores
//!
//! Capability traits over the relational store. Every method takes the connection it runs on, so the
//! engine can pass one open transaction through all the calls of a single operation and commit once.
//!
//! [`SeaStore`] implements both traits with Sea-ORM. The traits hold no business rules beyond existence
//! lookups; uniqueness is enforced by the schema and surfaced through [`is_unique_violation`].

mod directory;
mod pull_requests;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::{pull_requests::Model as PullRequestRow, users::Model as UserRow};
use sea_orm::{ConnectionTrait, DbErr, SqlErr};

/// Team and user records.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn team_exists<C: ConnectionTrait>(&self, conn: &C, team_name: &str) -> Result<bool, DbErr>;

    async fn insert_team<C: ConnectionTrait>(&self, conn: &C, team_name: &str) -> Result<(), DbErr>;

    async fn insert_user<C: ConnectionTrait>(&self, conn: &C, user: UserRow) -> Result<(), DbErr>;

    async fn find_user<C: ConnectionTrait>(&self, conn: &C, user_id: &str) -> Result<Option<UserRow>, DbErr>;

    /// Users already present among `user_ids`.
    async fn existing_user_ids<C: ConnectionTrait>(&self, conn: &C, user_ids: &[String]) -> Result<Vec<String>, DbErr>;

    /// Members of a team ordered by user id.
    async fn team_members<C: ConnectionTrait>(&self, conn: &C, team_name: &str) -> Result<Vec<UserRow>, DbErr>;

    /// Ids of active members of a team ordered by user id.
    async fn active_member_ids<C: ConnectionTrait>(&self, conn: &C, team_name: &str) -> Result<Vec<String>, DbErr>;

    /// Set the activity flag, returning the updated row or `None` when the user does not exist.
    async fn set_user_active<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: &str,
        is_active: bool,
    ) -> Result<Option<UserRow>, DbErr>;
}

/// Pull request records and the reviewer relation.
#[async_trait]
pub trait PullRequestStore: Send + Sync {
    async fn insert_pull_request<C: ConnectionTrait>(&self, conn: &C, row: PullRequestRow) -> Result<(), DbErr>;

    async fn find_pull_request<C: ConnectionTrait>(
        &self,
        conn: &C,
        pr_id: &str,
    ) -> Result<Option<PullRequestRow>, DbErr>;

    /// Point lookup that locks the row until the enclosing transaction ends.
    async fn lock_pull_request<C: ConnectionTrait>(
        &self,
        conn: &C,
        pr_id: &str,
    ) -> Result<Option<PullRequestRow>, DbErr>;

    /// Move an `OPEN` pull request to `MERGED`. Returns whether a row changed.
    async fn mark_merged<C: ConnectionTrait>(
        &self,
        conn: &C,
        pr_id: &str,
        merged_at: DateTime<Utc>,
    ) -> Result<bool, DbErr>;

    /// Reviewer ids ordered by user id.
    async fn reviewer_ids<C: ConnectionTrait>(&self, conn: &C, pr_id: &str) -> Result<Vec<String>, DbErr>;

    async fn add_reviewers<C: ConnectionTrait>(&self, conn: &C, pr_id: &str, user_ids: &[String]) -> Result<(), DbErr>;

    /// Returns whether the association existed.
    async fn remove_reviewer<C: ConnectionTrait>(&self, conn: &C, pr_id: &str, user_id: &str) -> Result<bool, DbErr>;

    /// Pull requests `user_id` currently reviews, ordered by pull request id.
    async fn reviewed_by<C: ConnectionTrait>(&self, conn: &C, user_id: &str) -> Result<Vec<PullRequestRow>, DbErr>;

    async fn count_authored<C: ConnectionTrait>(&self, conn: &C, user_id: &str) -> Result<u64, DbErr>;

    async fn count_assigned<C: ConnectionTrait>(&self, conn: &C, user_id: &str) -> Result<u64, DbErr>;

    /// `(total, merged)` over pull requests authored by members of `team_name`.
    async fn count_team_pull_requests<C: ConnectionTrait>(&self, conn: &C, team_name: &str)
        -> Result<(u64, u64), DbErr>;
}

/// Sea-ORM backed store.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaStore;

/// Whether a store error is a unique or primary key violation.
///
/// SQLite reports primary key collisions with an extended code that Sea-ORM does not classify, so the
/// driver message is checked as well.
pub fn is_unique_violation(err: &DbErr) -> bool {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return true;
    }
    let message = err.to_string();
    message.contains("UNIQUE constraint failed") || message.contains("duplicate key value")
}

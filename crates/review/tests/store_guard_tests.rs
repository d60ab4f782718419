//! # Store Guard Tests
//!
//! Engine behaviour when the store disagrees with what the in-transaction reads reported: the schema's
//! primary key is the last word on duplicate ids, and the merge snapshot is whatever the store holds.

mod common;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{deadline, seed_team, test_db};
use entity::{
    pull_requests::Model as PullRequestRow,
    users::Model as UserRow,
    PrStatus,
    ReviewerAssignments,
};
use error::AppError;
use review::{DirectoryStore, PullRequestStore, ReviewEngine, ReviewerSelector, SeaStore};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};

/// Sea-ORM store that misreports selected outcomes.
#[derive(Debug, Clone, Copy, Default)]
struct SkewedStore {
    /// Point lookups of pull requests find nothing, as if a racing creator had not committed yet.
    hide_pull_requests: bool,
    /// `mark_merged` writes but reports no change, as if another merge had won.
    lose_merge_race:    bool,
}

#[async_trait]
impl DirectoryStore for SkewedStore {
    async fn team_exists<C: ConnectionTrait>(&self, conn: &C, team_name: &str) -> Result<bool, DbErr> {
        SeaStore.team_exists(conn, team_name).await
    }

    async fn insert_team<C: ConnectionTrait>(&self, conn: &C, team_name: &str) -> Result<(), DbErr> {
        SeaStore.insert_team(conn, team_name).await
    }

    async fn insert_user<C: ConnectionTrait>(&self, conn: &C, user: UserRow) -> Result<(), DbErr> {
        SeaStore.insert_user(conn, user).await
    }

    async fn find_user<C: ConnectionTrait>(&self, conn: &C, user_id: &str) -> Result<Option<UserRow>, DbErr> {
        SeaStore.find_user(conn, user_id).await
    }

    async fn existing_user_ids<C: ConnectionTrait>(&self, conn: &C, user_ids: &[String]) -> Result<Vec<String>, DbErr> {
        SeaStore.existing_user_ids(conn, user_ids).await
    }

    async fn team_members<C: ConnectionTrait>(&self, conn: &C, team_name: &str) -> Result<Vec<UserRow>, DbErr> {
        SeaStore.team_members(conn, team_name).await
    }

    async fn active_member_ids<C: ConnectionTrait>(&self, conn: &C, team_name: &str) -> Result<Vec<String>, DbErr> {
        SeaStore.active_member_ids(conn, team_name).await
    }

    async fn set_user_active<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: &str,
        is_active: bool,
    ) -> Result<Option<UserRow>, DbErr> {
        SeaStore.set_user_active(conn, user_id, is_active).await
    }
}

#[async_trait]
impl PullRequestStore for SkewedStore {
    async fn insert_pull_request<C: ConnectionTrait>(&self, conn: &C, row: PullRequestRow) -> Result<(), DbErr> {
        SeaStore.insert_pull_request(conn, row).await
    }

    async fn find_pull_request<C: ConnectionTrait>(
        &self,
        conn: &C,
        pr_id: &str,
    ) -> Result<Option<PullRequestRow>, DbErr> {
        if self.hide_pull_requests {
            return Ok(None);
        }
        SeaStore.find_pull_request(conn, pr_id).await
    }

    async fn lock_pull_request<C: ConnectionTrait>(
        &self,
        conn: &C,
        pr_id: &str,
    ) -> Result<Option<PullRequestRow>, DbErr> {
        SeaStore.lock_pull_request(conn, pr_id).await
    }

    async fn mark_merged<C: ConnectionTrait>(
        &self,
        conn: &C,
        pr_id: &str,
        merged_at: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let changed = SeaStore.mark_merged(conn, pr_id, merged_at).await?;
        Ok(changed && !self.lose_merge_race)
    }

    async fn reviewer_ids<C: ConnectionTrait>(&self, conn: &C, pr_id: &str) -> Result<Vec<String>, DbErr> {
        SeaStore.reviewer_ids(conn, pr_id).await
    }

    async fn add_reviewers<C: ConnectionTrait>(&self, conn: &C, pr_id: &str, user_ids: &[String]) -> Result<(), DbErr> {
        SeaStore.add_reviewers(conn, pr_id, user_ids).await
    }

    async fn remove_reviewer<C: ConnectionTrait>(&self, conn: &C, pr_id: &str, user_id: &str) -> Result<bool, DbErr> {
        SeaStore.remove_reviewer(conn, pr_id, user_id).await
    }

    async fn reviewed_by<C: ConnectionTrait>(&self, conn: &C, user_id: &str) -> Result<Vec<PullRequestRow>, DbErr> {
        SeaStore.reviewed_by(conn, user_id).await
    }

    async fn count_authored<C: ConnectionTrait>(&self, conn: &C, user_id: &str) -> Result<u64, DbErr> {
        SeaStore.count_authored(conn, user_id).await
    }

    async fn count_assigned<C: ConnectionTrait>(&self, conn: &C, user_id: &str) -> Result<u64, DbErr> {
        SeaStore.count_assigned(conn, user_id).await
    }

    async fn count_team_pull_requests<C: ConnectionTrait>(
        &self,
        conn: &C,
        team_name: &str,
    ) -> Result<(u64, u64), DbErr> {
        SeaStore.count_team_pull_requests(conn, team_name).await
    }
}

fn skewed_engine(db: &DatabaseConnection, store: SkewedStore, seed: u64) -> ReviewEngine<SkewedStore> {
    ReviewEngine::with_parts(db.clone(), store, ReviewerSelector::seeded(seed))
}

async fn assignment_rows(db: &DatabaseConnection) -> u64 { ReviewerAssignments::find().count(db).await.unwrap() }

#[tokio::test]
async fn test_primary_key_rejects_create_missed_by_lookup() {
    let db = test_db().await;
    seed_team(&db, "core", &[("a", true), ("r1", true), ("r2", true), ("r3", true)]).await;

    let original = skewed_engine(&db, SkewedStore::default(), 1)
        .create_pr("pr-1", "First", "a", deadline())
        .await
        .unwrap();
    let rows_before = assignment_rows(&db).await;

    let blind = SkewedStore {
        hide_pull_requests: true,
        ..SkewedStore::default()
    };
    let err = skewed_engine(&db, blind, 2)
        .create_pr("pr-1", "Second", "r1", deadline())
        .await
        .unwrap_err();

    assert_eq!(err, AppError::PrExists);
    let stored = SeaStore.find_pull_request(&db, "pr-1").await.unwrap().unwrap();
    assert_eq!(stored.pr_name, "First");
    assert_eq!(stored.author_id, "a");
    assert_eq!(stored.status, PrStatus::Open);
    assert_eq!(SeaStore.reviewer_ids(&db, "pr-1").await.unwrap(), original.assigned_reviewers);
    assert_eq!(assignment_rows(&db).await, rows_before);
}

#[tokio::test]
async fn test_merge_snapshot_reflects_store_when_merge_reports_no_change() {
    let db = test_db().await;
    seed_team(&db, "core", &[("a", true), ("r1", true), ("r2", true)]).await;
    let store = SkewedStore {
        lose_merge_race: true,
        ..SkewedStore::default()
    };
    let engine = skewed_engine(&db, store, 3);
    let created = engine.create_pr("pr-1", "x", "a", deadline()).await.unwrap();

    let merged = engine.merge_pr("pr-1", deadline()).await.unwrap();

    assert_eq!(merged.status, PrStatus::Merged);
    assert!(merged.merged_at.is_some());
    assert_eq!(merged.assigned_reviewers, created.assigned_reviewers);
    let stored = SeaStore.find_pull_request(&db, "pr-1").await.unwrap().unwrap();
    assert_eq!(stored.merged_at, merged.merged_at);
}

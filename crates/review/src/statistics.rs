//! # Statistics
//!
//! Read-only rollups. Each call reads inside one transaction so its counters come from a single snapshot;
//! they may trail writes that are still in flight.

use error::{AppError, Result};
use sea_orm::DatabaseConnection;

use crate::{
    atomically,
    model::{TeamStatistics, UserStatistics},
    require,
    store::{DirectoryStore, PullRequestStore, SeaStore},
    Deadline,
};

/// Counters over the directory and pull request stores.
#[derive(Debug, Clone)]
pub struct StatisticsService<S = SeaStore> {
    db:    DatabaseConnection,
    store: S,
}

impl StatisticsService<SeaStore> {
    pub fn new(db: DatabaseConnection) -> Self { Self::with_store(db, SeaStore) }
}

impl<S> StatisticsService<S>
where
    S: DirectoryStore + PullRequestStore + Clone + 'static,
{
    pub fn with_store(db: DatabaseConnection, store: S) -> Self {
        Self {
            db,
            store,
        }
    }

    /// Authored and assigned counts for one user.
    ///
    /// # Errors
    ///
    /// `EmptyField` for an empty id, `NotFound` for an unknown user.
    pub async fn user_statistics(&self, user_id: &str, deadline: Deadline) -> Result<UserStatistics> {
        require("user_id", user_id)?;

        let store = self.store.clone();
        let user_id = user_id.to_string();

        atomically(&self.db, deadline, "user_statistics", move |txn| {
            Box::pin(async move {
                let user = store
                    .find_user(txn, &user_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("user not found"))?;

                let assigned_reviews_count = store.count_assigned(txn, &user.user_id).await?;
                let authored_prs_count = store.count_authored(txn, &user.user_id).await?;

                Ok(UserStatistics {
                    user_id: user.user_id,
                    username: user.username,
                    team_name: user.team_name,
                    assigned_reviews_count,
                    authored_prs_count,
                })
            })
        })
        .await
    }

    /// Pull request counts over everything authored by members of a team.
    ///
    /// # Errors
    ///
    /// `EmptyField` for an empty name, `NotFound` for an unknown team.
    pub async fn team_statistics(&self, team_name: &str, deadline: Deadline) -> Result<TeamStatistics> {
        require("team_name", team_name)?;

        let store = self.store.clone();
        let team_name = team_name.to_string();

        atomically(&self.db, deadline, "team_statistics", move |txn| {
            Box::pin(async move {
                if !store.team_exists(txn, &team_name).await? {
                    return Err(AppError::not_found("team not found"));
                }

                let (total_prs, merged_prs) = store.count_team_pull_requests(txn, &team_name).await?;

                Ok(TeamStatistics {
                    team_name,
                    total_prs,
                    merged_prs,
                    open_prs: total_prs.saturating_sub(merged_prs),
                })
            })
        })
        .await
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::{
    pull_requests::{self, Column as PrColumn, Model as PullRequestRow},
    reviewer_assignments::{self, Column as AssignmentColumn},
    users::Column as UserColumn,
    PrStatus,
    PullRequests,
    ReviewerAssignments,
};
use sea_orm::{
    sea_query::Expr,
    ColumnTrait,
    ConnectionTrait,
    DbErr,
    EntityTrait,
    JoinType,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    QuerySelect,
    RelationTrait,
    Set,
};

use super::{PullRequestStore, SeaStore};

#[async_trait]
impl PullRequestStore for SeaStore {
    async fn insert_pull_request<C: ConnectionTrait>(&self, conn: &C, row: PullRequestRow) -> Result<(), DbErr> {
        let pr = pull_requests::ActiveModel {
            pr_id:      Set(row.pr_id),
            pr_name:    Set(row.pr_name),
            author_id:  Set(row.author_id),
            status:     Set(row.status),
            created_at: Set(row.created_at),
            merged_at:  Set(row.merged_at),
        };
        PullRequests::insert(pr).exec_without_returning(conn).await?;
        Ok(())
    }

    async fn find_pull_request<C: ConnectionTrait>(
        &self,
        conn: &C,
        pr_id: &str,
    ) -> Result<Option<PullRequestRow>, DbErr> {
        PullRequests::find_by_id(pr_id).one(conn).await
    }

    async fn lock_pull_request<C: ConnectionTrait>(
        &self,
        conn: &C,
        pr_id: &str,
    ) -> Result<Option<PullRequestRow>, DbErr> {
        // FOR UPDATE is dropped by the SQLite builder; SQLite serializes writers instead
        PullRequests::find_by_id(pr_id)
            .lock_exclusive()
            .one(conn)
            .await
    }

    async fn mark_merged<C: ConnectionTrait>(
        &self,
        conn: &C,
        pr_id: &str,
        merged_at: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = PullRequests::update_many()
            .col_expr(PrColumn::Status, Expr::value(PrStatus::Merged))
            .col_expr(PrColumn::MergedAt, Expr::value(Some(merged_at)))
            .filter(PrColumn::PrId.eq(pr_id))
            .filter(PrColumn::Status.eq(PrStatus::Open))
            .exec(conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn reviewer_ids<C: ConnectionTrait>(&self, conn: &C, pr_id: &str) -> Result<Vec<String>, DbErr> {
        ReviewerAssignments::find()
            .select_only()
            .column(AssignmentColumn::UserId)
            .filter(AssignmentColumn::PrId.eq(pr_id))
            .order_by_asc(AssignmentColumn::UserId)
            .into_tuple::<String>()
            .all(conn)
            .await
    }

    async fn add_reviewers<C: ConnectionTrait>(&self, conn: &C, pr_id: &str, user_ids: &[String]) -> Result<(), DbErr> {
        if user_ids.is_empty() {
            return Ok(());
        }

        let rows = user_ids.iter().map(|user_id| {
            reviewer_assignments::ActiveModel {
                pr_id:   Set(pr_id.to_string()),
                user_id: Set(user_id.clone()),
            }
        });
        ReviewerAssignments::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    async fn remove_reviewer<C: ConnectionTrait>(&self, conn: &C, pr_id: &str, user_id: &str) -> Result<bool, DbErr> {
        let result = ReviewerAssignments::delete_many()
            .filter(AssignmentColumn::PrId.eq(pr_id))
            .filter(AssignmentColumn::UserId.eq(user_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn reviewed_by<C: ConnectionTrait>(&self, conn: &C, user_id: &str) -> Result<Vec<PullRequestRow>, DbErr> {
        PullRequests::find()
            .join(JoinType::InnerJoin, pull_requests::Relation::ReviewerAssignments.def())
            .filter(AssignmentColumn::UserId.eq(user_id))
            .order_by_asc(PrColumn::PrId)
            .all(conn)
            .await
    }

    async fn count_authored<C: ConnectionTrait>(&self, conn: &C, user_id: &str) -> Result<u64, DbErr> {
        PullRequests::find()
            .filter(PrColumn::AuthorId.eq(user_id))
            .count(conn)
            .await
    }

    async fn count_assigned<C: ConnectionTrait>(&self, conn: &C, user_id: &str) -> Result<u64, DbErr> {
        ReviewerAssignments::find()
            .filter(AssignmentColumn::UserId.eq(user_id))
            .count(conn)
            .await
    }

    async fn count_team_pull_requests<C: ConnectionTrait>(
        &self,
        conn: &C,
        team_name: &str,
    ) -> Result<(u64, u64), DbErr> {
        let authored_by_team = || {
            PullRequests::find()
                .join(JoinType::InnerJoin, pull_requests::Relation::Author.def())
                .filter(UserColumn::TeamName.eq(team_name))
        };

        let total = authored_by_team().count(conn).await?;
        let merged = authored_by_team()
            .filter(PrColumn::Status.eq(PrStatus::Merged))
            .count(conn)
            .await?;
        Ok((total, merged))
    }
}

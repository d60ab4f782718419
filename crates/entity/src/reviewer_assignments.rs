//! Reviewer Assignments Entity
//!
//! The many-to-many relation between pull requests and their reviewers. The composite key forbids
//! assigning the same reviewer twice. Reassignment deletes the old row and inserts a new one, so no history
//! is kept.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "reviewer_x_pr")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pr_id:   String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pull_requests::Entity",
        from = "Column::PrId",
        to = "super::pull_requests::Column::PrId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    PullRequest,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::UserId",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Reviewer,
}

impl Related<super::pull_requests::Entity> for Entity {
    fn to() -> RelationDef { Relation::PullRequest.def() }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Reviewer.def() }
}

impl ActiveModelBehavior for ActiveModel {}

//! Pull Requests Entity
//!
//! A pull request row. `status` only ever moves from `OPEN` to `MERGED`, and `merged_at` is written once
//! at that transition.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "pr")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pr_id:      String,
    pub pr_name:    String,
    pub author_id:  String,
    pub status:     PrStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub merged_at:  Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::UserId",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Author,
    #[sea_orm(has_many = "super::reviewer_assignments::Entity")]
    ReviewerAssignments,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Author.def() }
}

impl Related<super::reviewer_assignments::Entity> for Entity {
    fn to() -> RelationDef { Relation::ReviewerAssignments.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Pull request lifecycle state
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrStatus {
    /// Accepting reviewer changes
    #[sea_orm(string_value = "OPEN")]
    Open,
    /// Terminal state
    #[sea_orm(string_value = "MERGED")]
    Merged,
}

impl PrStatus {
    /// Whether no further transition is defined from this state.
    pub fn is_terminal(&self) -> bool { matches!(self, PrStatus::Merged) }
}

impl std::fmt::Display for PrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrStatus::Open => write!(f, "OPEN"),
            PrStatus::Merged => write!(f, "MERGED"),
        }
    }
}

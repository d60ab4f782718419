use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20250101_000002_create_users_table::Users, m20250101_000003_create_pr_table::Pr};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The composite key is what rejects a duplicate reviewer on the same PR
        manager
            .create_table(
                Table::create()
                    .table(ReviewerXPr::Table)
                    .if_not_exists()
                    .col(string(ReviewerXPr::PrId).not_null())
                    .col(string(ReviewerXPr::UserId).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_reviewer_x_pr")
                            .col(ReviewerXPr::PrId)
                            .col(ReviewerXPr::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviewer_x_pr_pr_id")
                            .from(ReviewerXPr::Table, ReviewerXPr::PrId)
                            .to(Pr::Table, Pr::PrId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviewer_x_pr_user_id")
                            .from(ReviewerXPr::Table, ReviewerXPr::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // GetUserReview and reviewer statistics look rows up by user
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reviewer_x_pr_user_id")
                    .table(ReviewerXPr::Table)
                    .col(ReviewerXPr::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReviewerXPr::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ReviewerXPr {
    Table,
    PrId,
    UserId,
}

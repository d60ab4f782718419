use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250101_000002_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Status is a short string rather than a native enum so the schema stays portable
        manager
            .create_table(
                Table::create()
                    .table(Pr::Table)
                    .if_not_exists()
                    .col(string(Pr::PrId).not_null().primary_key())
                    .col(string(Pr::PrName).not_null())
                    .col(string(Pr::AuthorId).not_null())
                    .col(string_len(Pr::Status, 16).not_null().default("OPEN"))
                    .col(timestamp_with_time_zone(Pr::CreatedAt).not_null())
                    .col(timestamp_with_time_zone_null(Pr::MergedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pr_author_id")
                            .from(Pr::Table, Pr::AuthorId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pr_author_id")
                    .table(Pr::Table)
                    .col(Pr::AuthorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pr::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Pr {
    Table,
    PrId,
    PrName,
    AuthorId,
    Status,
    CreatedAt,
    MergedAt,
}

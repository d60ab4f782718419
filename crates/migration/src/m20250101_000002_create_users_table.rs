use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250101_000001_create_team_table::Team;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Foreign keys are declared inline because SQLite cannot add them to an existing table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(string(Users::UserId).not_null().primary_key())
                    .col(string(Users::Username).not_null())
                    .col(string(Users::TeamName).not_null())
                    .col(boolean(Users::IsActive).not_null().default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_team_name")
                            .from(Users::Table, Users::TeamName)
                            .to(Team::Table, Team::TeamName)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // Candidate pools are always read per team
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_team_name")
                    .table(Users::Table)
                    .col(Users::TeamName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    UserId,
    Username,
    TeamName,
    IsActive,
}

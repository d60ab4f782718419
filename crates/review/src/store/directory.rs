use async_trait::async_trait;
use entity::{
    teams,
    users::{self, Column as UserColumn, Model as UserRow},
    Teams,
    Users,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use super::{DirectoryStore, SeaStore};

#[async_trait]
impl DirectoryStore for SeaStore {
    async fn team_exists<C: ConnectionTrait>(&self, conn: &C, team_name: &str) -> Result<bool, DbErr> {
        Ok(Teams::find_by_id(team_name).one(conn).await?.is_some())
    }

    async fn insert_team<C: ConnectionTrait>(&self, conn: &C, team_name: &str) -> Result<(), DbErr> {
        let team = teams::ActiveModel {
            team_name: Set(team_name.to_string()),
        };
        Teams::insert(team).exec_without_returning(conn).await?;
        Ok(())
    }

    async fn insert_user<C: ConnectionTrait>(&self, conn: &C, user: UserRow) -> Result<(), DbErr> {
        let user = users::ActiveModel {
            user_id:   Set(user.user_id),
            username:  Set(user.username),
            team_name: Set(user.team_name),
            is_active: Set(user.is_active),
        };
        Users::insert(user).exec_without_returning(conn).await?;
        Ok(())
    }

    async fn find_user<C: ConnectionTrait>(&self, conn: &C, user_id: &str) -> Result<Option<UserRow>, DbErr> {
        Users::find_by_id(user_id).one(conn).await
    }

    async fn existing_user_ids<C: ConnectionTrait>(&self, conn: &C, user_ids: &[String]) -> Result<Vec<String>, DbErr> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        Users::find()
            .select_only()
            .column(UserColumn::UserId)
            .filter(UserColumn::UserId.is_in(user_ids.iter().cloned()))
            .order_by_asc(UserColumn::UserId)
            .into_tuple::<String>()
            .all(conn)
            .await
    }

    async fn team_members<C: ConnectionTrait>(&self, conn: &C, team_name: &str) -> Result<Vec<UserRow>, DbErr> {
        Users::find()
            .filter(UserColumn::TeamName.eq(team_name))
            .order_by_asc(UserColumn::UserId)
            .all(conn)
            .await
    }

    async fn active_member_ids<C: ConnectionTrait>(&self, conn: &C, team_name: &str) -> Result<Vec<String>, DbErr> {
        Users::find()
            .select_only()
            .column(UserColumn::UserId)
            .filter(UserColumn::TeamName.eq(team_name))
            .filter(UserColumn::IsActive.eq(true))
            .order_by_asc(UserColumn::UserId)
            .into_tuple::<String>()
            .all(conn)
            .await
    }

    async fn set_user_active<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: &str,
        is_active: bool,
    ) -> Result<Option<UserRow>, DbErr> {
        let Some(user) = Users::find_by_id(user_id).one(conn).await?
        else {
            return Ok(None);
        };

        if user.is_active == is_active {
            return Ok(Some(user));
        }

        let mut active: users::ActiveModel = user.into();
        active.is_active = Set(is_active);
        active.update(conn).await.map(Some)
    }
}

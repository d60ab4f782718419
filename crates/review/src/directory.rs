//! # Directory
//!
//! Team and user operations. Membership is fixed when a team is created; the activity flag is the only
//! thing that changes afterwards.

use std::collections::HashSet;

use entity::users;
use error::{AppError, Result};
use logging::log_directory_event;
use sea_orm::DatabaseConnection;

use crate::{
    atomically,
    model::{PullRequestShort, Team, TeamMember, User, UserReviews},
    require,
    store::{is_unique_violation, DirectoryStore, PullRequestStore, SeaStore},
    Deadline,
};

/// Team and user plumbing over the stores.
#[derive(Debug, Clone)]
pub struct DirectoryService<S = SeaStore> {
    db:    DatabaseConnection,
    store: S,
}

impl DirectoryService<SeaStore> {
    pub fn new(db: DatabaseConnection) -> Self { Self::with_store(db, SeaStore) }
}

impl<S> DirectoryService<S>
where
    S: DirectoryStore + PullRequestStore + Clone + 'static,
{
    pub fn with_store(db: DatabaseConnection, store: S) -> Self {
        Self {
            db,
            store,
        }
    }

    /// Create a team together with all of its members.
    ///
    /// The team row and every member row commit together or not at all.
    ///
    /// # Errors
    ///
    /// Inputs are checked in order: `team_name`, then a non-empty member list, then each `user_id`.
    /// `TeamExists` when the name is taken, `UserExists` when a member id repeats within the request or
    /// is already in the directory.
    pub async fn add_team(&self, team: Team, deadline: Deadline) -> Result<Team> {
        require("team_name", &team.team_name)?;
        if team.members.is_empty() {
            return Err(AppError::empty_field("members"));
        }
        for member in &team.members {
            require("user_id", &member.user_id)?;
        }

        let mut seen = HashSet::with_capacity(team.members.len());
        if let Some(duplicate) = team
            .members
            .iter()
            .find(|member| !seen.insert(member.user_id.as_str()))
        {
            return Err(AppError::user_exists(&duplicate.user_id));
        }

        let store = self.store.clone();
        let submitted = team.clone();

        atomically(&self.db, deadline, "add_team", move |txn| {
            Box::pin(async move {
                if store.team_exists(txn, &team.team_name).await? {
                    return Err(AppError::TeamExists);
                }

                let ids: Vec<String> = team.members.iter().map(|m| m.user_id.clone()).collect();
                if let Some(existing) = store.existing_user_ids(txn, &ids).await?.into_iter().next() {
                    return Err(AppError::user_exists(existing));
                }

                match store.insert_team(txn, &team.team_name).await {
                    Ok(()) => {},
                    Err(err) if is_unique_violation(&err) => return Err(AppError::TeamExists),
                    Err(err) => return Err(err.into()),
                }

                for member in team.members {
                    let user_id = member.user_id.clone();
                    let row = users::Model {
                        user_id:   member.user_id,
                        username:  member.username,
                        team_name: team.team_name.clone(),
                        is_active: member.is_active,
                    };
                    match store.insert_user(txn, row).await {
                        Ok(()) => {},
                        Err(err) if is_unique_violation(&err) => return Err(AppError::user_exists(user_id)),
                        Err(err) => return Err(err.into()),
                    }
                }
                Ok(())
            })
        })
        .await?;

        log_directory_event!(
            "team_added",
            team_name = submitted.team_name.as_str(),
            members = submitted.members.len()
        );
        Ok(submitted)
    }

    /// Look up a team and its members, ordered by user id.
    pub async fn get_team(&self, team_name: &str, deadline: Deadline) -> Result<Team> {
        require("team_name", team_name)?;

        let store = self.store.clone();
        let team_name = team_name.to_string();

        atomically(&self.db, deadline, "get_team", move |txn| {
            Box::pin(async move {
                if !store.team_exists(txn, &team_name).await? {
                    return Err(AppError::not_found("team not found"));
                }
                let members = store.team_members(txn, &team_name).await?;

                Ok(Team {
                    team_name,
                    members: members.into_iter().map(TeamMember::from).collect(),
                })
            })
        })
        .await
    }

    /// Set the activity flag of a user.
    ///
    /// Existing reviewer assignments are left alone; an inactive user only stops being a candidate.
    pub async fn set_user_is_active(&self, user_id: &str, is_active: bool, deadline: Deadline) -> Result<User> {
        require("user_id", user_id)?;

        let store = self.store.clone();
        let user_key = user_id.to_string();

        let user = atomically(&self.db, deadline, "set_user_is_active", move |txn| {
            Box::pin(async move {
                store
                    .set_user_active(txn, &user_key, is_active)
                    .await?
                    .map(User::from)
                    .ok_or_else(|| AppError::not_found("user not found"))
            })
        })
        .await?;

        log_directory_event!("user_activity_changed", user_id = user_id, is_active = is_active);
        Ok(user)
    }

    /// Pull requests the user is currently assigned to review, ordered by pull request id.
    pub async fn get_user_review(&self, user_id: &str, deadline: Deadline) -> Result<UserReviews> {
        require("user_id", user_id)?;

        let store = self.store.clone();
        let user_id = user_id.to_string();

        atomically(&self.db, deadline, "get_user_review", move |txn| {
            Box::pin(async move {
                if store.find_user(txn, &user_id).await?.is_none() {
                    return Err(AppError::not_found("user not found"));
                }
                let rows = store.reviewed_by(txn, &user_id).await?;

                Ok(UserReviews {
                    user_id,
                    pull_requests: rows.into_iter().map(PullRequestShort::from).collect(),
                })
            })
        })
        .await
    }
}

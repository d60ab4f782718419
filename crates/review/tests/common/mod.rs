//! Shared harness for the review integration tests.

#![allow(dead_code)]

use std::{sync::Once, time::Duration};

use migration::{Migrator, MigratorTrait};
use review::{Deadline, DirectoryService, ReviewEngine, ReviewerSelector, SeaStore, StatisticsService, Team, TeamMember};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

static INIT: Once = Once::new();

/// Route tracing output through the test writer once per binary.
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

/// A fresh, migrated in-memory database.
///
/// The pool holds exactly one connection so every test sees the same in-memory database.
pub async fn test_db() -> DatabaseConnection {
    init_test_env();

    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn deadline() -> Deadline { Deadline::after(Duration::from_secs(5)) }

pub fn engine(db: &DatabaseConnection, seed: u64) -> ReviewEngine {
    ReviewEngine::with_parts(db.clone(), SeaStore, ReviewerSelector::seeded(seed))
}

pub fn directory(db: &DatabaseConnection) -> DirectoryService { DirectoryService::new(db.clone()) }

pub fn statistics(db: &DatabaseConnection) -> StatisticsService { StatisticsService::new(db.clone()) }

pub fn member(user_id: &str, is_active: bool) -> TeamMember {
    TeamMember {
        user_id: user_id.to_string(),
        username: format!("{}-name", user_id),
        is_active,
    }
}

pub fn team(team_name: &str, members: &[(&str, bool)]) -> Team {
    Team {
        team_name: team_name.to_string(),
        members:   members
            .iter()
            .map(|(id, active)| member(id, *active))
            .collect(),
    }
}

/// Insert a team through the directory service.
pub async fn seed_team(db: &DatabaseConnection, team_name: &str, members: &[(&str, bool)]) {
    directory(db)
        .add_team(team(team_name, members), deadline())
        .await
        .expect("Failed to seed team");
}

pub fn strings(values: &[&str]) -> Vec<String> { values.iter().map(|v| v.to_string()).collect() }

//! # Database Migrator
//!
//! This module implements the Sea-ORM migrator trait for managing database schema changes.
//! The migrator coordinates all migration operations and maintains the migration history.

use sea_orm_migration::prelude::*;

use crate::{
    m20250101_000001_create_team_table,
    m20250101_000002_create_users_table,
    m20250101_000003_create_pr_table,
    m20250101_000004_create_reviewer_x_pr_table,
};

/// The main migrator that coordinates all migration operations
///
/// # Example
///
/// ```rust,ignore
/// use migration::{Migrator, MigratorTrait};
///
/// Migrator::up(&db, None).await?;
/// ```
#[derive(Debug)]
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    /// Migrations are executed in the order they appear in this list. Foreign keys require
    /// `team` before `users`, `users` before `pr`, and both before `reviewer_x_pr`.
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_team_table::Migration),
            Box::new(m20250101_000002_create_users_table::Migration),
            Box::new(m20250101_000003_create_pr_table::Migration),
            Box::new(m20250101_000004_create_reviewer_x_pr_table::Migration),
        ]
    }
}

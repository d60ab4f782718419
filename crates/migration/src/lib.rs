//! # Reviewer Schema Migrations
//!
//! Sea-ORM migrations for the persisted layout and the database connection configuration.

pub use sea_orm_migration::prelude::*;

pub mod db;
mod m20250101_000001_create_team_table;
mod m20250101_000002_create_users_table;
mod m20250101_000003_create_pr_table;
mod m20250101_000004_create_reviewer_x_pr_table;
pub mod migrator;

pub use db::{connect_to_database, DatabaseConfig, DatabaseConfigError};
pub use migrator::Migrator;

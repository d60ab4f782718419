//! # Migration Tests
//!
//! Applies the schema to an in-memory SQLite database and checks the resulting layout.

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};

async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(options).await.unwrap()
}

async fn table_exists(db: &DatabaseConnection, table: &str) -> bool {
    let row = db
        .query_one(Statement::from_sql_and_values(
            db.get_database_backend(),
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
            [table.into()],
        ))
        .await
        .unwrap();
    row.is_some()
}

#[tokio::test]
async fn test_up_creates_all_tables() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();

    for table in ["team", "users", "pr", "reviewer_x_pr"] {
        assert!(table_exists(&db, table).await, "missing table {}", table);
    }
}

#[tokio::test]
async fn test_up_is_repeatable() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    assert!(Migrator::get_pending_migrations(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_down_removes_tables() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();
    Migrator::down(&db, None).await.unwrap();

    for table in ["team", "users", "pr", "reviewer_x_pr"] {
        assert!(!table_exists(&db, table).await, "table {} survived rollback", table);
    }
}

//! # Reviewer Assignment Core
//!
//! The pull request lifecycle engine together with the stores it runs against.
//!
//! ## Layout
//!
//! - [`store`]: capability traits over the relational store and their Sea-ORM implementation
//! - [`selection`]: randomized reviewer selection over an already fetched candidate list
//! - [`engine`]: `CreatePR`, `MergePR` and `ReassignPR`, each one atomic unit of work
//! - [`directory`]: team and user plumbing around the engine
//! - [`statistics`]: read-only rollups over the stores
//!
//! Every operation validates its inputs before touching the store and runs under a [`Deadline`].

pub mod deadline;
pub mod directory;
pub mod engine;
pub mod model;
pub mod selection;
pub mod statistics;
pub mod store;

pub use deadline::Deadline;
pub use directory::DirectoryService;
pub use engine::ReviewEngine;
pub use model::{
    PullRequest,
    PullRequestShort,
    Reassignment,
    Team,
    TeamMember,
    TeamStatistics,
    User,
    UserReviews,
    UserStatistics,
};
pub use selection::{ReviewerSelector, INITIAL_REVIEWER_LIMIT};
pub use statistics::StatisticsService;
pub use store::{DirectoryStore, PullRequestStore, SeaStore};

use std::{future::Future, pin::Pin};

use error::AppError;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionError, TransactionTrait};

/// Reject an empty required input, naming the field.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::empty_field(field));
    }
    Ok(())
}

/// Run `work` as one transaction bounded by `deadline`.
///
/// The transaction commits only when `work` returns `Ok`. An error, or the deadline passing, rolls it back
/// before the error reaches the caller.
pub(crate) async fn atomically<T, F>(
    db: &DatabaseConnection,
    deadline: Deadline,
    operation: &'static str,
    work: F,
) -> Result<T, AppError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> Pin<Box<dyn Future<Output = Result<T, AppError>> + Send + 'c>>
        + Send,
    T: Send,
{
    let result = deadline
        .run(operation, async {
            db.transaction(work).await.map_err(|err| {
                match err {
                    TransactionError::Connection(err) => AppError::from(err),
                    TransactionError::Transaction(err) => err,
                }
            })
        })
        .await;

    if let Err(ref err) = result {
        if err.is_internal() {
            tracing::error!(target: "lifecycle", operation, error = %err, "Unit of work failed, rolled back");
        }
    }
    result
}

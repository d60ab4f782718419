//! # Pull Request Lifecycle Engine
//!
//! A pull request starts `OPEN` and moves to `MERGED` exactly once. Reviewers are chosen on creation and
//! may be swapped one at a time while the pull request is open.
//!
//! Each operation validates its inputs first, then runs every read that gates a decision and every write
//! inside a single transaction. Merge and reassignment lock the pull request row, so a concurrent merge
//! cannot interleave with a reassignment and two reassignments of one pull request run one after the
//! other.

use chrono::{DateTime, SubsecRound, Utc};
use entity::{pull_requests, PrStatus};
use error::{AppError, Result};
use logging::log_lifecycle_event;
use sea_orm::DatabaseConnection;

use crate::{
    atomically,
    model::{PullRequest, Reassignment},
    require,
    selection::{ReviewerSelector, INITIAL_REVIEWER_LIMIT},
    store::{is_unique_violation, DirectoryStore, PullRequestStore, SeaStore},
    Deadline,
};

/// Orchestrates `CreatePR`, `MergePR` and `ReassignPR` over the stores.
#[derive(Debug, Clone)]
pub struct ReviewEngine<S = SeaStore> {
    db:       DatabaseConnection,
    store:    S,
    selector: ReviewerSelector,
}

impl ReviewEngine<SeaStore> {
    /// Engine over the Sea-ORM store with an OS-seeded selector.
    pub fn new(db: DatabaseConnection) -> Self { Self::with_parts(db, SeaStore, ReviewerSelector::new()) }
}

impl<S> ReviewEngine<S>
where
    S: DirectoryStore + PullRequestStore + Clone + 'static,
{
    /// Engine over an explicit store and selector.
    pub fn with_parts(db: DatabaseConnection, store: S, selector: ReviewerSelector) -> Self {
        Self {
            db,
            store,
            selector,
        }
    }

    /// Create an `OPEN` pull request and assign up to two active teammates of the author.
    ///
    /// # Arguments
    ///
    /// * `pr_id` - Id of the new pull request
    /// * `name` - Display name
    /// * `author_id` - Id of an existing user
    /// * `deadline` - Bound for the whole unit of work
    ///
    /// # Errors
    ///
    /// `EmptyField` for the first empty input, `NotFound` for an unknown author, `PrExists` when the id is
    /// taken. A racing creator of the same id loses on the primary key and also sees `PrExists`.
    pub async fn create_pr(&self, pr_id: &str, name: &str, author_id: &str, deadline: Deadline) -> Result<PullRequest> {
        require("pull_request_id", pr_id)?;
        require("pull_request_name", name)?;
        require("author_id", author_id)?;

        let store = self.store.clone();
        let selector = self.selector.clone();
        let row = pull_requests::Model {
            pr_id:      pr_id.to_string(),
            pr_name:    name.to_string(),
            author_id:  author_id.to_string(),
            status:     PrStatus::Open,
            created_at: now(),
            merged_at:  None,
        };

        let pr = atomically(&self.db, deadline, "create_pr", move |txn| {
            Box::pin(async move {
                let author = store
                    .find_user(txn, &row.author_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("author not found"))?;

                if store.find_pull_request(txn, &row.pr_id).await?.is_some() {
                    return Err(AppError::PrExists);
                }

                let teammates = store.active_member_ids(txn, &author.team_name).await?;
                let reviewers = selector.select_initial(teammates, &author.user_id, INITIAL_REVIEWER_LIMIT);

                match store.insert_pull_request(txn, row.clone()).await {
                    Ok(()) => {},
                    Err(err) if is_unique_violation(&err) => return Err(AppError::PrExists),
                    Err(err) => return Err(err.into()),
                }
                store.add_reviewers(txn, &row.pr_id, &reviewers).await?;

                Ok(PullRequest::from_row(row, reviewers))
            })
        })
        .await?;

        log_lifecycle_event!(
            "created",
            pr.pull_request_id.as_str(),
            author_id = pr.author_id.as_str(),
            reviewers = pr.assigned_reviewers.len()
        );
        Ok(pr)
    }

    /// Merge a pull request.
    ///
    /// Merging an already merged pull request returns the stored snapshot unchanged, `merged_at` included.
    ///
    /// # Errors
    ///
    /// `EmptyField` for an empty id, `NotFound` for an unknown pull request.
    pub async fn merge_pr(&self, pr_id: &str, deadline: Deadline) -> Result<PullRequest> {
        require("pull_request_id", pr_id)?;

        let store = self.store.clone();
        let pr_id = pr_id.to_string();

        let (pr, transitioned) = atomically(&self.db, deadline, "merge_pr", move |txn| {
            Box::pin(async move {
                let row = store
                    .lock_pull_request(txn, &pr_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("pull request not found"))?;

                let transitioned = match row.status {
                    PrStatus::Merged => false,
                    PrStatus::Open => store.mark_merged(txn, &pr_id, now()).await?,
                };

                // the snapshot always comes from the store, never from the pre-merge read
                let row = store
                    .find_pull_request(txn, &pr_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("pull request not found"))?;
                let reviewers = store.reviewer_ids(txn, &pr_id).await?;

                Ok((PullRequest::from_row(row, reviewers), transitioned))
            })
        })
        .await?;

        if transitioned {
            log_lifecycle_event!("merged", pr.pull_request_id.as_str());
        }
        else {
            tracing::debug!(target: "lifecycle", pr_id = %pr.pull_request_id, "Merge of merged pull request ignored");
        }
        Ok(pr)
    }

    /// Replace `old_reviewer_id` with a random eligible teammate of the old reviewer.
    ///
    /// The candidate pool is the old reviewer's active teammates minus the old reviewer, the author and
    /// everyone currently assigned, all read from the locked pull request.
    ///
    /// # Errors
    ///
    /// `EmptyField`, `NotFound`, `PrMerged` when the pull request is merged, `NotAssigned` when the old
    /// reviewer is not on it, `NoCandidate` when the pool is empty. Nothing is changed on error.
    pub async fn reassign_pr(&self, pr_id: &str, old_reviewer_id: &str, deadline: Deadline) -> Result<Reassignment> {
        require("pull_request_id", pr_id)?;
        require("old_reviewer_id", old_reviewer_id)?;

        let store = self.store.clone();
        let selector = self.selector.clone();
        let pr_key = pr_id.to_string();
        let old_key = old_reviewer_id.to_string();

        let outcome = atomically(&self.db, deadline, "reassign_pr", move |txn| {
            Box::pin(async move {
                let row = store
                    .lock_pull_request(txn, &pr_key)
                    .await?
                    .ok_or_else(|| AppError::not_found("pull request not found"))?;

                if row.status.is_terminal() {
                    return Err(AppError::PrMerged);
                }

                let current = store.reviewer_ids(txn, &pr_key).await?;
                if !current.contains(&old_key) {
                    return Err(AppError::NotAssigned);
                }

                let old_reviewer = store
                    .find_user(txn, &old_key)
                    .await?
                    .ok_or_else(|| AppError::not_found("user not found"))?;
                let teammates = store.active_member_ids(txn, &old_reviewer.team_name).await?;

                let mut excluded: Vec<&str> = vec![old_key.as_str(), row.author_id.as_str()];
                excluded.extend(current.iter().map(String::as_str));
                let replacement = selector
                    .select_replacement(teammates, &excluded)
                    .ok_or(AppError::NoCandidate)?;

                store.remove_reviewer(txn, &pr_key, &old_key).await?;
                store
                    .add_reviewers(txn, &pr_key, std::slice::from_ref(&replacement))
                    .await?;
                let reviewers = store.reviewer_ids(txn, &pr_key).await?;

                Ok(Reassignment {
                    pr:          PullRequest::from_row(row, reviewers),
                    replaced_by: replacement,
                })
            })
        })
        .await;

        match outcome {
            Ok(reassignment) => {
                log_lifecycle_event!(
                    "reassigned",
                    reassignment.pr.pull_request_id.as_str(),
                    old_reviewer_id = old_reviewer_id,
                    replaced_by = reassignment.replaced_by.as_str()
                );
                Ok(reassignment)
            },
            Err(AppError::NoCandidate) => {
                tracing::warn!(
                    target: "lifecycle",
                    pr_id,
                    old_reviewer_id,
                    "No active replacement candidate"
                );
                Err(AppError::NoCandidate)
            },
            Err(err) => Err(err),
        }
    }
}

/// Current time at the precision the store keeps, so returned and stored values compare equal.
fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

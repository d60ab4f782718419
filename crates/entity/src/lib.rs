//! Entity definitions for the reviewer assignment store
//!
//! This crate contains Sea-ORM entity definitions for the database models.
//! Table and column names follow the persisted layout: `team`, `users`, `pr` and `reviewer_x_pr`.

pub mod pull_requests;
pub use pull_requests::{Entity as PullRequests, PrStatus};
pub mod reviewer_assignments;
pub use reviewer_assignments::Entity as ReviewerAssignments;
pub mod teams;
pub use teams::Entity as Teams;
pub mod users;
pub use users::Entity as Users;

//! # Logging Macros
//!
//! Convenience macros for structured logging.
//! These macros keep field names consistent across crates so log queries stay simple.

/// Log a completed API request with method, path, status, and duration.
///
/// # Example
///
/// ```rust
/// use logging::{log_api_request, RequestId};
///
/// let request_id = RequestId::new();
/// log_api_request!(request_id, "POST", "/pullRequest/merge", 200, 12);
/// ```
#[macro_export]
macro_rules! log_api_request {
    ($request_id:expr, $method:expr, $path:expr, $status:expr, $duration:expr) => {
        $crate::tracing::info!(
            target: "api",
            request_id = %$request_id,
            method = %$method,
            path = %$path,
            status = %$status,
            duration_ms = %$duration,
            "API request"
        )
    };
}

/// Log a pull request lifecycle transition.
///
/// # Example
///
/// ```rust
/// use logging::log_lifecycle_event;
///
/// log_lifecycle_event!("merged", "pr-1001", reviewers = 2usize);
/// ```
#[macro_export]
macro_rules! log_lifecycle_event {
    ($event:expr, $pr_id:expr) => {
        $crate::tracing::info!(
            target: "lifecycle",
            event = %$event,
            pr_id = %$pr_id,
            "Pull request lifecycle event"
        )
    };
    ($event:expr, $pr_id:expr, $($k:ident = $v:expr),+ $(,)?) => {
        $crate::tracing::info!(
            target: "lifecycle",
            event = %$event,
            pr_id = %$pr_id,
            $($k = $v),+,
            "Pull request lifecycle event"
        )
    };
}

/// Log a directory change (team creation, activity toggle).
#[macro_export]
macro_rules! log_directory_event {
    ($event:expr, $($k:ident = $v:expr),+ $(,)?) => {
        $crate::tracing::info!(
            target: "directory",
            event = %$event,
            $($k = $v),+,
            "Directory event"
        )
    };
}

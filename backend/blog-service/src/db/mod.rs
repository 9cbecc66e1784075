/// Database access layer
///
/// Repositories are free functions over `&PgPool`, one module per
/// aggregate. Services wrap every repository call in [`with_timeout`] so a
/// stalled store surfaces as a `Timeout` instead of hanging the request.
use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, Result};

pub mod favorite_repo;
pub mod post_repo;
pub mod user_repo;

/// Upper bound for a single store call
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a repository future under the store time budget.
///
/// On elapse nothing is assumed committed; the caller gets a `Timeout`
/// carrying the operation label.
pub async fn with_timeout<T, F>(operation: &str, fut: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(QUERY_TIMEOUT, fut).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => {
            tracing::warn!(operation, "store call exceeded time budget");
            Err(AppError::Timeout(format!("{} timed out", operation)))
        }
    }
}

/// Favorite toggle engine
///
/// A toggle is a conditional create-or-delete, not a counter update:
/// counts are always derived from the favorites relation, so they cannot
/// drift. The `UNIQUE (user_id, post_id)` constraint is the storage-level
/// defense against two concurrent toggles both observing "absent"; a
/// conflicting insert retries the whole read-then-write once, and a second
/// conflict surfaces to the caller.
use serde::Serialize;
use sqlx::PgPool;

use crate::db::{self, favorite_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::FavoritePost;

/// What a toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Added,
    Removed,
}

pub struct FavoriteService {
    pool: PgPool,
}

impl FavoriteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Flip the caller's favorite relation to a post
    pub async fn toggle(&self, user_id: &str, post_id: i64) -> Result<ToggleAction> {
        match self.toggle_once(user_id, post_id).await {
            Err(AppError::Conflict(_)) => {
                tracing::debug!(user_id, post_id, "favorite toggle raced, retrying once");
                self.toggle_once(user_id, post_id).await
            }
            outcome => outcome,
        }
    }

    async fn toggle_once(&self, user_id: &str, post_id: i64) -> Result<ToggleAction> {
        let post = db::with_timeout("load post", post_repo::find_post_by_id(&self.pool, post_id))
            .await?;
        if post.is_none() {
            return Err(AppError::NotFound(format!("post {} not found", post_id)));
        }

        let existing = db::with_timeout(
            "find favorite",
            favorite_repo::find_favorite(&self.pool, user_id, post_id),
        )
        .await?;

        match existing {
            Some(_) => {
                let removed = db::with_timeout(
                    "remove favorite",
                    favorite_repo::delete_favorite(&self.pool, user_id, post_id),
                )
                .await?;

                if removed == 0 {
                    // A concurrent request removed it first; the end state
                    // this arm reports is still "absent".
                    tracing::debug!(user_id, post_id, "favorite was already removed");
                }

                Ok(ToggleAction::Removed)
            }
            None => {
                db::with_timeout(
                    "add favorite",
                    favorite_repo::create_favorite(&self.pool, user_id, post_id),
                )
                .await?;

                Ok(ToggleAction::Added)
            }
        }
    }

    /// Posts the user has favorited, most recently favorited first
    pub async fn list_favorites(&self, user_id: &str) -> Result<Vec<FavoritePost>> {
        db::with_timeout(
            "list favorites",
            favorite_repo::list_user_favorites(&self.pool, user_id),
        )
        .await
    }
}

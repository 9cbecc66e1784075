/// Post service - create, read, update, and delete posts
///
/// Ownership is checked before any mutation is attempted, never
/// interleaved with it, so an authorization failure leaves the post
/// untouched.
use sqlx::PgPool;

use crate::db::{self, post_repo};
use crate::error::{AppError, Result};
use crate::middleware::permissions::check_post_ownership;
use crate::models::{Post, PostSummary};

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a post by ID; `None` is a normal outcome, not a failure
    pub async fn get_post(&self, post_id: i64) -> Result<Option<Post>> {
        db::with_timeout("load post", post_repo::find_post_by_id(&self.pool, post_id)).await
    }

    /// List all posts in ascending creation order, annotated with author
    /// display names and derived favorite counts
    pub async fn list_posts(&self) -> Result<Vec<PostSummary>> {
        db::with_timeout("list posts", post_repo::list_posts(&self.pool)).await
    }

    /// Create a new post owned by `owner`, persisting trimmed content
    pub async fn create_post(
        &self,
        owner: Option<&str>,
        title: &str,
        description: &str,
        image_url: Option<&str>,
    ) -> Result<Post> {
        let post = db::with_timeout(
            "create post",
            post_repo::create_post(&self.pool, owner, title.trim(), description.trim(), image_url),
        )
        .await?;

        tracing::info!(post_id = post.id, "post created");

        Ok(post)
    }

    /// Update a post's content after verifying the caller owns it
    pub async fn update_post(
        &self,
        post_id: i64,
        caller: &str,
        title: &str,
        description: &str,
    ) -> Result<Post> {
        self.load_owned(post_id, caller).await?;

        db::with_timeout(
            "update post",
            post_repo::update_post(&self.pool, post_id, title.trim(), description.trim()),
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {} not found", post_id)))
    }

    /// Delete a post after verifying the caller owns it.
    /// Returns the deleted post's prior representation; its favorites are
    /// removed by the FK cascade.
    pub async fn delete_post(&self, post_id: i64, caller: &str) -> Result<Post> {
        self.load_owned(post_id, caller).await?;

        let deleted = db::with_timeout("delete post", post_repo::delete_post(&self.pool, post_id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {} not found", post_id)))?;

        tracing::info!(post_id, "post deleted");

        Ok(deleted)
    }

    async fn load_owned(&self, post_id: i64, caller: &str) -> Result<Post> {
        let post = self
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {} not found", post_id)))?;

        check_post_ownership(caller, &post)?;

        Ok(post)
    }
}

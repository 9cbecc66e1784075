use crate::models::{Post, PostSummary};
use sqlx::PgPool;

/// Create a new post
/// Returns the created post
pub async fn create_post(
    pool: &PgPool,
    user_id: Option<&str>,
    title: &str,
    description: &str,
    image_url: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (user_id, title, description, image_url)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, title, description, image_url, created_at
        "#,
    )
    .bind(user_id)
    .bind(title)
    .bind(description)
    .bind(image_url)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, title, description, image_url, created_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// List all posts in ascending creation order, annotated with the author's
/// display name and the derived favorite count
pub async fn list_posts(pool: &PgPool) -> Result<Vec<PostSummary>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostSummary>(
        r#"
        SELECT
            p.id, p.user_id, p.title, p.description, p.image_url, p.created_at,
            NULLIF(BTRIM(CONCAT(u.first_name, ' ', u.last_name)), '') AS author_name,
            (SELECT COUNT(*) FROM favorites f WHERE f.post_id = p.id) AS favorite_count
        FROM posts p
        LEFT JOIN users u ON u.id = p.user_id
        ORDER BY p.created_at ASC, p.id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Update a post's content, persisting trimmed values
/// Returns the updated post, or None if no post with that id exists
pub async fn update_post(
    pool: &PgPool,
    post_id: i64,
    title: &str,
    description: &str,
) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET title = $1, description = $2
        WHERE id = $3
        RETURNING id, user_id, title, description, image_url, created_at
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Delete a post, returning its prior representation
///
/// Favorites referencing the post are removed by the FK cascade.
pub async fn delete_post(pool: &PgPool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        DELETE FROM posts
        WHERE id = $1
        RETURNING id, user_id, title, description, image_url, created_at
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

use crate::models::{Favorite, FavoritePost};
use sqlx::{PgPool, Row};

/// Check whether a user has favorited a post
pub async fn find_favorite(
    pool: &PgPool,
    user_id: &str,
    post_id: i64,
) -> Result<Option<Favorite>, sqlx::Error> {
    let favorite = sqlx::query_as::<_, Favorite>(
        r#"
        SELECT id, user_id, post_id, created_at
        FROM favorites
        WHERE user_id = $1 AND post_id = $2
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(favorite)
}

/// Create a favorite for a (user, post) pair
///
/// The `UNIQUE (user_id, post_id)` constraint makes a concurrent duplicate
/// insert fail with a unique violation instead of producing a second row.
pub async fn create_favorite(
    pool: &PgPool,
    user_id: &str,
    post_id: i64,
) -> Result<Favorite, sqlx::Error> {
    let favorite = sqlx::query_as::<_, Favorite>(
        r#"
        INSERT INTO favorites (user_id, post_id)
        VALUES ($1, $2)
        RETURNING id, user_id, post_id, created_at
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(favorite)
}

/// Delete a favorite; returns the number of rows removed
pub async fn delete_favorite(
    pool: &PgPool,
    user_id: &str,
    post_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM favorites
        WHERE user_id = $1 AND post_id = $2
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Count total favorites for a post
pub async fn count_favorites_by_post(pool: &PgPool, post_id: i64) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM favorites WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Get all posts a user has favorited, most recently favorited first
pub async fn list_user_favorites(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<FavoritePost>, sqlx::Error> {
    let posts = sqlx::query_as::<_, FavoritePost>(
        r#"
        SELECT
            p.id, p.user_id, p.title, p.description, p.image_url, p.created_at,
            (SELECT COUNT(*) FROM favorites fc WHERE fc.post_id = p.id) AS favorite_count,
            TRUE AS is_favorite,
            f.created_at AS favorited_at
        FROM favorites f
        JOIN posts p ON p.id = f.post_id
        WHERE f.user_id = $1
        ORDER BY f.created_at DESC, f.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

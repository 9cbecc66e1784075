use crate::models::UserProfile;
use sqlx::PgPool;

/// Insert or refresh a profile cache row from an auth-provider event
pub async fn upsert_profile(
    pool: &PgPool,
    user_id: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<UserProfile, sqlx::Error> {
    let profile = sqlx::query_as::<_, UserProfile>(
        r#"
        INSERT INTO users (id, first_name, last_name)
        VALUES ($1, $2, $3)
        ON CONFLICT (id) DO UPDATE
        SET first_name = EXCLUDED.first_name,
            last_name = EXCLUDED.last_name,
            updated_at = NOW()
        RETURNING id, first_name, last_name, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(first_name)
    .bind(last_name)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

/// Remove a profile cache row; returns true when a row was deleted
pub async fn delete_profile(pool: &PgPool, user_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Find a profile cache row
pub async fn find_profile(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<UserProfile>, sqlx::Error> {
    let profile = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT id, first_name, last_name, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

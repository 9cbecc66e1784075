/// Data models for the blog service
///
/// Row types map 1:1 onto the migration schema; the `*Summary` shapes are
/// the annotated read models the list endpoints return.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A blog post
///
/// `user_id` is the opaque identity string minted by the external auth
/// provider; it is nullable because legacy posts predate ownership.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_id: Option<String>,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user's favorite relation to a post; unique per (user_id, post_id)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i64,
    pub user_id: String,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Profile cache row synced from the auth provider's webhook
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post annotated for the public listing: author display name plus the
/// favorite count derived from the favorites relation
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: i64,
    pub user_id: Option<String>,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author_name: Option<String>,
    pub favorite_count: i64,
}

/// Post as it appears in a user's favorites listing
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FavoritePost {
    pub id: i64,
    pub user_id: Option<String>,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub favorite_count: i64,
    pub is_favorite: bool,
    pub favorited_at: DateTime<Utc>,
}

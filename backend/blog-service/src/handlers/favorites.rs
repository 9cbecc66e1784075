/// Favorite handlers - HTTP endpoints for favorite operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::services::{FavoriteService, ToggleAction};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFavoriteRequest {
    /// Must equal the resolved caller
    pub user_id: String,
    pub post_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFavoritesQuery {
    pub user_id: String,
}

/// Toggle the caller's favorite on a post
/// POST /api/v1/favorites
///
/// 201 when the favorite was added, 200 when it was removed.
pub async fn toggle_favorite(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<ToggleFavoriteRequest>,
) -> Result<HttpResponse> {
    if req.user_id != user_id.0 {
        return Err(AppError::Forbidden(
            "cannot toggle favorites on behalf of another user".to_string(),
        ));
    }

    let service = FavoriteService::new((**pool).clone());
    let action = service.toggle(&req.user_id, req.post_id).await?;

    let body = serde_json::json!({
        "message": "success",
        "action": action,
    });

    Ok(match action {
        ToggleAction::Added => HttpResponse::Created().json(body),
        ToggleAction::Removed => HttpResponse::Ok().json(body),
    })
}

/// List the posts a user has favorited, most recently favorited first
/// GET /api/v1/favorites?userId=
pub async fn list_favorites(
    pool: web::Data<PgPool>,
    user_id: UserId,
    query: web::Query<ListFavoritesQuery>,
) -> Result<HttpResponse> {
    if query.user_id != user_id.0 {
        return Err(AppError::Forbidden(
            "cannot list favorites of another user".to_string(),
        ));
    }

    let service = FavoriteService::new((**pool).clone());
    let favorites = service.list_favorites(&query.user_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "success",
        "favorites": favorites,
    })))
}

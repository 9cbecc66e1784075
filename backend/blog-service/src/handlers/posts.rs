/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::services::validation::{validate_description, validate_title};
use crate::services::PostService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,

    /// Must equal the resolved caller; persisted as the post's owner
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: String,
    pub description: String,
}

fn validate_content(title: &str, description: &str) -> std::result::Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Err(error) = validate_title(title) {
        errors.add("title", error);
    }
    if let Err(error) = validate_description(description) {
        errors.add("description", error);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

impl Validate for CreatePostRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        validate_content(&self.title, &self.description)
    }
}

impl Validate for UpdatePostRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        validate_content(&self.title, &self.description)
    }
}

/// List all posts
/// GET /api/v1/posts
pub async fn list_posts(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service.list_posts().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "success",
        "posts": posts,
    })))
}

/// Get a post by ID; absence is a normal outcome, not a failure
/// GET /api/v1/posts/{post_id}
pub async fn get_post(pool: web::Data<PgPool>, post_id: web::Path<i64>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());

    match service.get_post(*post_id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "success",
            "post": post,
        }))),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "not found",
        }))),
    }
}

/// Create a new post
/// POST /api/v1/posts
pub async fn create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    if req.user_id != user_id.0 {
        return Err(AppError::Forbidden(
            "cannot create a post on behalf of another user".to_string(),
        ));
    }

    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(
            Some(&req.user_id),
            &req.title,
            &req.description,
            req.image_url.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "success",
        "post": post,
    })))
}

/// Update a post's content; caller must own the post
/// PUT /api/v1/posts/{post_id}
pub async fn update_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<i64>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone());
    let post = service
        .update_post(*post_id, &user_id.0, &req.title, &req.description)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "success",
        "post": post,
    })))
}

/// Delete a post; caller must own the post
/// DELETE /api/v1/posts/{post_id}
pub async fn delete_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service.delete_post(*post_id, &user_id.0).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "success",
        "post": post,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, description: &str) -> CreatePostRequest {
        CreatePostRequest {
            title: title.to_string(),
            description: description.to_string(),
            image_url: None,
            user_id: "user_1".to_string(),
        }
    }

    #[test]
    fn title_at_the_boundary_validates() {
        assert!(request(&"t".repeat(200), "body").validate().is_ok());
    }

    #[test]
    fn title_over_the_boundary_is_invalid_argument() {
        let err: AppError = request(&"t".repeat(201), "body")
            .validate()
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn whitespace_description_is_invalid_argument() {
        let err: AppError = request("Hello", " \n ").validate().unwrap_err().into();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn both_fields_valid_passes() {
        assert!(request("Hello", "World").validate().is_ok());
    }
}

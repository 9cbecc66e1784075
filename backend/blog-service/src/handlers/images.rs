/// Image handlers - upload and delete post images in object storage
///
/// Size and format constraints are enforced here, before the storage
/// provider is ever called.
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use object_store::ObjectStore;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::UserId;

/// Upload size cap (5 MiB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImageRequest {
    pub url: String,
}

/// Strip an owner id down to characters safe for an object key
fn sanitize_owner_id(user_id: &str) -> String {
    user_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

fn validate_content_type(content_type: &str) -> Result<()> {
    if ALLOWED_CONTENT_TYPES.contains(&content_type) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "unsupported image type: {}",
            content_type
        )))
    }
}

fn image_extension(file_name: &str) -> Result<String> {
    let lowered = file_name.to_lowercase();
    let extension = lowered
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_string())
        .ok_or_else(|| AppError::Validation("file has no extension".to_string()))?;

    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(AppError::Validation(format!(
            "invalid file extension: .{}",
            extension
        )))
    }
}

fn object_key(owner_id: &str, extension: &str) -> String {
    format!(
        "{}-{}.{}",
        sanitize_owner_id(owner_id),
        Uuid::new_v4(),
        extension
    )
}

/// Upload an image and return its public URL
/// POST /api/v1/images
pub async fn upload_image(
    store: web::Data<ObjectStore>,
    user_id: UserId,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::BadRequest(format!("invalid multipart payload: {}", e)))?;

        // Only file fields are of interest; skip plain form values.
        let Some(file_name) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(|name| name.to_string())
        else {
            continue;
        };

        let content_type = field
            .content_type()
            .map(|m| m.essence_str().to_string())
            .ok_or_else(|| AppError::Validation("content type is required".to_string()))?;

        validate_content_type(&content_type)?;
        let extension = image_extension(&file_name)?;

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| AppError::BadRequest(format!("failed to read upload: {}", e)))?;
            if bytes.len() + chunk.len() > MAX_IMAGE_BYTES {
                return Err(AppError::Validation(
                    "file too large (5MB limit)".to_string(),
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_string()));
        }

        let key = object_key(&user_id.0, &extension);
        let url = store.upload(&key, bytes, &content_type).await?;

        tracing::info!(%key, "image uploaded");

        return Ok(HttpResponse::Created().json(serde_json::json!({
            "message": "success",
            "url": url,
        })));
    }

    Err(AppError::Validation(
        "no file field in the request".to_string(),
    ))
}

/// Delete an image by its public URL
/// DELETE /api/v1/images
///
/// Storage failures degrade to `deleted: false` rather than failing the
/// request; the caller treats the image as best-effort cleanup.
pub async fn delete_image(
    store: web::Data<ObjectStore>,
    _user_id: UserId,
    req: web::Json<DeleteImageRequest>,
) -> Result<HttpResponse> {
    let deleted = match store.config().key_for_public_url(&req.url) {
        Some(key) => match store.delete(&key).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(%key, "image delete failed: {}", e);
                false
            }
        },
        None => false,
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "success",
        "deleted": deleted,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_content_types_pass() {
        for content_type in ALLOWED_CONTENT_TYPES {
            assert!(validate_content_type(content_type).is_ok());
        }
    }

    #[test]
    fn disallowed_content_types_fail() {
        assert!(validate_content_type("image/svg+xml").is_err());
        assert!(validate_content_type("application/pdf").is_err());
        assert!(validate_content_type("video/mp4").is_err());
    }

    #[test]
    fn extension_is_lowercased_and_checked() {
        assert_eq!(image_extension("Photo.JPG").unwrap(), "jpg");
        assert_eq!(image_extension("a.b.webp").unwrap(), "webp");
        assert!(image_extension("script.exe").is_err());
        assert!(image_extension("noextension").is_err());
    }

    #[test]
    fn owner_id_is_sanitized_for_object_keys() {
        assert_eq!(sanitize_owner_id("user_2abC-9"), "user_2abC-9");
        assert_eq!(sanitize_owner_id("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_owner_id("a b/c"), "abc");
    }

    #[test]
    fn object_keys_embed_owner_and_extension() {
        let key = object_key("user_1", "png");
        assert!(key.starts_with("user_1-"));
        assert!(key.ends_with(".png"));
    }
}

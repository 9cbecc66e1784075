/// Auth provider webhook - keeps the local profile cache in sync
///
/// The provider delivers `user.*` lifecycle events; display names shown on
/// post listings come from the rows maintained here. Unknown event types
/// are acknowledged and ignored so new provider events never break the
/// endpoint.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::db::{self, user_repo};
use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct AuthProviderEvent {
    #[serde(rename = "type")]
    pub event_type: String,

    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct EventUser {
    id: String,

    #[serde(default)]
    first_name: Option<String>,

    #[serde(default)]
    last_name: Option<String>,
}

/// Consume an auth provider event
/// POST /api/v1/webhooks/auth
pub async fn auth_provider_webhook(
    pool: web::Data<PgPool>,
    event: web::Json<AuthProviderEvent>,
) -> Result<HttpResponse> {
    match event.event_type.as_str() {
        "user.created" | "user.updated" => {
            let user = parse_event_user(&event.data)?;
            db::with_timeout(
                "upsert profile",
                user_repo::upsert_profile(
                    pool.get_ref(),
                    &user.id,
                    user.first_name.as_deref(),
                    user.last_name.as_deref(),
                ),
            )
            .await?;

            tracing::info!(user_id = %user.id, event = %event.event_type, "profile synced");
        }
        "user.deleted" => {
            let user = parse_event_user(&event.data)?;
            db::with_timeout(
                "delete profile",
                user_repo::delete_profile(pool.get_ref(), &user.id),
            )
            .await?;

            tracing::info!(user_id = %user.id, "profile removed");
        }
        other => {
            tracing::debug!(event = other, "ignoring auth provider event");
        }
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "received",
        "type": event.event_type.clone(),
    })))
}

fn parse_event_user(data: &serde_json::Value) -> Result<EventUser> {
    serde_json::from_value(data.clone())
        .map_err(|e| AppError::BadRequest(format!("malformed user payload: {}", e)))
}

/// Error types for the blog service
///
/// Errors are converted to JSON HTTP responses carrying a machine-readable
/// `kind` alongside the human message.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;

/// Result type for blog-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Database operation failed
    Database(String),

    /// Input failed validation
    Validation(String),

    /// Malformed request
    BadRequest(String),

    /// Resource not found
    NotFound(String),

    /// No valid caller identity on the request
    Unauthenticated(String),

    /// Caller is authenticated but not allowed to act on this resource
    Forbidden(String),

    /// Uniqueness violation (e.g. concurrent favorite toggles)
    Conflict(String),

    /// A backing-store call exceeded its time budget
    Timeout(String),

    /// Backing store or storage provider unreachable
    Unavailable(String),

    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Machine-distinguishable error kind used in response bodies
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::Validation(_) => "invalid_argument",
            AppError::BadRequest(_) => "invalid_argument",
            AppError::NotFound(_) => "not_found",
            AppError::Unauthenticated(_) => "unauthenticated",
            AppError::Forbidden(_) => "forbidden",
            AppError::Conflict(_) => "conflict",
            AppError::Timeout(_) => "timeout",
            AppError::Unavailable(_) => "unavailable",
            AppError::Internal(_) => "internal",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            AppError::Unavailable(msg) => write!(f, "Unavailable: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Store-level failures must not leak internals to the caller.
        let message = match self {
            AppError::Database(msg) => {
                tracing::error!("database error: {}", msg);
                "internal server error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status).json(serde_json::json!({
            "kind": self.kind(),
            "message": message,
            "status": status.as_u16(),
        }))
    }
}

/// SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                    return AppError::Conflict(err.to_string());
                }
                AppError::Database(err.to_string())
            }
            sqlx::Error::PoolTimedOut => {
                AppError::Timeout("database connection acquisition timed out".to_string())
            }
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) => AppError::Unavailable(err.to_string()),
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Surface the first field error with its field name so callers can
        // tell which input was rejected.
        for (field, field_errors) in errors.field_errors() {
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                return AppError::Validation(format!("{}: {}", field, message));
            }
        }
        AppError::Validation(errors.to_string())
    }
}

impl From<object_store::StoreError> for AppError {
    fn from(err: object_store::StoreError) -> Self {
        AppError::Unavailable(err.to_string())
    }
}

/// Blog Service Library
///
/// A single service backing a blog frontend: post CRUD, per-user favorite
/// toggling, image upload, and profile sync from the external auth
/// provider. Reads are public; every mutation is gated on the caller
/// identity resolved from a bearer token.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Row types and annotated read models
/// - `services`: Business logic layer (validation, ownership, toggling)
/// - `db`: Database access layer and repositories
/// - `middleware`: Caller identity extraction, ownership checks, request logging
/// - `auth`: JWT validation against the auth provider's public key
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

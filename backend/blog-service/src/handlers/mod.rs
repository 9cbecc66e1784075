/// HTTP handlers for the blog endpoints
///
/// This module contains handlers for:
/// - Posts: Create, read, update, delete, and list posts
/// - Favorites: Toggle a favorite and list a user's favorites
/// - Images: Upload and delete post images in object storage
/// - Webhooks: Auth provider profile sync
pub mod favorites;
pub mod images;
pub mod posts;
pub mod webhooks;

// Re-export handler functions at module level
pub use favorites::{list_favorites, toggle_favorite};
pub use images::{delete_image, upload_image};
pub use posts::{create_post, delete_post, get_post, list_posts, update_post};
pub use webhooks::auth_provider_webhook;

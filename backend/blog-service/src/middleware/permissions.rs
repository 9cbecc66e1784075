/// Authorization rules for the blog service
///
/// Ownership checks run over an already-loaded row so the caller can order
/// them strictly before any mutation.
use crate::error::AppError;
use crate::models::Post;

/// Check that a caller may mutate a post.
///
/// A post with no owner has no exclusive authority, so any authenticated
/// caller may mutate it; once the owner field is set, only that user may.
pub fn check_post_ownership(user_id: &str, post: &Post) -> Result<(), AppError> {
    match post.user_id.as_deref() {
        None => Ok(()),
        Some(owner) if owner == user_id => Ok(()),
        Some(_) => Err(AppError::Forbidden(
            "you don't have permission to modify this post".to_string(),
        )),
    }
}

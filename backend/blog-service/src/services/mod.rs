/// Business logic layer
pub mod favorites;
pub mod posts;
pub mod validation;

pub use favorites::{FavoriteService, ToggleAction};
pub use posts::PostService;

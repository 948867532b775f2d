pub mod auth;
pub mod cors;

pub use auth::{AuthMiddleware, CurrentUser, get_current_identity};
pub use cors::create_cors;

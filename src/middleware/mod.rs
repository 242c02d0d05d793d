pub mod auth;

pub use auth::{AuthUser, CurrentUserEmail, CurrentUserId, authenticate};

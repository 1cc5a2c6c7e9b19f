pub mod armor;
pub mod auth;
pub mod bungie;
pub mod chats;
pub mod definitions;
pub mod faves;
pub mod items;
pub mod users;

use guardian_core::error::CoreError;
use guardian_db::models::user::User;
use guardian_db::repositories::UserRepo;
use guardian_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// `?username=` query used by the endpoints that identify the player by
/// Bungie membership id rather than by JWT.
#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

impl UsernameQuery {
    pub fn require(&self) -> AppResult<&str> {
        required(self.username.as_deref(), "username")
    }
}

/// A present, non-blank request field.
pub(crate) fn required<'a>(value: Option<&'a str>, field: &str) -> AppResult<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}

/// Load a user by username or fail with 404.
pub(crate) async fn find_user(pool: &DbPool, username: &str) -> AppResult<User> {
    UserRepo::find_by_username(pool, username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", username)))
}

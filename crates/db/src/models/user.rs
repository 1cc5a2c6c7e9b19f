//! User entity model and DTOs.

use guardian_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub first_name: String,
    pub about: String,
    /// Primary Destiny membership id, set by the Bungie OAuth exchange.
    pub bungie_membership_id: Option<String>,
    /// Bungie platform ordinal of the primary membership.
    pub membership_type: Option<i16>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Membership type and id, when the user has linked a Bungie account.
    pub fn destiny_membership(&self) -> Option<(i16, &str)> {
        Some((self.membership_type?, self.bungie_membership_id.as_deref()?))
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub bungie_membership_id: Option<String>,
    pub membership_type: Option<i16>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            bungie_membership_id: user.bungie_membership_id,
            membership_type: user.membership_type,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
}

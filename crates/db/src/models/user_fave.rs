//! Favorite item model and DTOs.

use guardian_core::types::{DbId, ItemHash, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A `user_faves` row joined with the owner's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserFave {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub item_instance_id: String,
    pub item_hash: ItemHash,
    pub created_at: Timestamp,
}

/// DTO for adding a favorite.
#[derive(Debug, Deserialize)]
pub struct CreateUserFave {
    pub user_id: DbId,
    pub item_instance_id: String,
    pub item_hash: ItemHash,
}

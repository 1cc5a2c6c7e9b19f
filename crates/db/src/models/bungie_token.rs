//! Bungie OAuth credential rows.

use guardian_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Access and refresh token pair for one user.
#[derive(Debug, Clone, FromRow)]
pub struct BungieToken {
    pub user_id: DbId,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_at: Timestamp,
    pub refresh_expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BungieToken {
    /// Whether the access token is still usable `leeway_secs` from `now`.
    pub fn access_valid_at(&self, now: Timestamp, leeway_secs: i64) -> bool {
        self.expires_at > now + chrono::Duration::seconds(leeway_secs)
    }
}

/// DTO for storing a freshly issued token pair.
#[derive(Debug, Clone)]
pub struct UpsertBungieToken {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_at: Timestamp,
    pub refresh_expires_at: Option<Timestamp>,
}

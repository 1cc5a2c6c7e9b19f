//! Bungie OAuth credential storage and refresh.

use chrono::{Duration, Utc};
use guardian_bungie::oauth::TokenGrant;
use guardian_bungie::BungieClient;
use guardian_core::types::{DbId, Timestamp};
use guardian_db::models::bungie_token::{BungieToken, UpsertBungieToken};
use guardian_db::models::user::User;
use guardian_db::repositories::BungieTokenRepo;
use guardian_db::DbPool;

use crate::error::SyncError;

/// A stored access token is reused only if it stays valid this long.
pub const ACCESS_TOKEN_LEEWAY_SECS: i64 = 60;

/// Convert a grant into the row stored for it, with expiries relative to `now`.
pub fn grant_to_upsert(grant: &TokenGrant, now: Timestamp) -> UpsertBungieToken {
    UpsertBungieToken {
        access_token: grant.access_token.clone(),
        refresh_token: grant.refresh_token.clone(),
        token_type: grant.token_type.clone(),
        expires_at: now + Duration::seconds(grant.expires_in),
        refresh_expires_at: grant
            .refresh_expires_in
            .map(|secs| now + Duration::seconds(secs)),
    }
}

/// Hands out valid Bungie access tokens, refreshing them when needed.
#[derive(Clone)]
pub struct CredentialBroker {
    pool: DbPool,
    bungie: BungieClient,
}

impl CredentialBroker {
    pub fn new(pool: DbPool, bungie: BungieClient) -> Self {
        Self { pool, bungie }
    }

    /// Persist the token pair issued for `user_id`.
    pub async fn store_grant(
        &self,
        user_id: DbId,
        grant: &TokenGrant,
    ) -> Result<BungieToken, sqlx::Error> {
        BungieTokenRepo::upsert(&self.pool, user_id, &grant_to_upsert(grant, Utc::now())).await
    }

    /// Return an access token for `user` that is valid for at least
    /// [`ACCESS_TOKEN_LEEWAY_SECS`].
    ///
    /// A stale token is exchanged through the refresh grant; the new access
    /// token and the rotated refresh token are both stored.
    pub async fn access_token(&self, user: &User) -> Result<String, SyncError> {
        let stored = BungieTokenRepo::find_for_user(&self.pool, user.id)
            .await?
            .ok_or_else(|| SyncError::Auth(format!("no Bungie token stored for user {}", user.id)))?;

        let now = Utc::now();
        if stored.access_valid_at(now, ACCESS_TOKEN_LEEWAY_SECS) {
            return Ok(stored.access_token);
        }

        if stored.refresh_expires_at.is_some_and(|at| at <= now) {
            return Err(SyncError::Auth("Bungie refresh token has expired".into()));
        }

        let grant = self
            .bungie
            .refresh_token(&stored.refresh_token)
            .await
            .map_err(|e| {
                tracing::warn!(user_id = user.id, error = %e, "Bungie token refresh failed");
                SyncError::Auth("Bungie token refresh failed".into())
            })?;

        let token = self.store_grant(user.id, &grant).await?;
        tracing::debug!(user_id = user.id, expires_at = %token.expires_at, "Bungie token refreshed");
        Ok(token.access_token)
    }
}

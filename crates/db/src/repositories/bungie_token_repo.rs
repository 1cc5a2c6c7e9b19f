//! Repository for the `bungie_tokens` table.

use guardian_core::types::DbId;
use sqlx::PgPool;

use crate::models::bungie_token::{BungieToken, UpsertBungieToken};

const COLUMNS: &str = "user_id, access_token, refresh_token, token_type, expires_at, \
                       refresh_expires_at, created_at, updated_at";

/// Stores the Bungie OAuth credentials of each user.
pub struct BungieTokenRepo;

impl BungieTokenRepo {
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<BungieToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bungie_tokens WHERE user_id = $1");
        sqlx::query_as::<_, BungieToken>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the token pair of a user.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertBungieToken,
    ) -> Result<BungieToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO bungie_tokens
                (user_id, access_token, refresh_token, token_type, expires_at, refresh_expires_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id) DO UPDATE SET
                access_token = EXCLUDED.access_token,
                refresh_token = EXCLUDED.refresh_token,
                token_type = EXCLUDED.token_type,
                expires_at = EXCLUDED.expires_at,
                refresh_expires_at = COALESCE(EXCLUDED.refresh_expires_at, bungie_tokens.refresh_expires_at)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BungieToken>(&query)
            .bind(user_id)
            .bind(&input.access_token)
            .bind(&input.refresh_token)
            .bind(&input.token_type)
            .bind(input.expires_at)
            .bind(input.refresh_expires_at)
            .fetch_one(pool)
            .await
    }
}

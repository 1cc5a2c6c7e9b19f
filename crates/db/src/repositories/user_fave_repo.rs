//! Repository for the `user_faves` table.

use guardian_core::types::DbId;
use sqlx::PgPool;

use crate::models::user_fave::{CreateUserFave, UserFave};

/// Joined select so every row carries the owner's username.
const SELECT: &str = "SELECT f.id, f.user_id, u.username, f.item_instance_id, f.item_hash, f.created_at \
                      FROM user_faves f JOIN users u ON u.id = f.user_id";

/// Provides CRUD operations for favorite items.
pub struct UserFaveRepo;

impl UserFaveRepo {
    /// Insert a favorite. Fails with a `uq_user_faves_item_instance_id`
    /// violation when the instance is already favorited.
    pub async fn create(pool: &PgPool, input: &CreateUserFave) -> Result<UserFave, sqlx::Error> {
        let id: (DbId,) = sqlx::query_as(
            "INSERT INTO user_faves (user_id, item_instance_id, item_hash)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(input.user_id)
        .bind(&input.item_instance_id)
        .bind(input.item_hash)
        .fetch_one(pool)
        .await?;

        let query = format!("{SELECT} WHERE f.id = $1");
        sqlx::query_as::<_, UserFave>(&query)
            .bind(id.0)
            .fetch_one(pool)
            .await
    }

    /// List a user's favorites, oldest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<UserFave>, sqlx::Error> {
        let query = format!("{SELECT} WHERE f.user_id = $1 ORDER BY f.created_at, f.id");
        sqlx::query_as::<_, UserFave>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a favorite by item instance id. Returns `true` if a row was removed.
    pub async fn delete_by_instance(
        pool: &PgPool,
        item_instance_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_faves WHERE item_instance_id = $1")
            .bind(item_instance_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Drop a user's favorites whose instance id is not in `present`.
    ///
    /// Returns the number of rows removed.
    pub async fn retain_instances(
        pool: &PgPool,
        user_id: DbId,
        present: &[String],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_faves
             WHERE user_id = $1 AND NOT (item_instance_id = ANY($2))",
        )
        .bind(user_id)
        .bind(present)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}

//! Repository for the `chats` table.

use guardian_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::chat::Chat;

const COLUMNS: &str = "id, author_id, prompt, response, created_at";

pub struct ChatRepo;

impl ChatRepo {
    /// Store a new prompt without a response.
    pub async fn create(pool: &PgPool, author_id: DbId, prompt: &str) -> Result<Chat, sqlx::Error> {
        let query = format!(
            "INSERT INTO chats (id, author_id, prompt) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Chat>(&query)
            .bind(Uuid::new_v4())
            .bind(author_id)
            .bind(prompt)
            .fetch_one(pool)
            .await
    }

    pub async fn set_response(
        pool: &PgPool,
        id: Uuid,
        response: &str,
    ) -> Result<Option<Chat>, sqlx::Error> {
        let query = format!("UPDATE chats SET response = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Chat>(&query)
            .bind(id)
            .bind(response)
            .fetch_optional(pool)
            .await
    }

    /// An author's chats, oldest first.
    pub async fn list_for_author(pool: &PgPool, author_id: DbId) -> Result<Vec<Chat>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chats WHERE author_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Chat>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// The author's `limit` most recent answered chats, oldest first.
    pub async fn recent_answered(
        pool: &PgPool,
        author_id: DbId,
        limit: i64,
    ) -> Result<Vec<Chat>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM (
                SELECT {COLUMNS} FROM chats
                WHERE author_id = $1 AND response IS NOT NULL AND response <> ''
                ORDER BY created_at DESC, id DESC
                LIMIT $2
             ) recent
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Chat>(&query)
            .bind(author_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Chat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chats WHERE id = $1");
        sqlx::query_as::<_, Chat>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a chat. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM chats WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

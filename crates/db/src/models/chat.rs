//! Chat rows: one prompt and the generated response.

use guardian_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Chat {
    pub id: Uuid,
    pub author_id: DbId,
    pub prompt: String,
    pub response: Option<String>,
    pub created_at: Timestamp,
}

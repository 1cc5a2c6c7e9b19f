//! Raw manifest definition tables.

use guardian_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct DefinitionTable {
    pub id: DbId,
    pub version: String,
    pub table_name: String,
    pub language: String,
    pub content: serde_json::Value,
    pub created_at: Timestamp,
}

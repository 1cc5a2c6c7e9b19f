//! Optimizer audit history rows.

use guardian_core::types::{DbId, ItemHash, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArmorOptimizationRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub exotic_instance_id: String,
    pub exotic_hash: Option<ItemHash>,
    pub subclass_id: String,
    pub character_id: String,
    pub stat_priorities: Vec<String>,
    /// Serialized structured suggestion.
    pub result: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateOptimizationRequest {
    pub user_id: DbId,
    pub exotic_instance_id: String,
    pub exotic_hash: Option<ItemHash>,
    pub subclass_id: String,
    pub character_id: String,
    pub stat_priorities: Vec<String>,
    pub result: serde_json::Value,
}

//! Repository for the append-only `armor_optimization_requests` table.

use guardian_core::types::DbId;
use sqlx::PgPool;

use crate::models::optimization_request::{ArmorOptimizationRequest, CreateOptimizationRequest};

const COLUMNS: &str = "id, user_id, exotic_instance_id, exotic_hash, subclass_id, character_id, \
                       stat_priorities, result, created_at";

pub struct OptimizationRequestRepo;

impl OptimizationRequestRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateOptimizationRequest,
    ) -> Result<ArmorOptimizationRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO armor_optimization_requests
                (user_id, exotic_instance_id, exotic_hash, subclass_id, character_id,
                 stat_priorities, result)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArmorOptimizationRequest>(&query)
            .bind(input.user_id)
            .bind(&input.exotic_instance_id)
            .bind(input.exotic_hash)
            .bind(&input.subclass_id)
            .bind(&input.character_id)
            .bind(&input.stat_priorities)
            .bind(&input.result)
            .fetch_one(pool)
            .await
    }

    /// A user's requests, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ArmorOptimizationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM armor_optimization_requests
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ArmorOptimizationRequest>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}

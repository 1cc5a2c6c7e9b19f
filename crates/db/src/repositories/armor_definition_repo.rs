//! Repository for the `armor_definitions` cache.

use guardian_core::types::ItemHash;
use sqlx::PgPool;

use crate::models::armor_definition::{ArmorDefinition, UpsertArmorDefinition};

const COLUMNS: &str = "item_hash, name, tier_type, item_type, item_sub_type, \
                       item_category_hashes, created_at, updated_at";

/// Read access for the sync path, upserts for the refresh job.
pub struct ArmorDefinitionRepo;

impl ArmorDefinitionRepo {
    pub async fn find(
        pool: &PgPool,
        item_hash: ItemHash,
    ) -> Result<Option<ArmorDefinition>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM armor_definitions WHERE item_hash = $1");
        sqlx::query_as::<_, ArmorDefinition>(&query)
            .bind(item_hash)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every definition whose hash appears in `hashes`.
    pub async fn find_many(
        pool: &PgPool,
        hashes: &[ItemHash],
    ) -> Result<Vec<ArmorDefinition>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM armor_definitions WHERE item_hash = ANY($1)");
        sqlx::query_as::<_, ArmorDefinition>(&query)
            .bind(hashes)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM armor_definitions")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Upsert a batch of definitions inside one transaction.
    ///
    /// Returns the number of rows written.
    pub async fn bulk_upsert(
        pool: &PgPool,
        definitions: &[UpsertArmorDefinition],
    ) -> Result<usize, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for def in definitions {
            sqlx::query(
                "INSERT INTO armor_definitions
                    (item_hash, name, tier_type, item_type, item_sub_type, item_category_hashes)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 ON CONFLICT (item_hash) DO UPDATE SET
                    name = EXCLUDED.name,
                    tier_type = EXCLUDED.tier_type,
                    item_type = EXCLUDED.item_type,
                    item_sub_type = EXCLUDED.item_sub_type,
                    item_category_hashes = EXCLUDED.item_category_hashes",
            )
            .bind(def.item_hash)
            .bind(&def.name)
            .bind(def.tier_type)
            .bind(&def.item_type)
            .bind(def.item_sub_type)
            .bind(&def.item_category_hashes)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(definitions.len())
    }
}

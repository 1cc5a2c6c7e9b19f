//! Repository for the `armor_pieces` table.
//!
//! Rows are owned by a (user, character) pair and rewritten wholesale by
//! [`ArmorPieceRepo::reconcile`] on every sync.

use guardian_core::types::DbId;
use sqlx::PgPool;

use crate::models::armor_piece::{ArmorPiece, UpsertArmorPiece};

const COLUMNS: &str = "id, user_id, character_id, item_instance_id, item_hash, slot, class_type, \
                       is_exotic, inventory_location, mobility, resilience, recovery, discipline, \
                       intellect, strength, created_at, updated_at";

pub struct ArmorPieceRepo;

impl ArmorPieceRepo {
    /// Make the stored armor of `(user_id, character_id)` equal `pieces`.
    ///
    /// Upserts every piece keyed by instance id, then deletes rows of the
    /// pair whose instance id is not in `pieces`. Both steps share one
    /// transaction. Returns the number of retained rows.
    pub async fn reconcile(
        pool: &PgPool,
        user_id: DbId,
        character_id: &str,
        pieces: &[UpsertArmorPiece],
    ) -> Result<usize, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for piece in pieces {
            sqlx::query(
                "INSERT INTO armor_pieces
                    (user_id, character_id, item_instance_id, item_hash, slot, class_type,
                     is_exotic, inventory_location, mobility, resilience, recovery,
                     discipline, intellect, strength)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                 ON CONFLICT ON CONSTRAINT uq_armor_pieces_owner_item DO UPDATE SET
                    item_hash = EXCLUDED.item_hash,
                    slot = EXCLUDED.slot,
                    class_type = EXCLUDED.class_type,
                    is_exotic = EXCLUDED.is_exotic,
                    inventory_location = EXCLUDED.inventory_location,
                    mobility = EXCLUDED.mobility,
                    resilience = EXCLUDED.resilience,
                    recovery = EXCLUDED.recovery,
                    discipline = EXCLUDED.discipline,
                    intellect = EXCLUDED.intellect,
                    strength = EXCLUDED.strength",
            )
            .bind(user_id)
            .bind(character_id)
            .bind(&piece.item_instance_id)
            .bind(piece.item_hash)
            .bind(&piece.slot)
            .bind(&piece.class_type)
            .bind(piece.is_exotic)
            .bind(&piece.inventory_location)
            .bind(piece.stats.mobility)
            .bind(piece.stats.resilience)
            .bind(piece.stats.recovery)
            .bind(piece.stats.discipline)
            .bind(piece.stats.intellect)
            .bind(piece.stats.strength)
            .execute(&mut *tx)
            .await?;
        }

        let retained: Vec<String> = pieces
            .iter()
            .map(|p| p.item_instance_id.clone())
            .collect();
        let removed = sqlx::query(
            "DELETE FROM armor_pieces
             WHERE user_id = $1 AND character_id = $2
               AND NOT (item_instance_id = ANY($3))",
        )
        .bind(user_id)
        .bind(character_id)
        .bind(&retained)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            user_id,
            character_id,
            retained = pieces.len(),
            removed = removed.rows_affected(),
            "Armor pieces reconciled",
        );
        Ok(pieces.len())
    }

    /// All stored pieces of one character, ordered by slot then instance id.
    pub async fn list_for_character(
        pool: &PgPool,
        user_id: DbId,
        character_id: &str,
    ) -> Result<Vec<ArmorPiece>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM armor_pieces
             WHERE user_id = $1 AND character_id = $2
             ORDER BY slot, item_instance_id"
        );
        sqlx::query_as::<_, ArmorPiece>(&query)
            .bind(user_id)
            .bind(character_id)
            .fetch_all(pool)
            .await
    }
}

//! Repository for the `armor_modifiers` catalog.

use guardian_core::armor::{Element, ModifierType};
use sqlx::PgPool;

use crate::models::armor_modifier::{ArmorModifier, UpsertArmorModifier};

const COLUMNS: &str = "item_hash, name, description, modifier_type, subclass, icon_url, \
                       item_type_display_name, mobility, resilience, recovery, discipline, \
                       intellect, strength, is_conditionally_active, created_at, updated_at";

pub struct ArmorModifierRepo;

impl ArmorModifierRepo {
    /// All armor mods, ordered by name.
    pub async fn list_armor_mods(pool: &PgPool) -> Result<Vec<ArmorModifier>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM armor_modifiers WHERE modifier_type = $1 ORDER BY name"
        );
        sqlx::query_as::<_, ArmorModifier>(&query)
            .bind(ModifierType::ArmorMod.as_str())
            .fetch_all(pool)
            .await
    }

    /// Fragments for one subclass element, ordered by name.
    pub async fn list_fragments(
        pool: &PgPool,
        element: Element,
    ) -> Result<Vec<ArmorModifier>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM armor_modifiers
             WHERE modifier_type = $1 AND subclass = $2
             ORDER BY name"
        );
        sqlx::query_as::<_, ArmorModifier>(&query)
            .bind(ModifierType::SubclassFragment.as_str())
            .bind(element.as_str())
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive lookup by display name.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<ArmorModifier>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM armor_modifiers WHERE LOWER(name) = LOWER($1)
             ORDER BY item_hash LIMIT 1"
        );
        sqlx::query_as::<_, ArmorModifier>(&query)
            .bind(name.trim())
            .fetch_optional(pool)
            .await
    }

    /// Upsert a batch of modifiers inside one transaction.
    pub async fn bulk_upsert(
        pool: &PgPool,
        modifiers: &[UpsertArmorModifier],
    ) -> Result<usize, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for m in modifiers {
            sqlx::query(
                "INSERT INTO armor_modifiers
                    (item_hash, name, description, modifier_type, subclass, icon_url,
                     item_type_display_name, mobility, resilience, recovery, discipline,
                     intellect, strength, is_conditionally_active)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                 ON CONFLICT (item_hash) DO UPDATE SET
                    name = EXCLUDED.name,
                    description = EXCLUDED.description,
                    modifier_type = EXCLUDED.modifier_type,
                    subclass = EXCLUDED.subclass,
                    icon_url = EXCLUDED.icon_url,
                    item_type_display_name = EXCLUDED.item_type_display_name,
                    mobility = EXCLUDED.mobility,
                    resilience = EXCLUDED.resilience,
                    recovery = EXCLUDED.recovery,
                    discipline = EXCLUDED.discipline,
                    intellect = EXCLUDED.intellect,
                    strength = EXCLUDED.strength,
                    is_conditionally_active = EXCLUDED.is_conditionally_active",
            )
            .bind(m.item_hash)
            .bind(&m.name)
            .bind(&m.description)
            .bind(&m.modifier_type)
            .bind(&m.subclass)
            .bind(&m.icon_url)
            .bind(&m.item_type_display_name)
            .bind(m.stats.mobility)
            .bind(m.stats.resilience)
            .bind(m.stats.recovery)
            .bind(m.stats.discipline)
            .bind(m.stats.intellect)
            .bind(m.stats.strength)
            .bind(m.is_conditionally_active)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(modifiers.len())
    }
}

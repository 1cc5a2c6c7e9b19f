//! Armor definition cache rows.

use guardian_core::armor::{ArmorSlot, ClassTag, TIER_EXOTIC};
use guardian_core::lookup::{armor_slot_for_categories, class_for_categories};
use guardian_core::types::{ItemHash, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One armor item definition mirrored from the manifest.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArmorDefinition {
    pub item_hash: ItemHash,
    pub name: String,
    pub tier_type: i16,
    pub item_type: String,
    pub item_sub_type: i32,
    pub item_category_hashes: Vec<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ArmorDefinition {
    pub fn slot(&self) -> Option<ArmorSlot> {
        armor_slot_for_categories(&self.item_category_hashes)
    }

    pub fn class(&self) -> ClassTag {
        class_for_categories(&self.item_category_hashes)
    }

    pub fn is_exotic(&self) -> bool {
        self.tier_type == TIER_EXOTIC
    }
}

/// DTO written by the definition refresh job.
#[derive(Debug, Clone)]
pub struct UpsertArmorDefinition {
    pub item_hash: ItemHash,
    pub name: String,
    pub tier_type: i16,
    pub item_type: String,
    pub item_sub_type: i32,
    pub item_category_hashes: Vec<i64>,
}

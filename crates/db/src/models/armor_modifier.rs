//! Armor mod and subclass fragment catalog rows.

use guardian_core::armor::StatBlock;
use guardian_core::types::{ItemHash, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArmorModifier {
    pub item_hash: ItemHash,
    pub name: String,
    pub description: String,
    /// `ARMOR_MOD` or `SUBCLASS_FRAGMENT`.
    pub modifier_type: String,
    /// Element name for fragments, `None` for armor mods.
    pub subclass: Option<String>,
    pub icon_url: String,
    pub item_type_display_name: String,
    pub mobility: i32,
    pub resilience: i32,
    pub recovery: i32,
    pub discipline: i32,
    pub intellect: i32,
    pub strength: i32,
    pub is_conditionally_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ArmorModifier {
    pub fn stats(&self) -> StatBlock {
        StatBlock {
            mobility: self.mobility,
            resilience: self.resilience,
            recovery: self.recovery,
            discipline: self.discipline,
            intellect: self.intellect,
            strength: self.strength,
        }
    }
}

/// DTO written by the modifier population job.
#[derive(Debug, Clone)]
pub struct UpsertArmorModifier {
    pub item_hash: ItemHash,
    pub name: String,
    pub description: String,
    pub modifier_type: String,
    pub subclass: Option<String>,
    pub icon_url: String,
    pub item_type_display_name: String,
    pub stats: StatBlock,
    pub is_conditionally_active: bool,
}

//! Owned armor piece rows, one per (user, character, item instance).

use guardian_core::armor::StatBlock;
use guardian_core::types::{DbId, ItemHash, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArmorPiece {
    pub id: DbId,
    pub user_id: DbId,
    pub character_id: String,
    pub item_instance_id: String,
    pub item_hash: ItemHash,
    pub slot: String,
    pub class_type: String,
    pub is_exotic: bool,
    pub inventory_location: String,
    pub mobility: i32,
    pub resilience: i32,
    pub recovery: i32,
    pub discipline: i32,
    pub intellect: i32,
    pub strength: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ArmorPiece {
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

/// One retained item produced by a sync, ready to be upserted.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertArmorPiece {
    pub item_instance_id: String,
    pub item_hash: ItemHash,
    pub slot: String,
    pub class_type: String,
    pub is_exotic: bool,
    pub inventory_location: String,
    pub stats: StatBlock,
}

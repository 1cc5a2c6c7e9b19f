//! Armor inventory synchronization.
//!
//! A sync reads the live profile, keeps the armor a character could wear in
//! an optimized loadout (legendaries plus the one chosen exotic), and makes
//! `armor_pieces` for that character match exactly that set.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use guardian_bungie::profile::{ArmorSnapshot, Inventory, InventoryItem};
use guardian_core::armor::{ClassTag, InventoryLocation, StatBlock, StatKind, TIER_LEGENDARY};
use guardian_core::lookup::class_for_ordinal;
use guardian_core::types::ItemHash;
use guardian_db::models::armor_definition::ArmorDefinition;
use guardian_db::models::armor_piece::UpsertArmorPiece;
use guardian_db::models::user::User;
use guardian_db::repositories::{ArmorDefinitionRepo, ArmorPieceRepo};
use guardian_db::DbPool;

use crate::error::SyncError;
use crate::source::ProfileSource;

fn items_of<'a>(map: &'a HashMap<String, Inventory>, character_id: &str) -> &'a [InventoryItem] {
    map.get(character_id)
        .map(|inv| inv.items.as_slice())
        .unwrap_or_default()
}

/// Items of one character across the three inventory partitions, in
/// processing order. Items without an instance id are dropped here.
pub fn candidate_items<'a>(
    snapshot: &'a ArmorSnapshot,
    character_id: &str,
) -> Vec<(&'a InventoryItem, InventoryLocation)> {
    let partitions = [
        (snapshot.profile_items.as_slice(), InventoryLocation::Profile),
        (
            items_of(&snapshot.character_items, character_id),
            InventoryLocation::Character,
        ),
        (
            items_of(&snapshot.equipped_items, character_id),
            InventoryLocation::Equipped,
        ),
    ];

    partitions
        .into_iter()
        .flat_map(|(items, location)| items.iter().map(move |item| (item, location)))
        .filter(|(item, _)| item.item_instance_id.is_some())
        .collect()
}

/// Decide which items of `character_id` are retained and with which stats.
///
/// Pure: every per-item problem (no stats entry, unknown definition, no
/// slot, wrong class, ineligible tier) is a skip. Only a missing character
/// is an error.
pub fn classify_inventory(
    snapshot: &ArmorSnapshot,
    character_id: &str,
    chosen_exotic: Option<&str>,
    definitions: &HashMap<ItemHash, ArmorDefinition>,
) -> Result<Vec<UpsertArmorPiece>, SyncError> {
    let character = snapshot
        .characters
        .get(character_id)
        .ok_or_else(|| SyncError::CharacterNotFound {
            character_id: character_id.to_string(),
        })?;
    let character_class = class_for_ordinal(character.class_type);

    let mut seen = HashSet::new();
    let mut retained = Vec::new();

    for (item, location) in candidate_items(snapshot, character_id) {
        let Some(instance_id) = item.item_instance_id.as_deref() else {
            continue;
        };
        let Some(item_stats) = snapshot.item_stats.get(instance_id) else {
            tracing::debug!(instance_id, "Skipping item without stats");
            continue;
        };
        let Some(definition) = definitions.get(&ItemHash::from(item.item_hash)) else {
            continue;
        };
        let Some(slot) = definition.slot() else {
            tracing::debug!(item_hash = item.item_hash, "Skipping item without armor slot");
            continue;
        };

        let item_class = definition.class();
        let wearable = match character_class {
            Some(class) => item_class.wearable_by(class),
            None => item_class == ClassTag::All,
        };
        if !wearable {
            continue;
        }

        let is_exotic = definition.is_exotic();
        let eligible = definition.tier_type == TIER_LEGENDARY
            || (is_exotic && chosen_exotic == Some(instance_id));
        if !eligible || !seen.insert(instance_id) {
            continue;
        }

        let stats = StatBlock::from_lookup(|kind: StatKind| {
            item_stats
                .stats
                .get(&kind.hash().to_string())
                .map(|stat| stat.value)
        });
        if StatKind::ALL.into_iter().any(|kind| stats.get(kind) < 0) {
            tracing::debug!(instance_id, "Skipping item with a negative stat");
            continue;
        }

        retained.push(UpsertArmorPiece {
            item_instance_id: instance_id.to_string(),
            item_hash: definition.item_hash,
            slot: slot.as_str().to_string(),
            class_type: item_class.as_str().to_string(),
            is_exotic,
            inventory_location: location.as_str().to_string(),
            stats,
        });
    }

    Ok(retained)
}

/// Runs a full sync for one (user, character).
#[derive(Clone)]
pub struct ArmorSynchronizer {
    pool: DbPool,
    source: Arc<dyn ProfileSource>,
}

impl ArmorSynchronizer {
    pub fn new(pool: DbPool, source: Arc<dyn ProfileSource>) -> Self {
        Self { pool, source }
    }

    /// Sync the character's armor and return the number of retained pieces.
    pub async fn sync(
        &self,
        user: &User,
        character_id: &str,
        chosen_exotic: Option<&str>,
    ) -> Result<usize, SyncError> {
        let snapshot = self.source.armor_snapshot(user).await?;

        let hashes: Vec<ItemHash> = candidate_items(&snapshot, character_id)
            .into_iter()
            .map(|(item, _)| ItemHash::from(item.item_hash))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let definitions: HashMap<ItemHash, ArmorDefinition> =
            ArmorDefinitionRepo::find_many(&self.pool, &hashes)
                .await?
                .into_iter()
                .map(|def| (def.item_hash, def))
                .collect();

        let pieces = classify_inventory(&snapshot, character_id, chosen_exotic, &definitions)?;
        let retained =
            ArmorPieceRepo::reconcile(&self.pool, user.id, character_id, &pieces).await?;

        tracing::info!(
            user_id = user.id,
            character_id,
            candidates = hashes.len(),
            retained,
            "Armor sync complete",
        );
        Ok(retained)
    }
}

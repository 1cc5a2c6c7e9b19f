//! `GetProfile` components.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::error::BungieError;

/// Profile component ids accepted by the `components` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Profiles,
    ProfileInventories,
    Characters,
    CharacterInventories,
    CharacterEquipment,
    ItemInstances,
    ItemStats,
}

impl Component {
    pub fn id(self) -> u16 {
        match self {
            Component::Profiles => 100,
            Component::ProfileInventories => 102,
            Component::Characters => 200,
            Component::CharacterInventories => 201,
            Component::CharacterEquipment => 205,
            Component::ItemInstances => 300,
            Component::ItemStats => 304,
        }
    }

    /// Comma-separated ids for a query string.
    pub fn join(components: &[Component]) -> String {
        components
            .iter()
            .map(|c| c.id().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Components fetched by the armor sync.
pub const ARMOR_SYNC_COMPONENTS: [Component; 6] = [
    Component::ProfileInventories,
    Component::Characters,
    Component::CharacterInventories,
    Component::CharacterEquipment,
    Component::ItemInstances,
    Component::ItemStats,
];

/// Components fetched for the client-facing profile view.
pub const PROFILE_VIEW_COMPONENTS: [Component; 6] = [
    Component::Profiles,
    Component::ProfileInventories,
    Component::Characters,
    Component::CharacterInventories,
    Component::CharacterEquipment,
    Component::ItemInstances,
];

/// `{ "data": T }` wrapper Bungie puts around each component. `data` is
/// absent when the component is private or was not requested.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentData<T> {
    pub data: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub item_hash: u32,
    pub item_instance_id: Option<String>,
    #[serde(default)]
    pub bucket_hash: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub items: Vec<InventoryItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub character_id: String,
    /// 0 Titan, 1 Hunter, 2 Warlock, 3 unknown.
    pub class_type: i32,
    #[serde(default)]
    pub light: i32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStat {
    pub stat_hash: u32,
    pub value: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemStats {
    /// Keyed by stat hash as a decimal string.
    #[serde(default)]
    pub stats: HashMap<String, ItemStat>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemComponents {
    pub stats: Option<ComponentData<HashMap<String, ItemStats>>>,
}

/// Typed `GetProfile` response. Sections are optional because each one is
/// only present when its component was requested.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub profile_inventory: Option<ComponentData<Inventory>>,
    pub characters: Option<ComponentData<HashMap<String, Character>>>,
    pub character_inventories: Option<ComponentData<HashMap<String, Inventory>>>,
    pub character_equipment: Option<ComponentData<HashMap<String, Inventory>>>,
    pub item_components: Option<ItemComponents>,
}

/// The sections of a [`Profile`] the armor sync relies on, with every
/// required section present.
#[derive(Debug, Clone)]
pub struct ArmorSnapshot {
    pub profile_items: Vec<InventoryItem>,
    pub characters: HashMap<String, Character>,
    pub character_items: HashMap<String, Inventory>,
    pub equipped_items: HashMap<String, Inventory>,
    /// Instance id -> stats.
    pub item_stats: HashMap<String, ItemStats>,
}

fn require<T>(section: Option<ComponentData<T>>, name: &str) -> Result<T, BungieError> {
    section
        .and_then(|s| s.data)
        .ok_or_else(|| BungieError::Malformed(format!("profile is missing {name}")))
}

impl Profile {
    /// Check that every section the armor sync reads is present.
    pub fn into_armor_snapshot(self) -> Result<ArmorSnapshot, BungieError> {
        let profile_items = require(self.profile_inventory, "profileInventory")?.items;
        let characters = require(self.characters, "characters")?;
        let character_items = require(self.character_inventories, "characterInventories")?;
        let equipped_items = require(self.character_equipment, "characterEquipment")?;
        let item_stats = require(
            self.item_components.and_then(|c| c.stats),
            "itemComponents.stats",
        )?;
        Ok(ArmorSnapshot {
            profile_items,
            characters,
            character_items,
            equipped_items,
            item_stats,
        })
    }
}

/// Instance ids found in `profileInventory` of a raw profile envelope.
///
/// `None` when the component is absent (privacy settings or not requested),
/// which is different from an empty inventory.
pub fn profile_inventory_instances(raw: &serde_json::Value) -> Option<Vec<String>> {
    let items = raw
        .pointer("/Response/profileInventory/data/items")?
        .as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| item.get("itemInstanceId")?.as_str().map(str::to_string))
            .collect(),
    )
}

//! Manifest index and the definition records read from its JSON tables.

use std::collections::HashMap;

use serde::Deserialize;

/// Name of the item definition table.
pub const INVENTORY_ITEM_TABLE: &str = "DestinyInventoryItemDefinition";

/// Name of the stat definition table.
pub const STAT_TABLE: &str = "DestinyStatDefinition";

/// Payload of `/Platform/Destiny2/Manifest/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub version: String,
    /// Language -> table name -> content path.
    #[serde(default)]
    pub json_world_component_content_paths: HashMap<String, HashMap<String, String>>,
}

impl Manifest {
    /// Content path of one table in one language.
    pub fn table_path(&self, language: &str, table: &str) -> Option<&str> {
        self.json_world_component_content_paths
            .get(language)?
            .get(table)
            .map(String::as_str)
    }

    /// All `(table name, content path)` pairs of a language, sorted by name.
    pub fn tables(&self, language: &str) -> Vec<(&str, &str)> {
        let mut tables: Vec<_> = self
            .json_world_component_content_paths
            .get(language)
            .map(|paths| {
                paths
                    .iter()
                    .map(|(name, path)| (name.as_str(), path.as_str()))
                    .collect()
            })
            .unwrap_or_default();
        tables.sort_unstable();
        tables
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayProperties {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryBlock {
    #[serde(default)]
    pub tier_type: i16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentStat {
    pub stat_type_hash: u32,
    pub value: i32,
    #[serde(default)]
    pub is_conditionally_active: bool,
}

/// The fields of a `DestinyInventoryItemDefinition` entry this backend uses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemDefinition {
    #[serde(default)]
    pub display_properties: DisplayProperties,
    #[serde(default)]
    pub inventory: InventoryBlock,
    #[serde(default)]
    pub item_type: i32,
    #[serde(default)]
    pub item_sub_type: i32,
    #[serde(default)]
    pub item_type_display_name: String,
    #[serde(default)]
    pub item_category_hashes: Vec<i64>,
    #[serde(default)]
    pub investment_stats: Vec<InvestmentStat>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatDefinition {
    #[serde(default)]
    pub display_properties: DisplayProperties,
}

/// A definition table keyed by hash (decimal string).
pub type DefinitionMap<T> = HashMap<String, T>;

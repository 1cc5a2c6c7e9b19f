//! Catalog refresh jobs fed by the Bungie manifest.

use guardian_bungie::manifest::{
    DefinitionMap, InventoryItemDefinition, Manifest, StatDefinition, INVENTORY_ITEM_TABLE,
    STAT_TABLE,
};
use guardian_bungie::BungieClient;
use guardian_core::armor::{Element, ModifierType, StatBlock, StatKind, ITEM_TYPE_ARMOR};
use guardian_core::lookup::{CATEGORY_ARMOR_MODS, CATEGORY_SUBCLASS_MODS};
use guardian_db::models::armor_definition::UpsertArmorDefinition;
use guardian_db::models::armor_modifier::UpsertArmorModifier;
use guardian_db::repositories::{ArmorDefinitionRepo, ArmorModifierRepo, DefinitionTableRepo};
use guardian_db::DbPool;

use crate::error::ManifestError;

/// Language of every table this backend mirrors.
pub const LANGUAGE: &str = "en";

/// Investment stats below this value are ignored when cataloguing modifiers.
pub const MIN_MODIFIER_STAT: i32 = 5;

/// Prefix for manifest icon paths.
pub const ICON_HOST: &str = "https://www.bungie.net";

/// Result of [`ManifestJobs::refresh_definition_tables`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshOutcome {
    UpToDate { version: String },
    Updated { version: String, tables: usize },
}

/// Armor entries (`itemType == 2`) of an item definition table.
pub fn armor_definitions(
    items: &DefinitionMap<InventoryItemDefinition>,
) -> Vec<UpsertArmorDefinition> {
    let mut defs: Vec<_> = items
        .iter()
        .filter(|(_, def)| def.item_type == ITEM_TYPE_ARMOR)
        .filter_map(|(hash, def)| {
            Some(UpsertArmorDefinition {
                item_hash: hash.parse().ok()?,
                name: def.display_properties.name.clone(),
                tier_type: def.inventory.tier_type,
                item_type: def.item_type_display_name.clone(),
                item_sub_type: def.item_sub_type,
                item_category_hashes: def.item_category_hashes.clone(),
            })
        })
        .collect();
    defs.sort_by_key(|d| d.item_hash);
    defs
}

/// Armor mods and subclass fragments with at least one meaningful stat.
pub fn armor_modifiers(
    items: &DefinitionMap<InventoryItemDefinition>,
    stats: &DefinitionMap<StatDefinition>,
) -> Vec<UpsertArmorModifier> {
    let mut modifiers: Vec<_> = items
        .iter()
        .filter(|(_, def)| {
            def.item_category_hashes
                .iter()
                .any(|c| *c == CATEGORY_ARMOR_MODS || *c == CATEGORY_SUBCLASS_MODS)
        })
        .filter_map(|(hash, def)| modifier_from_definition(hash.parse().ok()?, def, stats))
        .collect();
    modifiers.sort_by_key(|m| m.item_hash);
    modifiers
}

fn modifier_from_definition(
    item_hash: i64,
    def: &InventoryItemDefinition,
    stats: &DefinitionMap<StatDefinition>,
) -> Option<UpsertArmorModifier> {
    let relevant: Vec<_> = def
        .investment_stats
        .iter()
        .filter(|stat| stat.value >= MIN_MODIFIER_STAT)
        .filter_map(|stat| {
            let name = &stats.get(&stat.stat_type_hash.to_string())?.display_properties.name;
            Some((name.as_str(), stat))
        })
        .collect();
    if relevant.is_empty() {
        return None;
    }

    let block = StatBlock::from_lookup(|kind: StatKind| {
        relevant
            .iter()
            .find(|(name, _)| StatKind::from_display_name(name) == Some(kind))
            .map(|(_, stat)| stat.value)
    });

    let type_name = &def.item_type_display_name;
    let modifier_type = if type_name.contains("General Armor Mod") {
        ModifierType::ArmorMod
    } else {
        ModifierType::SubclassFragment
    };
    let subclass = type_name
        .contains("Fragment")
        .then(|| type_name.split_whitespace().next().map(Element::from_name))
        .flatten()
        .filter(|element| *element != Element::Unknown)
        .map(|element| element.as_str().to_string());

    Some(UpsertArmorModifier {
        item_hash,
        name: def.display_properties.name.clone(),
        description: def.display_properties.description.clone(),
        modifier_type: modifier_type.as_str().to_string(),
        subclass,
        icon_url: format!("{ICON_HOST}{}", def.display_properties.icon),
        item_type_display_name: type_name.clone(),
        stats: block,
        is_conditionally_active: relevant.iter().any(|(_, s)| s.is_conditionally_active),
    })
}

/// Jobs that mirror manifest data into local tables.
#[derive(Clone)]
pub struct ManifestJobs {
    pool: DbPool,
    bungie: BungieClient,
}

impl ManifestJobs {
    pub fn new(pool: DbPool, bungie: BungieClient) -> Self {
        Self { pool, bungie }
    }

    /// Upsert every armor definition. Returns the number written.
    pub async fn refresh_armor_definitions(&self) -> Result<usize, ManifestError> {
        let manifest = self.bungie.manifest().await?;
        let items = self.items_table(&manifest).await?;
        let defs = armor_definitions(&items);
        let written = ArmorDefinitionRepo::bulk_upsert(&self.pool, &defs).await?;
        tracing::info!(version = %manifest.version, written, "Armor definitions refreshed");
        Ok(written)
    }

    /// Upsert the armor mod and fragment catalog. Returns the number written.
    pub async fn populate_armor_modifiers(&self) -> Result<usize, ManifestError> {
        let manifest = self.bungie.manifest().await?;
        let items = self.items_table(&manifest).await?;
        let stats: DefinitionMap<StatDefinition> = self
            .bungie
            .definition_table(table_path(&manifest, STAT_TABLE)?)
            .await?;
        let modifiers = armor_modifiers(&items, &stats);
        let written = ArmorModifierRepo::bulk_upsert(&self.pool, &modifiers).await?;
        tracing::info!(version = %manifest.version, written, "Armor modifiers populated");
        Ok(written)
    }

    /// Replace every stored definition table when the manifest version moved.
    pub async fn refresh_definition_tables(&self) -> Result<RefreshOutcome, ManifestError> {
        let manifest = self.bungie.manifest().await?;
        let current = DefinitionTableRepo::current_version(&self.pool, LANGUAGE).await?;
        if current.as_deref() == Some(manifest.version.as_str()) {
            tracing::info!(version = %manifest.version, "Definition tables up to date");
            return Ok(RefreshOutcome::UpToDate {
                version: manifest.version,
            });
        }

        let mut tables = Vec::new();
        for (name, path) in manifest.tables(LANGUAGE) {
            let content: serde_json::Value = self.bungie.definition_table(path).await?;
            tables.push((name.to_string(), content));
        }
        let written =
            DefinitionTableRepo::replace_all(&self.pool, &manifest.version, LANGUAGE, &tables)
                .await?;

        tracing::info!(
            previous = current.as_deref().unwrap_or("none"),
            version = %manifest.version,
            tables = written,
            "Definition tables replaced",
        );
        Ok(RefreshOutcome::Updated {
            version: manifest.version,
            tables: written,
        })
    }

    async fn items_table(
        &self,
        manifest: &Manifest,
    ) -> Result<DefinitionMap<InventoryItemDefinition>, ManifestError> {
        Ok(self
            .bungie
            .definition_table(table_path(manifest, INVENTORY_ITEM_TABLE)?)
            .await?)
    }
}

fn table_path<'a>(manifest: &'a Manifest, table: &str) -> Result<&'a str, ManifestError> {
    manifest
        .table_path(LANGUAGE, table)
        .ok_or_else(|| ManifestError::MissingTable {
            table: table.to_string(),
            language: LANGUAGE.to_string(),
        })
}

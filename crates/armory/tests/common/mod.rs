//! Shared fixtures for armory integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use guardian_bungie::profile::{ArmorSnapshot, Character, Inventory, InventoryItem, ItemStat, ItemStats};
use guardian_core::armor::StatKind;
use guardian_db::models::armor_definition::UpsertArmorDefinition;
use guardian_db::models::armor_modifier::UpsertArmorModifier;
use guardian_db::models::user::User;
use guardian_db::repositories::{ArmorDefinitionRepo, ArmorModifierRepo, UserRepo};
use guardian_llm::{GenerationError, GenerationRequest, TextGenerator};
use sqlx::PgPool;

use guardian_armory::{ProfileSource, SyncError};

pub const CHARACTER: &str = "2305843009";

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Serves a mutable snapshot, or an auth failure when empty.
#[derive(Default)]
pub struct FakeProfileSource {
    pub snapshot: Mutex<Option<ArmorSnapshot>>,
}

impl FakeProfileSource {
    pub fn with(snapshot: ArmorSnapshot) -> Arc<Self> {
        Arc::new(Self {
            snapshot: Mutex::new(Some(snapshot)),
        })
    }

    pub fn set(&self, snapshot: ArmorSnapshot) {
        *self.snapshot.lock().unwrap() = Some(snapshot);
    }
}

#[async_trait]
impl ProfileSource for FakeProfileSource {
    async fn armor_snapshot(&self, _user: &User) -> Result<ArmorSnapshot, SyncError> {
        self.snapshot
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| SyncError::Auth("no token".into()))
    }
}

/// Replies with a fixed text and records every request.
pub struct FakeGenerator {
    pub reply: Result<String, u16>,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(status),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn last_request(&self) -> GenerationRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(GenerationError::Api {
                status: *status,
                body: "overloaded".into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn item(hash: u32, instance: &str) -> InventoryItem {
    InventoryItem {
        item_hash: hash,
        item_instance_id: Some(instance.to_string()),
        bucket_hash: 0,
    }
}

pub fn stats(pairs: &[(StatKind, i32)]) -> ItemStats {
    ItemStats {
        stats: pairs
            .iter()
            .map(|(kind, value)| {
                (
                    kind.hash().to_string(),
                    ItemStat {
                        stat_hash: kind.hash(),
                        value: *value,
                    },
                )
            })
            .collect(),
    }
}

/// A hunter with `character` items; every item gets `recovery` as its stats.
pub fn snapshot(profile: Vec<InventoryItem>, character: Vec<InventoryItem>, recovery: i32) -> ArmorSnapshot {
    let item_stats: HashMap<String, ItemStats> = profile
        .iter()
        .chain(character.iter())
        .filter_map(|i| i.item_instance_id.clone())
        .map(|id| (id, stats(&[(StatKind::Recovery, recovery), (StatKind::Mobility, 8)])))
        .collect();
    ArmorSnapshot {
        profile_items: profile,
        characters: HashMap::from([(
            CHARACTER.to_string(),
            Character {
                character_id: CHARACTER.to_string(),
                class_type: 1,
                light: 2000,
            },
        )]),
        character_items: HashMap::from([(CHARACTER.to_string(), Inventory { items: character })]),
        equipped_items: HashMap::new(),
        item_stats,
    }
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

pub async fn seed_user(pool: &PgPool) -> User {
    UserRepo::get_or_create(pool, "4611686018467").await.unwrap()
}

/// Hashes 1..=5 legendary hunter/any-class armor, 10 an exotic hunter helmet,
/// 20 a legendary titan chest.
pub async fn seed_catalog(pool: &PgPool) {
    let def = |hash: i64, name: &str, tier: i16, categories: Vec<i64>| UpsertArmorDefinition {
        item_hash: hash,
        name: name.to_string(),
        tier_type: tier,
        item_type: String::new(),
        item_sub_type: 0,
        item_category_hashes: categories,
    };
    ArmorDefinitionRepo::bulk_upsert(
        pool,
        &[
            def(1, "Legend Helm", 5, vec![45]),
            def(2, "Legend Grips", 5, vec![46, 23]),
            def(3, "Legend Vest", 5, vec![47, 23]),
            def(4, "Legend Strides", 5, vec![48]),
            def(5, "Legend Cloak", 5, vec![49, 23]),
            def(10, "Celestial Nighthawk", 6, vec![45, 23]),
            def(20, "Titan Plate", 5, vec![47, 22]),
        ],
    )
    .await
    .unwrap();

    let modifier = |hash: i64, name: &str, kind: &str, subclass: Option<&str>| UpsertArmorModifier {
        item_hash: hash,
        name: name.to_string(),
        description: String::new(),
        modifier_type: kind.to_string(),
        subclass: subclass.map(str::to_string),
        icon_url: String::new(),
        item_type_display_name: String::new(),
        stats: guardian_core::armor::StatBlock {
            recovery: 10,
            ..Default::default()
        },
        is_conditionally_active: false,
    };
    ArmorModifierRepo::bulk_upsert(
        pool,
        &[
            modifier(500, "Ember of Torches", "SUBCLASS_FRAGMENT", Some("Solar")),
            modifier(501, "Whisper of Chains", "SUBCLASS_FRAGMENT", Some("Stasis")),
            modifier(600, "Recovery Mod", "ARMOR_MOD", None),
        ],
    )
    .await
    .unwrap();
}

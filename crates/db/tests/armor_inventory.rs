//! Integration tests for armor piece reconciliation and the catalog tables.

use guardian_core::armor::{Element, StatBlock};
use guardian_db::models::armor_definition::UpsertArmorDefinition;
use guardian_db::models::armor_modifier::UpsertArmorModifier;
use guardian_db::models::armor_piece::UpsertArmorPiece;
use guardian_db::repositories::{
    ArmorDefinitionRepo, ArmorModifierRepo, ArmorPieceRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn piece(instance: &str, slot: &str, recovery: i32) -> UpsertArmorPiece {
    UpsertArmorPiece {
        item_instance_id: instance.to_string(),
        item_hash: 1000,
        slot: slot.to_string(),
        class_type: "ALL".to_string(),
        is_exotic: false,
        inventory_location: "character".to_string(),
        stats: StatBlock {
            mobility: 10,
            recovery,
            ..StatBlock::default()
        },
    }
}

fn modifier(hash: i64, name: &str, kind: &str, subclass: Option<&str>) -> UpsertArmorModifier {
    UpsertArmorModifier {
        item_hash: hash,
        name: name.to_string(),
        description: String::new(),
        modifier_type: kind.to_string(),
        subclass: subclass.map(str::to_string),
        icon_url: String::new(),
        item_type_display_name: String::new(),
        stats: StatBlock {
            discipline: 10,
            ..StatBlock::default()
        },
        is_conditionally_active: false,
    }
}

async fn instance_ids(pool: &PgPool, user_id: i64, character: &str) -> Vec<String> {
    ArmorPieceRepo::list_for_character(pool, user_id, character)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.item_instance_id)
        .collect()
}

// ---------------------------------------------------------------------------
// Reconcile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reconcile_is_idempotent(pool: PgPool) {
    let user = UserRepo::get_or_create(&pool, "4611686018").await.unwrap();
    let pieces = vec![piece("a", "HELMET", 20), piece("b", "GAUNTLETS", 12)];

    let first = ArmorPieceRepo::reconcile(&pool, user.id, "c1", &pieces).await.unwrap();
    let before = ArmorPieceRepo::list_for_character(&pool, user.id, "c1").await.unwrap();
    let second = ArmorPieceRepo::reconcile(&pool, user.id, "c1", &pieces).await.unwrap();
    let after = ArmorPieceRepo::list_for_character(&pool, user.id, "c1").await.unwrap();

    assert_eq!(first, 2);
    assert_eq!(second, 2);
    let ids = |rows: &[guardian_db::models::armor_piece::ArmorPiece]| {
        rows.iter().map(|p| (p.id, p.item_instance_id.clone(), p.stats())).collect::<Vec<_>>()
    };
    assert_eq!(ids(&before), ids(&after));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reconcile_deletes_stale_and_overwrites_stats(pool: PgPool) {
    let user = UserRepo::get_or_create(&pool, "4611686018").await.unwrap();

    ArmorPieceRepo::reconcile(
        &pool,
        user.id,
        "c1",
        &[piece("a", "HELMET", 20), piece("b", "GAUNTLETS", 12)],
    )
    .await
    .unwrap();

    ArmorPieceRepo::reconcile(&pool, user.id, "c1", &[piece("a", "HELMET", 7)])
        .await
        .unwrap();

    assert_eq!(instance_ids(&pool, user.id, "c1").await, vec!["a".to_string()]);
    let rows = ArmorPieceRepo::list_for_character(&pool, user.id, "c1")
        .await
        .unwrap();
    assert_eq!(rows[0].recovery, 7);
    assert_eq!(rows[0].mobility, 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reconcile_is_scoped_to_character(pool: PgPool) {
    let user = UserRepo::get_or_create(&pool, "4611686018").await.unwrap();

    ArmorPieceRepo::reconcile(&pool, user.id, "c1", &[piece("a", "HELMET", 1)])
        .await
        .unwrap();
    ArmorPieceRepo::reconcile(&pool, user.id, "c2", &[piece("b", "HELMET", 1)])
        .await
        .unwrap();
    ArmorPieceRepo::reconcile(&pool, user.id, "c2", &[]).await.unwrap();

    assert_eq!(instance_ids(&pool, user.id, "c1").await, vec!["a".to_string()]);
    assert!(instance_ids(&pool, user.id, "c2").await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_stats_are_rejected(pool: PgPool) {
    let user = UserRepo::get_or_create(&pool, "4611686018").await.unwrap();
    let bad = piece("a", "HELMET", -1);

    let result = ArmorPieceRepo::reconcile(&pool, user.id, "c1", &[bad]).await;
    assert!(result.is_err(), "Negative stats should violate the check constraint");
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_definition_upsert_replaces_fields(pool: PgPool) {
    let mut def = UpsertArmorDefinition {
        item_hash: 42,
        name: "Old Name".to_string(),
        tier_type: 5,
        item_type: "Helmet".to_string(),
        item_sub_type: 26,
        item_category_hashes: vec![20, 45],
    };
    ArmorDefinitionRepo::bulk_upsert(&pool, std::slice::from_ref(&def))
        .await
        .unwrap();
    def.name = "New Name".to_string();
    def.tier_type = 6;
    ArmorDefinitionRepo::bulk_upsert(&pool, &[def]).await.unwrap();

    let stored = ArmorDefinitionRepo::find(&pool, 42).await.unwrap().unwrap();
    assert_eq!(stored.name, "New Name");
    assert!(stored.is_exotic());
    assert_eq!(stored.item_category_hashes, vec![20, 45]);

    let many = ArmorDefinitionRepo::find_many(&pool, &[42, 43]).await.unwrap();
    assert_eq!(many.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_modifiers_filter_by_type_and_element(pool: PgPool) {
    ArmorModifierRepo::bulk_upsert(
        &pool,
        &[
            modifier(1, "Ember of Torches", "SUBCLASS_FRAGMENT", Some("Solar")),
            modifier(2, "Whisper of Chains", "SUBCLASS_FRAGMENT", Some("Stasis")),
            modifier(3, "Recovery Mod", "ARMOR_MOD", None),
        ],
    )
    .await
    .unwrap();

    let solar = ArmorModifierRepo::list_fragments(&pool, Element::Solar).await.unwrap();
    assert_eq!(solar.len(), 1);
    assert_eq!(solar[0].name, "Ember of Torches");

    let mods = ArmorModifierRepo::list_armor_mods(&pool).await.unwrap();
    assert_eq!(mods.len(), 1);
    assert_eq!(mods[0].stats().discipline, 10);

    let found = ArmorModifierRepo::find_by_name(&pool, "recovery mod").await.unwrap();
    assert_eq!(found.map(|m| m.item_hash), Some(3));
}

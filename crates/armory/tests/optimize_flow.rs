//! Optimization requests end to end with fake upstreams.

mod common;

use assert_matches::assert_matches;
use guardian_armory::chat::{ChatService, CHAT_HISTORY_LIMIT};
use guardian_armory::{
    ArmorOptimizer, ArmorSynchronizer, OptimizeError, OptimizeOutcome, OptimizeRequest, SyncError,
};
use guardian_core::conversation::ChatRole;
use guardian_core::reply::ReplyError;
use guardian_db::repositories::OptimizationRequestRepo;
use sqlx::PgPool;

use common::{item, seed_catalog, seed_user, snapshot, FakeGenerator, FakeProfileSource, CHARACTER};

const SOLAR_HUNTER: &str = "2240888816";

const REPLY: &str = r#"Here you go:
```json
{
  "armor_pieces": [
    {"id": "x", "slot": "HELMET"},
    {"id": "b"},
    {"id": "ghost", "slot": "CLASS_ARMOR"}
  ],
  "fragments": [{"name": "ember of torches"}, {"name": "Ember of Mercy"}],
  "mods": [{"name": "Recovery Mod", "slot": "HELMET"}],
  "total_stats": {"mobility": 30, "resilience": 60, "recovery": 100,
                  "discipline": 50, "intellect": 50, "strength": 50},
  "explanation": "Recovery first."
}
```"#;

fn optimize_request() -> OptimizeRequest {
    OptimizeRequest {
        exotic_instance_id: Some("x".into()),
        exotic_hash: Some(10),
        subclass_id: Some(SOLAR_HUNTER.into()),
        stat_priorities: vec!["1943323491".into(), "2996146975".into()],
        chat_input: Some("I want fast recovery".into()),
        character_id: Some(CHARACTER.into()),
    }
}

async fn optimizer(pool: &PgPool, generator: std::sync::Arc<FakeGenerator>) -> ArmorOptimizer {
    seed_catalog(pool).await;
    let source = FakeProfileSource::with(snapshot(
        vec![item(1, "a")],
        vec![item(2, "b"), item(10, "x")],
        20,
    ));
    ArmorOptimizer::new(
        pool.clone(),
        ArmorSynchronizer::new(pool.clone(), source),
        generator,
    )
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_suggestion_is_enriched_and_persisted(pool: PgPool) {
    let generator = FakeGenerator::replying(REPLY);
    let optimizer = optimizer(&pool, generator.clone()).await;
    let user = seed_user(&pool).await;

    let outcome = optimizer.optimize(&user, optimize_request()).await.unwrap();
    let suggestion = assert_matches!(outcome, OptimizeOutcome::Suggestion { suggestion } => suggestion);

    let exotic = &suggestion.armor_pieces[0];
    assert_eq!(exotic.hash, Some(10));
    assert_eq!(exotic.name.as_deref(), Some("Celestial Nighthawk"));
    assert_eq!(suggestion.armor_pieces[1].slot.as_deref(), Some("GAUNTLETS"));
    assert_eq!(suggestion.armor_pieces[2].hash, None);
    assert_eq!(suggestion.fragments[0].hash, Some(500));
    assert_eq!(suggestion.fragments[1].hash, None);
    assert_eq!(suggestion.mods[0].hash, Some(600));

    let prompt = &generator.last_request().messages[0].content;
    assert!(prompt.contains("Solar subclass"));
    assert!(prompt.contains("\"Ember of Torches\""));
    assert!(!prompt.contains("Whisper of Chains"));
    assert!(prompt.contains("recovery, mobility"));

    let history = OptimizationRequestRepo::list_for_user(&pool, user.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].exotic_hash, Some(10));
    let stored = history[0].result.as_ref().unwrap();
    assert_eq!(stored["armor_pieces"][0]["hash"], 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_chat_branch_skips_sync(pool: PgPool) {
    let generator = FakeGenerator::replying("Well of Radiance.");
    let user = seed_user(&pool).await;
    let optimizer = ArmorOptimizer::new(
        pool.clone(),
        ArmorSynchronizer::new(pool.clone(), std::sync::Arc::new(FakeProfileSource::default())),
        generator.clone(),
    );

    let outcome = optimizer
        .optimize(
            &user,
            OptimizeRequest {
                chat_input: Some("Best warlock super?".into()),
                ..OptimizeRequest::default()
            },
        )
        .await
        .unwrap();

    assert_matches!(outcome, OptimizeOutcome::Chat { response } if response == "Well of Radiance.");
    let request = generator.last_request();
    assert!(request.system.unwrap().contains("Destiny 2 expert"));
    assert_eq!(request.messages[0].role, ChatRole::User);
    assert!(OptimizationRequestRepo::list_for_user(&pool, user.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unparseable_reply_is_not_persisted(pool: PgPool) {
    let optimizer = optimizer(&pool, FakeGenerator::replying("I cannot help with that.")).await;
    let user = seed_user(&pool).await;

    let err = optimizer.optimize(&user, optimize_request()).await.unwrap_err();
    assert_matches!(
        err,
        OptimizeError::Parse { source: ReplyError::NoStructuredBlock, raw } if raw.contains("cannot help")
    );
    assert!(OptimizationRequestRepo::list_for_user(&pool, user.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_generation_failure_is_reported(pool: PgPool) {
    let optimizer = optimizer(&pool, FakeGenerator::failing(529)).await;
    let user = seed_user(&pool).await;

    assert_matches!(
        optimizer.optimize(&user, optimize_request()).await,
        Err(OptimizeError::Generation(_))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sync_failure_stops_before_generation(pool: PgPool) {
    let generator = FakeGenerator::replying(REPLY);
    let user = seed_user(&pool).await;
    let optimizer = ArmorOptimizer::new(
        pool.clone(),
        ArmorSynchronizer::new(pool.clone(), std::sync::Arc::new(FakeProfileSource::default())),
        generator.clone(),
    );

    assert_matches!(
        optimizer.optimize(&user, optimize_request()).await,
        Err(OptimizeError::Sync(SyncError::Auth(_)))
    );
    assert!(generator.requests.lock().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_character_is_invalid(pool: PgPool) {
    let optimizer = optimizer(&pool, FakeGenerator::replying(REPLY)).await;
    let user = seed_user(&pool).await;
    let request = OptimizeRequest {
        character_id: None,
        ..optimize_request()
    };
    assert_matches!(
        optimizer.optimize(&user, request).await,
        Err(OptimizeError::Invalid(_))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_chat_service_replays_answered_history(pool: PgPool) {
    let user = seed_user(&pool).await;
    let generator = FakeGenerator::replying("Sure.");
    let chats = ChatService::new(pool.clone(), generator.clone());

    chats.send(user.id, "first").await.unwrap();
    let second = chats.send(user.id, "second").await.unwrap();

    assert_eq!(second.response.as_deref(), Some("Sure."));
    let request = generator.last_request();
    let contents: Vec<_> = request.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "Sure.", "second"]);
    assert_eq!(request.temperature, Some(0.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_chat_history_is_capped(pool: PgPool) {
    let user = seed_user(&pool).await;
    let generator = FakeGenerator::replying("Sure.");
    let chats = ChatService::new(pool.clone(), generator.clone());

    for n in 0..CHAT_HISTORY_LIMIT + 2 {
        chats.send(user.id, &format!("question {n}")).await.unwrap();
    }

    let request = generator.last_request();
    assert_eq!(request.messages.len() as i64, 2 * CHAT_HISTORY_LIMIT + 1);
    assert_eq!(request.messages[0].content, "question 1");
}

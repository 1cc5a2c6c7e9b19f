#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use guardian_api::auth::jwt::{generate_access_token, JwtConfig};
use guardian_api::config::ServerConfig;
use guardian_api::routes;
use guardian_api::state::AppState;
use guardian_armory::{ProfileSource, SyncError};
use guardian_bungie::profile::{ArmorSnapshot, Character, Inventory, InventoryItem, ItemStat, ItemStats};
use guardian_bungie::{BungieClient, BungieConfig};
use guardian_core::armor::StatKind;
use guardian_db::models::armor_definition::UpsertArmorDefinition;
use guardian_db::models::user::User;
use guardian_db::repositories::{ArmorDefinitionRepo, UserRepo};
use guardian_llm::{GenerationError, GenerationRequest, TextGenerator};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub const PLAYER: &str = "4611686018467";
pub const CHARACTER: &str = "2305843009";

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Serves a fixed snapshot, or an auth failure when there is none.
#[derive(Default)]
pub struct FakeProfileSource {
    pub snapshot: Option<ArmorSnapshot>,
}

#[async_trait]
impl ProfileSource for FakeProfileSource {
    async fn armor_snapshot(&self, _user: &User) -> Result<ArmorSnapshot, SyncError> {
        self.snapshot
            .clone()
            .ok_or_else(|| SyncError::Auth("no token".into()))
    }
}

/// Replies with a fixed text (or fails with an API status) and records
/// every request.
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

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
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
// App
// ---------------------------------------------------------------------------

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// A Bungie client pointed at a closed local port; any call fails fast.
pub fn unreachable_bungie() -> BungieClient {
    BungieClient::new(BungieConfig {
        api_key: "test-key".into(),
        client_id: "1".into(),
        client_secret: "secret".into(),
        base_url: "http://127.0.0.1:9".into(),
        timeout_secs: 2,
    })
    .unwrap()
}

/// Router with no inventory data and a generator that answers "ok".
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(
        pool,
        Arc::new(FakeProfileSource::default()),
        FakeGenerator::replying("ok"),
    )
}

/// Build the full application router with all middleware layers.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack production uses.
pub fn build_test_app_with(
    pool: PgPool,
    source: Arc<dyn ProfileSource>,
    generator: Arc<dyn TextGenerator>,
) -> Router {
    let state = AppState::with_profile_source(
        pool,
        test_config(),
        unreachable_bungie(),
        source,
        generator,
    );

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:3000".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None, None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

pub async fn seed_player(pool: &PgPool) -> User {
    UserRepo::get_or_create(pool, PLAYER).await.unwrap()
}

pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.username, &test_config().jwt).unwrap()
}

fn item(hash: u32, instance: &str) -> InventoryItem {
    InventoryItem {
        item_hash: hash,
        item_instance_id: Some(instance.to_string()),
        bucket_hash: 0,
    }
}

/// A hunter carrying a legendary helmet ("h", hash 1) and an exotic
/// helmet ("x", hash 10); both roll 20 recovery.
pub fn hunter_snapshot() -> ArmorSnapshot {
    let stats = ItemStats {
        stats: HashMap::from([(
            StatKind::Recovery.hash().to_string(),
            ItemStat {
                stat_hash: StatKind::Recovery.hash(),
                value: 20,
            },
        )]),
    };
    ArmorSnapshot {
        profile_items: Vec::new(),
        characters: HashMap::from([(
            CHARACTER.to_string(),
            Character {
                character_id: CHARACTER.to_string(),
                class_type: 1,
                light: 2000,
            },
        )]),
        character_items: HashMap::from([(
            CHARACTER.to_string(),
            Inventory {
                items: vec![item(1, "h"), item(10, "x")],
            },
        )]),
        equipped_items: HashMap::new(),
        item_stats: HashMap::from([("h".to_string(), stats.clone()), ("x".to_string(), stats)]),
    }
}

pub async fn seed_definitions(pool: &PgPool) {
    let def = |hash: i64, name: &str, tier: i16| UpsertArmorDefinition {
        item_hash: hash,
        name: name.to_string(),
        tier_type: tier,
        item_type: String::new(),
        item_sub_type: 0,
        item_category_hashes: vec![45, 23],
    };
    ArmorDefinitionRepo::bulk_upsert(
        pool,
        &[def(1, "Legend Helm", 5), def(10, "Celestial Nighthawk", 6)],
    )
    .await
    .unwrap();
}

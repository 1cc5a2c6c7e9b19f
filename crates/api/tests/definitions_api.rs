//! Stored manifest tables over HTTP.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use guardian_db::repositories::DefinitionTableRepo;
use serde_json::json;
use sqlx::PgPool;

async fn seed_tables(pool: &PgPool) {
    DefinitionTableRepo::replace_all(
        pool,
        "224017.24.06.01",
        "en",
        &[(
            "DestinyStatDefinition".to_string(),
            json!({
                "1943323491": {"displayProperties": {"name": "Recovery"}},
                "2996146975": {"displayProperties": {"name": "Mobility"}}
            }),
        )],
    )
    .await
    .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn whole_table_and_single_entry(pool: PgPool) {
    seed_tables(&pool).await;

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/definitions/DestinyStatDefinition",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let table = body_json(response).await;
    assert_eq!(table["data"].as_object().unwrap().len(), 2);

    let response = get(
        common::build_test_app(pool),
        "/api/v1/definitions/DestinyStatDefinition?hash=1943323491",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"]["displayProperties"]["name"],
        "Recovery"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_table_or_entry_is_404(pool: PgPool) {
    seed_tables(&pool).await;

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/definitions/DestinyStatDefinition?hash=1",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(
        common::build_test_app(pool),
        "/api/v1/definitions/DestinyVendorDefinition",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_reports_unreachable_bungie(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/definitions/refresh",
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

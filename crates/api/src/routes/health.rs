use axum::extract::State;
use axum::{routing::get, Json, Router};
use guardian_db::repositories::ArmorDefinitionRepo;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when Postgres is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Armor definitions mirrored from the manifest. Zero means the
    /// worker's `definitions` job has not run yet and every sync will
    /// retain nothing.
    pub armor_definitions: i64,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = guardian_db::health_check(&state.pool).await.is_ok();
    let armor_definitions = if db_healthy {
        ArmorDefinitionRepo::count(&state.pool).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to count armor definitions");
            0
        })
    } else {
        0
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        armor_definitions,
    })
}

/// Served at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

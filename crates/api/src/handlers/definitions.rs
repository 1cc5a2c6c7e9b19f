//! Handlers for the `/definitions` resource: stored manifest tables.

use axum::extract::{Path, Query, State};
use axum::Json;
use guardian_armory::manifest::{RefreshOutcome, LANGUAGE};
use guardian_core::error::CoreError;
use guardian_db::repositories::DefinitionTableRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DefinitionQuery {
    pub hash: Option<String>,
}

/// POST /api/v1/definitions/refresh
///
/// Replaces every stored table when Bungie has published a new manifest.
pub async fn refresh(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<RefreshOutcome>>> {
    let outcome = state.manifest.refresh_definition_tables().await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/definitions/{table}?hash=
///
/// Without `hash` the whole table is returned.
pub async fn get_definition(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Query(query): Query<DefinitionQuery>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    match query.hash.as_deref().map(str::trim).filter(|h| !h.is_empty()) {
        Some(hash) => {
            let entry = DefinitionTableRepo::find_entry(&state.pool, &table, LANGUAGE, hash)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::not_found("Definition", format!("{table}/{hash}")))
                })?;
            Ok(Json(DataResponse { data: entry }))
        }
        None => {
            let stored = DefinitionTableRepo::find(&state.pool, &table, LANGUAGE)
                .await?
                .ok_or_else(|| AppError::Core(CoreError::not_found("Definition table", &table)))?;
            Ok(Json(DataResponse {
                data: stored.content,
            }))
        }
    }
}

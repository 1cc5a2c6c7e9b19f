//! Handlers for the `/armor` resource: optimize and request history.

use axum::extract::{Query, State};
use axum::Json;
use guardian_armory::{OptimizeOutcome, OptimizeRequest};
use guardian_core::types::ItemHash;
use guardian_db::models::optimization_request::ArmorOptimizationRequest;
use guardian_db::repositories::OptimizationRequestRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::{find_user, required, UsernameQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// The exotic the player insists on.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExoticRef {
    pub instance_id: Option<String>,
    pub item_hash: Option<ItemHash>,
}

/// Request body for `POST /armor/optimize`.
///
/// With neither `exoticId` nor `subclass` the call is a free-form chat about
/// `chatInput`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeBody {
    pub username: Option<String>,
    #[serde(default)]
    pub exotic_id: Option<ExoticRef>,
    pub subclass: Option<String>,
    #[serde(default)]
    pub stat_priorities: Vec<String>,
    pub chat_input: Option<String>,
    pub character_id: Option<String>,
}

impl From<OptimizeBody> for OptimizeRequest {
    fn from(body: OptimizeBody) -> Self {
        let exotic = body.exotic_id.unwrap_or_default();
        OptimizeRequest {
            exotic_instance_id: exotic.instance_id,
            exotic_hash: exotic.item_hash,
            subclass_id: body.subclass,
            stat_priorities: body.stat_priorities,
            chat_input: body.chat_input,
            character_id: body.character_id,
        }
    }
}

/// POST /api/v1/armor/optimize
pub async fn optimize(
    State(state): State<AppState>,
    Json(body): Json<OptimizeBody>,
) -> AppResult<Json<DataResponse<OptimizeOutcome>>> {
    let username = required(body.username.as_deref(), "username")?.to_string();
    let user = find_user(&state.pool, &username).await?;

    let outcome = state.optimizer.optimize(&user, body.into()).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/armor/history?username=
///
/// Newest first.
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> AppResult<Json<DataResponse<Vec<ArmorOptimizationRequest>>>> {
    let user = find_user(&state.pool, query.require()?).await?;
    let requests = OptimizationRequestRepo::list_for_user(&state.pool, user.id).await?;
    Ok(Json(DataResponse { data: requests }))
}

//! Handlers for the `/bungie` resource: OAuth code exchange and profile view.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use guardian_armory::SyncError;
use guardian_bungie::profile::{profile_inventory_instances, PROFILE_VIEW_COMPONENTS};
use guardian_db::repositories::{UserFaveRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::{find_user, required, UsernameQuery};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BungieAuthRequest {
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BungieAuthResponse {
    pub membership_id: String,
    pub display_name: Option<String>,
    pub access_token: String,
    pub refresh_token: String,
}

/// POST /api/v1/bungie/auth
///
/// Exchange an authorization code, create the user named by the Bungie.net
/// membership id if needed, store the token pair and link the primary
/// Destiny membership.
pub async fn exchange_code(
    State(state): State<AppState>,
    Json(input): Json<BungieAuthRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<BungieAuthResponse>>)> {
    let code = required(input.code.as_deref(), "code")?;

    let raw = state.bungie.exchange_code(code).await?;
    let grant = raw
        .into_grant()
        .ok_or_else(|| AppError::BadRequest("Missing data in the token response".into()))?;
    let membership_id = grant
        .membership_id
        .clone()
        .ok_or_else(|| AppError::BadRequest("Missing data in the token response".into()))?;

    let user = UserRepo::get_or_create(&state.pool, &membership_id).await?;
    state.broker.store_grant(user.id, &grant).await?;

    let memberships = state.bungie.memberships(&grant.access_token).await?;
    let primary = memberships.primary();
    UserRepo::set_membership(
        &state.pool,
        user.id,
        primary.map(|m| m.membership_id.as_str()),
        primary.map(|m| m.membership_type),
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        linked = primary.is_some(),
        "Bungie account connected"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: BungieAuthResponse {
                membership_id,
                display_name: memberships.display_name().map(str::to_string),
                access_token: grant.access_token,
                refresh_token: grant.refresh_token,
            },
        }),
    ))
}

/// GET /api/v1/bungie/profile?username=
///
/// Returns the raw profile envelope. Favorites whose instance is no longer
/// in the profile inventory are dropped on the way.
pub async fn get_profile(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let user = find_user(&state.pool, query.require()?).await?;
    let (membership_type, membership_id) = user
        .destiny_membership()
        .ok_or_else(|| SyncError::Auth("user has no linked Destiny membership".into()))?;

    let access_token = state.broker.access_token(&user).await?;
    let profile = state
        .bungie
        .raw_profile(
            &access_token,
            membership_type,
            membership_id,
            &PROFILE_VIEW_COMPONENTS,
        )
        .await?;

    if let Some(present) = profile_inventory_instances(&profile) {
        let pruned = UserFaveRepo::retain_instances(&state.pool, user.id, &present).await?;
        if pruned > 0 {
            tracing::info!(user_id = user.id, pruned, "Pruned stale favorites");
        }
    }

    Ok(Json(DataResponse { data: profile }))
}

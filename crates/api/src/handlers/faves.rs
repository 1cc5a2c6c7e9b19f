//! Handlers for the `/faves` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use guardian_core::error::CoreError;
use guardian_core::types::ItemHash;
use guardian_db::models::user_fave::{CreateUserFave, UserFave};
use guardian_db::repositories::UserFaveRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::{find_user, required, UsernameQuery};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateFaveRequest {
    pub username: Option<String>,
    pub item_instance_id: Option<String>,
    pub item_hash: Option<ItemHash>,
}

/// GET /api/v1/faves?username=
pub async fn list_faves(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> AppResult<Json<DataResponse<Vec<UserFave>>>> {
    let user = find_user(&state.pool, query.require()?).await?;
    let faves = UserFaveRepo::list_for_user(&state.pool, user.id).await?;
    Ok(Json(DataResponse { data: faves }))
}

/// POST /api/v1/faves
///
/// An item instance can be a favorite only once; a repeat is 409.
pub async fn create_fave(
    State(state): State<AppState>,
    Json(input): Json<CreateFaveRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserFave>>)> {
    let username = required(input.username.as_deref(), "username")?;
    let item_instance_id = required(input.item_instance_id.as_deref(), "item_instance_id")?;
    let item_hash = input
        .item_hash
        .ok_or_else(|| AppError::BadRequest("item_hash is required".into()))?;

    let user = find_user(&state.pool, username).await?;
    let fave = UserFaveRepo::create(
        &state.pool,
        &CreateUserFave {
            user_id: user.id,
            item_instance_id: item_instance_id.to_string(),
            item_hash,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: fave })))
}

/// DELETE /api/v1/faves/{item_instance_id}
pub async fn delete_fave(
    State(state): State<AppState>,
    Path(item_instance_id): Path<String>,
) -> AppResult<StatusCode> {
    if UserFaveRepo::delete_by_instance(&state.pool, &item_instance_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found(
            "Favorite item",
            item_instance_id,
        )))
    }
}

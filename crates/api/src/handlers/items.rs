//! Handlers for the `/items` resource: transfer and equip proxies.
//!
//! Bodies use the same camelCase field names as the Bungie actions they
//! forward to, plus the `username` whose credential is used.

use axum::extract::State;
use axum::Json;
use guardian_bungie::client::{EquipItemRequest, TransferItemRequest};
use guardian_core::types::ItemHash;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::find_user;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBody {
    pub username: Option<String>,
    pub item_reference_hash: Option<ItemHash>,
    pub stack_size: Option<i32>,
    pub transfer_to_vault: Option<bool>,
    pub item_id: Option<String>,
    pub character_id: Option<String>,
    pub membership_type: Option<i16>,
}

impl TransferBody {
    fn into_parts(self) -> Option<(String, TransferItemRequest)> {
        Some((
            self.username?,
            TransferItemRequest {
                item_reference_hash: self.item_reference_hash?,
                stack_size: self.stack_size?,
                transfer_to_vault: self.transfer_to_vault?,
                item_id: self.item_id?,
                character_id: self.character_id?,
                membership_type: self.membership_type?,
            },
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipBody {
    pub username: Option<String>,
    pub item_id: Option<String>,
    pub character_id: Option<String>,
    pub membership_type: Option<i16>,
}

impl EquipBody {
    fn into_parts(self) -> Option<(String, EquipItemRequest)> {
        Some((
            self.username?,
            EquipItemRequest {
                item_id: self.item_id?,
                character_id: self.character_id?,
                membership_type: self.membership_type?,
            },
        ))
    }
}

fn all_fields_required() -> AppError {
    AppError::BadRequest("All fields are required".into())
}

/// POST /api/v1/items/transfer
pub async fn transfer(
    State(state): State<AppState>,
    Json(body): Json<TransferBody>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let (username, request) = body.into_parts().ok_or_else(all_fields_required)?;
    let user = find_user(&state.pool, &username).await?;
    let access_token = state.broker.access_token(&user).await?;

    let response = state.bungie.transfer_item(&access_token, &request).await?;
    tracing::info!(
        user_id = user.id,
        item_id = %request.item_id,
        to_vault = request.transfer_to_vault,
        "Item transferred"
    );
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/items/equip
pub async fn equip(
    State(state): State<AppState>,
    Json(body): Json<EquipBody>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let (username, request) = body.into_parts().ok_or_else(all_fields_required)?;
    let user = find_user(&state.pool, &username).await?;
    let access_token = state.broker.access_token(&user).await?;

    let response = state.bungie.equip_item(&access_token, &request).await?;
    tracing::info!(
        user_id = user.id,
        item_id = %request.item_id,
        character_id = %request.character_id,
        "Item equipped"
    );
    Ok(Json(DataResponse { data: response }))
}

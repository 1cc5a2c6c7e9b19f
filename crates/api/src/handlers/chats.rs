//! Handlers for the `/chats` resource. Every route requires a JWT and only
//! ever shows the caller's own chats.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use guardian_core::error::CoreError;
use guardian_db::models::chat::Chat;
use guardian_db::repositories::ChatRepo;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::required;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendChatRequest {
    pub prompt: Option<String>,
}

/// GET /api/v1/chats
///
/// Oldest first, the order they are replayed in.
pub async fn list_chats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Chat>>>> {
    let chats = ChatRepo::list_for_author(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: chats }))
}

/// POST /api/v1/chats
pub async fn send_chat(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SendChatRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Chat>>)> {
    let prompt = required(input.prompt.as_deref(), "prompt")?;
    let chat = state.chat.send(user.user_id, prompt).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: chat })))
}

/// GET /api/v1/chats/{id}
pub async fn get_chat(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<Chat>>> {
    let chat = owned_chat(&state, &user, id).await?;
    Ok(Json(DataResponse { data: chat }))
}

/// DELETE /api/v1/chats/{id}
pub async fn delete_chat(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    owned_chat(&state, &user, id).await?;
    ChatRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn owned_chat(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<Chat> {
    let chat = ChatRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Chat", id)))?;
    if chat.author_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Chat belongs to another user".into(),
        )));
    }
    Ok(chat)
}

use axum::routing::get;
use axum::Router;

use crate::handlers::chats;
use crate::state::AppState;

/// Routes mounted at `/chats`. All require a Bearer token.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(chats::list_chats).post(chats::send_chat))
        .route("/{id}", get(chats::get_chat).delete(chats::delete_chat))
}

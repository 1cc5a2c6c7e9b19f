use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::faves;
use crate::state::AppState;

/// Routes mounted at `/faves`.
///
/// ```text
/// GET    /                     -> list_faves (?username=)
/// POST   /                     -> create_fave
/// DELETE /{item_instance_id}   -> delete_fave
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(faves::list_faves).post(faves::create_fave))
        .route("/{item_instance_id}", delete(faves::delete_fave))
}

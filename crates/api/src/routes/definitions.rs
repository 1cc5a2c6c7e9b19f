use axum::routing::{get, post};
use axum::Router;

use crate::handlers::definitions;
use crate::state::AppState;

/// Routes mounted at `/definitions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/refresh", post(definitions::refresh))
        .route("/{table}", get(definitions::get_definition))
}

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::armor;
use crate::state::AppState;

/// Routes mounted at `/armor`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/optimize", post(armor::optimize))
        .route("/history", get(armor::history))
}

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{bungie, items};
use crate::state::AppState;

/// Routes mounted at `/bungie`.
///
/// ```text
/// POST /auth      -> exchange_code
/// GET  /profile   -> get_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth", post(bungie::exchange_code))
        .route("/profile", get(bungie::get_profile))
}

/// Routes mounted at `/items`.
pub fn items_router() -> Router<AppState> {
    Router::new()
        .route("/transfer", post(items::transfer))
        .route("/equip", post(items::equip))
}

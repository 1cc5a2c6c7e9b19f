pub mod armor;
pub mod auth;
pub mod bungie;
pub mod chats;
pub mod definitions;
pub mod faves;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                          create account (POST)
/// /auth/login                     login (POST)
///
/// /bungie/auth                    OAuth code exchange (POST)
/// /bungie/profile                 raw profile, prunes favorites (GET ?username=)
/// /items/transfer                 TransferItem proxy (POST)
/// /items/equip                    EquipItem proxy (POST)
///
/// /faves                          list (GET ?username=), add (POST)
/// /faves/{item_instance_id}       remove (DELETE)
///
/// /armor/optimize                 optimize or chat (POST)
/// /armor/history                  past optimizations (GET ?username=)
///
/// /definitions/refresh            refresh stored manifest tables (POST)
/// /definitions/{table}            table or single entry (GET ?hash=)
///
/// /chats                          list, send (requires auth)
/// /chats/{id}                     get, delete (requires auth, author only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/auth", auth::router())
        .nest("/bungie", bungie::router())
        .nest("/items", bungie::items_router())
        .nest("/faves", faves::router())
        .nest("/armor", armor::router())
        .nest("/definitions", definitions::router())
        .nest("/chats", chats::router())
}

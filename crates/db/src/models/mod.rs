//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create/upsert DTO for writes

pub mod armor_definition;
pub mod armor_modifier;
pub mod armor_piece;
pub mod bungie_token;
pub mod chat;
pub mod definition_table;
pub mod optimization_request;
pub mod user;
pub mod user_fave;

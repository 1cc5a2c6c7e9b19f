//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod armor_definition_repo;
pub mod armor_modifier_repo;
pub mod armor_piece_repo;
pub mod bungie_token_repo;
pub mod chat_repo;
pub mod definition_table_repo;
pub mod optimization_request_repo;
pub mod user_fave_repo;
pub mod user_repo;

pub use armor_definition_repo::ArmorDefinitionRepo;
pub use armor_modifier_repo::ArmorModifierRepo;
pub use armor_piece_repo::ArmorPieceRepo;
pub use bungie_token_repo::BungieTokenRepo;
pub use chat_repo::ChatRepo;
pub use definition_table_repo::DefinitionTableRepo;
pub use optimization_request_repo::OptimizationRequestRepo;
pub use user_fave_repo::UserFaveRepo;
pub use user_repo::UserRepo;

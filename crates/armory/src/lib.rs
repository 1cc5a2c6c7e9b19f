//! Armor sync, optimization and catalog maintenance.
//!
//! - [`credentials`] -- stores Bungie tokens and hands out valid access tokens.
//! - [`source`] -- the [`source::ProfileSource`] seam over live inventory data.
//! - [`sync`] -- classifies a profile snapshot and reconciles `armor_pieces`.
//! - [`optimize`] -- prompt, generate, parse, enrich, persist.
//! - [`chat`] -- free-form chat with replayed history.
//! - [`manifest`] -- catalog refresh jobs run by the worker and the API.

pub mod chat;
pub mod credentials;
pub mod error;
pub mod manifest;
pub mod optimize;
pub mod source;
pub mod sync;

pub use chat::ChatService;
pub use credentials::CredentialBroker;
pub use error::{ChatError, ManifestError, OptimizeError, SyncError};
pub use optimize::{ArmorOptimizer, OptimizeOutcome, OptimizeRequest};
pub use source::{BungieProfileSource, ProfileSource};
pub use sync::ArmorSynchronizer;

//! Typed HTTP client for the Bungie.net platform API.
//!
//! Only the fields this backend reads are modelled. Platform responses are
//! wrapped in an [`envelope::Envelope`] whose `ErrorCode` is checked before
//! the payload is handed back.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod manifest;
pub mod membership;
pub mod oauth;
pub mod profile;

pub use client::BungieClient;
pub use config::BungieConfig;
pub use error::BungieError;

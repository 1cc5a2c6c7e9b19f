//! Domain primitives for the Guardian armory backend.
//!
//! Everything in this crate is pure: static Destiny 2 lookup tables, armor
//! domain enums, prompt construction and structured-reply parsing for the
//! optimizer, and chat history shaping. No I/O happens here.

pub mod armor;
pub mod conversation;
pub mod error;
pub mod lookup;
pub mod prompt;
pub mod reply;
pub mod types;

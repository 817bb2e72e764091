//! Ask - shared contracts for the media question form
//!
//! Everything the form and the invocation client agree on lives here:
//! the error taxonomy, the accepted-media rules, the composed request
//! payload and the generateContent wire format. No wasm dependencies,
//! so the whole module is testable natively.

pub mod error;
pub mod media;
pub mod payload;
pub mod wire;

pub use error::AskError;
pub use media::{MediaKind, accept_attr, media_type_for, validate_pick, MAX_INLINE_BYTES};
pub use payload::{compose, AskRequest, MediaPayload, PickedFile};
pub use wire::{GenerateContentRequest, GenerateContentResponse};

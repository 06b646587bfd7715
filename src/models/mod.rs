//! Core data models for the advertisement board.
//!
//! Row types map to SQLite tables via `sqlx::FromRow` and serialize as the
//! JSON bodies returned by the API. Payload types are deserialized from
//! request bodies only after they passed schema validation.

pub mod advertisement;
pub mod user;

//! Represents a user — the owner of zero or more advertisements.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::advertisement::AdvertisementSummary;

/// A registered user.
#[derive(Serialize, Clone, FromRow, Debug, PartialEq, Eq)]
pub struct User {
    /// Auto-generated primary key.
    pub id: i64,

    /// Unique display name (at most 64 characters in storage).
    pub name: String,
}

/// A user together with the advertisements it owns, as returned by
/// `GET /api/user/{id}`.
#[derive(Serialize, Clone, Debug)]
pub struct UserWithAdvertisements {
    pub id: i64,
    pub name: String,
    pub advertisements: Vec<AdvertisementSummary>,
}

impl UserWithAdvertisements {
    pub fn new(user: User, advertisements: Vec<AdvertisementSummary>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            advertisements,
        }
    }
}

/// Body of `POST /api/user`.
#[derive(Deserialize, Debug)]
pub struct NewUser {
    pub name: String,
}

//! Represents an advertisement posted by a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single advertisement row.
///
/// `owner` is a non-owning reference to `users.id`. It is null once the
/// owning user has been deleted.
#[derive(Serialize, Clone, FromRow, Debug)]
pub struct Advertisement {
    /// Auto-generated primary key.
    pub id: i64,

    /// Headline, at most 64 characters.
    pub title: String,

    /// Free text, at most 256 characters. Empty when not given.
    pub description: String,

    /// Captured once when the row is inserted.
    pub created_at: DateTime<Utc>,

    /// Refreshed on every update.
    pub updated_at: DateTime<Utc>,

    /// Owning user, if any.
    pub owner: Option<i64>,
}

/// Compact form embedded in a user's advertisement list.
#[derive(Serialize, Clone, FromRow, Debug, PartialEq, Eq)]
pub struct AdvertisementSummary {
    pub id: i64,
    pub title: String,
}

/// Response body of `POST /api/ad`. Leaves out `updated_at`.
#[derive(Serialize, Clone, Debug)]
pub struct CreatedAdvertisement {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub owner: Option<i64>,
}

impl From<Advertisement> for CreatedAdvertisement {
    fn from(ad: Advertisement) -> Self {
        Self {
            id: ad.id,
            title: ad.title,
            description: ad.description,
            created_at: ad.created_at,
            owner: ad.owner,
        }
    }
}

/// Body of `POST /api/ad`.
#[derive(Deserialize, Debug)]
pub struct NewAdvertisement {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub owner: i64,
}

/// Body of `PUT /api/ad/{id}`. Only fields present in the request are applied.
#[derive(Deserialize, Debug)]
pub struct AdvertisementPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub owner: Option<i64>,
}

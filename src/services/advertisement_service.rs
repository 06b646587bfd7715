//! AdvertisementService — CRUD for advertisements and their owner reference.
//!
//! Owner existence is never checked in a separate round trip before a write:
//! create folds the check into the `INSERT … SELECT`, update runs lookup,
//! owner check and write inside a single transaction.

use super::{ServiceError, ServiceResult};
use crate::{
    models::advertisement::{Advertisement, AdvertisementPatch, NewAdvertisement},
    validation::{self, CREATE_ADVERTISEMENT, UPDATE_ADVERTISEMENT},
};
use chrono::Utc;
use serde_json::Value;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::sync::Arc;
use tracing::{debug, info};

const SELECT_ADVERTISEMENT: &str =
    "SELECT id, title, description, created_at, updated_at, owner FROM advertisements WHERE id = ?";

#[derive(Clone)]
pub struct AdvertisementService {
    db: Arc<SqlitePool>,
}

impl AdvertisementService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    pub async fn get(&self, ad_id: i64) -> ServiceResult<Advertisement> {
        sqlx::query_as::<_, Advertisement>(SELECT_ADVERTISEMENT)
            .bind(ad_id)
            .fetch_optional(&*self.db)
            .await?
            .ok_or(ServiceError::AdvertisementNotFound(ad_id))
    }

    /// Validate `payload` and insert an advertisement owned by an existing user.
    ///
    /// Returns `OwnerNotFound` without writing anything when the owner is missing.
    pub async fn create(&self, payload: &Value) -> ServiceResult<Advertisement> {
        validation::validate(payload, &CREATE_ADVERTISEMENT)?;
        let new_ad: NewAdvertisement = serde_json::from_value(payload.clone())?;
        let now = Utc::now();

        let ad = sqlx::query_as::<_, Advertisement>(
            r#"
            INSERT INTO advertisements (title, description, created_at, updated_at, owner)
            SELECT ?, ?, ?, ?, id FROM users WHERE id = ?
            RETURNING id, title, description, created_at, updated_at, owner
            "#,
        )
        .bind(&new_ad.title)
        .bind(&new_ad.description)
        .bind(now)
        .bind(now)
        .bind(new_ad.owner)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(ServiceError::OwnerNotFound(new_ad.owner))?;

        info!(ad_id = ad.id, owner = new_ad.owner, "created advertisement");
        Ok(ad)
    }

    /// Apply a partial update.
    ///
    /// Order of checks: the advertisement must exist, then the payload must
    /// validate, then a given owner must exist. Only after all three pass is
    /// any field written. Fields absent from the payload are left untouched.
    pub async fn update(&self, ad_id: i64, payload: &Value) -> ServiceResult<Advertisement> {
        // Take the write lock up front so concurrent updates wait on the busy
        // timeout instead of failing the read-to-write upgrade.
        let mut tx = self.db.begin_with("BEGIN IMMEDIATE").await?;

        sqlx::query_scalar::<_, i64>("SELECT id FROM advertisements WHERE id = ?")
            .bind(ad_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(ServiceError::AdvertisementNotFound(ad_id))?;

        validation::validate(payload, &UPDATE_ADVERTISEMENT)?;
        let patch: AdvertisementPatch = serde_json::from_value(payload.clone())?;

        if let Some(owner) = patch.owner {
            ensure_user_exists(&mut tx, owner).await?;
        }

        let ad = sqlx::query_as::<_, Advertisement>(
            r#"
            UPDATE advertisements SET
                title = COALESCE(?, title),
                description = COALESCE(?, description),
                owner = COALESCE(?, owner),
                updated_at = ?
            WHERE id = ?
            RETURNING id, title, description, created_at, updated_at, owner
            "#,
        )
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.owner)
        .bind(Utc::now())
        .bind(ad_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(ad_id, "updated advertisement");
        Ok(ad)
    }

    pub async fn delete(&self, ad_id: i64) -> ServiceResult<()> {
        let result = sqlx::query("DELETE FROM advertisements WHERE id = ?")
            .bind(ad_id)
            .execute(&*self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::AdvertisementNotFound(ad_id));
        }

        debug!(ad_id, "deleted advertisement");
        Ok(())
    }
}

async fn ensure_user_exists(tx: &mut Transaction<'_, Sqlite>, user_id: i64) -> ServiceResult<()> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?
        .map(|_| ())
        .ok_or(ServiceError::OwnerNotFound(user_id))
}

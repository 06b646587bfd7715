//! Resource handlers for users and advertisements, plus the application
//! context that carries them into the HTTP layer.

pub mod advertisement_service;
pub mod user_service;

use crate::validation::ValidationError;
use advertisement_service::AdvertisementService;
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use user_service::UserService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("user `{0}` not found")]
    UserNotFound(i64),
    #[error("user `{0}` already exists")]
    UserExists(String),
    #[error("advertisement `{0}` not found")]
    AdvertisementNotFound(i64),
    #[error("owner `{0}` not found")]
    OwnerNotFound(i64),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Validation(ValidationError::new(err.to_string()))
    }
}

/// Everything a request handler needs, built once at startup and handed to
/// the router as state.
#[derive(Clone)]
pub struct AppContext {
    /// Shared SQLite pool, also used directly by the readiness probe.
    pub db: Arc<SqlitePool>,
    pub users: UserService,
    pub ads: AdvertisementService,
}

impl AppContext {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self {
            users: UserService::new(db.clone()),
            ads: AdvertisementService::new(db.clone()),
            db,
        }
    }
}

/// Return true if SQLx error indicates a unique constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Return true if SQLx error comes from a `CHECK` constraint.
pub(crate) fn is_check_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_check_violation())
}

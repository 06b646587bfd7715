//! UserService — create, fetch and delete users.
//!
//! Name uniqueness is enforced by the `UNIQUE` constraint on `users.name`;
//! there is no separate lookup before the insert.

use super::{ServiceError, ServiceResult, is_check_violation, is_unique_violation};
use crate::{
    models::{
        advertisement::AdvertisementSummary,
        user::{NewUser, User, UserWithAdvertisements},
    },
    validation::{self, CREATE_USER, ValidationError},
};
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info};

/// Column limit on `users.name`, narrower than what the create schema allows.
const NAME_COLUMN_MAX_LEN: usize = 64;

#[derive(Clone)]
pub struct UserService {
    db: Arc<SqlitePool>,
}

impl UserService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Fetch a user with the `{id, title}` summary of every advertisement it owns.
    pub async fn get(&self, user_id: i64) -> ServiceResult<UserWithAdvertisements> {
        let user = sqlx::query_as::<_, User>("SELECT id, name FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&*self.db)
            .await?
            .ok_or(ServiceError::UserNotFound(user_id))?;

        let advertisements = sqlx::query_as::<_, AdvertisementSummary>(
            "SELECT id, title FROM advertisements WHERE owner = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&*self.db)
        .await?;

        Ok(UserWithAdvertisements::new(user, advertisements))
    }

    /// Validate `payload` against the create schema and insert a new user.
    pub async fn create(&self, payload: &Value) -> ServiceResult<User> {
        validation::validate(payload, &CREATE_USER)?;
        let new_user: NewUser = serde_json::from_value(payload.clone())?;

        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (name) VALUES (?) RETURNING id, name",
        )
        .bind(&new_user.name)
        .fetch_one(&*self.db)
        .await;

        match inserted {
            Ok(user) => {
                info!(user_id = user.id, name = %user.name, "created user");
                Ok(user)
            }
            Err(err) if is_unique_violation(&err) => Err(ServiceError::UserExists(new_user.name)),
            Err(err) if is_check_violation(&err) => Err(ValidationError::new(format!(
                "'name' must be at most {} characters",
                NAME_COLUMN_MAX_LEN
            ))
            .into()),
            Err(err) => Err(ServiceError::Sqlx(err)),
        }
    }

    /// Delete a user. Advertisements it owned are kept with `owner` cleared.
    pub async fn delete(&self, user_id: i64) -> ServiceResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&*self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::UserNotFound(user_id));
        }

        debug!(user_id, "deleted user");
        Ok(())
    }
}

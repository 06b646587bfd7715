//! HTTP handlers for `/api/user`.

use crate::{errors::AppError, services::AppContext};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Value, json};

/// `POST /api/user`
pub async fn create_user(
    State(ctx): State<AppContext>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let user = ctx.users.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /api/user/{id}`
pub async fn get_user(
    State(ctx): State<AppContext>,
    user_id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(user_id) = user_id?;
    let user = ctx.users.get(user_id).await?;
    Ok(Json(user))
}

/// `DELETE /api/user/{id}`
pub async fn delete_user(
    State(ctx): State<AppContext>,
    user_id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(user_id) = user_id?;
    ctx.users
        .delete(user_id)
        .await
        .map_err(|err| AppError::from(err).with_not_found_message("This user does not exist"))?;
    Ok(Json(json!({ "status": "deleted" })))
}

//! HTTP handlers for `/api/ad`.
//! Payload checks and storage live in `AdvertisementService`; these only
//! extract, delegate and pick the response shape.

use crate::{
    errors::AppError,
    models::advertisement::CreatedAdvertisement,
    services::{AppContext, ServiceError},
};
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

/// `POST /api/ad` — responds with the created ad minus `updated_at`.
pub async fn create_ad(
    State(ctx): State<AppContext>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let ad = ctx
        .ads
        .create(&payload)
        .await
        .map_err(|err| AppError::from(err).with_not_found_message("This user does not exist"))?;
    Ok((StatusCode::CREATED, Json(CreatedAdvertisement::from(ad))))
}

/// `GET /api/ad/{id}`
pub async fn get_ad(
    State(ctx): State<AppContext>,
    ad_id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(ad_id) = ad_id?;
    let ad = ctx.ads.get(ad_id).await?;
    Ok(Json(ad))
}

/// `PUT /api/ad/{id}` — partial update of title, description and owner.
pub async fn update_ad(
    State(ctx): State<AppContext>,
    ad_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(ad_id) = ad_id?;
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            // A missing advertisement wins over an unreadable body.
            ctx.ads.get(ad_id).await.map_err(update_error)?;
            return Err(rejection.into());
        }
    };
    let ad = ctx.ads.update(ad_id, &payload).await.map_err(update_error)?;
    Ok(Json(ad))
}

fn update_error(err: ServiceError) -> AppError {
    match err {
        ServiceError::AdvertisementNotFound(_) => {
            AppError::not_found("This advertisement does not exist")
        }
        other => AppError::from(other),
    }
}

/// `DELETE /api/ad/{id}`
pub async fn delete_ad(
    State(ctx): State<AppContext>,
    ad_id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(ad_id) = ad_id?;
    ctx.ads.delete(ad_id).await?;
    Ok(Json(json!({ "status": "deleted" })))
}

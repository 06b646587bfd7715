//! Defines routes for the user and advertisement API.
//!
//! ## Structure
//! - **User endpoints**
//!   - `POST   /api/user`      — create user
//!   - `GET    /api/user/{id}` — fetch user with owned advertisements
//!   - `DELETE /api/user/{id}` — delete user
//!
//! - **Advertisement endpoints**
//!   - `POST   /api/ad`        — create advertisement
//!   - `GET    /api/ad/{id}`   — fetch advertisement
//!   - `PUT    /api/ad/{id}`   — partial update
//!   - `DELETE /api/ad/{id}`   — delete advertisement
//!
//! Unknown paths answer with a JSON 404, known paths with the wrong method
//! with a JSON 405.

use crate::{
    errors::AppError,
    handlers::{
        advertisement_handlers::{create_ad, delete_ad, get_ad, update_ad},
        health_handlers::{healthz, readyz},
        user_handlers::{create_user, delete_user, get_user},
    },
    services::AppContext,
};
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};

/// Build the router for the whole API.
///
/// The router carries the shared `AppContext` to all handlers.
pub fn routes() -> Router<AppContext> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/api/user", post(create_user))
        .route("/api/user/{id}", get(get_user).delete(delete_user))
        // Advertisements
        .route("/api/ad", post(create_ad))
        .route("/api/ad/{id}", get(get_ad).put(update_ad).delete(delete_ad))
        // Must come after every `.route` it should cover.
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
}

async fn method_not_allowed() -> AppError {
    AppError::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

async fn not_found() -> AppError {
    AppError::not_found("not found")
}

//! HTTP API for users and the advertisements they own, backed by SQLite.

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validation;

use axum::Router;
use services::AppContext;

/// Build the application router with its state attached.
pub fn app(ctx: AppContext) -> Router {
    routes::routes::routes().with_state(ctx)
}

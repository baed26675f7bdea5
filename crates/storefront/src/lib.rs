//! Motorstand Storefront library.
//!
//! This crate provides the storefront and backoffice functionality as a
//! library, allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod sheet;
pub mod state;
pub mod store;

use axum::Router;

use crate::state::AppState;

/// Build the application router with session support.
///
/// Used by the binary and by the integration tests; deployment-only layers
/// (static assets, Sentry, request tracing) are added in `main`.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .layer(middleware::create_session_layer())
        .with_state(state)
}

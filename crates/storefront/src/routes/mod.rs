//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                            - Catalog (search + incremental reveal)
//! GET  /catalog/items               - Catalog grid fragment (HTMX)
//! GET  /vehicles/{id}               - Vehicle detail
//! GET  /health                      - Health check
//!
//! # Cart
//! GET  /cart                        - Cart page
//! POST /cart/add                    - Add vehicle (rejects duplicates)
//! POST /cart/remove                 - Remove vehicle
//! POST /cart/reserve                - Confirm reservation (no-op when empty)
//!
//! # Backoffice
//! GET  /admin                       - Dashboard (login/admin gated)
//! GET  /admin/login                 - Login page
//! POST /admin/login                 - Login action
//! GET  /admin/register              - Register page
//! POST /admin/register              - Register action
//! POST /admin/logout                - Logout action
//! POST /admin/vehicles              - Create vehicle
//! GET  /admin/vehicles/{id}/edit    - Dashboard with the form in edit mode
//! POST /admin/vehicles/{id}         - Update vehicle
//! POST /admin/vehicles/{id}/delete  - Delete vehicle
//! ```

pub mod admin;
pub mod cart;
pub mod catalog;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use motorstand_core::User;

use crate::models::Notice;
use crate::models::session as session_state;
use crate::state::AppState;

/// Per-request context shared by every full page template.
///
/// Loading it consumes the pending one-shot notice, so fragment handlers
/// must not build one.
pub struct PageContext {
    pub user: Option<User>,
    pub cart_count: usize,
    pub notice: Option<Notice>,
}

impl PageContext {
    /// Read the session-derived display state for a full page render.
    pub async fn load(session: &Session) -> Self {
        Self {
            user: session_state::current_user(session).await,
            cart_count: session_state::cart(session).await.len(),
            notice: session_state::take_notice(session).await,
        }
    }
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/reserve", post(cart::reserve))
}

/// Create the backoffice routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/login", get(admin::login_page).post(admin::login))
        .route("/register", get(admin::register_page).post(admin::register))
        .route("/logout", post(admin::logout))
        .route("/vehicles", post(admin::create_vehicle))
        .route("/vehicles/{id}/edit", get(admin::edit_vehicle))
        .route("/vehicles/{id}", post(admin::update_vehicle))
        .route("/vehicles/{id}/delete", post(admin::delete_vehicle))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/", get(catalog::index))
        .route("/catalog/items", get(catalog::items))
        .route("/vehicles/{id}", get(catalog::show))
        // Cart
        .nest("/cart", cart_routes())
        // Backoffice
        .nest("/admin", admin_routes())
        // Health
        .route("/health", get(health))
}

//! Cart route handlers.
//!
//! Actions follow post/redirect/get: each one mutates the session cart,
//! stores at most one notice, and redirects to a full page render.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use motorstand_core::{Reservation, Vehicle, VehicleId};

use crate::error::Result;
use crate::filters;
use crate::models::Notice;
use crate::models::session as session_state;
use crate::state::AppState;

use super::PageContext;

/// Name used on reservations confirmed without a logged-in user.
const GUEST_NAME: &str = "Guest";

/// Email placeholder used on guest reservations.
const GUEST_EMAIL: &str = "N/A";

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i64,
    pub model: String,
    pub year: String,
    pub photo_url: String,
}

impl From<&Vehicle> for CartItemView {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.as_i64(),
            model: vehicle.model.clone(),
            year: vehicle.year.clone(),
            photo_url: vehicle.photo_url.clone(),
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub ctx: PageContext,
    pub items: Vec<CartItemView>,
}

/// Cart action form data.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub vehicle_id: i64,
    /// Page to return to after the action; must be a local path.
    pub return_to: Option<String>,
}

/// Keep redirects on-site: anything but a local path falls back to the
/// catalog.
fn sanitize_return(return_to: Option<String>) -> String {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/".to_string(),
    }
}

/// Display the cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> CartShowTemplate {
    let cart = session_state::cart(&session).await;

    CartShowTemplate {
        items: cart.items().iter().map(CartItemView::from).collect(),
        ctx: PageContext::load(&session).await,
    }
}

/// Add a vehicle to the cart.
///
/// Duplicates are rejected with a notice and leave the cart unchanged.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartItemForm>,
) -> Result<Redirect> {
    let mut cart = session_state::cart(&session).await;

    match state.catalog().find(VehicleId::new(form.vehicle_id)).await {
        Some(vehicle) => match cart.add(vehicle) {
            Ok(()) => {
                session_state::save_cart(&session, &cart).await?;
                session_state::set_notice(&session, Notice::success("Added to the cart.")).await?;
            }
            Err(_) => {
                session_state::set_notice(
                    &session,
                    Notice::error("Vehicle is already in the cart."),
                )
                .await?;
            }
        },
        None => {
            session_state::set_notice(
                &session,
                Notice::error("That vehicle is no longer available."),
            )
            .await?;
        }
    }

    Ok(Redirect::to(&sanitize_return(form.return_to)))
}

/// Remove a vehicle from the cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<CartItemForm>) -> Result<Redirect> {
    let mut cart = session_state::cart(&session).await;
    cart.remove(VehicleId::new(form.vehicle_id));
    session_state::save_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart"))
}

/// Confirm the reservation.
///
/// An empty cart is a no-op; otherwise the cart is snapshotted into one new
/// reservation, emptied, and the visitor returns to the catalog.
#[instrument(skip(state, session))]
pub async fn reserve(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let mut cart = session_state::cart(&session).await;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart"));
    }

    let (name, email) = match session_state::current_user(&session).await {
        Some(user) => (user.username, user.email),
        None => (GUEST_NAME.to_string(), GUEST_EMAIL.to_string()),
    };

    let reservation = Reservation::new(name, email, cart.take_items());
    state.reservations().append(reservation).await;

    session_state::save_cart(&session, &cart).await?;
    session_state::set_notice(
        &session,
        Notice::success("Reservation confirmed. We will be in touch shortly."),
    )
    .await?;

    Ok(Redirect::to("/"))
}

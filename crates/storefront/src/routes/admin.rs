//! Backoffice route handlers.
//!
//! The backoffice entry page doubles as the authorization gate: anonymous
//! visitors are sent to login, authenticated non-admins get the restricted
//! screen, and admins see the dashboard with the reservation log, the
//! inventory form, and the vehicle table.
//!
//! One form serves both create and edit; the mode follows the presence of an
//! edit-target identifier. Every mutation issues one sheet call and patches
//! the in-memory catalog only on success.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use motorstand_core::{Reservation, Vehicle, VehicleDraft, VehicleId};

use crate::error::Result;
use crate::filters;
use crate::middleware::{OptionalUser, RequireAdmin, RequireUser};
use crate::models::Notice;
use crate::models::session as session_state;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

use super::PageContext;

// =============================================================================
// Views
// =============================================================================

/// Reservation display data for the dashboard.
#[derive(Clone)]
pub struct ReservationView {
    pub customer_name: String,
    pub customer_email: String,
    pub placed_at: String,
    pub items: Vec<String>,
}

impl From<&Reservation> for ReservationView {
    fn from(reservation: &Reservation) -> Self {
        Self {
            customer_name: reservation.customer_name.clone(),
            customer_email: reservation.customer_email.clone(),
            placed_at: reservation.placed_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            items: reservation
                .items
                .iter()
                .map(|v| format!("{} ({})", v.model, v.year))
                .collect(),
        }
    }
}

/// Vehicle table row for the dashboard.
#[derive(Clone)]
pub struct VehicleRowView {
    pub id: i64,
    pub model: String,
    pub year: String,
}

impl From<&Vehicle> for VehicleRowView {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.as_i64(),
            model: vehicle.model.clone(),
            year: vehicle.year.clone(),
        }
    }
}

/// The inventory form, shared between create and edit mode.
#[derive(Clone, Default)]
pub struct InventoryFormView {
    /// Set when the form edits an existing vehicle.
    pub edit_id: Option<i64>,
    pub model: String,
    pub year: String,
    pub description: String,
    pub photo_url: String,
}

impl InventoryFormView {
    fn for_edit(vehicle: &Vehicle) -> Self {
        Self {
            edit_id: Some(vehicle.id.as_i64()),
            model: vehicle.model.clone(),
            year: vehicle.year.clone(),
            description: vehicle.description.clone(),
            photo_url: vehicle.photo_url.clone(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub ctx: PageContext,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/register.html")]
pub struct RegisterTemplate {
    pub ctx: PageContext,
}

/// Restricted-access screen for authenticated non-admins.
#[derive(Template, WebTemplate)]
#[template(path = "admin/restricted.html")]
pub struct RestrictedTemplate {
    pub ctx: PageContext,
    pub username: String,
}

/// Backoffice dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub reservations: Vec<ReservationView>,
    pub vehicles: Vec<VehicleRowView>,
    pub form: InventoryFormView,
}

// =============================================================================
// Forms
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Register form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Auth handlers
// =============================================================================

/// Render the login page, or skip straight to the dashboard.
#[instrument(skip(session, user))]
pub async fn login_page(OptionalUser(user): OptionalUser, session: Session) -> Response {
    if user.is_some() {
        return Redirect::to("/admin").into_response();
    }

    LoginTemplate {
        ctx: PageContext::load(&session).await,
    }
    .into_response()
}

/// Handle a login attempt.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let auth = AuthService::new(state.sheet(), state.config().bootstrap_admin.as_ref());

    match auth.login(&form.username, &form.password).await {
        Ok(user) => {
            session_state::set_current_user(&session, &user).await?;
            tracing::info!(username = %user.username, "Login");
            Ok(Redirect::to("/admin"))
        }
        Err(AuthError::InvalidCredentials) => {
            session_state::set_notice(&session, Notice::error("Invalid credentials.")).await?;
            Ok(Redirect::to("/admin/login"))
        }
        Err(e) => {
            tracing::error!("Login failed: {e}");
            session_state::set_notice(&session, Notice::error("Connection error.")).await?;
            Ok(Redirect::to("/admin/login"))
        }
    }
}

/// Render the register page.
#[instrument(skip(session))]
pub async fn register_page(session: Session) -> RegisterTemplate {
    RegisterTemplate {
        ctx: PageContext::load(&session).await,
    }
}

/// Handle an account registration.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect> {
    let auth = AuthService::new(state.sheet(), state.config().bootstrap_admin.as_ref());

    match auth
        .register(&form.username, &form.email, &form.password)
        .await
    {
        Ok(()) => {
            session_state::set_notice(
                &session,
                Notice::success("Account created. Please log in."),
            )
            .await?;
            Ok(Redirect::to("/admin/login"))
        }
        Err(AuthError::UserAlreadyExists) => {
            session_state::set_notice(&session, Notice::error("Username is already taken."))
                .await?;
            Ok(Redirect::to("/admin/register"))
        }
        Err(AuthError::WeakPassword(msg)) => {
            session_state::set_notice(&session, Notice::error(msg)).await?;
            Ok(Redirect::to("/admin/register"))
        }
        Err(e) => {
            tracing::error!("Registration failed: {e}");
            session_state::set_notice(&session, Notice::error("Registration failed.")).await?;
            Ok(Redirect::to("/admin/register"))
        }
    }
}

/// Logout and clear the session user.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    session_state::clear_current_user(&session).await?;
    Ok(Redirect::to("/"))
}

// =============================================================================
// Dashboard
// =============================================================================

/// Backoffice entry page.
///
/// Admins get the dashboard; authenticated non-admins get the restricted
/// screen; anonymous visitors are redirected to login by the extractor.
#[instrument(skip(state, session, user))]
pub async fn dashboard(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    session: Session,
) -> Response {
    if !user.is_admin() {
        return RestrictedTemplate {
            ctx: PageContext::load(&session).await,
            username: user.username,
        }
        .into_response();
    }

    render_dashboard(&state, &session, InventoryFormView::default()).await
}

/// Dashboard with the inventory form prefilled for one vehicle.
#[instrument(skip(state, session, _admin))]
pub async fn edit_vehicle(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Response> {
    match state.catalog().find(VehicleId::new(id)).await {
        Some(vehicle) => Ok(render_dashboard(
            &state,
            &session,
            InventoryFormView::for_edit(&vehicle),
        )
        .await),
        None => {
            session_state::set_notice(&session, Notice::error("Vehicle not found.")).await?;
            Ok(Redirect::to("/admin").into_response())
        }
    }
}

async fn render_dashboard(
    state: &AppState,
    session: &Session,
    form: InventoryFormView,
) -> Response {
    let reservations = state
        .reservations()
        .snapshot()
        .await
        .iter()
        .map(ReservationView::from)
        .collect();
    let vehicles = state
        .catalog()
        .snapshot()
        .await
        .iter()
        .map(VehicleRowView::from)
        .collect();

    DashboardTemplate {
        ctx: PageContext::load(session).await,
        reservations,
        vehicles,
        form,
    }
    .into_response()
}

// =============================================================================
// Inventory mutations
// =============================================================================

/// Create a vehicle: POST to the sheet, then append the returned record.
#[instrument(skip(state, session, _admin, form))]
pub async fn create_vehicle(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<VehicleDraft>,
) -> Result<Redirect> {
    match state.sheet().create_vehicle(&form).await {
        Ok(vehicle) => {
            state.catalog().insert(vehicle).await;
            session_state::set_notice(&session, Notice::success("Vehicle created.")).await?;
        }
        Err(e) => {
            tracing::error!("Vehicle create failed: {e}");
            session_state::set_notice(&session, Notice::error("Saving failed.")).await?;
        }
    }

    Ok(Redirect::to("/admin"))
}

/// Update a vehicle: PUT to the sheet, then merge the fields locally.
#[instrument(skip(state, session, _admin, form))]
pub async fn update_vehicle(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<VehicleDraft>,
) -> Result<Redirect> {
    let id = VehicleId::new(id);

    match state.sheet().update_vehicle(id, &form).await {
        Ok(()) => {
            state.catalog().apply_update(id, &form).await;
            session_state::set_notice(&session, Notice::success("Vehicle updated.")).await?;
        }
        Err(e) => {
            tracing::error!("Vehicle update failed: {e}");
            session_state::set_notice(&session, Notice::error("Saving failed.")).await?;
        }
    }

    Ok(Redirect::to("/admin"))
}

/// Delete a vehicle: DELETE on the sheet, then drop it locally.
#[instrument(skip(state, session, _admin))]
pub async fn delete_vehicle(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    let id = VehicleId::new(id);

    match state.sheet().delete_vehicle(id).await {
        Ok(()) => {
            state.catalog().remove(id).await;
            session_state::set_notice(&session, Notice::success("Vehicle deleted.")).await?;
        }
        Err(e) => {
            tracing::error!("Vehicle delete failed: {e}");
            session_state::set_notice(&session, Notice::error("Deleting failed.")).await?;
        }
    }

    Ok(Redirect::to("/admin"))
}

//! Catalog route handlers.
//!
//! The catalog shows a searchable grid with incremental reveal: the page
//! renders an initial window of cards and a sentinel that, when scrolled
//! into view, swaps in a larger window via HTMX. The full filtered list is
//! always held in memory - this is reveal, not pagination.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::instrument;

use motorstand_core::{Vehicle, VehicleId};
use tower_sessions::Session;

use crate::error::AppError;
use crate::filters;
use crate::state::AppState;
use crate::store;

use super::PageContext;

/// Cards shown before any reveal step.
pub const INITIAL_VISIBLE: usize = 9;

/// Cards added per reveal step.
pub const REVEAL_STEP: usize = 6;

/// Vehicle card display data for templates.
#[derive(Clone)]
pub struct VehicleCardView {
    pub id: i64,
    pub model: String,
    pub year: String,
    pub photo_url: String,
}

impl From<&Vehicle> for VehicleCardView {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.as_i64(),
            model: vehicle.model.clone(),
            year: vehicle.year.clone(),
            photo_url: vehicle.photo_url.clone(),
        }
    }
}

/// Vehicle detail display data for templates.
#[derive(Clone)]
pub struct VehicleDetailView {
    pub id: i64,
    pub model: String,
    pub year: String,
    pub description: String,
    pub photo_url: String,
}

impl From<&Vehicle> for VehicleDetailView {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.as_i64(),
            model: vehicle.model.clone(),
            year: vehicle.year.clone(),
            description: if vehicle.description.is_empty() {
                "No description available.".to_string()
            } else {
                vehicle.description.clone()
            },
            photo_url: vehicle.photo_url.clone(),
        }
    }
}

/// Catalog query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Search text, matched case-insensitively against model names.
    pub q: Option<String>,
    /// Requested visible count. Omitted on a fresh search, which resets the
    /// reveal window.
    pub show: Option<usize>,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogIndexTemplate {
    pub ctx: PageContext,
    pub query: String,
    pub vehicles: Vec<VehicleCardView>,
    pub more_url: Option<String>,
}

/// Catalog grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/vehicle_grid.html")]
pub struct VehicleGridTemplate {
    pub vehicles: Vec<VehicleCardView>,
    pub more_url: Option<String>,
}

/// Vehicle detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "vehicles/show.html")]
pub struct VehicleShowTemplate {
    pub ctx: PageContext,
    pub vehicle: VehicleDetailView,
}

/// Compute the visible card window and the sentinel URL for the next step.
fn reveal_window(vehicles: &[Vehicle], query: &str, requested: Option<usize>) -> (Vec<VehicleCardView>, Option<String>) {
    let requested = requested.unwrap_or(INITIAL_VISIBLE);
    let shown = requested.min(vehicles.len());

    let cards = vehicles
        .iter()
        .take(shown)
        .map(VehicleCardView::from)
        .collect();
    let more_url = (shown < vehicles.len()).then(|| {
        format!(
            "/catalog/items?q={}&show={}",
            urlencoding::encode(query),
            requested + REVEAL_STEP
        )
    });

    (cards, more_url)
}

/// Display the catalog page.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CatalogQuery>,
) -> CatalogIndexTemplate {
    let ctx = PageContext::load(&session).await;

    let q = query.q.unwrap_or_default();
    let filtered = store::search(&state.catalog().snapshot().await, &q);
    let (vehicles, more_url) = reveal_window(&filtered, &q, query.show);

    CatalogIndexTemplate {
        ctx,
        query: q,
        vehicles,
        more_url,
    }
}

/// Return the catalog grid fragment for the next reveal step (HTMX).
#[instrument(skip(state))]
pub async fn items(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> VehicleGridTemplate {
    let q = query.q.unwrap_or_default();
    let filtered = store::search(&state.catalog().snapshot().await, &q);
    let (vehicles, more_url) = reveal_window(&filtered, &q, query.show);

    VehicleGridTemplate { vehicles, more_url }
}

/// Display the vehicle detail page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<VehicleShowTemplate, AppError> {
    let vehicle = state
        .catalog()
        .find(VehicleId::new(id))
        .await
        .ok_or_else(|| AppError::NotFound(format!("vehicle {id}")))?;

    Ok(VehicleShowTemplate {
        ctx: PageContext::load(&session).await,
        vehicle: VehicleDetailView::from(&vehicle),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn vehicles(count: i64) -> Vec<Vehicle> {
        (1..=count)
            .map(|id| Vehicle {
                id: VehicleId::new(id),
                model: format!("Model {id}"),
                year: "2021".to_string(),
                description: String::new(),
                photo_url: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_reveal_starts_at_nine_and_grows_by_six() {
        let list = vehicles(10);

        // Fresh page: 9 of 10 shown, sentinel asks for 15.
        let (cards, more_url) = reveal_window(&list, "", None);
        assert_eq!(cards.len(), 9);
        assert_eq!(more_url.unwrap(), "/catalog/items?q=&show=15");

        // One reveal step: all 10 shown, no further sentinel.
        let (cards, more_url) = reveal_window(&list, "", Some(15));
        assert_eq!(cards.len(), 10);
        assert!(more_url.is_none());
    }

    #[test]
    fn test_reveal_sentinel_carries_the_search_query_encoded() {
        let list = vehicles(12);

        let (_, more_url) = reveal_window(&list, "type r", None);
        assert_eq!(more_url.unwrap(), "/catalog/items?q=type%20r&show=15");
    }

    #[test]
    fn test_reveal_short_list_has_no_sentinel() {
        let list = vehicles(4);

        let (cards, more_url) = reveal_window(&list, "", None);
        assert_eq!(cards.len(), 4);
        assert!(more_url.is_none());
    }

    #[test]
    fn test_detail_view_falls_back_when_description_is_empty() {
        let vehicle = Vehicle {
            id: VehicleId::new(1),
            model: "Civic".to_string(),
            year: "2020".to_string(),
            description: String::new(),
            photo_url: String::new(),
        };

        let view = VehicleDetailView::from(&vehicle);
        assert_eq!(view.description, "No description available.");
    }
}

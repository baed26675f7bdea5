//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::sheet::SheetClient;
use crate::store::{CatalogStore, ReservationLog};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// sheet client, the in-memory catalog, and the reservation log.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    sheet: SheetClient,
    catalog: CatalogStore,
    reservations: ReservationLog,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let sheet = SheetClient::new(&config.sheet);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                sheet,
                catalog: CatalogStore::default(),
                reservations: ReservationLog::default(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the sheet API client.
    #[must_use]
    pub fn sheet(&self) -> &SheetClient {
        &self.inner.sheet
    }

    /// Get a reference to the in-memory catalog.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Get a reference to the reservation log.
    #[must_use]
    pub fn reservations(&self) -> &ReservationLog {
        &self.inner.reservations
    }

    /// Fetch the vehicle list once and seed the in-memory catalog.
    ///
    /// A failed fetch is logged and leaves the catalog empty; the storefront
    /// still serves, showing no vehicles. There is no retry.
    pub async fn load_catalog(&self) {
        match self.sheet().list_vehicles().await {
            Ok(vehicles) => {
                tracing::info!(count = vehicles.len(), "Catalog loaded from sheet");
                self.catalog().replace_all(vehicles).await;
            }
            Err(e) => {
                tracing::error!("Failed to load catalog from sheet: {e}");
            }
        }
    }
}

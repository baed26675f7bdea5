//! Spreadsheet API client implementation.
//!
//! Thin JSON-over-HTTP calls with the envelope and spelling handling
//! delegated to [`super::records`]. One request per catalog action, no
//! retries: the in-memory catalog is patched only after a call succeeds.

use std::sync::Arc;

use reqwest::Method;
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use tracing::instrument;

use motorstand_core::{Vehicle, VehicleDraft, VehicleId};

use crate::config::SheetApiConfig;

use super::records::{
    extract_collection, extract_record, user_fields, users_from_rows, vehicle_fields,
    vehicle_from_row, vehicles_from_rows,
};
use super::{SheetError, UserRow};

/// Client for the spreadsheet API.
///
/// Cheaply cloneable; holds the shared `reqwest` client and the resource
/// configuration.
#[derive(Clone)]
pub struct SheetClient {
    inner: Arc<SheetClientInner>,
}

struct SheetClientInner {
    client: reqwest::Client,
    config: SheetApiConfig,
}

impl SheetClient {
    /// Create a new sheet API client.
    #[must_use]
    pub fn new(config: &SheetApiConfig) -> Self {
        Self {
            inner: Arc::new(SheetClientInner {
                client: reqwest::Client::new(),
                config: config.clone(),
            }),
        }
    }

    // =========================================================================
    // Vehicles
    // =========================================================================

    /// Fetch the full vehicle list.
    #[instrument(skip(self))]
    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>, SheetError> {
        let url = self.resource_url(&self.inner.config.vehicles_resource);
        let body = self.execute(Method::GET, url, None).await?;
        let rows = extract_collection(&body, &self.inner.config.vehicles_resource)?;
        Ok(vehicles_from_rows(rows))
    }

    /// Create a vehicle row and return the record with its assigned id.
    #[instrument(skip(self, draft))]
    pub async fn create_vehicle(&self, draft: &VehicleDraft) -> Result<Vehicle, SheetError> {
        let root = &self.inner.config.vehicle_root;
        let url = self.resource_url(&self.inner.config.vehicles_resource);
        let body = json!({ root.as_str(): vehicle_fields(draft) });

        let response = self.execute(Method::POST, url, Some(body)).await?;
        let record = extract_record(&response, root)?;
        vehicle_from_row(&record)
            .ok_or_else(|| SheetError::MalformedRecord("id, modelo".to_string()))
    }

    /// Overwrite the row addressed by `id` with the submitted fields.
    #[instrument(skip(self, draft))]
    pub async fn update_vehicle(
        &self,
        id: VehicleId,
        draft: &VehicleDraft,
    ) -> Result<(), SheetError> {
        let root = &self.inner.config.vehicle_root;
        let url = self.row_url(&self.inner.config.vehicles_resource, id.as_i64());
        let body = json!({ root.as_str(): vehicle_fields(draft) });

        self.execute(Method::PUT, url, Some(body)).await.map(|_| ())
    }

    /// Delete the row addressed by `id`.
    #[instrument(skip(self))]
    pub async fn delete_vehicle(&self, id: VehicleId) -> Result<(), SheetError> {
        let url = self.row_url(&self.inner.config.vehicles_resource, id.as_i64());
        self.execute(Method::DELETE, url, None).await.map(|_| ())
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Fetch the full user list.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserRow>, SheetError> {
        let url = self.resource_url(&self.inner.config.users_resource);
        let body = self.execute(Method::GET, url, None).await?;
        let rows = extract_collection(&body, &self.inner.config.users_resource)?;
        Ok(users_from_rows(rows))
    }

    /// Append a user row.
    #[instrument(skip(self, row), fields(username = %row.username))]
    pub async fn create_user(&self, row: &UserRow) -> Result<(), SheetError> {
        let root = &self.inner.config.user_root;
        let url = self.resource_url(&self.inner.config.users_resource);
        let body = json!({ root.as_str(): user_fields(row) });

        self.execute(Method::POST, url, Some(body)).await.map(|_| ())
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    fn resource_url(&self, resource: &str) -> String {
        format!("{}/{resource}", self.inner.config.base_url)
    }

    fn row_url(&self, resource: &str, id: i64) -> String {
        format!("{}/{resource}/{id}", self.inner.config.base_url)
    }

    /// Issue one request and parse the JSON envelope.
    async fn execute(
        &self,
        method: Method,
        url: String,
        body: Option<Value>,
    ) -> Result<Value, SheetError> {
        let mut request = self.inner.client.request(method, &url);

        if let Some(token) = &self.inner.config.api_token {
            request = request.bearer_auth(token.expose_secret());
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                url = %url,
                body = %response_text.chars().take(500).collect::<String>(),
                "Sheet API returned non-success status"
            );
            return Err(SheetError::Status(status));
        }

        // DELETE answers with an empty body
        if response_text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&response_text).map_err(SheetError::Parse)
    }
}

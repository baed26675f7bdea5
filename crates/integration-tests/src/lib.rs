//! Integration tests for Motorstand.
//!
//! Each test spawns two in-process servers: a stub of the spreadsheet API
//! and the storefront itself, pointed at the stub. Tests then drive the
//! storefront over HTTP with a cookie-keeping `reqwest` client, exactly as a
//! browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p motorstand-integration-tests
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};

use motorstand_storefront::config::{SheetApiConfig, StorefrontConfig};
use motorstand_storefront::state::AppState;

// =============================================================================
// Stub sheet API
// =============================================================================

#[derive(Debug, Default)]
struct StubState {
    vehicles: Vec<Value>,
    users: Vec<Value>,
    next_id: i64,
    fail: bool,
}

type SharedStub = Arc<Mutex<StubState>>;

/// An in-process stand-in for the spreadsheet API.
///
/// Serves the same envelope shapes the real service does: list responses
/// wrap rows under the resource name, mutations wrap a single record under
/// the singular root key.
#[derive(Clone)]
pub struct StubSheet {
    pub base_url: String,
    state: SharedStub,
}

impl StubSheet {
    /// Start the stub on an ephemeral port.
    pub async fn spawn() -> Self {
        let state: SharedStub = Arc::new(Mutex::new(StubState {
            next_id: 1,
            ..StubState::default()
        }));

        let router = Router::new()
            .route("/{resource}", get(stub_list).post(stub_create))
            .route("/{resource}/{id}", axum::routing::put(stub_update).delete(stub_delete))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub local addr");

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub server");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Seed a vehicle row; returns its assigned id.
    pub fn seed_vehicle(&self, model: &str, year: &str) -> i64 {
        let mut state = self.state.lock().expect("stub lock");
        let id = state.next_id;
        state.next_id += 1;
        state.vehicles.push(json!({
            "id": id,
            "modelo": model,
            "ano": year,
            "descricao": format!("{model} description"),
            "fotourl": format!("https://img.example/{id}.jpg"),
        }));
        id
    }

    /// Seed a user row. `password` is stored as given (hash it first).
    pub fn seed_user(&self, username: &str, password: &str, email: &str, admin: i64) {
        let mut state = self.state.lock().expect("stub lock");
        let id = state.next_id;
        state.next_id += 1;
        state.users.push(json!({
            "id": id,
            "username": username,
            "password": password,
            "email": email,
            "admin": admin,
        }));
    }

    /// Make every request fail with HTTP 500 from now on.
    pub fn set_fail(&self, fail: bool) {
        self.state.lock().expect("stub lock").fail = fail;
    }

    /// Snapshot of the vehicle rows.
    pub fn vehicles(&self) -> Vec<Value> {
        self.state.lock().expect("stub lock").vehicles.clone()
    }

    /// Snapshot of the user rows.
    pub fn users(&self) -> Vec<Value> {
        self.state.lock().expect("stub lock").users.clone()
    }
}

fn singular(resource: &str) -> String {
    resource.trim_end_matches('s').to_string()
}

fn check_fail(state: &StubState) -> Result<(), Response> {
    if state.fail {
        Err(StatusCode::INTERNAL_SERVER_ERROR.into_response())
    } else {
        Ok(())
    }
}

async fn stub_list(State(state): State<SharedStub>, Path(resource): Path<String>) -> Response {
    let state = state.lock().expect("stub lock");
    if let Err(resp) = check_fail(&state) {
        return resp;
    }

    match resource.as_str() {
        "vehicles" => Json(json!({ "vehicles": state.vehicles })).into_response(),
        "users" => Json(json!({ "users": state.users })).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn stub_create(
    State(state): State<SharedStub>,
    Path(resource): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("stub lock");
    if let Err(resp) = check_fail(&state) {
        return resp;
    }

    // The body wraps the record under a singular root key.
    let Some(mut row) = body
        .as_object()
        .and_then(|o| o.values().find(|v| v.is_object()))
        .cloned()
    else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let id = state.next_id;
    state.next_id += 1;
    row["id"] = json!(id);

    let rows = match resource.as_str() {
        "vehicles" => &mut state.vehicles,
        "users" => &mut state.users,
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    rows.push(row.clone());

    Json(json!({ singular(&resource): row })).into_response()
}

async fn stub_update(
    State(state): State<SharedStub>,
    Path((resource, id)): Path<(String, i64)>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("stub lock");
    if let Err(resp) = check_fail(&state) {
        return resp;
    }

    let Some(fields) = body
        .as_object()
        .and_then(|o| o.values().find(|v| v.is_object()))
        .and_then(|v| v.as_object())
        .cloned()
    else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let rows = match resource.as_str() {
        "vehicles" => &mut state.vehicles,
        "users" => &mut state.users,
        _ => return StatusCode::NOT_FOUND.into_response(),
    };

    let Some(row) = rows.iter_mut().find(|r| r["id"] == json!(id)) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    for (key, value) in fields {
        row[key.as_str()] = value;
    }

    Json(json!({ singular(&resource): row.clone() })).into_response()
}

async fn stub_delete(
    State(state): State<SharedStub>,
    Path((resource, id)): Path<(String, i64)>,
) -> Response {
    let mut state = state.lock().expect("stub lock");
    if let Err(resp) = check_fail(&state) {
        return resp;
    }

    let rows = match resource.as_str() {
        "vehicles" => &mut state.vehicles,
        "users" => &mut state.users,
        _ => return StatusCode::NOT_FOUND.into_response(),
    };

    let before = rows.len();
    rows.retain(|r| r["id"] != json!(id));
    if rows.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }

    StatusCode::OK.into_response()
}

// =============================================================================
// Test context
// =============================================================================

/// A running storefront wired to a stub sheet.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub sheet: StubSheet,
}

impl TestContext {
    /// Storefront configuration pointing at the stub, no bootstrap admin.
    pub fn config_for(sheet: &StubSheet) -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().expect("host"),
            port: 0,
            sheet: SheetApiConfig {
                base_url: sheet.base_url.clone(),
                api_token: None,
                vehicles_resource: "vehicles".to_string(),
                vehicle_root: "vehicle".to_string(),
                users_resource: "users".to_string(),
                user_root: "user".to_string(),
            },
            bootstrap_admin: None,
            sentry_dsn: None,
        }
    }

    /// Spawn the storefront against the given stub with default config.
    pub async fn spawn(sheet: StubSheet) -> Self {
        let config = Self::config_for(&sheet);
        Self::spawn_with_config(sheet, config).await
    }

    /// Spawn the storefront with a custom configuration.
    pub async fn spawn_with_config(sheet: StubSheet, config: StorefrontConfig) -> Self {
        let state = AppState::new(config);
        state.load_catalog().await;

        let app = motorstand_storefront::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind app listener");
        let addr: SocketAddr = listener.local_addr().expect("app local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("app server");
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("build HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
            sheet,
        }
    }

    /// GET a path and return the response body, asserting HTTP success.
    pub async fn get_ok(&self, path: &str) -> String {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("GET request");
        assert!(
            resp.status().is_success(),
            "GET {path} returned {}",
            resp.status()
        );
        resp.text().await.expect("response body")
    }

    /// POST a form and return the final body after following redirects.
    pub async fn post_form(&self, path: &str, form: &[(&str, String)]) -> String {
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .form(form)
            .send()
            .await
            .expect("POST request");
        assert!(
            resp.status().is_success(),
            "POST {path} returned {}",
            resp.status()
        );
        resp.text().await.expect("response body")
    }

    /// Log in through the regular form flow.
    pub async fn login(&self, username: &str, password: &str) -> String {
        self.post_form(
            "/admin/login",
            &[
                ("username", username.to_string()),
                ("password", password.to_string()),
            ],
        )
        .await
    }
}

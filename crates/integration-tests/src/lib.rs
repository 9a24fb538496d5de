//! Integration tests for Geo Addresses.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p geo-addresses-integration-tests
//! ```
//!
//! Each test gets its own [`TestContext`]: a fresh `SQLite` file in a temporary
//! directory and the full API router served on an ephemeral local port. Tests
//! talk to it over real HTTP with `reqwest`.

use std::net::SocketAddr;

use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::task::JoinHandle;

use geo_addresses_api::config::ApiConfig;
use geo_addresses_api::{db, routes, state::AppState};

/// A running API server backed by a throwaway database.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    server: JoinHandle<()>,
    _dir: TempDir,
}

impl TestContext {
    /// Start a server on `127.0.0.1` with an empty database.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory, database, or listener cannot be
    /// created.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let pool = db::open(&dir.path().join("addresses.db"), 1)
            .await
            .expect("Failed to open test database");
        let config = ApiConfig::from_lookup(|_| None).expect("Failed to build config");
        let app = routes::app(AppState::new(config, pool));

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            server,
            _dir: dir,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST /addresses/` with `body`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn create(&self, body: &(impl Serialize + Sync)) -> Response {
        self.client
            .post(self.url("/addresses/"))
            .json(body)
            .send()
            .await
            .expect("Failed to send create request")
    }

    /// `GET /addresses/` decoded as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn list(&self) -> Vec<Value> {
        self.client
            .get(self.url("/addresses/"))
            .send()
            .await
            .expect("Failed to send list request")
            .json()
            .await
            .expect("List response was not a JSON array")
    }

    /// `GET /addresses/{id}`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, id: i64) -> Response {
        self.client
            .get(self.url(&format!("/addresses/{id}")))
            .send()
            .await
            .expect("Failed to send get request")
    }

    /// `PUT /addresses/{id}` with `body`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn update(&self, id: i64, body: &(impl Serialize + Sync)) -> Response {
        self.client
            .put(self.url(&format!("/addresses/{id}")))
            .json(body)
            .send()
            .await
            .expect("Failed to send update request")
    }

    /// `DELETE /addresses/{id}`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn delete(&self, id: i64) -> Response {
        self.client
            .delete(self.url(&format!("/addresses/{id}")))
            .send()
            .await
            .expect("Failed to send delete request")
    }

    /// `GET /addresses/distance/` with the given origin and radius.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn within(&self, latitude: f64, longitude: f64, max_distance: f64) -> Response {
        self.client
            .get(self.url("/addresses/distance/"))
            .query(&[
                ("latitude", latitude),
                ("longitude", longitude),
                ("max_distance", max_distance),
            ])
            .send()
            .await
            .expect("Failed to send distance request")
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A complete address JSON body.
#[must_use]
pub fn address_json(id: i64, street: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "id": id,
        "street": street,
        "city": "Springfield",
        "state": "IL",
        "country": "USA",
        "latitude": latitude,
        "longitude": longitude
    })
}

/// Ids present in a list of address JSON objects.
#[must_use]
pub fn ids(addresses: &[Value]) -> Vec<i64> {
    addresses
        .iter()
        .filter_map(|a| a.get("id").and_then(Value::as_i64))
        .collect()
}

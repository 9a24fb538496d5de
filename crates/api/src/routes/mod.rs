//! HTTP route handlers for the address API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (database)
//!
//! # Addresses (JSON in/out, trailing slash optional)
//! POST   /addresses/              - Create (caller supplies id)
//! GET    /addresses/              - List all
//! GET    /addresses/{id}          - Fetch one (404 if absent)
//! PUT    /addresses/{id}          - Replace all fields (200 even if absent)
//! DELETE /addresses/{id}          - Delete (200 even if absent)
//! GET    /addresses/distance/     - ?latitude=&longitude=&max_distance= (km)
//! ```

pub mod addresses;
pub mod health;

use std::time::Duration;

use axum::{Router, http::Request, http::Response, middleware, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the address routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/addresses", get(addresses::index).post(addresses::create))
        .route("/addresses/", get(addresses::index).post(addresses::create))
        .route("/addresses/distance", get(addresses::within))
        .route("/addresses/distance/", get(addresses::within))
        .route(
            "/addresses/{id}",
            get(addresses::show)
                .put(addresses::update)
                .delete(addresses::destroy),
        )
}

/// Create all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(address_routes())
}

/// Build the complete application with tracing and request IDs.
///
/// Sentry layers are left to the binary so tests can run without a client.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        #[allow(clippy::cast_possible_truncation)]
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, StatusCode};
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::config::ApiConfig;

    async fn test_app() -> (TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let pool = crate::db::open(&dir.path().join("addresses.db"), 1)
            .await
            .unwrap();
        let config = ApiConfig::from_lookup(|_| None).unwrap();
        (dir, app(AppState::new(config, pool)))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    fn sample(id: i64) -> Value {
        json!({
            "id": id,
            "street": "221B Baker Street",
            "city": "London",
            "state": "Greater London",
            "country": "UK",
            "latitude": 51.5237,
            "longitude": -0.1585
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (_dir, app) = test_app().await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!("ok"));

        let (status, _) = send(&app, Method::GET, "/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_and_show() {
        let (_dir, app) = test_app().await;

        let (status, body) = send(&app, Method::POST, "/addresses/", Some(sample(1))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, sample(1));

        let (status, body) = send(&app, Method::GET, "/addresses/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, sample(1));
    }

    #[tokio::test]
    async fn test_show_missing_is_404_with_detail() {
        let (_dir, app) = test_app().await;
        let (status, body) = send(&app, Method::GET, "/addresses/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Address not found"}));
    }

    #[tokio::test]
    async fn test_duplicate_create_is_server_error() {
        let (_dir, app) = test_app().await;
        send(&app, Method::POST, "/addresses/", Some(sample(1))).await;

        let mut other = sample(1);
        other["street"] = json!("somewhere else");
        let (status, body) = send(&app, Method::POST, "/addresses/", Some(other)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"detail": "Internal server error"}));

        let (_, stored) = send(&app, Method::GET, "/addresses/1", None).await;
        assert_eq!(stored, sample(1));
    }

    #[tokio::test]
    async fn test_update_missing_echoes_body() {
        let (_dir, app) = test_app().await;
        let (status, body) = send(&app, Method::PUT, "/addresses/5", Some(sample(5))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, sample(5));

        let (_, list) = send(&app, Method::GET, "/addresses/", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_delete_message() {
        let (_dir, app) = test_app().await;
        let (status, body) = send(&app, Method::DELETE, "/addresses/9", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Address with id 9 deleted"}));
    }

    #[tokio::test]
    async fn test_distance_route_is_not_shadowed_by_id() {
        let (_dir, app) = test_app().await;
        send(&app, Method::POST, "/addresses/", Some(sample(1))).await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/addresses/distance/?latitude=51.5237&longitude=-0.1585&max_distance=1",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([sample(1)]));
    }

    #[tokio::test]
    async fn test_type_errors_are_422() {
        let (_dir, app) = test_app().await;

        let (status, body) = send(&app, Method::GET, "/addresses/abc", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());

        let mut missing = sample(1);
        missing.as_object_mut().unwrap().remove("city");
        let (status, body) = send(&app, Method::POST, "/addresses/", Some(missing)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());

        let (status, _) = send(
            &app,
            Method::GET,
            "/addresses/distance/?latitude=1&longitude=2",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

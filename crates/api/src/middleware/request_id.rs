//! Per-request correlation id for the address API.
//!
//! Each request gets an `x-request-id`. It is recorded on the `http_request`
//! span that `TraceLayer` opens in [`crate::routes::app`], so handler events
//! such as the proximity scan counts or "Update matched no address" can be
//! traced to one call. It is also set as a Sentry tag, which ties the opaque
//! 500 from a duplicate insert to the request that caused it. The response
//! echoes the id so callers can quote it.
//!
//! An id supplied by an upstream proxy is reused if it is non-blank and at most
//! [`MAX_REQUEST_ID_LEN`] bytes. Anything else is replaced with a UUID v4.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream id accepted before a fresh one is generated.
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// Reuse a usable upstream id, otherwise mint a UUID v4.
fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned)
}

/// Attach a request id to the span, the Sentry scope and the response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", &request_id));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

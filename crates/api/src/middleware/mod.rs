//! HTTP middleware stack for the address API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`, capture errors and transactions)
//! 2. `TraceLayer` (one `http_request` span per request)
//! 3. Request ID (add unique ID to each request, recorded in the span)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};

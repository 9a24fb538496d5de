//! Request extractors whose rejections are `AppError`.
//!
//! Drop-in replacements for axum's `Json`, `Path` and `Query` that turn parse
//! failures into a 422 with a JSON `detail` body instead of axum's plain-text
//! rejection.
//!
//! # Example
//!
//! ```ignore
//! async fn handler(Path(id): Path<AddressId>, Json(address): Json<Address>) -> Json<Address> {
//!     Json(address)
//! }
//! ```

use axum::{
    extract::{FromRequest, FromRequestParts},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

/// JSON body extractor and response.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Path parameter extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

/// Query string extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

//! Address CRUD and proximity route handlers.
//!
//! Create and update echo the request body back. Update and delete succeed
//! even when no row has the given id.

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use geo_addresses_core::{Address, AddressId, Coordinates, within_distance};

use crate::error::{AppError, Result};
use crate::extract::{Json, Path, Query};
use crate::state::AppState;

/// Response for a delete request.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Query parameters for the proximity search. All three are required.
#[derive(Debug, Deserialize)]
pub struct DistanceQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Inclusive radius in kilometers.
    pub max_distance: f64,
}

/// Create an address with a caller-supplied id.
///
/// # Errors
///
/// Returns `AppError::Database` if the insert fails, including when the id
/// is already taken.
#[instrument(skip(state, address), fields(address_id = %address.id))]
pub async fn create(
    State(state): State<AppState>,
    Json(address): Json<Address>,
) -> Result<Json<Address>> {
    state.addresses().insert(&address).await?;
    tracing::info!("Address created");
    Ok(Json(address))
}

/// List every address.
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Address>>> {
    let addresses = state.addresses().list_all().await?;
    Ok(Json(addresses))
}

/// Fetch one address.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no address has this id.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<AddressId>,
) -> Result<Json<Address>> {
    state
        .addresses()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Address not found".to_string()))
}

/// Replace every field of an address and echo the body back.
///
/// # Errors
///
/// Returns `AppError::Database` if the statement fails.
#[instrument(skip(state, id, address), fields(address_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<AddressId>,
    Json(address): Json<Address>,
) -> Result<Json<Address>> {
    let changed = state.addresses().update(id, &address).await?;
    if changed == 0 {
        tracing::debug!("Update matched no address");
    }
    Ok(Json(address))
}

/// Delete an address.
///
/// # Errors
///
/// Returns `AppError::Database` if the statement fails.
#[instrument(skip(state, id), fields(address_id = %id))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<AddressId>,
) -> Result<Json<DeleteResponse>> {
    let removed = state.addresses().delete(id).await?;
    if removed == 0 {
        tracing::debug!("Delete matched no address");
    }
    Ok(Json(DeleteResponse {
        message: format!("Address with id {id} deleted"),
    }))
}

/// Addresses within `max_distance` km of the given point.
///
/// # Errors
///
/// Returns `AppError::Database` if the scan fails.
pub async fn within(
    State(state): State<AppState>,
    Query(query): Query<DistanceQuery>,
) -> Result<Json<Vec<Address>>> {
    let origin = Coordinates::new(query.latitude, query.longitude);
    let addresses = state.addresses().list_all().await?;
    let total = addresses.len();

    let nearby = within_distance(addresses, origin, query.max_distance);
    tracing::debug!(
        scanned = total,
        matched = nearby.len(),
        max_distance = query.max_distance,
        "Proximity search"
    );

    Ok(Json(nearby))
}

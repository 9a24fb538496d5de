//! Proximity query against the local database.
//!
//! # Usage
//!
//! ```bash
//! geo-cli nearby --latitude 40.7484 --longitude -73.9857 --max-distance 5
//! ```

use sqlx::SqlitePool;
use tracing::info;

use geo_addresses_api::db::{AddressRepository, RepositoryError};
use geo_addresses_core::{Address, Coordinates, within_distance};

use super::{CliError, connect};

/// Addresses within `max_km` of `origin`, paired with their distance.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the scan fails.
pub async fn find(
    pool: &SqlitePool,
    origin: Coordinates,
    max_km: f64,
) -> Result<Vec<(Address, f64)>, RepositoryError> {
    let addresses = AddressRepository::new(pool).list_all().await?;

    Ok(within_distance(addresses, origin, max_km)
        .into_iter()
        .map(|address| {
            let distance = origin.distance_km(&address.coordinates());
            (address, distance)
        })
        .collect())
}

/// Log every address within `max_km` of the given point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the database cannot be
/// read.
pub async fn run(latitude: f64, longitude: f64, max_km: f64) -> Result<(), CliError> {
    let (_config, pool) = connect().await?;
    let origin = Coordinates::new(latitude, longitude);
    let matches = find(&pool, origin, max_km).await?;
    pool.close().await;

    info!("{} address(es) within {max_km} km", matches.len());
    for (address, distance) in &matches {
        info!(
            "  [{}] {}, {}, {}, {} ({distance:.3} km)",
            address.id, address.street, address.city, address.state, address.country
        );
    }

    Ok(())
}

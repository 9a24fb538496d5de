//! Great-circle distance and the proximity filter.
//!
//! Distances use the haversine formula on a spherical Earth with the IUGG mean
//! radius, in kilometers. There is no spatial index: [`within_distance`] is a
//! linear scan over whatever the caller loaded.

use serde::{Deserialize, Serialize};

use crate::types::Address;

/// Mean Earth radius in kilometers (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Haversine distance to `other` in kilometers.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Great-circle distance between two points in kilometers.
#[must_use]
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (to.longitude - from.longitude).to_radians();

    let h = (lat1.cos() * lat2.cos())
        .mul_add((d_lon * 0.5).sin().powi(2), (d_lat * 0.5).sin().powi(2))
        // Rounding near antipodal points can push h just past 1.
        .min(1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Keep the addresses whose distance from `origin` is at most `max_km`.
///
/// The boundary is inclusive and input order is preserved. A `NaN` bound
/// matches nothing.
#[must_use]
pub fn within_distance(addresses: Vec<Address>, origin: Coordinates, max_km: f64) -> Vec<Address> {
    addresses
        .into_iter()
        .filter(|address| haversine_km(origin, address.coordinates()) <= max_km)
        .collect()
}

//! The address record.

use serde::{Deserialize, Serialize};

use super::id::AddressId;
use crate::geo::Coordinates;

/// A postal address with its geocoordinates.
///
/// The identifier is chosen by the caller, not generated by the store. All
/// other fields are required and are always written together; there is no
/// partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Caller-supplied unique identifier.
    pub id: AddressId,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    /// Degrees north, nominally -90..=90. Not range-checked.
    pub latitude: f64,
    /// Degrees east, nominally -180..=180. Not range-checked.
    pub longitude: f64,
}

impl Address {
    /// The point this address sits at.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

//! Geo Addresses Core - Shared domain types.
//!
//! This crate provides the types used across all Geo Addresses components:
//! - `api` - HTTP service for storing and querying addresses
//! - `cli` - Command-line tools for initializing and seeding the database
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - The `Address` record and its type-safe `AddressId`
//! - [`geo`] - Haversine distance and the proximity filter

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod geo;
pub mod types;

pub use geo::{Coordinates, EARTH_RADIUS_KM, haversine_km, within_distance};
pub use types::*;

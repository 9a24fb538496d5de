//! Core types for Geo Addresses.

pub mod address;
pub mod id;

pub use address::Address;
pub use id::*;

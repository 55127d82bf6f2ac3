//! Spatial systems for the settlement map

pub mod hex;

pub use hex::{HexCoord, HexLayout};

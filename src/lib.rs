//! Hexstead - Hex-grid settlement building rules
//!
//! Building catalog, placement and upgrade validation, cost deduction,
//! population caps and construction-aware building meshes.

pub mod city;
pub mod core;
pub mod renderer;
pub mod spatial;

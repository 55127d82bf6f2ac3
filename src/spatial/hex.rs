//! Hex grid coordinate system for the settlement map.
//!
//! Uses axial coordinates (q, r) with pointy-top hexagons laid out on the
//! world XZ plane (y is up).

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axial offsets of the six neighbors.
const NEIGHBOR_OFFSETS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// Axial hex coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Convert axial to cube coordinates for algorithms.
    pub fn to_cube(&self) -> (i32, i32, i32) {
        let x = self.q;
        let z = self.r;
        let y = -x - z;
        (x, y, z)
    }

    /// The six adjacent hexes, starting east and turning counter-clockwise.
    pub fn neighbors(&self) -> [HexCoord; 6] {
        NEIGHBOR_OFFSETS.map(|(dq, dr)| HexCoord::new(self.q + dq, self.r + dr))
    }

    /// Distance to another hex (in hex steps).
    pub fn distance(&self, other: &HexCoord) -> i32 {
        let (x1, y1, z1) = self.to_cube();
        let (x2, y2, z2) = other.to_cube();
        ((x1 - x2).abs() + (y1 - y2).abs() + (z1 - z2).abs()) / 2
    }

    /// All hexes within `radius` steps of this one, center included.
    pub fn hexes_in_range(&self, radius: u32) -> Vec<HexCoord> {
        let radius = radius as i32;
        let mut results = Vec::new();
        for dq in -radius..=radius {
            for dr in (-radius).max(-dq - radius)..=radius.min(-dq + radius) {
                results.push(HexCoord::new(self.q + dq, self.r + dr));
            }
        }
        results
    }
}

/// Maps axial coordinates to world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    /// Distance from center to corner
    pub size: f32,
}

impl HexLayout {
    pub const fn new(size: f32) -> Self {
        Self { size }
    }

    /// World position of the hex center on the ground plane (y = 0).
    pub fn to_world(&self, coord: HexCoord) -> Vec3 {
        let sqrt3 = 3.0_f32.sqrt();
        let x = self.size * (sqrt3 * coord.q as f32 + sqrt3 / 2.0 * coord.r as f32);
        let z = self.size * (3.0 / 2.0 * coord.r as f32);
        Vec3::new(x, 0.0, z)
    }
}

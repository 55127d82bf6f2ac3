//! Placement validation and placement cost deduction

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::city::building::{BuildingId, BuildingType};
use crate::city::stockpile::ResourcePool;
use crate::core::types::{ResourceType, Terrain};

/// What the external grid knows about a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HexData {
    pub terrain: Terrain,
    /// Building already occupying the cell
    pub building: Option<BuildingId>,
}

impl HexData {
    pub fn empty(terrain: Terrain) -> Self {
        Self {
            terrain,
            building: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.building.is_some()
    }
}

/// Why a building cannot be placed on a hex
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementRejection {
    #[error("Unknown building type")]
    UnknownBuildingType(String),

    #[error("Requires {} terrain", terrain_list(.required))]
    WrongTerrain { required: &'static [Terrain] },

    #[error("Cannot build on water")]
    Water,

    #[error("Hex already has a building")]
    Occupied,

    #[error("Not enough {0}")]
    InsufficientResource(ResourceType),
}

fn terrain_list(terrain: &[Terrain]) -> String {
    terrain
        .iter()
        .map(Terrain::as_str)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Check whether `building_type` can be placed on `hex` with `resources`
///
/// Checks run in a fixed order (terrain, water, occupancy, cost) and the
/// first failure is returned.
pub fn can_place(
    building_type: BuildingType,
    hex: &HexData,
    resources: &ResourcePool,
) -> Result<(), PlacementRejection> {
    let verdict = check_placement(building_type, hex, resources);
    if let Err(rejection) = &verdict {
        tracing::debug!(
            "Placement of {} on {} rejected: {}",
            building_type,
            hex.terrain,
            rejection
        );
    }
    verdict
}

/// `can_place` for callers holding a string key such as `"lumber_mill"`
pub fn can_place_named(
    key: &str,
    hex: &HexData,
    resources: &ResourcePool,
) -> Result<BuildingType, PlacementRejection> {
    let building_type: BuildingType = key
        .parse()
        .map_err(|_| PlacementRejection::UnknownBuildingType(key.to_string()))?;
    can_place(building_type, hex, resources)?;
    Ok(building_type)
}

fn check_placement(
    building_type: BuildingType,
    hex: &HexData,
    resources: &ResourcePool,
) -> Result<(), PlacementRejection> {
    let def = building_type.definition();

    if !def.allows_terrain(hex.terrain) {
        return Err(PlacementRejection::WrongTerrain {
            required: def.required_terrain,
        });
    }

    // No catalog entry lists water today
    if hex.terrain.is_water() {
        return Err(PlacementRejection::Water);
    }

    if hex.is_occupied() {
        return Err(PlacementRejection::Occupied);
    }

    if let Some(short) = resources.first_shortfall(&def.cost) {
        return Err(PlacementRejection::InsufficientResource(short));
    }

    Ok(())
}

/// New pool with the placement cost of `building_type` subtracted
///
/// Does not re-check affordability; validate with `can_place` first.
pub fn deduct_placement_cost(building_type: BuildingType, resources: &ResourcePool) -> ResourcePool {
    let next = resources.minus(&building_type.definition().cost);
    tracing::trace!("Deducted placement cost of {}", building_type);
    next
}

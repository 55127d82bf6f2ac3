//! Building catalog and building instances

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::city::upgrade::Level;
use crate::core::error::HexsteadError;
use crate::core::types::{ResourceAmounts, ResourceType, Terrain, Turn};
use crate::spatial::hex::HexCoord;

/// Primitive a building is rendered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Box,
    Cylinder,
    Cone,
}

/// Static definition of a building kind
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingDefinition {
    /// Display name
    pub name: &'static str,
    /// Resources spent on placement
    pub cost: ResourceAmounts,
    /// Turns from placement to completion
    pub turns_to_build: Turn,
    /// Yield per turn at level 1
    pub resources_per_turn: ResourceAmounts,
    /// Terrain the building may be placed on
    pub required_terrain: &'static [Terrain],
    pub shape: Shape,
    /// Base color as 0xRRGGBB
    pub color: u32,
    /// Base render size (width, height, depth) at level 1
    pub scale: Vec3,
    /// Maximum assignable workers
    pub worker_slots: u32,
    /// Added to the settlement population cap per level once complete
    pub population_cap: u32,
}

impl BuildingDefinition {
    pub fn allows_terrain(&self, terrain: Terrain) -> bool {
        self.required_terrain.contains(&terrain)
    }
}

const TOWN_CENTER: BuildingDefinition = BuildingDefinition {
    name: "Town Center",
    cost: ResourceAmounts::ZERO,
    turns_to_build: 0,
    resources_per_turn: ResourceAmounts::new(2, 1, 1, 2, 0),
    required_terrain: &[Terrain::Plains, Terrain::Desert],
    shape: Shape::Box,
    color: 0xfbbf24,
    scale: Vec3::new(0.5, 0.6, 0.5),
    worker_slots: 2,
    population_cap: 5,
};

const FARM: BuildingDefinition = BuildingDefinition {
    name: "Farm",
    cost: ResourceAmounts::new(0, 20, 0, 5, 0),
    turns_to_build: 2,
    resources_per_turn: ResourceAmounts::new(5, 0, 0, 0, 0),
    required_terrain: &[Terrain::Plains],
    shape: Shape::Box,
    color: 0x4ade80,
    scale: Vec3::new(0.6, 0.2, 0.6),
    worker_slots: 2,
    population_cap: 3,
};

const LUMBER_MILL: BuildingDefinition = BuildingDefinition {
    name: "Lumber Mill",
    cost: ResourceAmounts::new(10, 5, 10, 5, 0),
    turns_to_build: 3,
    resources_per_turn: ResourceAmounts::new(0, 5, 0, 0, 0),
    required_terrain: &[Terrain::Forest],
    shape: Shape::Cylinder,
    color: 0xa3e635,
    scale: Vec3::new(0.25, 0.5, 0.25),
    worker_slots: 2,
    population_cap: 0,
};

const QUARRY: BuildingDefinition = BuildingDefinition {
    name: "Quarry",
    cost: ResourceAmounts::new(10, 15, 0, 10, 0),
    turns_to_build: 3,
    resources_per_turn: ResourceAmounts::new(0, 0, 5, 0, 0),
    required_terrain: &[Terrain::Mountain],
    shape: Shape::Cone,
    color: 0x94a3b8,
    scale: Vec3::new(0.3, 0.5, 0.3),
    worker_slots: 2,
    population_cap: 0,
};

const MINE: BuildingDefinition = BuildingDefinition {
    name: "Mine",
    cost: ResourceAmounts::new(10, 20, 15, 0, 0),
    turns_to_build: 4,
    resources_per_turn: ResourceAmounts::new(0, 0, 0, 5, 0),
    required_terrain: &[Terrain::Mountain, Terrain::Desert],
    shape: Shape::Box,
    color: 0xfbbf24,
    scale: Vec3::new(0.3, 0.35, 0.3),
    worker_slots: 2,
    population_cap: 0,
};

const BARRACKS: BuildingDefinition = BuildingDefinition {
    name: "Barracks",
    cost: ResourceAmounts::new(20, 30, 20, 15, 0),
    turns_to_build: 4,
    resources_per_turn: ResourceAmounts::ZERO,
    required_terrain: &[Terrain::Plains, Terrain::Desert],
    shape: Shape::Box,
    color: 0xef4444,
    scale: Vec3::new(0.45, 0.4, 0.45),
    worker_slots: 1,
    population_cap: 0,
};

const MAGE_TOWER: BuildingDefinition = BuildingDefinition {
    name: "Mage Tower",
    cost: ResourceAmounts::new(10, 15, 25, 20, 10),
    turns_to_build: 5,
    resources_per_turn: ResourceAmounts::new(0, 0, 0, 0, 3),
    required_terrain: &[Terrain::Plains, Terrain::Forest],
    shape: Shape::Cylinder,
    color: 0xa78bfa,
    scale: Vec3::new(0.2, 0.8, 0.2),
    worker_slots: 1,
    population_cap: 0,
};

const WALLS: BuildingDefinition = BuildingDefinition {
    name: "Walls",
    cost: ResourceAmounts::new(0, 10, 30, 5, 0),
    turns_to_build: 3,
    resources_per_turn: ResourceAmounts::ZERO,
    required_terrain: &[Terrain::Plains, Terrain::Desert, Terrain::Mountain],
    shape: Shape::Box,
    color: 0x78716c,
    scale: Vec3::new(0.7, 0.3, 0.1),
    worker_slots: 0,
    population_cap: 0,
};

/// Type of building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    TownCenter,
    Farm,
    LumberMill,
    Quarry,
    Mine,
    Barracks,
    MageTower,
    Walls,
}

impl BuildingType {
    pub const ALL: [BuildingType; 8] = [
        BuildingType::TownCenter,
        BuildingType::Farm,
        BuildingType::LumberMill,
        BuildingType::Quarry,
        BuildingType::Mine,
        BuildingType::Barracks,
        BuildingType::MageTower,
        BuildingType::Walls,
    ];

    /// Catalog entry for this building type
    pub fn definition(&self) -> &'static BuildingDefinition {
        match self {
            BuildingType::TownCenter => &TOWN_CENTER,
            BuildingType::Farm => &FARM,
            BuildingType::LumberMill => &LUMBER_MILL,
            BuildingType::Quarry => &QUARRY,
            BuildingType::Mine => &MINE,
            BuildingType::Barracks => &BARRACKS,
            BuildingType::MageTower => &MAGE_TOWER,
            BuildingType::Walls => &WALLS,
        }
    }

    /// Stable string key, as used in saves and UI bindings
    pub fn key(&self) -> &'static str {
        match self {
            BuildingType::TownCenter => "town_center",
            BuildingType::Farm => "farm",
            BuildingType::LumberMill => "lumber_mill",
            BuildingType::Quarry => "quarry",
            BuildingType::Mine => "mine",
            BuildingType::Barracks => "barracks",
            BuildingType::MageTower => "mage_tower",
            BuildingType::Walls => "walls",
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.definition().name)
    }
}

impl FromStr for BuildingType {
    type Err = HexsteadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildingType::ALL
            .into_iter()
            .find(|bt| bt.key() == s)
            .ok_or_else(|| HexsteadError::UnknownBuildingType(s.to_string()))
    }
}

/// Unique building identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildingId(pub Uuid);

impl BuildingId {
    /// Random v4 id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BuildingId {
    fn default() -> Self {
        Self::new()
    }
}

/// A placed building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingInstance {
    pub id: BuildingId,
    pub building_type: BuildingType,
    pub coord: HexCoord,
    /// Turns until complete (0 = complete)
    pub turns_remaining: Turn,
    pub level: Level,
    /// Assigned worker count, at most `worker_slots`
    pub workers: u32,
}

impl BuildingInstance {
    /// New construction site with the full build duration remaining
    pub fn new(building_type: BuildingType, coord: HexCoord) -> Self {
        Self {
            id: BuildingId::new(),
            building_type,
            coord,
            turns_remaining: building_type.definition().turns_to_build,
            level: Level::One,
            workers: 0,
        }
    }

    pub fn definition(&self) -> &'static BuildingDefinition {
        self.building_type.definition()
    }

    pub fn is_complete(&self) -> bool {
        self.turns_remaining == 0
    }

    /// Resources produced this turn: base yield times level multiplier, rounded down
    ///
    /// Buildings under construction produce nothing.
    pub fn yield_per_turn(&self) -> Vec<(ResourceType, i64)> {
        if !self.is_complete() {
            return Vec::new();
        }
        let percent = self.level.multiplier_percent();
        self.definition()
            .resources_per_turn
            .iter()
            .filter(|(_, amount)| *amount > 0)
            .map(|(res, amount)| (res, (amount * percent / 100) as i64))
            .collect()
    }

    /// Population cap contribution (zero until complete)
    pub fn population_cap(&self) -> u32 {
        if self.is_complete() {
            self.definition().population_cap * self.level.number() as u32
        } else {
            0
        }
    }
}

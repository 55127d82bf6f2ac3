//! Core type definitions used throughout the codebase

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::HexsteadError;

/// Game turn counter
pub type Turn = u32;

/// Resource kinds tracked by a settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Food,
    Wood,
    Stone,
    Gold,
    Mana,
}

impl ResourceType {
    /// All resources in table order
    pub const ALL: [ResourceType; 5] = [
        ResourceType::Food,
        ResourceType::Wood,
        ResourceType::Stone,
        ResourceType::Gold,
        ResourceType::Mana,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Food => "food",
            ResourceType::Wood => "wood",
            ResourceType::Stone => "stone",
            ResourceType::Gold => "gold",
            ResourceType::Mana => "mana",
        }
    }

    /// Position of this resource in a `ResourceAmounts` table
    pub(crate) fn index(&self) -> usize {
        match self {
            ResourceType::Food => 0,
            ResourceType::Wood => 1,
            ResourceType::Stone => 2,
            ResourceType::Gold => 3,
            ResourceType::Mana => 4,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = HexsteadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| HexsteadError::UnknownResource(s.to_string()))
    }
}

/// Terrain classification of a hex cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    #[default]
    Plains,
    Forest,
    Mountain,
    Desert,
    Water,
}

impl Terrain {
    pub const ALL: [Terrain; 5] = [
        Terrain::Plains,
        Terrain::Forest,
        Terrain::Mountain,
        Terrain::Desert,
        Terrain::Water,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Terrain::Plains => "plains",
            Terrain::Forest => "forest",
            Terrain::Mountain => "mountain",
            Terrain::Desert => "desert",
            Terrain::Water => "water",
        }
    }

    pub fn is_water(&self) -> bool {
        matches!(self, Terrain::Water)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Terrain {
    type Err = HexsteadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Terrain::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| HexsteadError::UnknownTerrain(s.to_string()))
    }
}

/// Fixed per-resource amounts (costs, yields), stored in `ResourceType::ALL` order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceAmounts([u32; 5]);

impl ResourceAmounts {
    pub const ZERO: ResourceAmounts = ResourceAmounts([0; 5]);

    pub const fn new(food: u32, wood: u32, stone: u32, gold: u32, mana: u32) -> Self {
        Self([food, wood, stone, gold, mana])
    }

    pub fn get(&self, resource: ResourceType) -> u32 {
        self.0[resource.index()]
    }

    /// Iterate every resource (zero entries included) in table order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, u32)> + '_ {
        ResourceType::ALL.into_iter().map(move |r| (r, self.get(r)))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&a| a == 0)
    }
}

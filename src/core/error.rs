use thiserror::Error;

use crate::city::building::{BuildingId, BuildingType};
use crate::city::placement::PlacementRejection;
use crate::city::upgrade::{Level, UpgradeRejection};

#[derive(Error, Debug)]
pub enum HexsteadError {
    #[error("Unknown building type: {0}")]
    UnknownBuildingType(String),

    #[error("Unknown terrain: {0}")]
    UnknownTerrain(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Invalid building level: {0} (expected 1-3)")]
    InvalidLevel(u8),

    #[error("No upgrade cost for level {0}")]
    NoUpgradeCost(Level),

    #[error("Building not found: {0:?}")]
    BuildingNotFound(BuildingId),

    #[error("{building_type} has no free worker slots ({slots} total)")]
    NoWorkerSlots {
        building_type: BuildingType,
        slots: u32,
    },

    #[error("Placement rejected: {0}")]
    Placement(#[from] PlacementRejection),

    #[error("Upgrade rejected: {0}")]
    Upgrade(#[from] UpgradeRejection),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Render config already in use")]
    ConfigAlreadySet,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HexsteadError>;

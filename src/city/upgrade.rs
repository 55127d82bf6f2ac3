//! Building levels, upgrade costs and the upgrade validator

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::city::building::BuildingInstance;
use crate::city::stockpile::ResourcePool;
use crate::core::error::{HexsteadError, Result};
use crate::core::types::{ResourceAmounts, ResourceType};

/// Cost to reach level 2
const UPGRADE_COST_LEVEL_2: ResourceAmounts = ResourceAmounts::new(15, 25, 20, 15, 0);
/// Cost to reach level 3
const UPGRADE_COST_LEVEL_3: ResourceAmounts = ResourceAmounts::new(30, 50, 40, 30, 5);

/// Upgrade tier of a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum Level {
    #[default]
    One,
    Two,
    Three,
}

impl Level {
    pub const MAX: Level = Level::Three;

    pub fn number(&self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
            Level::Three => 3,
        }
    }

    /// Scale applied to render height and yield
    pub fn multiplier(&self) -> f32 {
        match self {
            Level::One => 1.0,
            Level::Two => 1.3,
            Level::Three => 1.6,
        }
    }

    /// `multiplier` in percent, for integer yield arithmetic
    pub fn multiplier_percent(&self) -> u32 {
        match self {
            Level::One => 100,
            Level::Two => 130,
            Level::Three => 160,
        }
    }

    pub fn next(&self) -> Option<Level> {
        match self {
            Level::One => Some(Level::Two),
            Level::Two => Some(Level::Three),
            Level::Three => None,
        }
    }

    /// Resources needed to upgrade *into* this level; level 1 has none
    pub fn upgrade_cost(&self) -> Option<&'static ResourceAmounts> {
        match self {
            Level::One => None,
            Level::Two => Some(&UPGRADE_COST_LEVEL_2),
            Level::Three => Some(&UPGRADE_COST_LEVEL_3),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl TryFrom<u8> for Level {
    type Error = HexsteadError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Level::One),
            2 => Ok(Level::Two),
            3 => Ok(Level::Three),
            other => Err(HexsteadError::InvalidLevel(other)),
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.number()
    }
}

/// Why a building cannot be upgraded
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeRejection {
    #[error("Still under construction")]
    UnderConstruction,

    #[error("Already max level")]
    MaxLevel,

    #[error("Not enough {0}")]
    InsufficientResource(ResourceType),
}

/// Check whether `building` can be upgraded to its next level
///
/// Returns the cost of the next level on success.
pub fn can_upgrade(
    building: &BuildingInstance,
    resources: &ResourcePool,
) -> std::result::Result<&'static ResourceAmounts, UpgradeRejection> {
    let verdict = check_upgrade(building, resources);
    if let Err(rejection) = &verdict {
        tracing::debug!(
            "Upgrade of {} at ({}, {}) rejected: {}",
            building.building_type,
            building.coord.q,
            building.coord.r,
            rejection
        );
    }
    verdict
}

fn check_upgrade(
    building: &BuildingInstance,
    resources: &ResourcePool,
) -> std::result::Result<&'static ResourceAmounts, UpgradeRejection> {
    if !building.is_complete() {
        return Err(UpgradeRejection::UnderConstruction);
    }

    let cost = building
        .level
        .next()
        .and_then(|next| next.upgrade_cost())
        .ok_or(UpgradeRejection::MaxLevel)?;

    if let Some(short) = resources.first_shortfall(cost) {
        return Err(UpgradeRejection::InsufficientResource(short));
    }

    Ok(cost)
}

/// New pool with the cost of upgrading into `level` subtracted
///
/// Does not re-check affordability; validate with `can_upgrade` first.
pub fn deduct_upgrade_cost(level: Level, resources: &ResourcePool) -> Result<ResourcePool> {
    let cost = level
        .upgrade_cost()
        .ok_or(HexsteadError::NoUpgradeCost(level))?;
    Ok(resources.minus(cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::building::BuildingType;
    use crate::spatial::hex::HexCoord;

    fn rich_pool() -> ResourcePool {
        ResourceType::ALL
            .into_iter()
            .fold(ResourcePool::new(), |pool, r| pool.with(r, 1000))
    }

    fn completed(building_type: BuildingType, level: Level) -> BuildingInstance {
        let mut b = BuildingInstance::new(building_type, HexCoord::new(0, 0));
        b.turns_remaining = 0;
        b.level = level;
        b
    }

    #[test]
    fn test_level_multipliers() {
        assert_eq!(Level::One.multiplier(), 1.0);
        assert!((Level::Two.multiplier() - 1.3).abs() < 0.001);
        assert!((Level::Three.multiplier() - 1.6).abs() < 0.001);
    }

    #[test]
    fn test_level_try_from() {
        assert_eq!(Level::try_from(2u8).unwrap(), Level::Two);
        assert!(matches!(Level::try_from(0u8), Err(HexsteadError::InvalidLevel(0))));
        assert!(matches!(Level::try_from(4u8), Err(HexsteadError::InvalidLevel(4))));
    }

    #[test]
    fn test_level_serde_as_number() {
        assert_eq!(serde_json::to_string(&Level::Three).unwrap(), "3");
        let parsed: Level = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, Level::Two);
        assert!(serde_json::from_str::<Level>("7").is_err());
    }

    #[test]
    fn test_upgrade_costs() {
        assert!(Level::One.upgrade_cost().is_none());
        assert_eq!(
            Level::Two.upgrade_cost(),
            Some(&ResourceAmounts::new(15, 25, 20, 15, 0))
        );
        assert_eq!(
            Level::Three.upgrade_cost(),
            Some(&ResourceAmounts::new(30, 50, 40, 30, 5))
        );
    }

    #[test]
    fn test_cannot_upgrade_under_construction() {
        let b = BuildingInstance::new(BuildingType::Farm, HexCoord::new(0, 0));
        assert_eq!(
            can_upgrade(&b, &rich_pool()),
            Err(UpgradeRejection::UnderConstruction)
        );
    }

    #[test]
    fn test_cannot_upgrade_max_level() {
        let b = completed(BuildingType::Farm, Level::Three);
        let result = can_upgrade(&b, &rich_pool());
        assert_eq!(result, Err(UpgradeRejection::MaxLevel));
        assert_eq!(result.unwrap_err().to_string(), "Already max level");
    }

    #[test]
    fn test_upgrade_returns_next_level_cost() {
        let b = completed(BuildingType::Mine, Level::One);
        assert_eq!(can_upgrade(&b, &rich_pool()), Ok(&UPGRADE_COST_LEVEL_2));

        let b = completed(BuildingType::Mine, Level::Two);
        assert_eq!(can_upgrade(&b, &rich_pool()), Ok(&UPGRADE_COST_LEVEL_3));
    }

    #[test]
    fn test_upgrade_insufficient_resource() {
        let b = completed(BuildingType::Farm, Level::Two);
        // Level 3 needs 5 mana
        let pool = rich_pool().with(ResourceType::Mana, 4);
        let result = can_upgrade(&b, &pool);
        assert_eq!(result, Err(UpgradeRejection::InsufficientResource(ResourceType::Mana)));
        assert_eq!(result.unwrap_err().to_string(), "Not enough mana");
    }

    #[test]
    fn test_deduct_upgrade_cost() {
        let pool = rich_pool();
        let next = deduct_upgrade_cost(Level::Two, &pool).unwrap();
        assert_eq!(next.get(ResourceType::Food), 985);
        assert_eq!(next.get(ResourceType::Wood), 975);
        assert_eq!(next.get(ResourceType::Stone), 980);
        assert_eq!(next.get(ResourceType::Gold), 985);
        assert_eq!(next.get(ResourceType::Mana), 1000);
    }

    #[test]
    fn test_deduct_level_one_has_no_cost() {
        let result = deduct_upgrade_cost(Level::One, &rich_pool());
        assert!(matches!(result, Err(HexsteadError::NoUpgradeCost(Level::One))));
    }
}

//! City layer - building catalog, placement and upgrade rules, population

pub mod building;
pub mod placement;
pub mod population;
pub mod settlement;
pub mod stockpile;
pub mod upgrade;

pub use building::{BuildingDefinition, BuildingId, BuildingInstance, BuildingType, Shape};
pub use placement::{can_place, can_place_named, deduct_placement_cost, HexData, PlacementRejection};
pub use population::{population_cap, recalc_population_cap, Population};
pub use settlement::{Settlement, TurnReport};
pub use stockpile::ResourcePool;
pub use upgrade::{can_upgrade, deduct_upgrade_cost, Level, UpgradeRejection};

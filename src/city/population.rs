//! Population cap aggregation

use serde::{Deserialize, Serialize};

use crate::city::building::BuildingInstance;
use crate::city::settlement::Settlement;

/// Settlement population limits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    /// Upper bound derived from completed buildings
    pub cap: u32,
}

/// Sum of `population_cap * level` over completed buildings
pub fn population_cap<'a>(buildings: impl IntoIterator<Item = &'a BuildingInstance>) -> u32 {
    buildings
        .into_iter()
        .map(BuildingInstance::population_cap)
        .sum()
}

/// Recompute the settlement's population cap from its buildings
pub fn recalc_population_cap(settlement: &mut Settlement) {
    settlement.population.cap = population_cap(&settlement.buildings);
}

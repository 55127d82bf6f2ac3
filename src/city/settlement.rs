//! Settlement - buildings, resources and population of one player
//!
//! Chains the validators and deduction helpers into the operations a turn
//! loop or UI calls. The hex grid stays external: callers pass the `HexData`
//! of the target cell.

use serde::{Deserialize, Serialize};

use crate::city::building::{BuildingId, BuildingInstance, BuildingType};
use crate::city::placement::{can_place, deduct_placement_cost, HexData};
use crate::city::population::{recalc_population_cap, Population};
use crate::city::stockpile::ResourcePool;
use crate::city::upgrade::{can_upgrade, Level};
use crate::core::error::{HexsteadError, Result};
use crate::core::types::Turn;
use crate::spatial::hex::HexCoord;

/// Outcome of `Settlement::advance_turn`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Turn number after advancing
    pub turn: Turn,
    /// Buildings that finished construction this turn
    pub completed: Vec<BuildingId>,
    /// Resources credited this turn
    pub produced: ResourcePool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub buildings: Vec<BuildingInstance>,
    pub resources: ResourcePool,
    pub population: Population,
    pub turn: Turn,
}

impl Settlement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resources(resources: ResourcePool) -> Self {
        Self {
            resources,
            ..Self::default()
        }
    }

    pub fn get(&self, id: BuildingId) -> Option<&BuildingInstance> {
        self.buildings.iter().find(|b| b.id == id)
    }

    fn get_mut(&mut self, id: BuildingId) -> Result<&mut BuildingInstance> {
        self.buildings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(HexsteadError::BuildingNotFound(id))
    }

    pub fn building_at(&self, coord: HexCoord) -> Option<&BuildingInstance> {
        self.buildings.iter().find(|b| b.coord == coord)
    }

    /// Validate, pay for and start constructing a building
    ///
    /// A hex holding one of this settlement's buildings counts as occupied
    /// even when the caller's `HexData` does not record it.
    pub fn place_building(
        &mut self,
        building_type: BuildingType,
        coord: HexCoord,
        hex: &HexData,
    ) -> Result<BuildingId> {
        let mut hex = *hex;
        if hex.building.is_none() {
            hex.building = self.building_at(coord).map(|b| b.id);
        }
        can_place(building_type, &hex, &self.resources)?;

        self.resources = deduct_placement_cost(building_type, &self.resources);
        let building = BuildingInstance::new(building_type, coord);
        let id = building.id;
        tracing::debug!(
            "Placed {} at ({}, {}), {} turns to build",
            building_type,
            coord.q,
            coord.r,
            building.turns_remaining
        );
        self.buildings.push(building);

        recalc_population_cap(self);
        Ok(id)
    }

    /// Validate, pay for and apply an upgrade; returns the new level
    pub fn upgrade_building(&mut self, id: BuildingId) -> Result<Level> {
        let building = self.get(id).ok_or(HexsteadError::BuildingNotFound(id))?;
        let cost = can_upgrade(building, &self.resources)?;

        self.resources = self.resources.minus(cost);
        let building = self.get_mut(id)?;
        // can_upgrade only succeeds below max level
        let next = building.level.next().unwrap_or(Level::MAX);
        building.level = next;
        tracing::debug!("Upgraded {} to level {}", building.building_type, next);

        recalc_population_cap(self);
        Ok(next)
    }

    /// Assign one worker; returns the new worker count
    pub fn assign_worker(&mut self, id: BuildingId) -> Result<u32> {
        let building = self.get_mut(id)?;
        let slots = building.definition().worker_slots;
        if building.workers >= slots {
            return Err(HexsteadError::NoWorkerSlots {
                building_type: building.building_type,
                slots,
            });
        }
        building.workers += 1;
        Ok(building.workers)
    }

    /// Remove one worker if any is assigned; returns the new worker count
    pub fn unassign_worker(&mut self, id: BuildingId) -> Result<u32> {
        let building = self.get_mut(id)?;
        building.workers = building.workers.saturating_sub(1);
        Ok(building.workers)
    }

    /// Resources completed buildings will produce next turn
    pub fn projected_yield(&self) -> ResourcePool {
        let mut produced = ResourcePool::new();
        for (res, amount) in self.buildings.iter().flat_map(|b| b.yield_per_turn()) {
            produced.add(res, amount);
        }
        produced
    }

    /// Advance one turn
    ///
    /// Order: buildings complete at the start of the turn yield, then
    /// construction counts down, then the population cap is recomputed.
    /// A building finishing this turn starts yielding next turn.
    pub fn advance_turn(&mut self) -> TurnReport {
        let produced = self.projected_yield();
        for (res, amount) in produced.iter() {
            self.resources.add(res, amount);
        }

        let mut completed = Vec::new();
        for building in self.buildings.iter_mut().filter(|b| !b.is_complete()) {
            building.turns_remaining -= 1;
            if building.is_complete() {
                tracing::info!(
                    "{} at ({}, {}) completed",
                    building.building_type,
                    building.coord.q,
                    building.coord.r
                );
                completed.push(building.id);
            }
        }

        recalc_population_cap(self);
        self.turn += 1;

        TurnReport {
            turn: self.turn,
            completed,
            produced,
        }
    }
}

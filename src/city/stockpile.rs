//! Stockpile - settlement-level resource pool

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{ResourceAmounts, ResourceType};

/// Resource quantities held by a settlement
///
/// Quantities are signed: deduction never clamps, so a caller that skips
/// validation can drive a resource below zero. Missing resources read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    resources: AHashMap<ResourceType, i64>,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, resource: ResourceType, amount: i64) -> Self {
        self.set(resource, amount);
        self
    }

    /// Get current amount of a resource
    pub fn get(&self, resource: ResourceType) -> i64 {
        self.resources.get(&resource).copied().unwrap_or(0)
    }

    pub fn set(&mut self, resource: ResourceType, amount: i64) {
        self.resources.insert(resource, amount);
    }

    /// Add (or with a negative amount, remove) a resource
    pub fn add(&mut self, resource: ResourceType, amount: i64) {
        *self.resources.entry(resource).or_insert(0) += amount;
    }

    /// Whether the resource has an explicit entry
    pub fn contains(&self, resource: ResourceType) -> bool {
        self.resources.contains_key(&resource)
    }

    /// Stored entries in table order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, i64)> + '_ {
        ResourceType::ALL
            .into_iter()
            .filter_map(move |r| self.resources.get(&r).map(|&amount| (r, amount)))
    }

    /// First resource (in table order) the pool holds less of than `cost` asks
    ///
    /// Every entry is checked, zeros included, so a negative balance fails
    /// even when the cost does not price that resource.
    pub fn first_shortfall(&self, cost: &ResourceAmounts) -> Option<ResourceType> {
        cost.iter()
            .find(|(res, amount)| self.get(*res) < *amount as i64)
            .map(|(res, _)| res)
    }

    /// Check if the pool covers every entry of `cost`
    pub fn can_afford(&self, cost: &ResourceAmounts) -> bool {
        self.first_shortfall(cost).is_none()
    }

    /// New pool with `cost` subtracted; zero entries leave their key untouched
    pub fn minus(&self, cost: &ResourceAmounts) -> ResourcePool {
        let mut next = self.clone();
        for (res, amount) in cost.iter().filter(|(_, amount)| *amount > 0) {
            next.add(res, -(amount as i64));
        }
        next
    }
}

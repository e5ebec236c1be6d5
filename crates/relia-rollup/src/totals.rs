//! The six quantities folded from children into their parent

use relia_domain::ComponentAttributes;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Running totals of one subtree
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RollupTotals {
    /// Active hazard rate (failures/hour)
    pub hazard_rate_active: f64,
    /// Dormant hazard rate (failures/hour)
    pub hazard_rate_dormant: f64,
    /// Software hazard rate (failures/hour)
    pub hazard_rate_software: f64,
    /// Total cost
    pub total_cost: f64,
    /// Total part count
    pub total_part_count: u64,
    /// Total power dissipation (W)
    pub total_power_dissipation: f64,
}

impl RollupTotals {
    /// What an item contributes to its parent
    pub fn from_attributes(attributes: &ComponentAttributes) -> Self {
        Self {
            hazard_rate_active: attributes.hazard_rate_active,
            hazard_rate_dormant: attributes.hazard_rate_dormant,
            hazard_rate_software: attributes.hazard_rate_software,
            total_cost: attributes.total_cost,
            total_part_count: u64::from(attributes.total_part_count),
            total_power_dissipation: attributes.total_power_dissipation,
        }
    }
}

impl Add for RollupTotals {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for RollupTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.hazard_rate_active += rhs.hazard_rate_active;
        self.hazard_rate_dormant += rhs.hazard_rate_dormant;
        self.hazard_rate_software += rhs.hazard_rate_software;
        self.total_cost += rhs.total_cost;
        self.total_part_count += rhs.total_part_count;
        self.total_power_dissipation += rhs.total_power_dissipation;
    }
}

impl Sum for RollupTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

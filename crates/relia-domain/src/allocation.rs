//! Reliability allocation records

use serde::{Deserialize, Serialize};

/// Goal apportionment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllocationMethod {
    /// Advisory Group on Reliability of Electronic Equipment
    Agree = 1,
    /// ARINC proportional apportionment
    Arinc = 2,
    /// Equal apportionment
    Equal = 3,
    /// Feasibility of objectives
    Foo = 4,
}

impl AllocationMethod {
    /// Look up a method by ID
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(AllocationMethod::Agree),
            2 => Some(AllocationMethod::Arinc),
            3 => Some(AllocationMethod::Equal),
            4 => Some(AllocationMethod::Foo),
            _ => None,
        }
    }

    /// Method ID
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Whether the method apportions a reliability goal (vs. a hazard rate goal)
    pub fn uses_reliability_goal(&self) -> bool {
        matches!(self, AllocationMethod::Agree | AllocationMethod::Equal)
    }
}

impl std::fmt::Display for AllocationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AllocationMethod::Agree => "AGREE",
            AllocationMethod::Arinc => "ARINC",
            AllocationMethod::Equal => "Equal",
            AllocationMethod::Foo => "FOO",
        };
        write!(f, "{}", name)
    }
}

/// Which goal the user entered; the other two are derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalMeasure {
    /// Mission reliability
    Reliability = 1,
    /// Hazard rate (failures/hour)
    HazardRate = 2,
    /// Mean time between failures (hours)
    Mtbf = 3,
}

impl GoalMeasure {
    /// Look up a goal measure by ID
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(GoalMeasure::Reliability),
            2 => Some(GoalMeasure::HazardRate),
            3 => Some(GoalMeasure::Mtbf),
            _ => None,
        }
    }
}

/// Per-node allocation parameters and results
///
/// A parent's record carries the goal and method; each child's record
/// carries its weighting inputs and receives the allocated targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationRecord {
    /// Hardware item (node) ID
    pub hardware_id: u32,
    /// Method used to apportion this node's goal to its children
    pub method: Option<AllocationMethod>,
    /// Which goal was entered
    pub goal_measure: Option<GoalMeasure>,
    /// Reliability goal
    pub reliability_goal: f64,
    /// Hazard rate goal (failures/hour)
    pub hazard_rate_goal: f64,
    /// MTBF goal (hours)
    pub mtbf_goal: f64,
    /// Mission time (hours)
    pub mission_time: f64,
    /// Percentage of mission time the item operates
    pub duty_cycle: f64,
    /// Number of subsystems (AGREE)
    pub n_sub_systems: u32,
    /// Number of sub-elements (AGREE weighting)
    pub n_sub_elements: u32,
    /// Importance factor (AGREE), in (0, 1]
    pub importance: f64,
    /// Intricacy factor (FOO)
    pub int_factor: u32,
    /// State-of-the-art factor (FOO)
    pub soa_factor: u32,
    /// Operating time factor (FOO)
    pub op_time_factor: u32,
    /// Environment factor (FOO)
    pub env_factor: u32,
    /// Weight assigned by the last allocation
    pub weight_factor: f64,
    /// Allocated hazard rate (failures/hour)
    pub hazard_rate_alloc: f64,
    /// Allocated MTBF (hours)
    pub mtbf_alloc: f64,
    /// Allocated reliability
    pub reliability_alloc: f64,
}

impl Default for AllocationRecord {
    fn default() -> Self {
        Self {
            hardware_id: 0,
            method: None,
            goal_measure: None,
            reliability_goal: 1.0,
            hazard_rate_goal: 0.0,
            mtbf_goal: 0.0,
            mission_time: 100.0,
            duty_cycle: 100.0,
            n_sub_systems: 1,
            n_sub_elements: 1,
            importance: 1.0,
            int_factor: 1,
            soa_factor: 1,
            op_time_factor: 1,
            env_factor: 1,
            weight_factor: 0.0,
            hazard_rate_alloc: 0.0,
            mtbf_alloc: 0.0,
            reliability_alloc: 1.0,
        }
    }
}

impl AllocationRecord {
    /// Create a record for a node with default weighting inputs
    pub fn new(hardware_id: u32) -> Self {
        Self {
            hardware_id,
            ..Self::default()
        }
    }

    /// FOO weight: product of the four feasibility factors
    ///
    /// `None` when the product does not fit in a `u64`.
    pub fn foo_weight(&self) -> Option<u64> {
        u64::from(self.int_factor)
            .checked_mul(u64::from(self.soa_factor))?
            .checked_mul(u64::from(self.op_time_factor))?
            .checked_mul(u64::from(self.env_factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_ids_match_selector_values() {
        assert_eq!(AllocationMethod::from_id(1), Some(AllocationMethod::Agree));
        assert_eq!(AllocationMethod::from_id(2), Some(AllocationMethod::Arinc));
        assert_eq!(AllocationMethod::from_id(3), Some(AllocationMethod::Equal));
        assert_eq!(AllocationMethod::from_id(4), Some(AllocationMethod::Foo));
        assert_eq!(AllocationMethod::from_id(5), None);
        assert_eq!(AllocationMethod::Foo.id(), 4);
    }

    #[test]
    fn test_goal_kind_per_method() {
        assert!(AllocationMethod::Agree.uses_reliability_goal());
        assert!(AllocationMethod::Equal.uses_reliability_goal());
        assert!(!AllocationMethod::Arinc.uses_reliability_goal());
        assert!(!AllocationMethod::Foo.uses_reliability_goal());
    }

    #[test]
    fn test_foo_weight() {
        let record = AllocationRecord {
            int_factor: 2,
            soa_factor: 3,
            op_time_factor: 4,
            env_factor: 5,
            ..AllocationRecord::new(9)
        };
        assert_eq!(record.foo_weight(), Some(120));

        let huge = AllocationRecord {
            int_factor: u32::MAX,
            soa_factor: u32::MAX,
            op_time_factor: u32::MAX,
            env_factor: u32::MAX,
            ..AllocationRecord::default()
        };
        assert_eq!(huge.foo_weight(), None);
    }
}

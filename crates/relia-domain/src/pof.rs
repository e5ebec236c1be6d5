//! Physics of Failure ownership chain
//!
//! Mechanism → OperatingLoad → OperatingStress → TestMethod. Each level
//! owns its children in a map keyed by the ID the persistence layer
//! assigned; deleting a level drops everything beneath it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Test method that verifies an operating stress
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestMethod {
    /// Collaborator-assigned ID
    pub method_id: u32,
    /// Description
    pub description: String,
    /// Boundary conditions of the test
    pub boundary_conditions: String,
    /// Free-form remarks
    pub remarks: String,
}

/// Stress produced by an operating load
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingStress {
    /// Collaborator-assigned ID
    pub stress_id: u32,
    /// Description
    pub description: String,
    /// Load history (cycle counting, histogram, ...)
    pub load_history: String,
    /// Parameter that can be measured in test
    pub measurable_parameter: String,
    /// Free-form remarks
    pub remarks: String,
    /// Test methods keyed by ID
    pub methods: BTreeMap<u32, TestMethod>,
}

/// Load that drives a failure mechanism
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingLoad {
    /// Collaborator-assigned ID
    pub load_id: u32,
    /// Description
    pub description: String,
    /// Damage model name
    pub damage_model: String,
    /// Priority
    pub priority: u32,
    /// Operating stresses keyed by ID
    pub stresses: BTreeMap<u32, OperatingStress>,
}

/// Failure mechanism of a hardware item
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Mechanism {
    /// Collaborator-assigned ID
    pub mechanism_id: u32,
    /// Description
    pub description: String,
    /// Operating loads keyed by ID
    pub loads: BTreeMap<u32, OperatingLoad>,
}

/// Errors raised while editing the chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PofError {
    /// An entry with this ID already exists at this level
    DuplicateId {
        /// Level name
        level: &'static str,
        /// Offending ID
        id: u32,
    },
    /// No entry with this ID exists at this level
    NotFound {
        /// Level name
        level: &'static str,
        /// Missing ID
        id: u32,
    },
}

impl fmt::Display for PofError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PofError::DuplicateId { level, id } => write!(f, "{} {} already exists", level, id),
            PofError::NotFound { level, id } => write!(f, "{} {} does not exist", level, id),
        }
    }
}

impl std::error::Error for PofError {}

/// One visited entry, with the IDs of its owners
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PofEntry<'a> {
    /// A mechanism
    Mechanism(&'a Mechanism),
    /// A load and its mechanism ID
    Load(u32, &'a OperatingLoad),
    /// A stress and its mechanism and load IDs
    Stress(u32, u32, &'a OperatingStress),
    /// A test method and its mechanism, load and stress IDs
    Method(u32, u32, u32, &'a TestMethod),
}

fn insert_unique<T>(
    map: &mut BTreeMap<u32, T>,
    level: &'static str,
    id: u32,
    value: T,
) -> Result<(), PofError> {
    if map.contains_key(&id) {
        return Err(PofError::DuplicateId { level, id });
    }
    map.insert(id, value);
    Ok(())
}

fn found<T>(value: Option<T>, level: &'static str, id: u32) -> Result<T, PofError> {
    value.ok_or(PofError::NotFound { level, id })
}

/// Physics of Failure analysis of one hardware item
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsOfFailure {
    /// Hardware item
    pub hardware_id: u32,
    /// Mechanisms keyed by ID
    pub mechanisms: BTreeMap<u32, Mechanism>,
}

impl PhysicsOfFailure {
    /// Create an empty analysis for a hardware item
    pub fn new(hardware_id: u32) -> Self {
        Self {
            hardware_id,
            mechanisms: BTreeMap::new(),
        }
    }

    /// Add a mechanism under the ID it was persisted with
    pub fn add_mechanism(&mut self, mechanism: Mechanism) -> Result<(), PofError> {
        let id = mechanism.mechanism_id;
        insert_unique(&mut self.mechanisms, "mechanism", id, mechanism)
    }

    /// Remove a mechanism and everything it owns
    pub fn delete_mechanism(&mut self, mechanism_id: u32) -> Result<Mechanism, PofError> {
        found(self.mechanisms.remove(&mechanism_id), "mechanism", mechanism_id)
    }

    /// Mechanism by ID
    pub fn mechanism(&self, mechanism_id: u32) -> Result<&Mechanism, PofError> {
        found(self.mechanisms.get(&mechanism_id), "mechanism", mechanism_id)
    }

    fn mechanism_mut(&mut self, mechanism_id: u32) -> Result<&mut Mechanism, PofError> {
        found(self.mechanisms.get_mut(&mechanism_id), "mechanism", mechanism_id)
    }

    /// Add a load to a mechanism
    pub fn add_load(&mut self, mechanism_id: u32, load: OperatingLoad) -> Result<(), PofError> {
        let id = load.load_id;
        insert_unique(&mut self.mechanism_mut(mechanism_id)?.loads, "load", id, load)
    }

    /// Remove a load and everything it owns
    pub fn delete_load(&mut self, mechanism_id: u32, load_id: u32) -> Result<OperatingLoad, PofError> {
        found(self.mechanism_mut(mechanism_id)?.loads.remove(&load_id), "load", load_id)
    }

    /// Load by mechanism and load ID
    pub fn load(&self, mechanism_id: u32, load_id: u32) -> Result<&OperatingLoad, PofError> {
        found(self.mechanism(mechanism_id)?.loads.get(&load_id), "load", load_id)
    }

    fn load_mut(&mut self, mechanism_id: u32, load_id: u32) -> Result<&mut OperatingLoad, PofError> {
        found(self.mechanism_mut(mechanism_id)?.loads.get_mut(&load_id), "load", load_id)
    }

    /// Add a stress to a load
    pub fn add_stress(
        &mut self,
        mechanism_id: u32,
        load_id: u32,
        stress: OperatingStress,
    ) -> Result<(), PofError> {
        let id = stress.stress_id;
        let load = self.load_mut(mechanism_id, load_id)?;
        insert_unique(&mut load.stresses, "stress", id, stress)
    }

    /// Remove a stress and its test methods
    pub fn delete_stress(
        &mut self,
        mechanism_id: u32,
        load_id: u32,
        stress_id: u32,
    ) -> Result<OperatingStress, PofError> {
        let load = self.load_mut(mechanism_id, load_id)?;
        found(load.stresses.remove(&stress_id), "stress", stress_id)
    }

    /// Stress by its owning IDs
    pub fn stress(
        &self,
        mechanism_id: u32,
        load_id: u32,
        stress_id: u32,
    ) -> Result<&OperatingStress, PofError> {
        let load = self.load(mechanism_id, load_id)?;
        found(load.stresses.get(&stress_id), "stress", stress_id)
    }

    fn stress_mut(
        &mut self,
        mechanism_id: u32,
        load_id: u32,
        stress_id: u32,
    ) -> Result<&mut OperatingStress, PofError> {
        let load = self.load_mut(mechanism_id, load_id)?;
        found(load.stresses.get_mut(&stress_id), "stress", stress_id)
    }

    /// Add a test method to a stress
    pub fn add_method(
        &mut self,
        mechanism_id: u32,
        load_id: u32,
        stress_id: u32,
        method: TestMethod,
    ) -> Result<(), PofError> {
        let id = method.method_id;
        let stress = self.stress_mut(mechanism_id, load_id, stress_id)?;
        insert_unique(&mut stress.methods, "test method", id, method)
    }

    /// Remove a test method
    pub fn delete_method(
        &mut self,
        mechanism_id: u32,
        load_id: u32,
        stress_id: u32,
        method_id: u32,
    ) -> Result<TestMethod, PofError> {
        let stress = self.stress_mut(mechanism_id, load_id, stress_id)?;
        found(stress.methods.remove(&method_id), "test method", method_id)
    }

    /// Every entry, depth first, owners before the entries they own
    pub fn entries(&self) -> Vec<PofEntry<'_>> {
        let mut entries = Vec::new();
        for (mid, mechanism) in &self.mechanisms {
            entries.push(PofEntry::Mechanism(mechanism));
            for (lid, load) in &mechanism.loads {
                entries.push(PofEntry::Load(*mid, load));
                for (sid, stress) in &load.stresses {
                    entries.push(PofEntry::Stress(*mid, *lid, stress));
                    for method in stress.methods.values() {
                        entries.push(PofEntry::Method(*mid, *lid, *sid, method));
                    }
                }
            }
        }
        entries
    }
}

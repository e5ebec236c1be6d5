//! Component categories

use serde::{Deserialize, Serialize};

/// Component category of a hardware item
///
/// IDs match the category column of the component attribute record.
/// Assemblies carry category 0, which has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Microcircuits
    IntegratedCircuit = 1,
    /// Diodes, transistors, optoelectronics
    Semiconductor = 2,
    /// Fixed and variable resistors
    Resistor = 3,
    /// Fixed and variable capacitors
    Capacitor = 4,
    /// Transformers and coils
    Inductive = 5,
    /// Mechanical and solid-state relays
    Relay = 6,
    /// Switches
    Switch = 7,
    /// Connectors and interconnections
    Connection = 8,
    /// Meters
    Meter = 9,
    /// Crystals, filters, lamps, fuses
    Miscellaneous = 10,
}

impl Category {
    /// Look up a category by its ID
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Category::IntegratedCircuit),
            2 => Some(Category::Semiconductor),
            3 => Some(Category::Resistor),
            4 => Some(Category::Capacitor),
            5 => Some(Category::Inductive),
            6 => Some(Category::Relay),
            7 => Some(Category::Switch),
            8 => Some(Category::Connection),
            9 => Some(Category::Meter),
            10 => Some(Category::Miscellaneous),
            _ => None,
        }
    }

    /// The category ID
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Human-readable category name
    pub fn name(&self) -> &'static str {
        match self {
            Category::IntegratedCircuit => "Integrated Circuit",
            Category::Semiconductor => "Semiconductor",
            Category::Resistor => "Resistor",
            Category::Capacitor => "Capacitor",
            Category::Inductive => "Inductive Device",
            Category::Relay => "Relay",
            Category::Switch => "Switch",
            Category::Connection => "Connection",
            Category::Meter => "Meter",
            Category::Miscellaneous => "Miscellaneous",
        }
    }

    /// Whether stress analysis computes a current ratio for this category
    pub fn uses_current_ratio(&self) -> bool {
        matches!(
            self,
            Category::IntegratedCircuit
                | Category::Semiconductor
                | Category::Inductive
                | Category::Relay
                | Category::Switch
                | Category::Connection
        )
    }

    /// Whether stress analysis computes a power ratio for this category
    pub fn uses_power_ratio(&self) -> bool {
        matches!(self, Category::Resistor)
    }

    /// Whether stress analysis computes a voltage ratio for this category
    pub fn uses_voltage_ratio(&self) -> bool {
        matches!(
            self,
            Category::Capacitor | Category::Inductive | Category::Connection
        )
    }
}

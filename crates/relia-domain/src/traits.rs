//! Trait definitions for external interactions
//!
//! The calculation crates never touch storage or user interfaces directly;
//! they reach them through these traits.

use crate::attributes::ComponentAttributes;
use crate::failure::CalculationFailure;
use crate::hierarchy::{HardwareTree, NodeId, TreeError};

/// Source and sink of component attribute records
///
/// Implemented by whatever persists hardware items. [`HardwareTree`]
/// implements it for in-memory use.
pub trait HardwareStore {
    /// Error type for store operations
    type Error;

    /// Fetch the full attribute record of a node, `None` if it has none yet
    fn fetch_attributes(&self, id: NodeId) -> Result<Option<ComponentAttributes>, Self::Error>;

    /// Persist an updated attribute record
    fn persist_attributes(&mut self, attributes: &ComponentAttributes) -> Result<(), Self::Error>;
}

/// Receiver of single-item calculation outcomes
pub trait CalculationObserver {
    /// The calculation finished and produced these attributes
    fn calculation_succeeded(&mut self, attributes: &ComponentAttributes);

    /// The calculation failed; the stored record was not changed
    fn calculation_failed(&mut self, failure: &CalculationFailure);
}

impl HardwareStore for HardwareTree {
    type Error = TreeError;

    fn fetch_attributes(&self, id: NodeId) -> Result<Option<ComponentAttributes>, Self::Error> {
        if !self.contains(id) {
            return Err(TreeError::MissingNode(id));
        }
        Ok(self.attributes(id).cloned())
    }

    fn persist_attributes(&mut self, attributes: &ComponentAttributes) -> Result<(), Self::Error> {
        self.set_attributes(NodeId::new(attributes.hardware_id), attributes.clone())
    }
}

/// Observer that discards every outcome
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl CalculationObserver for NullObserver {
    fn calculation_succeeded(&mut self, _attributes: &ComponentAttributes) {}

    fn calculation_failed(&mut self, _failure: &CalculationFailure) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_as_store() {
        let mut tree = HardwareTree::new(NodeId::new(0));
        tree.insert(NodeId::new(1), NodeId::new(0), None).unwrap();

        assert_eq!(tree.fetch_attributes(NodeId::new(1)), Ok(None));
        assert!(tree.fetch_attributes(NodeId::new(2)).is_err());

        let mut attrs = ComponentAttributes::new_part(1, 3, 1);
        attrs.hazard_rate_active = 0.25;
        tree.persist_attributes(&attrs).unwrap();
        let fetched = tree.fetch_attributes(NodeId::new(1)).unwrap().unwrap();
        assert_eq!(fetched.hazard_rate_active, 0.25);
    }
}

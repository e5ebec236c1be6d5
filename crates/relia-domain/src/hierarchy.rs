//! Hardware hierarchy
//!
//! An arena of nodes keyed by [`NodeId`] with explicit parent and children
//! fields. The root stands for the whole system.

use crate::allocation::AllocationRecord;
use crate::attributes::ComponentAttributes;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Identifier of a hardware item, assigned by the persistence layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Wrap a raw hardware ID
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw hardware ID
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the hardware tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareNode {
    /// Node ID
    pub id: NodeId,
    /// Parent node; `None` only for the root
    #[serde(default)]
    pub parent: Option<NodeId>,
    /// Children in insertion order
    #[serde(default)]
    pub children: Vec<NodeId>,
    /// Component attributes, once the item has them
    #[serde(default)]
    pub attributes: Option<ComponentAttributes>,
    /// Allocation parameters and results
    #[serde(default)]
    pub allocation: Option<AllocationRecord>,
}

impl HardwareNode {
    fn new(id: NodeId, parent: Option<NodeId>) -> Self {
        Self {
            id,
            parent,
            children: Vec::new(),
            attributes: None,
            allocation: None,
        }
    }
}

/// Errors raised by tree construction and validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A node with this ID already exists
    DuplicateNode(NodeId),
    /// A referenced node does not exist
    MissingNode(NodeId),
    /// The root cannot be removed or re-parented
    RootRemoval,
    /// A node is reachable from itself
    Cycle(NodeId),
    /// A node's parent does not list it as a child (or the other way round)
    InconsistentLink {
        /// The parent side of the broken link
        parent: NodeId,
        /// The child side of the broken link
        child: NodeId,
    },
    /// A node cannot be reached from the root
    Unreachable(NodeId),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::DuplicateNode(id) => write!(f, "node {} already exists", id),
            TreeError::MissingNode(id) => write!(f, "node {} does not exist", id),
            TreeError::RootRemoval => write!(f, "the root node cannot be removed"),
            TreeError::Cycle(id) => write!(f, "node {} is part of a cycle", id),
            TreeError::InconsistentLink { parent, child } => {
                write!(f, "link between parent {} and child {} is one-sided", parent, child)
            }
            TreeError::Unreachable(id) => write!(f, "node {} is not reachable from the root", id),
        }
    }
}

impl std::error::Error for TreeError {}

/// Serialized shape of a tree: the root plus a flat node list
///
/// Deserializing does not validate, so damaged data still loads and is
/// reported by [`HardwareTree::validate`] or by the aggregator.
#[derive(Serialize, Deserialize)]
struct TreeRecord {
    root: NodeId,
    nodes: Vec<HardwareNode>,
}

/// Single-parent, multi-child hardware tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TreeRecord", into = "TreeRecord")]
pub struct HardwareTree {
    root: NodeId,
    nodes: BTreeMap<NodeId, HardwareNode>,
}

impl From<TreeRecord> for HardwareTree {
    fn from(record: TreeRecord) -> Self {
        let mut nodes: BTreeMap<NodeId, HardwareNode> = record
            .nodes
            .into_iter()
            .map(|mut node| {
                if let Some(attributes) = node.attributes.as_mut() {
                    attributes.hardware_id = node.id.value();
                }
                if let Some(allocation) = node.allocation.as_mut() {
                    allocation.hardware_id = node.id.value();
                }
                (node.id, node)
            })
            .collect();
        nodes
            .entry(record.root)
            .or_insert_with(|| HardwareNode::new(record.root, None));
        Self {
            root: record.root,
            nodes,
        }
    }
}

impl From<HardwareTree> for TreeRecord {
    fn from(tree: HardwareTree) -> Self {
        Self {
            root: tree.root,
            nodes: tree.nodes.into_values().collect(),
        }
    }
}

impl HardwareTree {
    /// Create a tree holding only the system root
    pub fn new(root: NodeId) -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(root, HardwareNode::new(root, None));
        Self { root, nodes }
    }

    /// Root (system) node ID
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Add a node under `parent`
    ///
    /// The attribute record, when given, is stamped with the node's ID.
    pub fn insert(
        &mut self,
        id: NodeId,
        parent: NodeId,
        attributes: Option<ComponentAttributes>,
    ) -> Result<(), TreeError> {
        if self.nodes.contains_key(&id) {
            return Err(TreeError::DuplicateNode(id));
        }
        let parent_node = self
            .nodes
            .get_mut(&parent)
            .ok_or(TreeError::MissingNode(parent))?;
        parent_node.children.push(id);

        let mut node = HardwareNode::new(id, Some(parent));
        node.attributes = attributes.map(|mut attrs| {
            attrs.hardware_id = id.value();
            attrs
        });
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Remove a node and its whole subtree, returning the removed nodes
    pub fn remove(&mut self, id: NodeId) -> Result<Vec<HardwareNode>, TreeError> {
        if id == self.root {
            return Err(TreeError::RootRemoval);
        }
        let node = self.nodes.get(&id).ok_or(TreeError::MissingNode(id))?;
        if let Some(parent) = node.parent {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|child| *child != id);
            }
        }

        let mut removed = Vec::new();
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                pending.extend(node.children.iter().copied());
                removed.push(node);
            }
        }
        Ok(removed)
    }

    /// Node by ID
    pub fn get(&self, id: NodeId) -> Option<&HardwareNode> {
        self.nodes.get(&id)
    }

    /// Mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut HardwareNode> {
        self.nodes.get_mut(&id)
    }

    /// Whether a node exists
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes at all
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Immediate children of a node (empty for unknown IDs)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    /// Attribute record of a node
    pub fn attributes(&self, id: NodeId) -> Option<&ComponentAttributes> {
        self.nodes.get(&id).and_then(|node| node.attributes.as_ref())
    }

    /// Replace a node's attribute record
    pub fn set_attributes(
        &mut self,
        id: NodeId,
        mut attributes: ComponentAttributes,
    ) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(&id).ok_or(TreeError::MissingNode(id))?;
        attributes.hardware_id = id.value();
        node.attributes = Some(attributes);
        Ok(())
    }

    /// Allocation record of a node
    pub fn allocation(&self, id: NodeId) -> Option<&AllocationRecord> {
        self.nodes.get(&id).and_then(|node| node.allocation.as_ref())
    }

    /// Replace a node's allocation record
    pub fn set_allocation(
        &mut self,
        id: NodeId,
        mut allocation: AllocationRecord,
    ) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(&id).ok_or(TreeError::MissingNode(id))?;
        allocation.hardware_id = id.value();
        node.allocation = Some(allocation);
        Ok(())
    }

    /// All nodes in ID order
    pub fn iter(&self) -> impl Iterator<Item = &HardwareNode> {
        self.nodes.values()
    }

    /// Node IDs below `start`, children before parents
    ///
    /// Missing children and revisits are skipped, so a damaged tree still
    /// yields a finite order.
    pub fn post_order(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut visited = BTreeSet::new();
        let mut stack = vec![(start, false)];

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            if !self.nodes.contains_key(&id) || !visited.insert(id) {
                continue;
            }
            stack.push((id, true));
            for child in self.children(id).iter().rev() {
                stack.push((*child, false));
            }
        }
        order
    }

    /// Number of edges between the root and a node
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut depth = 0;
        let mut current = self.nodes.get(&id)?;
        while let Some(parent) = current.parent {
            depth += 1;
            if depth > self.nodes.len() {
                return None;
            }
            current = self.nodes.get(&parent)?;
        }
        Some(depth)
    }

    /// Check the single-parent, acyclic, fully-linked invariants
    pub fn validate(&self) -> Result<(), TreeError> {
        let root = self
            .nodes
            .get(&self.root)
            .ok_or(TreeError::MissingNode(self.root))?;
        if root.parent.is_some() {
            return Err(TreeError::RootRemoval);
        }

        for node in self.nodes.values() {
            for child in &node.children {
                let child_node = self.nodes.get(child).ok_or(TreeError::MissingNode(*child))?;
                if child_node.parent != Some(node.id) {
                    return Err(TreeError::InconsistentLink {
                        parent: node.id,
                        child: *child,
                    });
                }
            }
            if let Some(parent) = node.parent {
                let parent_node = self.nodes.get(&parent).ok_or(TreeError::MissingNode(parent))?;
                if !parent_node.children.contains(&node.id) {
                    return Err(TreeError::InconsistentLink {
                        parent,
                        child: node.id,
                    });
                }
            }
        }

        let mut visited = BTreeSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                return Err(TreeError::Cycle(id));
            }
            stack.extend(self.children(id).iter().copied());
        }
        if let Some(orphan) = self.nodes.keys().find(|id| !visited.contains(*id)) {
            return Err(TreeError::Unreachable(*orphan));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> HardwareTree {
        let mut tree = HardwareTree::new(NodeId::new(0));
        tree.insert(NodeId::new(1), NodeId::new(0), None).unwrap();
        tree.insert(NodeId::new(2), NodeId::new(1), None).unwrap();
        tree.insert(NodeId::new(3), NodeId::new(1), None).unwrap();
        tree.insert(NodeId::new(4), NodeId::new(0), None).unwrap();
        tree
    }

    #[test]
    fn test_insert_and_navigate() {
        let tree = sample_tree();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.children(NodeId::new(1)), &[NodeId::new(2), NodeId::new(3)]);
        assert_eq!(tree.parent(NodeId::new(3)), Some(NodeId::new(1)));
        assert_eq!(tree.parent(NodeId::new(0)), None);
        assert_eq!(tree.depth(NodeId::new(2)), Some(2));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_insert_rejects_duplicates_and_unknown_parents() {
        let mut tree = sample_tree();
        assert_eq!(
            tree.insert(NodeId::new(2), NodeId::new(0), None),
            Err(TreeError::DuplicateNode(NodeId::new(2)))
        );
        assert_eq!(
            tree.insert(NodeId::new(9), NodeId::new(42), None),
            Err(TreeError::MissingNode(NodeId::new(42)))
        );
    }

    #[test]
    fn test_insert_stamps_attribute_id() {
        let mut tree = HardwareTree::new(NodeId::new(0));
        let attrs = ComponentAttributes::new_part(999, 3, 1);
        tree.insert(NodeId::new(5), NodeId::new(0), Some(attrs)).unwrap();
        assert_eq!(tree.attributes(NodeId::new(5)).unwrap().hardware_id, 5);
    }

    #[test]
    fn test_remove_subtree() {
        let mut tree = sample_tree();
        let removed = tree.remove(NodeId::new(1)).unwrap();
        assert_eq!(removed.len(), 3);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.children(NodeId::new(0)), &[NodeId::new(4)]);
        assert_eq!(tree.remove(NodeId::new(0)), Err(TreeError::RootRemoval));
    }

    #[test]
    fn test_post_order_children_first() {
        let tree = sample_tree();
        let order: Vec<u32> = tree.post_order(tree.root()).iter().map(|id| id.value()).collect();
        assert_eq!(order, vec![2, 3, 1, 4, 0]);
    }

    #[test]
    fn test_validate_detects_cycle() {
        let mut tree = sample_tree();
        tree.get_mut(NodeId::new(2)).unwrap().children.push(NodeId::new(1));
        assert!(tree.validate().is_err());
        // Traversal still terminates
        assert_eq!(tree.post_order(tree.root()).len(), 5);
    }

    #[test]
    fn test_validate_detects_dangling_child() {
        let mut tree = sample_tree();
        tree.get_mut(NodeId::new(4)).unwrap().children.push(NodeId::new(77));
        assert_eq!(tree.validate(), Err(TreeError::MissingNode(NodeId::new(77))));
    }

    #[test]
    fn test_serde_round_trip_keeps_structure() {
        let tree = sample_tree();
        let json = serde_json::to_string(&tree).unwrap();
        let back: HardwareTree = serde_json::from_str(&json).unwrap();
        assert_eq!(tree, back);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: post-order visits every node once, each after all of its children
        #[test]
        fn test_post_order_covers_tree(parents in prop::collection::vec(0usize..100, 1..40)) {
            let mut tree = HardwareTree::new(NodeId::new(0));
            for (index, parent) in parents.iter().enumerate() {
                let id = (index + 1) as u32;
                let parent = (*parent % (index + 1)) as u32;
                tree.insert(NodeId::new(id), NodeId::new(parent), None).unwrap();
            }
            prop_assert!(tree.validate().is_ok());

            let order = tree.post_order(tree.root());
            prop_assert_eq!(order.len(), tree.len());
            let position: BTreeMap<NodeId, usize> =
                order.iter().enumerate().map(|(i, id)| (*id, i)).collect();
            for node in tree.iter() {
                for child in &node.children {
                    prop_assert!(position[child] < position[&node.id]);
                }
            }
        }
    }
}

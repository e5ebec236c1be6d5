//! Goal apportionment
//!
//! The parent's method, mission time and goals travel in an explicit
//! [`AllocationContext`]; child records are read, never mutated, and the
//! batch is written back only once every child has a target.

use crate::goals::{allocation_goal, calculate_goals, reciprocal};
use crate::AllocationError;
use relia_domain::{AllocationMethod, AllocationRecord, HardwareTree, NodeId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Denominator of the ARINC weights
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArincReference {
    /// Sum of every sibling's current rate; shares add up to the goal
    #[default]
    SiblingTotal,
    /// Current rate of a chosen child
    Designated(NodeId),
    /// Current rate of the first child in tree order
    FirstChild,
}

/// Parent-side inputs of one allocation pass
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationContext {
    /// Apportionment method
    pub method: AllocationMethod,
    /// Parent mission time (hours)
    pub mission_time: f64,
    /// Parent reliability goal (AGREE, Equal)
    pub reliability_goal: f64,
    /// Parent hazard rate goal, failures/hour (ARINC, FOO)
    pub hazard_rate_goal: f64,
    /// ARINC weighting reference
    pub arinc_reference: ArincReference,
}

impl AllocationContext {
    /// Context from the parent's allocation record
    ///
    /// When the record names a goal measure, the other two goals are derived
    /// from it first, so a parent entered as an MTBF or hazard rate goal
    /// apportions the matching reliability or rate.
    pub fn from_parent(record: &AllocationRecord) -> Result<Self, AllocationError> {
        let method = record.method.ok_or_else(|| {
            AllocationError::InvalidInput(format!(
                "node {} has no allocation method selected",
                record.hardware_id
            ))
        })?;
        let derived;
        let record = if record.goal_measure.is_some() {
            derived = calculate_goals(record)?;
            &derived
        } else {
            record
        };
        let goal = allocation_goal(record)?;
        if !(goal.is_finite() && goal > 0.0) {
            return Err(AllocationError::InvalidInput(format!(
                "node {} has no positive {} goal to apportion",
                record.hardware_id,
                if method.uses_reliability_goal() { "reliability" } else { "hazard rate" }
            )));
        }
        debug!(hardware_id = record.hardware_id, method = ?method, goal, "apportioning goal");
        Ok(Self {
            method,
            mission_time: record.mission_time,
            reliability_goal: record.reliability_goal,
            hazard_rate_goal: record.hazard_rate_goal,
            arinc_reference: ArincReference::default(),
        })
    }

    /// Use a different ARINC reference
    pub fn with_arinc_reference(mut self, reference: ArincReference) -> Self {
        self.arinc_reference = reference;
        self
    }
}

/// One child as seen by the allocator
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationChild {
    /// Child node
    pub id: NodeId,
    /// Child's weighting inputs
    pub record: AllocationRecord,
    /// Child's current active hazard rate (ARINC weighting)
    pub hazard_rate_active: f64,
}

/// Apportion the context's goal over `children`
///
/// Returns one updated record per child, in input order, carrying the
/// weight, the allocated hazard rate, MTBF and reliability. The allocated
/// values also become the child's goals so allocation can continue a level
/// down. Any arithmetic failure aborts the whole batch.
pub fn allocate(
    context: &AllocationContext,
    children: &[AllocationChild],
) -> Result<Vec<AllocationRecord>, AllocationError> {
    if children.is_empty() {
        return Err(AllocationError::InvalidInput(
            "cannot allocate a goal over zero children".to_string(),
        ));
    }
    let records = match context.method {
        AllocationMethod::Equal => equal(context, children)?,
        AllocationMethod::Agree => agree(context, children)?,
        AllocationMethod::Arinc => arinc(context, children)?,
        AllocationMethod::Foo => foo(context, children)?,
    };
    for record in &records {
        debug!(
            hardware_id = record.hardware_id,
            method = %context.method,
            weight = record.weight_factor,
            hazard_rate_alloc = record.hazard_rate_alloc,
            "child allocated"
        );
    }
    Ok(records)
}

fn check_finite(value: f64, what: &str, id: NodeId) -> Result<f64, AllocationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AllocationError::Arithmetic(format!(
            "{} for node {} is not finite",
            what, id
        )))
    }
}

/// Record with every allocated target filled in
fn allocated(
    child: &AllocationChild,
    weight: f64,
    hazard_rate: f64,
    mtbf: f64,
    reliability: f64,
) -> Result<AllocationRecord, AllocationError> {
    check_finite(hazard_rate, "allocated hazard rate", child.id)?;
    check_finite(reliability, "allocated reliability", child.id)?;
    Ok(AllocationRecord {
        hardware_id: child.id.value(),
        weight_factor: weight,
        hazard_rate_alloc: hazard_rate,
        mtbf_alloc: mtbf,
        reliability_alloc: reliability,
        hazard_rate_goal: hazard_rate,
        mtbf_goal: mtbf,
        reliability_goal: reliability,
        ..child.record.clone()
    })
}

/// Targets derived from an allocated rate at the parent's mission time
fn from_rate(
    child: &AllocationChild,
    weight: f64,
    hazard_rate: f64,
    mission_time: f64,
) -> Result<AllocationRecord, AllocationError> {
    let mtbf = reciprocal(hazard_rate, &format!("allocated hazard rate for node {}", child.id))?;
    allocated(child, weight, hazard_rate, mtbf, (-hazard_rate * mission_time).exp())
}

fn equal(
    context: &AllocationContext,
    children: &[AllocationChild],
) -> Result<Vec<AllocationRecord>, AllocationError> {
    let n = children.len() as f64;
    let t = context.mission_time;
    if t <= 0.0 {
        return Err(AllocationError::Arithmetic(format!(
            "mission time {} cannot convert a reliability goal",
            t
        )));
    }
    let reliability = context.reliability_goal.powf(1.0 / n);
    let hazard_rate = -reliability.ln() / t;
    children
        .iter()
        .map(|child| {
            let mtbf = reciprocal(hazard_rate, &format!("allocated hazard rate for node {}", child.id))?;
            allocated(child, 1.0 / n, hazard_rate, mtbf, reliability)
        })
        .collect()
}

fn agree(
    context: &AllocationContext,
    children: &[AllocationChild],
) -> Result<Vec<AllocationRecord>, AllocationError> {
    let total: u64 = children
        .iter()
        .map(|child| u64::from(child.record.n_sub_elements))
        .sum();
    if total == 0 {
        return Err(AllocationError::Arithmetic(
            "total AGREE sub-element count is zero".to_string(),
        ));
    }
    let total = total as f64;
    let goal = context.reliability_goal;

    children
        .iter()
        .map(|child| {
            let n_i = f64::from(child.record.n_sub_elements);
            let importance = child.record.importance;
            let operating_time = context.mission_time * child.record.duty_cycle / 100.0;
            if importance == 0.0 || operating_time == 0.0 {
                return Err(AllocationError::Arithmetic(format!(
                    "node {} has zero importance or operating time",
                    child.id
                )));
            }
            let hazard_rate = n_i * -goal.ln() / (total * importance * operating_time);
            let reliability = 1.0 - (1.0 - goal.powf(n_i / total)) / importance;
            let mtbf = reciprocal(hazard_rate, &format!("allocated hazard rate for node {}", child.id))?;
            allocated(child, n_i / total, hazard_rate, mtbf, reliability)
        })
        .collect()
}

fn arinc(
    context: &AllocationContext,
    children: &[AllocationChild],
) -> Result<Vec<AllocationRecord>, AllocationError> {
    let reference = match context.arinc_reference {
        ArincReference::SiblingTotal => children.iter().map(|child| child.hazard_rate_active).sum(),
        ArincReference::FirstChild => children[0].hazard_rate_active,
        ArincReference::Designated(id) => children
            .iter()
            .find(|child| child.id == id)
            .map(|child| child.hazard_rate_active)
            .ok_or_else(|| {
                AllocationError::InvalidInput(format!("reference node {} is not a child", id))
            })?,
    };
    if reference == 0.0 {
        return Err(AllocationError::Arithmetic(
            "ARINC reference hazard rate is zero".to_string(),
        ));
    }

    children
        .iter()
        .map(|child| {
            let weight = child.hazard_rate_active / reference;
            from_rate(child, weight, context.hazard_rate_goal * weight, context.mission_time)
        })
        .collect()
}

/// Highest rating a FOO feasibility factor can take
pub const FOO_MAX_RATING: u32 = 10;

fn foo_weight(child: &AllocationChild) -> Result<u64, AllocationError> {
    let record = &child.record;
    let factors = [
        ("intricacy", record.int_factor),
        ("state of the art", record.soa_factor),
        ("operating time", record.op_time_factor),
        ("environment", record.env_factor),
    ];
    if let Some((name, value)) = factors.iter().find(|(_, value)| *value > FOO_MAX_RATING) {
        return Err(AllocationError::InvalidInput(format!(
            "node {} {} factor {} is outside 0..={}",
            child.id, name, value, FOO_MAX_RATING
        )));
    }
    record.foo_weight().ok_or_else(|| {
        AllocationError::Arithmetic(format!("FOO weight of node {} overflows", child.id))
    })
}

fn foo(
    context: &AllocationContext,
    children: &[AllocationChild],
) -> Result<Vec<AllocationRecord>, AllocationError> {
    let weights = children.iter().map(foo_weight).collect::<Result<Vec<_>, _>>()?;
    let cumulative = weights
        .iter()
        .try_fold(0u64, |sum, weight| sum.checked_add(*weight))
        .ok_or_else(|| AllocationError::Arithmetic("cumulative FOO weight overflows".to_string()))?;
    if cumulative == 0 {
        return Err(AllocationError::Arithmetic(
            "cumulative FOO weight is zero".to_string(),
        ));
    }
    children
        .iter()
        .zip(weights)
        .map(|(child, weight)| {
            let share = weight as f64 / cumulative as f64;
            from_rate(child, share, context.hazard_rate_goal * share, context.mission_time)
        })
        .collect()
}

/// Allocation over a hardware tree
///
/// # Examples
///
/// ```
/// use relia_allocate::Allocator;
/// use relia_domain::{AllocationMethod, AllocationRecord, HardwareTree, NodeId};
///
/// let system = NodeId::new(1);
/// let mut tree = HardwareTree::new(system);
/// tree.insert(NodeId::new(2), system, None).unwrap();
/// tree.insert(NodeId::new(3), system, None).unwrap();
/// tree.set_allocation(system, AllocationRecord {
///     method: Some(AllocationMethod::Equal),
///     reliability_goal: 0.81,
///     ..AllocationRecord::new(1)
/// }).unwrap();
///
/// let written = Allocator::new().apply(&mut tree, system).unwrap();
/// assert_eq!(written.len(), 2);
/// assert!((tree.allocation(NodeId::new(2)).unwrap().reliability_alloc - 0.9).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    arinc_reference: ArincReference,
}

impl Allocator {
    /// Allocator using the sibling-total ARINC reference
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator using a specific ARINC reference
    pub fn with_arinc_reference(arinc_reference: ArincReference) -> Self {
        Self { arinc_reference }
    }

    /// Compute the children's records without writing them
    pub fn allocate_children(
        &self,
        tree: &HardwareTree,
        parent: NodeId,
    ) -> Result<Vec<AllocationRecord>, AllocationError> {
        if !tree.contains(parent) {
            return Err(relia_domain::TreeError::MissingNode(parent).into());
        }
        let parent_record = tree.allocation(parent).ok_or_else(|| {
            AllocationError::InvalidInput(format!("node {} has no allocation record", parent))
        })?;
        let context = AllocationContext::from_parent(parent_record)?
            .with_arinc_reference(self.arinc_reference);

        let mut children = Vec::new();
        for &id in tree.children(parent) {
            if !tree.contains(id) {
                return Err(relia_domain::TreeError::MissingNode(id).into());
            }
            let hazard_rate_active = match context.method {
                AllocationMethod::Arinc => {
                    tree.attributes(id)
                        .ok_or(AllocationError::MissingAttributes(id))?
                        .hazard_rate_active
                }
                _ => tree.attributes(id).map(|a| a.hazard_rate_active).unwrap_or(0.0),
            };
            children.push(AllocationChild {
                id,
                record: tree
                    .allocation(id)
                    .cloned()
                    .unwrap_or_else(|| AllocationRecord::new(id.value())),
                hazard_rate_active,
            });
        }
        allocate(&context, &children)
    }

    /// Allocate and write every child's record, or none of them
    pub fn apply(
        &self,
        tree: &mut HardwareTree,
        parent: NodeId,
    ) -> Result<Vec<AllocationRecord>, AllocationError> {
        let records = self.allocate_children(tree, parent)?;
        for record in &records {
            tree.set_allocation(NodeId::new(record.hardware_id), record.clone())?;
        }
        info!(parent = %parent, children = records.len(), "allocation written");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(id: u32, rate: f64) -> AllocationChild {
        AllocationChild {
            id: NodeId::new(id),
            record: AllocationRecord::new(id),
            hazard_rate_active: rate,
        }
    }

    fn context(method: AllocationMethod) -> AllocationContext {
        AllocationContext {
            method,
            mission_time: 10.0,
            reliability_goal: 0.9,
            hazard_rate_goal: 0.01,
            arinc_reference: ArincReference::SiblingTotal,
        }
    }

    #[test]
    fn test_equal_product_is_goal() {
        let children = [child(2, 0.0), child(3, 0.0), child(4, 0.0)];
        let records = allocate(&context(AllocationMethod::Equal), &children).unwrap();
        let product: f64 = records.iter().map(|r| r.reliability_alloc).product();
        assert!((product - 0.9).abs() < 1e-12);
        assert!((records[0].weight_factor - 1.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_agree_weights_by_sub_elements() {
        let mut a = child(2, 0.0);
        a.record.n_sub_elements = 3;
        let mut b = child(3, 0.0);
        b.record.n_sub_elements = 1;
        b.record.duty_cycle = 50.0;
        b.record.importance = 0.5;
        let records = allocate(&context(AllocationMethod::Agree), &[a, b]).unwrap();

        let ln_goal = -(0.9f64).ln();
        assert_eq!(records[0].weight_factor, 0.75);
        assert!((records[0].hazard_rate_alloc - 3.0 * ln_goal / (4.0 * 10.0)).abs() < 1e-15);
        assert!((records[1].hazard_rate_alloc - ln_goal / (4.0 * 0.5 * 5.0)).abs() < 1e-15);
        let r1 = 1.0 - (1.0 - 0.9f64.powf(0.25)) / 0.5;
        assert!((records[1].reliability_alloc - r1).abs() < 1e-15);
    }

    #[test]
    fn test_agree_zero_importance() {
        let mut a = child(2, 0.0);
        a.record.importance = 0.0;
        assert!(matches!(
            allocate(&context(AllocationMethod::Agree), &[a]),
            Err(AllocationError::Arithmetic(_))
        ));
    }

    #[test]
    fn test_arinc_sibling_total_conserves_goal() {
        let children = [child(2, 1e-4), child(3, 3e-4)];
        let records = allocate(&context(AllocationMethod::Arinc), &children).unwrap();
        assert!((records[0].hazard_rate_alloc - 0.0025).abs() < 1e-15);
        assert!((records[1].hazard_rate_alloc - 0.0075).abs() < 1e-15);
        assert!((records[1].mtbf_alloc - 1.0 / 0.0075).abs() < 1e-9);
    }

    #[test]
    fn test_arinc_first_child_reference() {
        let children = [child(2, 1e-4), child(3, 3e-4)];
        let ctx = context(AllocationMethod::Arinc).with_arinc_reference(ArincReference::FirstChild);
        let records = allocate(&ctx, &children).unwrap();
        assert_eq!(records[0].weight_factor, 1.0);
        assert!((records[1].hazard_rate_alloc - 0.03).abs() < 1e-15);

        let ctx = context(AllocationMethod::Arinc)
            .with_arinc_reference(ArincReference::Designated(NodeId::new(9)));
        assert!(allocate(&ctx, &children).is_err());
    }

    #[test]
    fn test_arinc_zero_reference() {
        let children = [child(2, 0.0), child(3, 0.0)];
        assert!(matches!(
            allocate(&context(AllocationMethod::Arinc), &children),
            Err(AllocationError::Arithmetic(_))
        ));
    }

    #[test]
    fn test_foo_shares() {
        let mut a = child(2, 0.0);
        a.record.int_factor = 3;
        let b = child(3, 0.0);
        let records = allocate(&context(AllocationMethod::Foo), &[a, b]).unwrap();
        assert_eq!(records[0].weight_factor, 0.75);
        assert!((records[0].hazard_rate_alloc - 0.0075).abs() < 1e-15);
        assert!((records[1].reliability_alloc - (-0.025f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_foo_zero_cumulative_weight() {
        let mut a = child(2, 0.0);
        a.record.env_factor = 0;
        assert!(matches!(
            allocate(&context(AllocationMethod::Foo), &[a]),
            Err(AllocationError::Arithmetic(_))
        ));
    }

    #[test]
    fn test_foo_factor_out_of_range() {
        let mut a = child(2, 0.0);
        a.record.int_factor = 70_000;
        a.record.soa_factor = 70_000;
        a.record.op_time_factor = 70_000;
        a.record.env_factor = 70_000;
        let err = allocate(&context(AllocationMethod::Foo), &[a, child(3, 0.0)]).unwrap_err();
        assert!(matches!(err, AllocationError::InvalidInput(ref msg) if msg.contains("intricacy")));
    }

    #[test]
    fn test_context_derives_goal_from_mtbf() {
        let record = AllocationRecord {
            method: Some(AllocationMethod::Arinc),
            goal_measure: Some(relia_domain::GoalMeasure::Mtbf),
            mtbf_goal: 4000.0,
            mission_time: 10.0,
            ..AllocationRecord::new(1)
        };
        let context = AllocationContext::from_parent(&record).unwrap();
        assert!((context.hazard_rate_goal - 2.5e-4).abs() < 1e-15);
        assert!((context.reliability_goal - (-2.5e-3f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_context_without_goal() {
        let record = AllocationRecord {
            method: Some(AllocationMethod::Foo),
            ..AllocationRecord::new(1)
        };
        assert!(matches!(
            AllocationContext::from_parent(&record),
            Err(AllocationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_no_children() {
        assert!(matches!(
            allocate(&context(AllocationMethod::Equal), &[]),
            Err(AllocationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_children_keep_their_inputs() {
        let mut a = child(2, 0.0);
        a.record.mission_time = 55.0;
        a.record.method = Some(AllocationMethod::Foo);
        let records = allocate(&context(AllocationMethod::Equal), &[a]).unwrap();
        assert_eq!(records[0].mission_time, 55.0);
        assert_eq!(records[0].method, Some(AllocationMethod::Foo));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn children(rates: &[f64]) -> Vec<AllocationChild> {
        rates
            .iter()
            .enumerate()
            .map(|(i, rate)| AllocationChild {
                id: NodeId::new(i as u32 + 2),
                record: AllocationRecord::new(i as u32 + 2),
                hazard_rate_active: *rate,
            })
            .collect()
    }

    proptest! {
        /// Property: equal apportionment multiplies back to the goal
        #[test]
        fn test_equal_conservation(goal in 0.01f64..0.9999, n in 1usize..12) {
            let ctx = AllocationContext {
                method: AllocationMethod::Equal,
                mission_time: 100.0,
                reliability_goal: goal,
                hazard_rate_goal: 0.0,
                arinc_reference: ArincReference::SiblingTotal,
            };
            let records = allocate(&ctx, &children(&vec![0.0; n])).unwrap();
            let product: f64 = records.iter().map(|r| r.reliability_alloc).product();
            prop_assert!((product - goal).abs() < 1e-9);
        }

        /// Property: ARINC shares sum to the goal
        #[test]
        fn test_arinc_conservation(
            rates in prop::collection::vec(1e-7f64..1e-2, 1..10),
            goal in 1e-6f64..1e-1,
        ) {
            let ctx = AllocationContext {
                method: AllocationMethod::Arinc,
                mission_time: 100.0,
                reliability_goal: 1.0,
                hazard_rate_goal: goal,
                arinc_reference: ArincReference::SiblingTotal,
            };
            let records = allocate(&ctx, &children(&rates)).unwrap();
            let total: f64 = records.iter().map(|r| r.hazard_rate_alloc).sum();
            prop_assert!((total - goal).abs() < 1e-9 * goal.max(1.0));
        }

        /// Property: FOO shares sum to the goal
        #[test]
        fn test_foo_conservation(
            factors in prop::collection::vec((1u32..10, 1u32..10, 1u32..10, 1u32..10), 1..8),
            goal in 1e-6f64..1e-1,
        ) {
            let ctx = AllocationContext {
                method: AllocationMethod::Foo,
                mission_time: 100.0,
                reliability_goal: 1.0,
                hazard_rate_goal: goal,
                arinc_reference: ArincReference::SiblingTotal,
            };
            let mut kids = children(&vec![0.0; factors.len()]);
            for (kid, (i, s, o, e)) in kids.iter_mut().zip(&factors) {
                kid.record.int_factor = *i;
                kid.record.soa_factor = *s;
                kid.record.op_time_factor = *o;
                kid.record.env_factor = *e;
            }
            let records = allocate(&ctx, &kids).unwrap();
            let total: f64 = records.iter().map(|r| r.hazard_rate_alloc).sum();
            prop_assert!((total - goal).abs() < 1e-9 * goal.max(1.0));
        }
    }
}

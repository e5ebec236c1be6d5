//! Whole-tree rollups

use proptest::prelude::*;
use relia_domain::{ComponentAttributes, FailureKind, HardwareTree, NodeId};
use relia_rollup::{RollupConfig, RollupTotals, TreeAggregator};

fn specified_part(id: u32, rate: f64) -> ComponentAttributes {
    let mut attrs = ComponentAttributes::new_part(id, 3, 2);
    attrs.hazard_rate_type_id = 2;
    attrs.hazard_rate_specified = rate;
    attrs.environment_active_id = 1;
    attrs.power_rated = 1.0;
    attrs
}

#[test]
fn test_three_parts_under_one_assembly() {
    let mut tree = HardwareTree::new(NodeId::new(1));
    tree.set_attributes(NodeId::new(1), ComponentAttributes::new_assembly(1, "System"))
        .unwrap();
    tree.insert(
        NodeId::new(2),
        NodeId::new(1),
        Some(ComponentAttributes::new_assembly(2, "Power supply")),
    )
    .unwrap();
    for (id, rate) in [(3, 0.001), (4, 0.002), (5, 0.003)] {
        tree.insert(NodeId::new(id), NodeId::new(2), Some(specified_part(id, rate)))
            .unwrap();
    }

    let mut aggregator = TreeAggregator::new(RollupConfig::rates_only());
    let report = aggregator.calculate_all(&mut tree);

    assert!(report.is_clean(), "{:?}", report.failures);
    let assembly = tree.attributes(NodeId::new(2)).unwrap();
    assert!((assembly.hazard_rate_active - 0.006).abs() < 1e-12);
    assert_eq!(assembly.hazard_rate_dormant, 0.0);
    assert_eq!(assembly.hazard_rate_software, 0.0);
    assert!((assembly.mtbf_mission - 1.0 / 0.006).abs() < 1e-6);
    assert_eq!(assembly.total_part_count, 3);

    let system = tree.attributes(NodeId::new(1)).unwrap();
    assert!((system.hazard_rate_active - 0.006).abs() < 1e-12);
}

#[test]
fn test_predicted_part_in_a_tree() {
    let mut tree = HardwareTree::new(NodeId::new(1));
    tree.set_attributes(NodeId::new(1), ComponentAttributes::new_assembly(1, "Controller"))
        .unwrap();

    let mut pal = ComponentAttributes::new_part(2, 1, 3);
    pal.hazard_rate_method_id = 2;
    pal.quality_id = 1;
    pal.environment_active_id = 2;
    pal.n_gates = 150;
    pal.technology_id = 1;
    pal.temperature_case = 40.0;
    pal.power_operating = 0.5;
    pal.thermal_resistance = 10.0;
    pal.years_production = 2.0;
    pal.package_id = 1;
    pal.n_pins = 16;
    pal.current_operating = 0.01;
    pal.current_rated = 0.1;
    tree.insert(NodeId::new(2), NodeId::new(1), Some(pal)).unwrap();
    tree.insert(NodeId::new(3), NodeId::new(1), Some(specified_part(3, 0.5)))
        .unwrap();

    let mut aggregator = TreeAggregator::default_config();
    let report = aggregator.calculate_all(&mut tree);
    assert!(report.is_clean(), "{:?}", report.failures);

    let pal = tree.attributes(NodeId::new(2)).unwrap();
    assert!(pal.hazard_rate_active > 0.0);
    assert_eq!(pal.temperature_junction, 45.0);
    assert!(!pal.overstress);
    assert!((pal.current_ratio - 0.1).abs() < 1e-12);

    let system = tree.attributes(NodeId::new(1)).unwrap();
    let expected = pal.hazard_rate_active + 0.5e-6;
    assert!((system.hazard_rate_active - expected).abs() < 1e-15);
    assert_eq!(system.total_power_dissipation, 0.5);
}

#[test]
fn test_sibling_failure_does_not_stop_rollup() {
    let mut tree = HardwareTree::new(NodeId::new(1));
    tree.set_attributes(NodeId::new(1), ComponentAttributes::new_assembly(1, "System"))
        .unwrap();
    let mut unknown = ComponentAttributes::new_part(2, 3, 9);
    unknown.environment_active_id = 1;
    unknown.quality_id = 1;
    tree.insert(NodeId::new(2), NodeId::new(1), Some(unknown.clone()))
        .unwrap();
    tree.insert(NodeId::new(3), NodeId::new(1), Some(specified_part(3, 0.002)))
        .unwrap();

    let mut aggregator = TreeAggregator::new(RollupConfig::rates_only());
    let report = aggregator.calculate_all(&mut tree);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, FailureKind::InvalidInput);
    assert_eq!(report.failures[0].hardware_id, 2);
    assert_eq!(tree.attributes(NodeId::new(2)), Some(&unknown));
    assert!((report.totals.hazard_rate_active - 0.002).abs() < 1e-15);
    assert_eq!(aggregator.metrics().total_failures(), 1);
}

#[test]
fn test_cycle_is_reported_not_followed() {
    let mut tree = HardwareTree::new(NodeId::new(1));
    tree.set_attributes(NodeId::new(1), ComponentAttributes::new_assembly(1, "System"))
        .unwrap();
    tree.insert(
        NodeId::new(2),
        NodeId::new(1),
        Some(ComponentAttributes::new_assembly(2, "Loop")),
    )
    .unwrap();
    tree.insert(NodeId::new(3), NodeId::new(2), Some(specified_part(3, 0.001)))
        .unwrap();
    tree.get_mut(NodeId::new(3))
        .unwrap()
        .children
        .push(NodeId::new(2));

    let mut aggregator = TreeAggregator::new(RollupConfig::rates_only());
    let report = aggregator.calculate_all(&mut tree);

    assert!(report
        .failures
        .iter()
        .any(|f| f.kind == FailureKind::TreeStructureViolation && f.hardware_id == 3));
    assert!((report.totals.hazard_rate_active - 0.001).abs() < 1e-15);
}

/// System → one sub-assembly per chunk of three parts
fn build(parts: &[(f64, f64, u32)], reversed: bool) -> HardwareTree {
    let root = NodeId::new(1);
    let mut tree = HardwareTree::new(root);
    tree.set_attributes(root, ComponentAttributes::new_assembly(1, "System"))
        .unwrap();

    let first_part = 100;
    let mut chunks: Vec<(usize, &[(f64, f64, u32)])> = parts.chunks(3).enumerate().collect();
    if reversed {
        chunks.reverse();
    }
    for (index, chunk) in chunks {
        let assembly = NodeId::new(10 + index as u32);
        tree.insert(
            assembly,
            root,
            Some(ComponentAttributes::new_assembly(assembly.value(), "Module")),
        )
        .unwrap();
        let mut entries: Vec<(usize, &(f64, f64, u32))> = chunk.iter().enumerate().collect();
        if reversed {
            entries.reverse();
        }
        for (offset, (rate, cost, quantity)) in entries {
            let id = first_part + (index * 3 + offset) as u32;
            let mut part = specified_part(id, *rate);
            part.cost = *cost;
            part.quantity = *quantity;
            part.power_operating = 0.125;
            tree.insert(NodeId::new(id), assembly, Some(part)).unwrap();
        }
    }
    tree
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1e-300)
}

fn totals_close(a: &RollupTotals, b: &RollupTotals) -> bool {
    close(a.hazard_rate_active, b.hazard_rate_active)
        && close(a.hazard_rate_dormant, b.hazard_rate_dormant)
        && close(a.hazard_rate_software, b.hazard_rate_software)
        && close(a.total_cost, b.total_cost)
        && a.total_part_count == b.total_part_count
        && close(a.total_power_dissipation, b.total_power_dissipation)
}

fn parts() -> impl Strategy<Value = Vec<(f64, f64, u32)>> {
    prop::collection::vec((1e-7f64..1e-2, 0.0f64..500.0, 1u32..5), 1..12)
}

proptest! {
    #[test]
    fn prop_rollup_is_idempotent(parts in parts()) {
        let mut tree = build(&parts, false);
        let mut aggregator = TreeAggregator::new(RollupConfig::rates_only());

        let first = aggregator.calculate_all(&mut tree);
        let after_first = tree.clone();
        let second = aggregator.calculate_all(&mut tree);

        prop_assert!(first.is_clean());
        prop_assert_eq!(first.totals, second.totals);
        prop_assert_eq!(after_first, tree);
    }

    #[test]
    fn prop_child_order_does_not_change_totals(parts in parts()) {
        let mut forward = build(&parts, false);
        let mut backward = build(&parts, true);
        let mut aggregator = TreeAggregator::new(RollupConfig::rates_only());

        let a = aggregator.calculate_all(&mut forward);
        let b = aggregator.calculate_all(&mut backward);

        prop_assert!(totals_close(&a.totals, &b.totals), "{:?} vs {:?}", a.totals, b.totals);
        let expected: u64 = parts.iter().map(|(_, _, q)| u64::from(*q)).sum();
        prop_assert_eq!(a.totals.total_part_count, expected);
    }
}

//! Commands run against system files on disk

use relia_cli::cli::{AllocateArgs, CalculateArgs, DerateArgs};
use relia_cli::commands::{execute_allocate, execute_calculate, execute_derate};
use relia_cli::config::OutputFormat;
use relia_cli::system::load_system;
use relia_cli::{CliError, Config, Formatter};
use relia_domain::NodeId;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SYSTEM: &str = r#"
root = 1

[[nodes]]
id = 1
children = [2, 3, 4]

[nodes.attributes]
name = "Transmitter"

[nodes.allocation]
method = "Arinc"
goal_measure = "HazardRate"
hazard_rate_goal = 0.0001

[[nodes]]
id = 2
parent = 1

[nodes.attributes]
name = "Driver"
part = true
category_id = 3
subcategory_id = 2
hazard_rate_type_id = 2
hazard_rate_specified = 1.0
environment_active_id = 1
power_rated = 1.0
cost = 2.0

[[nodes]]
id = 3
parent = 1

[nodes.attributes]
name = "Filter"
part = true
category_id = 3
subcategory_id = 2
hazard_rate_type_id = 2
hazard_rate_specified = 3.0
environment_active_id = 1
power_rated = 1.0
cost = 5.0

[[nodes]]
id = 4
parent = 1

[nodes.attributes]
name = "Mode switch"
part = true
category_id = 7
subcategory_id = 1
hazard_rate_type_id = 2
hazard_rate_specified = 2.0
environment_active_id = 3
current_operating = 0.9
current_rated = 1.0
"#;

fn system_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("system.toml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

fn json() -> Formatter {
    Formatter::new(OutputFormat::Json, false)
}

fn rates_only() -> Config {
    let mut config = Config::default();
    config.derate = false;
    config
}

#[test]
fn test_calculate_whole_system() {
    let (_dir, path) = system_file(SYSTEM);
    let args = CalculateArgs {
        file: path.clone(),
        node: None,
        write: true,
    };

    let output = execute_calculate(args, &rates_only(), &json()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let total = value["totals"]["hazard_rate_active"].as_f64().unwrap();
    assert!((total - 6.0e-6).abs() < 1e-18);
    assert_eq!(value["totals"]["total_part_count"], 3);

    let tree = load_system(&path).unwrap();
    let root = tree.attributes(NodeId::new(1)).unwrap();
    assert!((root.hazard_rate_active - 6.0e-6).abs() < 1e-18);
    assert!((root.total_cost - 7.0).abs() < 1e-12);
}

#[test]
fn test_calculate_without_write_leaves_file() {
    let (_dir, path) = system_file(SYSTEM);
    let args = CalculateArgs {
        file: path.clone(),
        node: None,
        write: false,
    };
    execute_calculate(args, &rates_only(), &Formatter::new(OutputFormat::Table, false)).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), SYSTEM);
}

#[test]
fn test_calculate_single_node() {
    let (_dir, path) = system_file(SYSTEM);
    let args = CalculateArgs {
        file: path,
        node: Some(3),
        write: false,
    };
    let output = execute_calculate(args, &rates_only(), &json()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let mtbf = value["attributes"]["mtbf_mission"].as_f64().unwrap();
    assert!((mtbf - 1.0e6 / 3.0).abs() < 1e-3);
}

#[test]
fn test_calculate_unknown_node() {
    let (_dir, path) = system_file(SYSTEM);
    let args = CalculateArgs {
        file: path,
        node: Some(99),
        write: false,
    };
    let err = execute_calculate(args, &rates_only(), &json()).unwrap_err();
    assert!(matches!(err, CliError::Rollup(_)));
}

#[test]
fn test_allocate_after_rollup() {
    let (_dir, path) = system_file(SYSTEM);
    execute_calculate(
        CalculateArgs {
            file: path.clone(),
            node: None,
            write: true,
        },
        &rates_only(),
        &json(),
    )
    .unwrap();

    let args = AllocateArgs {
        file: path.clone(),
        parent: 1,
        first_child_reference: false,
        write: true,
    };
    let output = execute_allocate(args, &json()).unwrap();
    let records: serde_json::Value = serde_json::from_str(&output).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 3);
    let allocated: f64 = records
        .iter()
        .map(|r| r["hazard_rate_alloc"].as_f64().unwrap())
        .sum();
    assert!((allocated - 0.0001).abs() < 1e-15);

    let tree = load_system(&path).unwrap();
    let filter = tree.allocation(NodeId::new(3)).unwrap();
    assert!((filter.hazard_rate_alloc - 0.5 * 0.0001).abs() < 1e-15);
}

#[test]
fn test_allocate_from_mtbf_goal() {
    let system = SYSTEM.replace(
        "method = \"Arinc\"\ngoal_measure = \"HazardRate\"\nhazard_rate_goal = 0.0001",
        "method = \"Equal\"\ngoal_measure = \"Mtbf\"\nmtbf_goal = 1000.0\nmission_time = 100.0",
    );
    assert_ne!(system, SYSTEM);
    let (_dir, path) = system_file(&system);
    let args = AllocateArgs {
        file: path,
        parent: 1,
        first_child_reference: false,
        write: false,
    };
    let output = execute_allocate(args, &json()).unwrap();
    let records: serde_json::Value = serde_json::from_str(&output).unwrap();
    let reliability: f64 = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["reliability_alloc"].as_f64().unwrap())
        .product();
    assert!((reliability - (-0.1f64).exp()).abs() < 1e-12);
}

#[test]
fn test_allocate_missing_parent_record() {
    let (_dir, path) = system_file(SYSTEM);
    let args = AllocateArgs {
        file: path,
        parent: 2,
        first_child_reference: false,
        write: false,
    };
    let err = execute_allocate(args, &json()).unwrap_err();
    assert!(matches!(err, CliError::Allocation(_)));
}

#[test]
fn test_derate_switch() {
    let (_dir, path) = system_file(SYSTEM);
    let args = DerateArgs {
        file: path.clone(),
        node: 4,
        write: true,
    };
    let output = execute_derate(args, &Config::default(), &json()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["overstress"], true);
    assert_eq!(value["reason"].as_array().unwrap().len(), 1);

    let tree = load_system(&path).unwrap();
    assert!(tree.attributes(NodeId::new(4)).unwrap().overstress);
}

//! Single-item requests against a hardware store
//!
//! Fetch the attribute record, run the pipeline, persist on success and
//! signal the observer either way. A failed request leaves the stored
//! record untouched.

use crate::pipeline::{calculate_item, ItemResult};
use crate::{RollupConfig, RollupError};
use relia_domain::{CalculationFailure, CalculationObserver, ComponentAttributes, HardwareStore, NodeId};
use relia_predict::{calculate_stress_ratios, derate};
use std::fmt::Display;
use tracing::{info, warn};

fn fetch<S>(store: &S, id: NodeId) -> Result<ComponentAttributes, RollupError>
where
    S: HardwareStore,
    S::Error: Display,
{
    store
        .fetch_attributes(id)
        .map_err(|e| RollupError::Store(e.to_string()))?
        .ok_or(RollupError::MissingAttributes(id))
}

fn failure_for(error: &RollupError, id: NodeId) -> CalculationFailure {
    match error {
        RollupError::Calculation(failure) => failure.clone(),
        other => CalculationFailure::new(other.kind(), id.value(), "attributes", other.to_string()),
    }
}

fn signal_failure<O: CalculationObserver>(observer: &mut O, error: &RollupError, id: NodeId) {
    let failure = failure_for(error, id);
    warn!(hardware_id = failure.hardware_id, kind = %failure.kind, "{}", failure.message);
    observer.calculation_failed(&failure);
}

/// Calculate one hardware item and persist the result
///
/// Parts run the full pipeline; assemblies refresh their metrics from the
/// totals already stored on them. Stage warnings are returned in the
/// result and do not stop the request.
///
/// # Examples
///
/// ```
/// use relia_domain::{ComponentAttributes, HardwareTree, NodeId, NullObserver};
/// use relia_rollup::{calculate_hardware, RollupConfig};
///
/// let mut tree = HardwareTree::new(NodeId::new(0));
/// let mut part = ComponentAttributes::new_part(1, 9, 1);
/// part.hazard_rate_type_id = 3;
/// part.mtbf_specified = 2000.0;
/// tree.insert(NodeId::new(1), NodeId::new(0), Some(part)).unwrap();
///
/// let result = calculate_hardware(&mut tree, &mut NullObserver, NodeId::new(1), &RollupConfig::rates_only()).unwrap();
/// assert!((result.attributes.mtbf_mission - 2000.0).abs() < 1e-9);
/// ```
pub fn calculate_hardware<S, O>(
    store: &mut S,
    observer: &mut O,
    id: NodeId,
    config: &RollupConfig,
) -> Result<ItemResult, RollupError>
where
    S: HardwareStore,
    S::Error: Display,
    O: CalculationObserver,
{
    let outcome = fetch(store, id).and_then(|attributes| {
        let result = calculate_item(&attributes, config)?;
        store
            .persist_attributes(&result.attributes)
            .map_err(|e| RollupError::Store(e.to_string()))?;
        Ok(result)
    });

    match outcome {
        Ok(result) => {
            for warning in &result.warnings {
                warn!(hardware_id = warning.hardware_id, metric = %warning.metric, "{}", warning.message);
            }
            info!(
                hardware_id = id.value(),
                hazard_rate_active = result.attributes.hazard_rate_active,
                "hardware item calculated"
            );
            observer.calculation_succeeded(&result.attributes);
            Ok(result)
        }
        Err(error) => {
            signal_failure(observer, &error, id);
            Err(error)
        }
    }
}

/// Recompute stress ratios and the overstress verdict for one item
///
/// Only the ratios, `overstress` and `reason` change. A ratio whose rated
/// value is zero keeps its stored value; an unknown environment or
/// category fails the request.
pub fn derate_hardware<S, O>(
    store: &mut S,
    observer: &mut O,
    id: NodeId,
    config: &RollupConfig,
) -> Result<ComponentAttributes, RollupError>
where
    S: HardwareStore,
    S::Error: Display,
    O: CalculationObserver,
{
    let outcome = fetch(store, id).and_then(|attributes| {
        let stress = calculate_stress_ratios(&attributes);
        for failure in &stress.failures {
            warn!(hardware_id = failure.hardware_id, metric = %failure.metric, "{}", failure.message);
        }
        let derated = derate(&stress.attributes, &config.prediction)
            .map_err(|e| RollupError::from(e.into_failure(id.value(), "overstress")))?;
        store
            .persist_attributes(&derated)
            .map_err(|e| RollupError::Store(e.to_string()))?;
        Ok(derated)
    });

    match outcome {
        Ok(derated) => {
            info!(
                hardware_id = id.value(),
                overstress = derated.overstress,
                reasons = derated.reason.len(),
                "derating analysis stored"
            );
            observer.calculation_succeeded(&derated);
            Ok(derated)
        }
        Err(error) => {
            signal_failure(observer, &error, id);
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relia_domain::{FailureKind, HardwareTree};

    #[derive(Default)]
    struct Recorder {
        succeeded: Vec<u32>,
        failed: Vec<CalculationFailure>,
    }

    impl CalculationObserver for Recorder {
        fn calculation_succeeded(&mut self, attributes: &ComponentAttributes) {
            self.succeeded.push(attributes.hardware_id);
        }

        fn calculation_failed(&mut self, failure: &CalculationFailure) {
            self.failed.push(failure.clone());
        }
    }

    fn tree_with(attributes: Option<ComponentAttributes>) -> HardwareTree {
        let mut tree = HardwareTree::new(NodeId::new(0));
        tree.insert(NodeId::new(1), NodeId::new(0), attributes).unwrap();
        tree
    }

    #[test]
    fn test_success_persists_and_signals() {
        let mut part = ComponentAttributes::new_part(1, 9, 1);
        part.hazard_rate_type_id = 2;
        part.hazard_rate_specified = 0.004;
        let mut tree = tree_with(Some(part));
        let mut recorder = Recorder::default();

        let result = calculate_hardware(&mut tree, &mut recorder, NodeId::new(1), &RollupConfig::rates_only()).unwrap();

        assert_eq!(recorder.succeeded, vec![1]);
        assert!(recorder.failed.is_empty());
        assert_eq!(tree.attributes(NodeId::new(1)), Some(&result.attributes));
        assert!((result.attributes.mtbf_mission - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_attributes_signals_failure() {
        let mut tree = tree_with(None);
        let mut recorder = Recorder::default();

        let err = calculate_hardware(&mut tree, &mut recorder, NodeId::new(1), &RollupConfig::default()).unwrap_err();

        assert_eq!(err, RollupError::MissingAttributes(NodeId::new(1)));
        assert_eq!(recorder.failed.len(), 1);
        assert_eq!(recorder.failed[0].kind, FailureKind::MissingCollaboratorData);
        assert_eq!(recorder.failed[0].hardware_id, 1);
    }

    #[test]
    fn test_calculation_failure_leaves_store_untouched() {
        let mut part = ComponentAttributes::new_part(1, 9, 1);
        part.hazard_rate_type_id = 3;
        let mut tree = tree_with(Some(part));
        let before = tree.attributes(NodeId::new(1)).cloned();
        let mut recorder = Recorder::default();

        let err = calculate_hardware(&mut tree, &mut recorder, NodeId::new(1), &RollupConfig::default()).unwrap_err();

        assert_eq!(err.kind(), FailureKind::ArithmeticFailure);
        assert_eq!(tree.attributes(NodeId::new(1)).cloned(), before);
        assert_eq!(recorder.failed[0].metric, "hazard_rate_active");
    }

    #[test]
    fn test_unknown_node_is_a_store_error() {
        let mut tree = tree_with(None);
        let err = calculate_hardware(
            &mut tree,
            &mut relia_domain::NullObserver,
            NodeId::new(9),
            &RollupConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RollupError::Store(_)));
    }

    #[test]
    fn test_derate_hardware() {
        let mut switch = ComponentAttributes::new_part(1, 7, 1);
        switch.environment_active_id = 3;
        switch.current_operating = 0.9;
        switch.current_rated = 1.0;
        let mut tree = tree_with(Some(switch));
        let mut recorder = Recorder::default();

        let derated = derate_hardware(&mut tree, &mut recorder, NodeId::new(1), &RollupConfig::default()).unwrap();

        assert!((derated.current_ratio - 0.9).abs() < 1e-12);
        assert!(derated.overstress);
        assert_eq!(derated.reason.len(), 1);
        assert!(tree.attributes(NodeId::new(1)).unwrap().overstress);
        assert_eq!(recorder.succeeded, vec![1]);
    }

    #[test]
    fn test_derate_unknown_environment() {
        let mut tree = tree_with(Some(ComponentAttributes::new_part(1, 7, 1)));
        let mut recorder = Recorder::default();
        let err = derate_hardware(&mut tree, &mut recorder, NodeId::new(1), &RollupConfig::default()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidInput);
        assert_eq!(recorder.failed[0].metric, "overstress");
    }
}

//! Single-item calculation pipeline
//!
//! Parts: stress ratios → derating → hazard rate model → dormancy →
//! reliability metrics → cost metrics. Assemblies take their children's
//! totals in place of the model and skip the stress stages.
//!
//! Stress ratio and derating problems are warnings: the affected fields
//! keep their previous values and the run carries on, unless a part-stress
//! model needs a ratio that failed. Any other stage failure rejects the
//! whole item.

use crate::{RollupConfig, RollupTotals};
use relia_domain::{
    CalculationFailure, ComponentAttributes, CostType, FailureKind, HazardRateType, PredictionMethod,
};
use relia_predict::{
    calculate_cost_metrics, calculate_hazard_rate, calculate_reliability_metrics,
    calculate_stress_ratios, derate, dormant_hazard_rate, model_for, resolve_active_hazard_rate,
};
use tracing::debug;

/// A successfully calculated item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemResult {
    /// Updated attribute record
    pub attributes: ComponentAttributes,
    /// Non-fatal stage failures
    pub warnings: Vec<CalculationFailure>,
}

fn fail(error: relia_predict::PredictError, id: u32, stage: &str) -> CalculationFailure {
    error.into_failure(id, stage)
}

/// Dormancy, reliability and cost metrics; shared tail of both pipelines
fn finish(
    mut attributes: ComponentAttributes,
    config: &RollupConfig,
) -> Result<ComponentAttributes, CalculationFailure> {
    let id = attributes.hardware_id;
    if attributes.part || attributes.hazard_rate_type() != Some(HazardRateType::Assessed) {
        let raw = resolve_active_hazard_rate(&attributes, &config.prediction)
            .map_err(|e| fail(e, id, "hazard_rate_active"))?;
        attributes.hazard_rate_dormant = dormant_hazard_rate(&attributes, raw);
    }
    let attributes = calculate_reliability_metrics(&attributes, &config.prediction)
        .map_err(|e| fail(e, id, "reliability"))?;
    calculate_cost_metrics(&attributes).map_err(|e| fail(e, id, "cost_hour"))
}

/// Reject a part-stress prediction that would read a ratio which failed
fn check_stress_inputs(
    attributes: &ComponentAttributes,
    warnings: &[CalculationFailure],
) -> Result<(), CalculationFailure> {
    if attributes.prediction_method() != Some(PredictionMethod::PartStress) {
        return Ok(());
    }
    let Ok(model) = model_for(attributes.category_id, attributes.subcategory_id) else {
        return Ok(());
    };
    match warnings
        .iter()
        .find(|warning| model.stress_inputs().contains(&warning.metric.as_str()))
    {
        Some(stale) => Err(CalculationFailure::new(
            FailureKind::ArithmeticFailure,
            attributes.hardware_id,
            "hazard_rate_active",
            format!(
                "{} part stress model needs {}, which could not be calculated",
                model.name(),
                stale.metric
            ),
        )),
        None => Ok(()),
    }
}

/// Run the part pipeline on one item
///
/// The input is never modified; on error nothing about the item changes.
pub fn calculate_part(
    attributes: &ComponentAttributes,
    config: &RollupConfig,
) -> Result<ItemResult, CalculationFailure> {
    let id = attributes.hardware_id;
    let stress = calculate_stress_ratios(attributes);
    let mut warnings = stress.failures;
    let mut current = stress.attributes;

    if config.derate {
        match derate(&current, &config.prediction) {
            Ok(derated) => current = derated,
            Err(e) => warnings.push(fail(e, id, "overstress")),
        }
    }

    if current.hazard_rate_type() == Some(HazardRateType::Assessed) {
        check_stress_inputs(&current, &warnings)?;
        current = calculate_hazard_rate(&current, &config.prediction)
            .map_err(|e| fail(e, id, "hazard_rate_active"))?;
    }

    let attributes = finish(current, config)?;
    debug!(
        hardware_id = id,
        warnings = warnings.len(),
        hazard_rate_active = attributes.hazard_rate_active,
        overstress = attributes.overstress,
        "part calculated"
    );
    Ok(ItemResult {
        attributes,
        warnings,
    })
}

/// Overwrite an assembly with its children's totals and derive its metrics
///
/// Assessed assemblies take the summed active, dormant and software rates;
/// calculated-cost assemblies take the summed cost. Part count and power
/// always come from the children, so entered values never double-count.
pub fn calculate_assembly(
    attributes: &ComponentAttributes,
    children: &RollupTotals,
    config: &RollupConfig,
) -> Result<ItemResult, CalculationFailure> {
    let mut current = attributes.clone();
    if current.hazard_rate_type() == Some(HazardRateType::Assessed) {
        current.hazard_rate_active = children.hazard_rate_active;
        current.hazard_rate_dormant = children.hazard_rate_dormant;
        current.hazard_rate_software = children.hazard_rate_software;
    }
    if current.cost_type() != Some(CostType::Specified) {
        current.total_cost = children.total_cost;
    }
    current.total_part_count = u32::try_from(children.total_part_count).map_err(|_| {
        CalculationFailure::new(
            FailureKind::ArithmeticFailure,
            current.hardware_id,
            "total_part_count",
            format!(
                "{} parts below hardware ID {} exceed the storable count",
                children.total_part_count, current.hardware_id
            ),
        )
    })?;
    current.total_power_dissipation = children.total_power_dissipation;

    let attributes = finish(current, config)?;
    debug!(
        hardware_id = attributes.hardware_id,
        hazard_rate_active = attributes.hazard_rate_active,
        total_part_count = attributes.total_part_count,
        "assembly calculated"
    );
    Ok(ItemResult {
        attributes,
        warnings: Vec::new(),
    })
}

/// Calculate one item outside a tree walk
///
/// Parts run the full pipeline. Assemblies keep the totals already on their
/// record and only have their metrics refreshed.
pub fn calculate_item(
    attributes: &ComponentAttributes,
    config: &RollupConfig,
) -> Result<ItemResult, CalculationFailure> {
    if attributes.part {
        calculate_part(attributes, config)
    } else {
        let totals = RollupTotals::from_attributes(attributes);
        calculate_assembly(attributes, &totals, config)
    }
}

//! Reliability and cost metrics
//!
//! Stored rates are failures per hour. User-entered specified rates and the
//! additive adjustment are in hr-multiplier units and are converted on
//! every run, never written back, so repeated runs give the same answer.

use crate::config::PredictionConfig;
use crate::error::PredictError;
use relia_domain::{ComponentAttributes, CostType, HazardRateType};
use tracing::debug;

/// Active hazard rate before adjustment, in failures per hour
///
/// Assessed items use the rate already on the record (model output for a
/// part, child sum for an assembly). Specified items convert the entered
/// rate; specified-MTBF items invert it.
pub fn resolve_active_hazard_rate(
    attributes: &ComponentAttributes,
    config: &PredictionConfig,
) -> Result<f64, PredictError> {
    let rate_type = attributes.hazard_rate_type().ok_or_else(|| {
        PredictError::invalid(format!(
            "hazard rate type ID {} is outside 1..=4",
            attributes.hazard_rate_type_id
        ))
    })?;
    match rate_type {
        HazardRateType::Assessed => Ok(attributes.hazard_rate_active),
        HazardRateType::SpecifiedHazardRate | HazardRateType::SDistribution => {
            Ok(attributes.hazard_rate_specified / config.hr_multiplier)
        }
        HazardRateType::SpecifiedMtbf => {
            if attributes.mtbf_specified == 0.0 {
                return Err(PredictError::arithmetic(
                    "hazard_rate_active",
                    "specified MTBF is zero",
                ));
            }
            Ok(1.0 / attributes.mtbf_specified)
        }
    }
}

/// Apply the additive then multiplicative adjustment to a raw active rate
pub fn adjust_hazard_rate(
    raw: f64,
    attributes: &ComponentAttributes,
    config: &PredictionConfig,
) -> Result<f64, PredictError> {
    let adjusted = (raw + attributes.add_adj_factor / config.hr_multiplier) * attributes.mult_adj_factor;
    if !adjusted.is_finite() {
        return Err(PredictError::arithmetic(
            "hazard_rate_active",
            "adjusted hazard rate is not finite",
        ));
    }
    if adjusted < 0.0 {
        return Err(PredictError::invalid(format!(
            "adjusted hazard rate {} is negative",
            adjusted
        )));
    }
    Ok(adjusted)
}

fn reciprocal(value: f64, metric: &str) -> Result<f64, PredictError> {
    if value == 0.0 {
        return Err(PredictError::arithmetic(metric, "hazard rate is zero"));
    }
    let result = 1.0 / value;
    if !result.is_finite() {
        return Err(PredictError::arithmetic(metric, format!("1 / {} is not finite", value)));
    }
    Ok(result)
}

/// Composite hazard rates, MTBF, reliability and variances
///
/// `hazard_rate_dormant` must already hold the item's dormant rate.
///
/// - logistics = active + dormant + software
/// - mission = active + software
/// - MTBF = 1 / rate; a zero rate is an arithmetic failure
/// - R = exp(-rate × t), with t the logistics reference duration or the
///   mission time
///
/// Variances are point-estimate proxies (rate squared, MTBF variance its
/// reciprocal). S-distribution items keep the variances they were given.
///
/// # Examples
///
/// ```
/// use relia_domain::ComponentAttributes;
/// use relia_predict::{calculate_reliability_metrics, PredictionConfig};
///
/// let mut attrs = ComponentAttributes::new_part(1, 3, 1);
/// attrs.hazard_rate_active = 0.001;
/// let updated = calculate_reliability_metrics(&attrs, &PredictionConfig::default()).unwrap();
/// assert!((updated.mtbf_mission - 1000.0).abs() < 1e-9);
/// ```
pub fn calculate_reliability_metrics(
    attributes: &ComponentAttributes,
    config: &PredictionConfig,
) -> Result<ComponentAttributes, PredictError> {
    let raw = resolve_active_hazard_rate(attributes, config)?;
    let active = adjust_hazard_rate(raw, attributes, config)?;
    let logistics = active + attributes.hazard_rate_dormant + attributes.hazard_rate_software;
    let mission = active + attributes.hazard_rate_software;

    let mtbf_logistics = reciprocal(logistics, "mtbf_logistics")?;
    let mtbf_mission = reciprocal(mission, "mtbf_mission")?;

    let mut updated = ComponentAttributes {
        hazard_rate_active: active,
        hazard_rate_logistics: logistics,
        hazard_rate_mission: mission,
        mtbf_logistics,
        mtbf_mission,
        reliability_logistics: (-logistics * config.logistics_reference_hours).exp(),
        reliability_mission: (-mission * attributes.mission_time).exp(),
        ..attributes.clone()
    };

    if attributes.hazard_rate_type() != Some(HazardRateType::SDistribution) {
        let specified = attributes.hazard_rate_specified / config.hr_multiplier;
        updated.hr_specified_variance = specified * specified;
        updated.hr_logistics_variance = logistics * logistics;
        updated.hr_mission_variance = mission * mission;
        updated.mtbf_specified_variance = if attributes.hazard_rate_type() == Some(HazardRateType::SpecifiedMtbf) {
            attributes.mtbf_specified * attributes.mtbf_specified
        } else if updated.hr_specified_variance > 0.0 {
            1.0 / updated.hr_specified_variance
        } else {
            0.0
        };
        updated.mtbf_logistics_variance = reciprocal(updated.hr_logistics_variance, "mtbf_logistics_variance")?;
        updated.mtbf_mission_variance = reciprocal(updated.hr_mission_variance, "mtbf_mission_variance")?;
    }

    debug!(
        hardware_id = attributes.hardware_id,
        hazard_rate_logistics = logistics,
        hazard_rate_mission = mission,
        "reliability metrics calculated"
    );
    Ok(updated)
}

/// Cost, cost per hour, part count and power dissipation
///
/// Parts and specified-cost items price `cost × quantity`; calculated-cost
/// assemblies keep the total rolled up from their children. Part count and
/// power are only recomputed for parts.
pub fn calculate_cost_metrics(attributes: &ComponentAttributes) -> Result<ComponentAttributes, PredictError> {
    let mut updated = attributes.clone();
    let quantity = f64::from(attributes.quantity);

    if attributes.part || attributes.cost_type() == Some(CostType::Specified) {
        updated.total_cost = attributes.cost * quantity;
    }
    updated.cost_hour = updated.total_cost * attributes.hazard_rate_mission;
    if attributes.part {
        updated.total_part_count = attributes.quantity;
        updated.total_power_dissipation = attributes.power_operating * quantity;
    }

    if !(updated.total_cost.is_finite() && updated.cost_hour.is_finite()) {
        return Err(PredictError::arithmetic("cost_hour", "cost metrics are not finite"));
    }
    Ok(updated)
}

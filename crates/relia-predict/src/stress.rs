//! Operating-to-rated stress ratios

use crate::error::PredictError;
use relia_domain::{CalculationFailure, Category, ComponentAttributes, FailureKind};
use tracing::debug;

/// `operating / rated`
///
/// A rated value of exactly zero is an arithmetic failure rather than an
/// infinite ratio.
///
/// # Examples
///
/// ```
/// use relia_predict::calculate_stress_ratio;
///
/// assert_eq!(calculate_stress_ratio(0.5, 2.0).unwrap(), 0.25);
/// assert!(calculate_stress_ratio(0.5, 0.0).is_err());
/// ```
pub fn calculate_stress_ratio(operating: f64, rated: f64) -> Result<f64, PredictError> {
    if rated == 0.0 {
        return Err(PredictError::arithmetic("stress_ratio", "rated value is zero"));
    }
    let ratio = operating / rated;
    if !ratio.is_finite() {
        return Err(PredictError::arithmetic(
            "stress_ratio",
            format!("{} / {} is not finite", operating, rated),
        ));
    }
    Ok(ratio)
}

/// Attributes after stress analysis, plus the ratios that could not be computed
///
/// A failed ratio keeps its previous value; the failure is reported but
/// does not stop the rest of the pipeline.
#[derive(Debug, Clone)]
pub struct StressOutcome {
    /// Updated attributes
    pub attributes: ComponentAttributes,
    /// One entry per ratio whose rated value was zero
    pub failures: Vec<CalculationFailure>,
}

fn ratio_into(
    operating: f64,
    rated: f64,
    metric: &str,
    what: &str,
    hardware_id: u32,
    slot: &mut f64,
    failures: &mut Vec<CalculationFailure>,
) {
    match calculate_stress_ratio(operating, rated) {
        Ok(ratio) => *slot = ratio,
        Err(_) => failures.push(CalculationFailure::new(
            FailureKind::ArithmeticFailure,
            hardware_id,
            metric,
            format!(
                "failed to calculate {} ratio for hardware ID {}; rated {} is zero",
                what, hardware_id, what
            ),
        )),
    }
}

/// Compute the ratios that apply to the item's category
///
/// Current for ICs, semiconductors, inductive devices, relays, switches and
/// connections; power for resistors; voltage (AC + DC) for capacitors,
/// inductive devices and connections.
pub fn calculate_stress_ratios(attributes: &ComponentAttributes) -> StressOutcome {
    let mut updated = attributes.clone();
    let mut failures = Vec::new();
    let id = attributes.hardware_id;

    if let Some(category) = attributes.category() {
        if category.uses_current_ratio() {
            ratio_into(
                attributes.current_operating,
                attributes.current_rated,
                "current_ratio",
                "current",
                id,
                &mut updated.current_ratio,
                &mut failures,
            );
        }
        if category.uses_power_ratio() {
            ratio_into(
                attributes.power_operating,
                attributes.power_rated,
                "power_ratio",
                "power",
                id,
                &mut updated.power_ratio,
                &mut failures,
            );
        }
        if category.uses_voltage_ratio() {
            ratio_into(
                attributes.voltage_operating(),
                attributes.voltage_rated,
                "voltage_ratio",
                "voltage",
                id,
                &mut updated.voltage_ratio,
                &mut failures,
            );
        }
        debug!(
            hardware_id = id,
            category = category.name(),
            failed = failures.len(),
            "stress ratios calculated"
        );
    }

    StressOutcome {
        attributes: updated,
        failures,
    }
}

/// Whether the category computes any ratio at all
pub fn has_stress_ratios(category: Category) -> bool {
    category.uses_current_ratio() || category.uses_power_ratio() || category.uses_voltage_ratio()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a ratio is either finite or an error, never inf or NaN
        #[test]
        fn test_ratio_never_infinite(operating in -1e6f64..1e6, rated in -1e3f64..1e3) {
            match calculate_stress_ratio(operating, rated) {
                Ok(ratio) => prop_assert!(ratio.is_finite()),
                Err(e) => prop_assert_eq!(e.kind(), FailureKind::ArithmeticFailure),
            }
        }

        /// Property: zero rated always fails
        #[test]
        fn test_zero_rated_always_fails(operating in -1e6f64..1e6) {
            prop_assert!(calculate_stress_ratio(operating, 0.0).is_err());
        }
    }
}

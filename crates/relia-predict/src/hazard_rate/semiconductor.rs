//! Discrete semiconductors (MIL-HDBK-217F section 6)

use super::{by_environment, junction_temperature, lookup, parts_count_prediction, HazardRateModel, Prediction};
use crate::error::PredictError;
use crate::stress::calculate_stress_ratio;
use relia_domain::{ComponentAttributes, Environment};

/// Low-frequency diodes, application 1..=8
///
/// 1 general purpose analog, 2 switching, 3-5 power rectifiers,
/// 6 transient suppressor, 7-8 voltage regulator / reference.
pub struct LowFrequencyDiode;

const LAMBDA_B: [f64; 8] = [0.0038, 0.0010, 0.069, 0.0030, 0.0050, 0.0013, 0.0034, 0.0020];
const PI_C: [f64; 2] = [1.0, 2.0];
const PI_Q: [f64; 5] = [0.7, 1.0, 2.4, 5.5, 8.0];
const PI_E: [f64; Environment::COUNT] = [
    1.0, 6.0, 9.0, 9.0, 19.0, 13.0, 29.0, 20.0, 43.0, 24.0, 0.5, 14.0, 32.0, 320.0,
];

const COUNT_GENERAL: [f64; Environment::COUNT] = [
    0.0036, 0.028, 0.049, 0.043, 0.10, 0.092, 0.21, 0.20, 0.44, 0.17, 0.0018, 0.076, 0.23, 1.5,
];
const COUNT_SWITCHING: [f64; Environment::COUNT] = [
    0.00094, 0.0075, 0.013, 0.011, 0.027, 0.024, 0.054, 0.054, 0.12, 0.045, 0.00047, 0.020, 0.060, 0.40,
];
const COUNT_RECTIFIER: [f64; Environment::COUNT] = [
    0.065, 0.52, 0.89, 0.78, 1.9, 1.7, 3.7, 3.7, 8.0, 3.1, 0.032, 1.4, 4.1, 28.0,
];
const COUNT_TRANSIENT: [f64; Environment::COUNT] = [
    0.0012, 0.0096, 0.017, 0.015, 0.035, 0.031, 0.071, 0.071, 0.15, 0.059, 0.00061, 0.026, 0.077, 0.52,
];
const COUNT_REGULATOR: [f64; Environment::COUNT] = [
    0.0028, 0.022, 0.039, 0.034, 0.082, 0.073, 0.16, 0.16, 0.35, 0.13, 0.0014, 0.060, 0.18, 1.2,
];

fn application(attributes: &ComponentAttributes) -> Result<u8, PredictError> {
    match attributes.application_id {
        id @ 1..=8 => Ok(id),
        id => Err(PredictError::invalid(format!("diode application ID {} is outside 1..=8", id))),
    }
}

/// Electrical stress factor from applied over rated voltage
///
/// Transient suppressors and regulators are voltage-insensitive and use 1.0
/// without looking at the ratings.
fn electrical_stress(application: u8, attributes: &ComponentAttributes) -> Result<f64, PredictError> {
    if application >= 6 {
        return Ok(1.0);
    }
    let voltage_ratio = calculate_stress_ratio(attributes.voltage_operating(), attributes.voltage_rated)
        .map_err(|e| PredictError::arithmetic("voltage_ratio", format!("diode electrical stress: {}", e)))?;
    Ok(if voltage_ratio <= 0.3 {
        0.054
    } else {
        voltage_ratio.powf(2.43)
    })
}

impl HazardRateModel for LowFrequencyDiode {
    fn name(&self) -> &'static str {
        "Low Frequency Diode"
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let table = match application(attributes)? {
            1 => &COUNT_GENERAL,
            2 => &COUNT_SWITCHING,
            3..=5 => &COUNT_RECTIFIER,
            6 => &COUNT_TRANSIENT,
            _ => &COUNT_REGULATOR,
        };
        parts_count_prediction(table, &PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let application = application(attributes)?;
        let lambda_b = lookup(&LAMBDA_B, application, "diode application")?;
        let tj = junction_temperature(attributes);
        let activation = if application >= 7 { 1925.0 } else { 3091.0 };
        let pi_t = (-activation * (1.0 / (tj + 273.0) - 1.0 / 298.0)).exp();
        let pi_s = electrical_stress(application, attributes)?;
        let pi_c = lookup(&PI_C, attributes.construction_id, "diode construction")?;
        let pi_q = lookup(&PI_Q, attributes.quality_id, "quality")?;
        let pi_e = by_environment(&PI_E, attributes, "diode piE")?;

        Prediction::new("lambdab * piT * piS * piC * piQ * piE")
            .base(lambda_b)
            .factor("piT", pi_t)
            .factor("piS", pi_s)
            .factor("piC", pi_c)
            .factor("piQ", pi_q)
            .factor("piE", pi_e)
            .junction(tj)
            .finish_product()
    }
}

//! Resistors (MIL-HDBK-217F section 9)
//!
//! Fixed resistors use ambient temperature and the power ratio directly.

use super::{by_environment, lookup, parts_count_prediction, HazardRateModel, Prediction};
use crate::error::PredictError;
use relia_domain::{ComponentAttributes, Environment};

const FIXED_PI_Q: [f64; 6] = [0.03, 0.1, 0.3, 1.0, 3.0, 10.0];

/// Resistance factor for fixed resistors
fn fixed_resistance_factor(ohms: f64) -> f64 {
    if ohms < 1.0e5 {
        1.0
    } else if ohms <= 1.0e6 {
        1.1
    } else if ohms <= 1.0e7 {
        1.6
    } else {
        2.5
    }
}

fn fixed_stress(
    attributes: &ComponentAttributes,
    lambda_b: f64,
    pi_e_table: &[f64; Environment::COUNT],
) -> Result<Prediction, PredictError> {
    let pi_r = fixed_resistance_factor(attributes.resistance);
    let pi_q = lookup(&FIXED_PI_Q, attributes.quality_id, "quality")?;
    let pi_e = by_environment(pi_e_table, attributes, "resistor piE")?;
    Prediction::new("lambdab * piR * piQ * piE")
        .base(lambda_b)
        .factor("piR", pi_r)
        .factor("piQ", pi_q)
        .factor("piE", pi_e)
        .finish_product()
}

/// Fixed composition resistors (RC, RCR)
pub struct Composition;

const COMPOSITION_PI_E: [f64; Environment::COUNT] = [
    1.0, 3.0, 8.0, 5.0, 13.0, 4.0, 5.0, 7.0, 11.0, 19.0, 0.5, 11.0, 27.0, 490.0,
];
const COMPOSITION_COUNT: [f64; Environment::COUNT] = [
    0.0005, 0.0022, 0.0071, 0.0037, 0.012, 0.0052, 0.0065, 0.016, 0.025, 0.025, 0.00025, 0.0098, 0.035, 0.36,
];

impl HazardRateModel for Composition {
    fn name(&self) -> &'static str {
        "Composition"
    }

    fn stress_inputs(&self) -> &'static [&'static str] {
        &["power_ratio"]
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        parts_count_prediction(&COMPOSITION_COUNT, &FIXED_PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let t = attributes.temperature_active + 273.0;
        let s = attributes.power_ratio;
        let lambda_b = 4.5e-9 * (12.0 * (t / 343.0)).exp() * ((s / 0.6) * (t / 273.0)).exp();
        fixed_stress(attributes, lambda_b, &COMPOSITION_PI_E)
    }
}

/// Fixed film resistors: technology 1 insulated (RL), 2 precision (RN)
pub struct Film;

const FILM_PI_E: [f64; Environment::COUNT] = [
    1.0, 2.0, 8.0, 4.0, 14.0, 4.0, 8.0, 10.0, 18.0, 19.0, 0.2, 10.0, 28.0, 510.0,
];
const FILM_COUNT: [f64; Environment::COUNT] = [
    0.0012, 0.0027, 0.011, 0.0054, 0.020, 0.0063, 0.013, 0.018, 0.033, 0.030, 0.00025, 0.014, 0.044, 0.69,
];

impl HazardRateModel for Film {
    fn name(&self) -> &'static str {
        "Film"
    }

    fn stress_inputs(&self) -> &'static [&'static str] {
        &["power_ratio"]
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        parts_count_prediction(&FILM_COUNT, &FIXED_PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let t = attributes.temperature_active + 273.0;
        let s = attributes.power_ratio;
        let lambda_b = match attributes.technology_id {
            1 => 3.25e-4 * (t / 343.0).powi(3).exp() * (s * t / 273.0).exp(),
            2 => 5.0e-5 * (3.5 * t / 343.0).exp() * (s * t / 273.0).exp(),
            id => {
                return Err(PredictError::invalid(format!(
                    "film resistor technology ID {} is outside 1..=2",
                    id
                )))
            }
        };
        fixed_stress(attributes, lambda_b, &FILM_PI_E)
    }
}

/// Variable non-wirewound resistors (RJ, RJR)
pub struct VariableNonWirewound;

const VARIABLE_PI_E: [f64; Environment::COUNT] = [
    1.0, 3.0, 14.0, 6.0, 24.0, 5.0, 7.0, 12.0, 18.0, 39.0, 0.5, 22.0, 57.0, 1000.0,
];
const VARIABLE_STRESS_PI_Q: [f64; 6] = [0.02, 0.06, 0.2, 0.6, 3.0, 10.0];
const VARIABLE_COUNT: [f64; Environment::COUNT] = [
    0.043, 0.15, 0.75, 0.35, 1.3, 0.39, 0.78, 1.8, 2.8, 2.5, 0.21, 1.2, 3.7, 49.0,
];

fn variable_resistance_factor(ohms: f64) -> Result<f64, PredictError> {
    let factor = if !(1.0e4..=1.0e6).contains(&ohms) {
        return Err(PredictError::invalid(format!(
            "resistance {} Ω is outside the 10 kΩ to 1 MΩ range",
            ohms
        )));
    } else if ohms <= 5.0e4 {
        1.0
    } else if ohms <= 1.0e5 {
        1.1
    } else if ohms <= 2.0e5 {
        1.2
    } else if ohms <= 5.0e5 {
        1.4
    } else {
        1.8
    };
    Ok(factor)
}

/// Voltage factor from the applied voltage relative to rated
fn variable_voltage_factor(attributes: &ComponentAttributes) -> Result<f64, PredictError> {
    if attributes.voltage_rated == 0.0 {
        return Err(PredictError::arithmetic("piV", "rated voltage is zero"));
    }
    let applied = (attributes.resistance * attributes.power_operating).sqrt();
    let ratio = applied / attributes.voltage_rated;
    Ok(if ratio <= 0.8 {
        1.0
    } else if ratio <= 0.9 {
        1.05
    } else {
        1.2
    })
}

impl HazardRateModel for VariableNonWirewound {
    fn name(&self) -> &'static str {
        "Variable Non-Wirewound"
    }

    fn stress_inputs(&self) -> &'static [&'static str] {
        &["power_ratio"]
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        parts_count_prediction(&VARIABLE_COUNT, &FIXED_PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let t = attributes.temperature_active + 273.0;
        let s = attributes.power_ratio;
        let lambda_b = 0.019
            * (0.445 * (t / 358.0).powf(7.3)).exp()
            * ((s / 2.69) * (t / 273.0).powf(2.46)).exp();
        let pi_taps = f64::from(attributes.n_taps).powf(1.5) / 25.0 + 0.792;
        let pi_r = variable_resistance_factor(attributes.resistance)?;
        let pi_v = variable_voltage_factor(attributes)?;
        let pi_q = lookup(&VARIABLE_STRESS_PI_Q, attributes.quality_id, "quality")?;
        let pi_e = by_environment(&VARIABLE_PI_E, attributes, "resistor piE")?;

        Prediction::new("lambdab * piTAPS * piR * piV * piQ * piE")
            .base(lambda_b)
            .factor("piTAPS", pi_taps)
            .factor("piR", pi_r)
            .factor("piV", pi_v)
            .factor("piQ", pi_q)
            .factor("piE", pi_e)
            .finish_product()
    }
}

//! Relays (MIL-HDBK-217F section 13)

use super::{by_environment, lookup, parts_count_prediction, HazardRateModel, Prediction};
use crate::error::PredictError;
use relia_domain::{ComponentAttributes, Environment};

/// Load stress factor shared by relays and switches
///
/// `application_id` selects the load: 1 resistive, 2 inductive, 3 lamp.
/// The stress is the contact current ratio.
pub(crate) fn load_factor(attributes: &ComponentAttributes) -> Result<f64, PredictError> {
    let knee = match attributes.application_id {
        1 => 0.8,
        2 => 0.4,
        3 => 0.2,
        id => {
            return Err(PredictError::invalid(format!(
                "load type ID {} is outside 1..=3",
                id
            )))
        }
    };
    Ok((attributes.current_ratio / knee).powi(2).exp())
}

/// General purpose mechanical relays
pub struct Mechanical;

const PI_C: [f64; 9] = [1.0, 1.5, 1.75, 2.0, 2.5, 3.0, 4.25, 5.5, 8.0];
const PI_F: [f64; 12] = [4.0, 6.0, 25.0, 5.0, 10.0, 25.0, 7.0, 12.0, 10.0, 20.0, 9.0, 12.0];
const PI_Q: [f64; 7] = [0.1, 0.3, 0.45, 0.6, 1.0, 1.5, 3.0];
const PI_E: [f64; Environment::COUNT] = [
    1.0, 2.0, 15.0, 8.0, 27.0, 7.0, 9.0, 11.0, 12.0, 46.0, 0.5, 25.0, 66.0, 0.0,
];
const COUNT: [f64; Environment::COUNT] = [
    0.13, 0.28, 2.1, 1.1, 3.8, 1.1, 1.4, 1.9, 2.0, 7.0, 0.066, 3.5, 10.0, 0.0,
];
const COUNT_PI_Q: [f64; 3] = [0.6, 3.0, 9.0];

/// Base rate from ambient temperature; parts rated above 85 °C use the
/// 125 °C curve
fn base_rate(attributes: &ComponentAttributes) -> f64 {
    let t = attributes.temperature_active + 273.0;
    if attributes.temperature_rated_max > 85.0 {
        0.0059 * (t / 377.0).powf(10.4).exp()
    } else {
        0.0059 * (t / 352.0).powf(15.7).exp()
    }
}

/// Cycling factor from cycles per hour
fn cycling_factor(cycles: f64) -> f64 {
    if cycles > 1000.0 {
        (cycles / 100.0).powi(2)
    } else if cycles >= 1.0 {
        cycles / 10.0
    } else {
        0.1
    }
}

impl HazardRateModel for Mechanical {
    fn name(&self) -> &'static str {
        "Mechanical Relay"
    }

    fn stress_inputs(&self) -> &'static [&'static str] {
        &["current_ratio"]
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        parts_count_prediction(&COUNT, &COUNT_PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let pi_l = load_factor(attributes)?;
        let pi_c = lookup(&PI_C, attributes.contact_form_id, "contact form")?;
        let pi_cyc = cycling_factor(attributes.n_cycles);
        let pi_f = lookup(&PI_F, attributes.construction_id, "relay construction")?;
        let pi_q = lookup(&PI_Q, attributes.quality_id, "quality")?;
        let pi_e = by_environment(&PI_E, attributes, "relay piE")?;

        Prediction::new("lambdab * piL * piC * piCYC * piF * piQ * piE")
            .base(base_rate(attributes))
            .factor("piL", pi_l)
            .factor("piC", pi_c)
            .factor("piCYC", pi_cyc)
            .factor("piF", pi_f)
            .factor("piQ", pi_q)
            .factor("piE", pi_e)
            .finish_product()
    }
}

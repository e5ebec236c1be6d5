//! Switches (MIL-HDBK-217F section 14)

use super::relay::load_factor;
use super::{by_environment, lookup, parts_count_prediction, HazardRateModel, Prediction};
use crate::error::PredictError;
use relia_domain::{ComponentAttributes, Environment};

/// Toggle and pushbutton switches; construction 1 snap-action, 2 non-snap
pub struct Toggle;

const LAMBDA_B: [f64; 2] = [0.00045, 0.0027];
const PI_C: [f64; 9] = [1.0, 1.5, 1.7, 2.0, 2.5, 3.0, 4.2, 5.5, 8.0];
const PI_Q: [f64; 2] = [1.0, 20.0];
const PI_E: [f64; Environment::COUNT] = [
    1.0, 3.0, 18.0, 8.0, 29.0, 10.0, 18.0, 13.0, 22.0, 46.0, 0.5, 25.0, 67.0, 1200.0,
];
const COUNT: [f64; Environment::COUNT] = [
    0.0010, 0.0030, 0.018, 0.0080, 0.029, 0.010, 0.018, 0.013, 0.022, 0.046, 0.0005, 0.025, 0.067, 1.2,
];

impl HazardRateModel for Toggle {
    fn name(&self) -> &'static str {
        "Toggle"
    }

    fn stress_inputs(&self) -> &'static [&'static str] {
        &["current_ratio"]
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        parts_count_prediction(&COUNT, &PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let lambda_b = lookup(&LAMBDA_B, attributes.construction_id, "switch construction")?;
        let pi_cyc = attributes.n_cycles.max(1.0);
        let pi_l = load_factor(attributes)?;
        let pi_c = lookup(&PI_C, attributes.contact_form_id, "contact form")?;
        let pi_q = lookup(&PI_Q, attributes.quality_id, "quality")?;
        let pi_e = by_environment(&PI_E, attributes, "switch piE")?;

        Prediction::new("lambdab * piCYC * piL * piC * piQ * piE")
            .base(lambda_b)
            .factor("piCYC", pi_cyc)
            .factor("piL", pi_l)
            .factor("piC", pi_c)
            .factor("piQ", pi_q)
            .factor("piE", pi_e)
            .finish_product()
    }
}

//! Variable capacitors (MIL-HDBK-217F section 10)
//!
//! Base rates use the voltage stress ratio `(Vdc + Vac) / Vrated` and the
//! ambient temperature relative to the rated-temperature class.

use super::{by_environment, lookup, parts_count_prediction, HazardRateModel, Prediction};
use crate::error::PredictError;
use relia_domain::{ComponentAttributes, Environment};

/// Rated-temperature class (K) matching the item's maximum rated temperature
fn reference_temperature(classes: &[f64], rated_max: f64) -> f64 {
    let first = classes.first().copied().unwrap_or(358.0);
    if rated_max == 0.0 {
        return first;
    }
    classes
        .iter()
        .copied()
        .find(|class| *class >= rated_max + 273.0)
        .or_else(|| classes.last().copied())
        .unwrap_or(first)
}

/// Shape of a capacitor base-rate curve
struct Curve {
    scale: f64,
    stress_knee: f64,
    thermal: f64,
    thermal_exponent: f64,
    classes: &'static [f64],
}

impl Curve {
    fn lambda_b(&self, attributes: &ComponentAttributes) -> f64 {
        let reference = reference_temperature(self.classes, attributes.temperature_rated_max);
        let stress = (attributes.voltage_ratio / self.stress_knee).powi(3) + 1.0;
        let thermal = ((attributes.temperature_active + 273.0) / reference).powf(self.thermal_exponent);
        self.scale * stress * (self.thermal * thermal).exp()
    }
}

fn capacitor_stress(
    attributes: &ComponentAttributes,
    curve: &Curve,
    pi_q_table: &[f64],
    pi_e_table: &[f64; Environment::COUNT],
) -> Result<Prediction, PredictError> {
    let pi_q = lookup(pi_q_table, attributes.quality_id, "quality")?;
    let pi_e = by_environment(pi_e_table, attributes, "capacitor piE")?;
    Prediction::new("lambdab * piQ * piE")
        .base(curve.lambda_b(attributes))
        .factor("piQ", pi_q)
        .factor("piE", pi_e)
        .finish_product()
}

/// Variable ceramic capacitors (CV)
pub struct VariableCeramic;

const CERAMIC: Curve = Curve {
    scale: 0.00224,
    stress_knee: 0.17,
    thermal: 1.59,
    thermal_exponent: 10.1,
    classes: &[358.0, 398.0],
};
const CERAMIC_PI_Q: [f64; 2] = [4.0, 20.0];
const CERAMIC_PI_E: [f64; Environment::COUNT] = [
    1.0, 3.0, 13.0, 8.0, 24.0, 6.0, 10.0, 37.0, 70.0, 36.0, 0.4, 20.0, 52.0, 950.0,
];
const CERAMIC_COUNT: [f64; Environment::COUNT] = [
    0.08, 0.27, 1.2, 0.71, 2.3, 0.69, 1.1, 6.2, 12.0, 4.1, 0.032, 1.9, 5.9, 85.0,
];

impl HazardRateModel for VariableCeramic {
    fn name(&self) -> &'static str {
        "Variable Ceramic"
    }

    fn stress_inputs(&self) -> &'static [&'static str] {
        &["voltage_ratio"]
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        parts_count_prediction(&CERAMIC_COUNT, &CERAMIC_PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        capacitor_stress(attributes, &CERAMIC, &CERAMIC_PI_Q, &CERAMIC_PI_E)
    }
}

/// Variable piston capacitors (PC)
pub struct VariablePiston;

const PISTON: Curve = Curve {
    scale: 7.3e-7,
    stress_knee: 0.33,
    thermal: 12.1,
    thermal_exponent: 1.0,
    classes: &[398.0, 423.0],
};
const PISTON_PI_Q: [f64; 2] = [3.0, 10.0];
const PISTON_PI_E: [f64; Environment::COUNT] = [
    1.0, 3.0, 12.0, 7.0, 18.0, 3.0, 4.0, 20.0, 30.0, 32.0, 0.5, 18.0, 46.0, 830.0,
];
const PISTON_COUNT: [f64; Environment::COUNT] = [
    0.033, 0.13, 0.62, 0.31, 0.93, 0.21, 0.28, 2.2, 3.3, 2.2, 0.16, 0.93, 3.2, 37.0,
];

impl HazardRateModel for VariablePiston {
    fn name(&self) -> &'static str {
        "Variable Piston"
    }

    fn stress_inputs(&self) -> &'static [&'static str] {
        &["voltage_ratio"]
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        parts_count_prediction(&PISTON_COUNT, &PISTON_PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        capacitor_stress(attributes, &PISTON, &PISTON_PI_Q, &PISTON_PI_E)
    }
}

/// Air trimmer capacitors (CT)
pub struct AirTrimmer;

const AIR_TRIMMER: Curve = Curve {
    scale: 1.92e-6,
    stress_knee: 0.33,
    thermal: 10.8,
    thermal_exponent: 1.0,
    classes: &[358.0],
};
const AIR_TRIMMER_PI_Q: [f64; 2] = [5.0, 20.0];
const AIR_TRIMMER_PI_E: [f64; Environment::COUNT] = [
    1.0, 3.0, 13.0, 8.0, 24.0, 6.0, 10.0, 37.0, 70.0, 36.0, 0.5, 20.0, 52.0, 950.0,
];
const AIR_TRIMMER_COUNT: [f64; Environment::COUNT] = [
    0.80, 0.33, 1.6, 0.87, 3.0, 1.0, 1.7, 9.9, 19.0, 8.1, 0.032, 2.5, 8.9, 100.0,
];

impl HazardRateModel for AirTrimmer {
    fn name(&self) -> &'static str {
        "Air Trimmer"
    }

    fn stress_inputs(&self) -> &'static [&'static str] {
        &["voltage_ratio"]
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        parts_count_prediction(&AIR_TRIMMER_COUNT, &AIR_TRIMMER_PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        capacitor_stress(attributes, &AIR_TRIMMER, &AIR_TRIMMER_PI_Q, &AIR_TRIMMER_PI_E)
    }
}

/// Vacuum or gas capacitors (CG); configuration 1 fixed, 2 variable
pub struct Vacuum;

const VACUUM: Curve = Curve {
    scale: 0.0112,
    stress_knee: 0.17,
    thermal: 1.59,
    thermal_exponent: 10.1,
    classes: &[358.0, 373.0, 398.0],
};
const VACUUM_PI_CF: [f64; 2] = [0.1, 1.0];
const VACUUM_PI_Q: [f64; 2] = [3.0, 20.0];
const VACUUM_PI_E: [f64; Environment::COUNT] = [
    1.0, 3.0, 14.0, 8.0, 27.0, 10.0, 18.0, 70.0, 108.0, 40.0, 0.5, 0.0, 0.0, 0.0,
];
const VACUUM_COUNT: [f64; Environment::COUNT] = [
    0.4, 1.3, 6.8, 3.6, 13.0, 5.7, 10.0, 58.0, 90.0, 23.0, 20.0, 0.0, 0.0, 0.0,
];

impl HazardRateModel for Vacuum {
    fn name(&self) -> &'static str {
        "Vacuum"
    }

    fn stress_inputs(&self) -> &'static [&'static str] {
        &["voltage_ratio"]
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        parts_count_prediction(&VACUUM_COUNT, &VACUUM_PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let pi_cf = lookup(&VACUUM_PI_CF, attributes.configuration_id, "capacitor configuration")?;
        let prediction = capacitor_stress(attributes, &VACUUM, &VACUUM_PI_Q, &VACUUM_PI_E)?;
        Prediction {
            equation: "lambdab * piCF * piQ * piE".to_string(),
            ..prediction
        }
        .factor("piCF", pi_cf)
        .finish_product()
    }
}

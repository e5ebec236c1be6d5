//! Microcircuits (MIL-HDBK-217F section 5)
//!
//! Every family shares `λp = (C1·πT + C2·πE)·πQ·πL`; they differ in the
//! die-complexity constant C1 and the activation energy used by πT.

use super::{
    arrhenius, bucket, by_environment, junction_temperature, lookup, parts_count_prediction,
    HazardRateModel, Prediction,
};
use crate::error::PredictError;
use relia_domain::{ComponentAttributes, Environment};

const PI_E: [f64; Environment::COUNT] = [
    1.0, 6.0, 12.0, 5.0, 16.0, 6.0, 8.0, 7.0, 9.0, 24.0, 0.5, 13.0, 34.0, 610.0,
];
const PI_Q: [f64; 3] = [0.25, 1.0, 2.0];

/// Reference temperature of the πT curve (K)
const REFERENCE_K: f64 = 296.0;

const EQUATION: &str = "(C1 * piT + C2 * piE) * piQ * piL";

/// Package failure rate constant from pin count and package style
fn package_factor(attributes: &ComponentAttributes) -> f64 {
    let (scale, exponent) = match attributes.package_id {
        1..=3 => (2.8e-4, 1.08),
        4 => (9.0e-5, 1.51),
        5 => (3.0e-5, 1.82),
        6 => (3.0e-5, 2.01),
        _ => (3.6e-4, 1.08),
    };
    scale * f64::from(attributes.n_pins).powf(exponent)
}

/// Learning factor from years in production
fn learning_factor(years: f64) -> f64 {
    0.01 * (5.35 - 0.35 * years).exp()
}

/// Shared part-stress evaluation once C1 and Ea are known
fn microcircuit_stress(
    attributes: &ComponentAttributes,
    c1: f64,
    activation_energy: f64,
) -> Result<Prediction, PredictError> {
    let pi_e = by_environment(&PI_E, attributes, "microcircuit piE")?;
    let pi_q = lookup(&PI_Q, attributes.quality_id, "quality")?;
    let tj = junction_temperature(attributes);
    let pi_t = 0.1 * arrhenius(activation_energy, tj, REFERENCE_K);
    let c2 = package_factor(attributes);
    let pi_l = learning_factor(attributes.years_production);

    Prediction::new(EQUATION)
        .base(c1)
        .factor("C1", c1)
        .factor("piT", pi_t)
        .factor("C2", c2)
        .factor("piE", pi_e)
        .factor("piQ", pi_q)
        .factor("piL", pi_l)
        .junction(tj)
        .finish((c1 * pi_t + c2 * pi_e) * pi_q * pi_l)
}

fn technology_row<'a, T>(rows: &'a [T], attributes: &ComponentAttributes) -> Result<&'a T, PredictError> {
    if attributes.technology_id == 0 {
        return Err(PredictError::invalid("technology ID is not set"));
    }
    rows.get(usize::from(attributes.technology_id) - 1)
        .ok_or_else(|| PredictError::invalid(format!("technology ID {} is outside 1..={}", attributes.technology_id, rows.len())))
}

/// Linear (analog) microcircuits, complexity in transistors
pub struct Linear;

const LINEAR_BOUNDS: [f64; 4] = [100.0, 300.0, 1000.0, 10000.0];
const LINEAR_C1: [f64; 4] = [0.01, 0.02, 0.04, 0.06];
const LINEAR_COUNT: [[f64; Environment::COUNT]; 4] = [
    [0.0095, 0.024, 0.039, 0.034, 0.049, 0.057, 0.062, 0.11, 0.13, 0.079, 0.0068, 0.052, 0.11, 2.3],
    [0.017, 0.041, 0.065, 0.054, 0.078, 0.093, 0.10, 0.17, 0.21, 0.12, 0.013, 0.083, 0.17, 3.4],
    [0.033, 0.074, 0.11, 0.093, 0.13, 0.16, 0.18, 0.29, 0.35, 0.21, 0.026, 0.14, 0.29, 5.5],
    [0.050, 0.12, 0.18, 0.15, 0.22, 0.26, 0.29, 0.48, 0.57, 0.33, 0.039, 0.23, 0.47, 8.9],
];

impl HazardRateModel for Linear {
    fn name(&self) -> &'static str {
        "Linear"
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let index = bucket(&LINEAR_BOUNDS, f64::from(attributes.n_gates), "transistor count")?;
        parts_count_prediction(&LINEAR_COUNT[index], &PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let index = bucket(&LINEAR_BOUNDS, f64::from(attributes.n_gates), "transistor count")?;
        microcircuit_stress(attributes, LINEAR_C1[index], 0.65)
    }
}

/// Digital gate-array logic, bipolar (technology 1) or MOS (technology 2)
pub struct Logic;

const LOGIC_BOUNDS: [f64; 6] = [100.0, 1000.0, 3000.0, 10000.0, 30000.0, 60000.0];
const LOGIC_C1: [[f64; 6]; 2] = [
    [0.0025, 0.005, 0.01, 0.02, 0.04, 0.08],
    [0.01, 0.02, 0.04, 0.08, 0.16, 0.29],
];
const LOGIC_EA: [f64; 2] = [0.4, 0.35];
const LOGIC_COUNT_BOUNDS: [f64; 3] = [1000.0, 10000.0, 60000.0];
const LOGIC_COUNT: [[[f64; Environment::COUNT]; 3]; 2] = [
    [
        [0.0036, 0.012, 0.024, 0.024, 0.035, 0.025, 0.030, 0.032, 0.049, 0.047, 0.0036, 0.030, 0.069, 1.2],
        [0.0060, 0.020, 0.038, 0.037, 0.055, 0.039, 0.048, 0.051, 0.077, 0.074, 0.0060, 0.046, 0.10, 1.7],
        [0.011, 0.035, 0.066, 0.065, 0.097, 0.070, 0.085, 0.091, 0.14, 0.13, 0.011, 0.082, 0.18, 2.9],
    ],
    [
        [0.010, 0.028, 0.050, 0.046, 0.067, 0.062, 0.070, 0.089, 0.12, 0.10, 0.010, 0.058, 0.13, 2.3],
        [0.017, 0.047, 0.081, 0.075, 0.11, 0.10, 0.11, 0.14, 0.19, 0.16, 0.017, 0.094, 0.21, 3.6],
        [0.033, 0.088, 0.15, 0.14, 0.20, 0.19, 0.22, 0.28, 0.37, 0.31, 0.033, 0.18, 0.39, 6.6],
    ],
];

impl HazardRateModel for Logic {
    fn name(&self) -> &'static str {
        "Logic"
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let rows = technology_row(&LOGIC_COUNT, attributes)?;
        let index = bucket(&LOGIC_COUNT_BOUNDS, f64::from(attributes.n_gates), "gate count")?;
        parts_count_prediction(&rows[index], &PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let c1_row = technology_row(&LOGIC_C1, attributes)?;
        let ea = *technology_row(&LOGIC_EA, attributes)?;
        let index = bucket(&LOGIC_BOUNDS, f64::from(attributes.n_gates), "gate count")?;
        microcircuit_stress(attributes, c1_row[index], ea)
    }
}

/// Programmable array logic, bipolar (technology 1) or MOS (technology 2)
pub struct PalPla;

const PAL_BOUNDS: [&[f64]; 2] = [&[200.0, 1000.0, 5000.0], &[500.0, 1000.0, 5000.0, 20000.0]];
const PAL_C1: [&[f64]; 2] = [&[0.01, 0.021, 0.042], &[0.00085, 0.0017, 0.0034, 0.0068]];
const PAL_COUNT: [&[[f64; Environment::COUNT]]; 2] = [
    &[
        [0.0061, 0.016, 0.029, 0.027, 0.040, 0.032, 0.037, 0.044, 0.061, 0.054, 0.0061, 0.034, 0.076, 1.2],
        [0.0110, 0.028, 0.048, 0.046, 0.065, 0.054, 0.063, 0.077, 0.100, 0.089, 0.0110, 0.057, 0.120, 1.9],
        [0.0220, 0.052, 0.087, 0.082, 0.120, 0.099, 0.110, 0.140, 0.190, 0.160, 0.0220, 0.100, 0.220, 3.3],
    ],
    &[
        [0.0046, 0.018, 0.035, 0.035, 0.052, 0.035, 0.044, 0.044, 0.070, 0.070, 0.0046, 0.044, 0.100, 1.9],
        [0.0056, 0.021, 0.042, 0.042, 0.062, 0.042, 0.052, 0.053, 0.084, 0.083, 0.0056, 0.052, 0.120, 2.3],
        [0.0061, 0.022, 0.043, 0.042, 0.063, 0.043, 0.054, 0.055, 0.086, 0.084, 0.0081, 0.053, 0.130, 2.3],
        [0.0095, 0.033, 0.064, 0.063, 0.094, 0.065, 0.080, 0.083, 0.130, 0.130, 0.0095, 0.079, 0.190, 3.3],
    ],
];

impl HazardRateModel for PalPla {
    fn name(&self) -> &'static str {
        "PAL/PLA"
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let bounds = technology_row(&PAL_BOUNDS, attributes)?;
        let rows = technology_row(&PAL_COUNT, attributes)?;
        let index = bucket(bounds, f64::from(attributes.n_gates), "gate count")?;
        parts_count_prediction(&rows[index], &PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let bounds = technology_row(&PAL_BOUNDS, attributes)?;
        let c1 = technology_row(&PAL_C1, attributes)?;
        let index = bucket(bounds, f64::from(attributes.n_gates), "gate count")?;
        microcircuit_stress(attributes, c1[index], 0.65)
    }
}

/// Microprocessors, complexity in bits, bipolar or MOS
pub struct Microprocessor;

const MICRO_BOUNDS: [f64; 3] = [8.0, 16.0, 32.0];
const MICRO_C1: [[f64; 3]; 2] = [[0.06, 0.12, 0.24], [0.14, 0.28, 0.56]];
const MICRO_EA: [f64; 2] = [0.4, 0.35];
const MICRO_COUNT: [[[f64; Environment::COUNT]; 3]; 2] = [
    [
        [0.028, 0.061, 0.098, 0.091, 0.13, 0.12, 0.13, 0.17, 0.22, 0.18, 0.028, 0.11, 0.24, 3.3],
        [0.052, 0.11, 0.18, 0.16, 0.23, 0.21, 0.24, 0.32, 0.39, 0.31, 0.052, 0.20, 0.41, 5.6],
        [0.11, 0.23, 0.34, 0.30, 0.42, 0.37, 0.41, 0.55, 0.68, 0.55, 0.11, 0.34, 0.70, 9.6],
    ],
    [
        [0.048, 0.089, 0.13, 0.12, 0.16, 0.16, 0.17, 0.24, 0.28, 0.22, 0.048, 0.15, 0.28, 3.4],
        [0.093, 0.17, 0.24, 0.22, 0.28, 0.28, 0.30, 0.43, 0.51, 0.38, 0.093, 0.26, 0.48, 5.6],
        [0.19, 0.34, 0.47, 0.44, 0.55, 0.56, 0.59, 0.85, 1.0, 0.74, 0.19, 0.51, 0.93, 10.0],
    ],
];

impl HazardRateModel for Microprocessor {
    fn name(&self) -> &'static str {
        "Microprocessor"
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let rows = technology_row(&MICRO_COUNT, attributes)?;
        let index = bucket(&MICRO_BOUNDS, f64::from(attributes.n_gates), "bit width")?;
        parts_count_prediction(&rows[index], &PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let c1_row = technology_row(&MICRO_C1, attributes)?;
        let ea = *technology_row(&MICRO_EA, attributes)?;
        let index = bucket(&MICRO_BOUNDS, f64::from(attributes.n_gates), "bit width")?;
        microcircuit_stress(attributes, c1_row[index], ea)
    }
}

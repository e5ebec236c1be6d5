//! Inductive devices (MIL-HDBK-217F section 11)

use super::{by_environment, lookup, parts_count_prediction, HazardRateModel, Prediction};
use crate::error::PredictError;
use relia_domain::{ComponentAttributes, Environment};

/// `(C, P)` of `exp(((THS + 273) / C)^P)` per insulation class
const INSULATION: [(f64, f64); 6] = [
    (329.0, 15.6),
    (352.0, 14.0),
    (364.0, 8.7),
    (409.0, 10.0),
    (398.0, 3.8),
    (477.0, 8.4),
];

/// Hot-spot temperature: ambient plus 1.1 × the rise
pub fn hot_spot(attributes: &ComponentAttributes) -> f64 {
    attributes.temperature_active + 1.1 * attributes.temperature_rise
}

fn insulation_curve(attributes: &ComponentAttributes, scale: f64) -> Result<(f64, f64), PredictError> {
    let id = attributes.insulation_id;
    if id == 0 || usize::from(id) > INSULATION.len() {
        return Err(PredictError::invalid(format!(
            "insulation class ID {} is outside 1..={}",
            id,
            INSULATION.len()
        )));
    }
    let (c, p) = INSULATION[usize::from(id) - 1];
    let ths = hot_spot(attributes);
    Ok((scale * ((ths + 273.0) / c).powf(p).exp(), ths))
}

/// Transformers (audio, power, RF, pulse)
pub struct Transformer;

const TRANSFORMER_PI_Q: [f64; 2] = [1.5, 5.0];
const TRANSFORMER_PI_E: [f64; Environment::COUNT] = [
    1.0, 6.0, 12.0, 5.0, 16.0, 6.0, 8.0, 7.0, 9.0, 24.0, 0.5, 13.0, 34.0, 610.0,
];
const TRANSFORMER_COUNT: [f64; Environment::COUNT] = [
    0.0035, 0.023, 0.049, 0.019, 0.065, 0.027, 0.037, 0.041, 0.052, 0.11, 0.0018, 0.053, 0.16, 2.3,
];

impl HazardRateModel for Transformer {
    fn name(&self) -> &'static str {
        "Transformer"
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        parts_count_prediction(&TRANSFORMER_COUNT, &TRANSFORMER_PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let (lambda_b, ths) = insulation_curve(attributes, 0.0018)?;
        let pi_q = lookup(&TRANSFORMER_PI_Q, attributes.quality_id, "quality")?;
        let pi_e = by_environment(&TRANSFORMER_PI_E, attributes, "transformer piE")?;
        Prediction::new("lambdab * piQ * piE")
            .base(lambda_b)
            .factor("piQ", pi_q)
            .factor("piE", pi_e)
            .junction(ths)
            .finish_product()
    }
}

/// Coils and chokes; construction 1 fixed, 2 variable
pub struct Coil;

const COIL_PI_C: [f64; 2] = [1.0, 2.0];
const COIL_PI_Q: [f64; 6] = [0.03, 0.1, 0.3, 1.0, 4.0, 20.0];
const COIL_PI_E: [f64; Environment::COUNT] = [
    1.0, 4.0, 12.0, 5.0, 16.0, 5.0, 7.0, 6.0, 8.0, 24.0, 0.5, 13.0, 34.0, 610.0,
];
const COIL_COUNT: [f64; Environment::COUNT] = [
    0.0017, 0.0073, 0.023, 0.0091, 0.031, 0.011, 0.015, 0.016, 0.022, 0.052, 0.00083, 0.25, 0.073, 1.1,
];

impl HazardRateModel for Coil {
    fn name(&self) -> &'static str {
        "Coil"
    }

    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        parts_count_prediction(&COIL_COUNT, &COIL_PI_Q, attributes)
    }

    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
        let (lambda_b, ths) = insulation_curve(attributes, 0.000335)?;
        let pi_c = lookup(&COIL_PI_C, attributes.construction_id, "coil construction")?;
        let pi_q = lookup(&COIL_PI_Q, attributes.quality_id, "quality")?;
        let pi_e = by_environment(&COIL_PI_E, attributes, "coil piE")?;
        Prediction::new("lambdab * piC * piQ * piE")
            .base(lambda_b)
            .factor("piC", pi_c)
            .factor("piQ", pi_q)
            .factor("piE", pi_e)
            .junction(ths)
            .finish_product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inductor(subcategory_id: u8) -> ComponentAttributes {
        let mut attrs = ComponentAttributes::new_part(6, 5, subcategory_id);
        attrs.insulation_id = 1;
        attrs.construction_id = 1;
        attrs.quality_id = 1;
        attrs.environment_active_id = 1;
        attrs.temperature_active = 40.0;
        attrs.temperature_rise = 10.0;
        attrs
    }

    #[test]
    fn test_hot_spot() {
        assert!((hot_spot(&inductor(1)) - 51.0).abs() < 1e-12);
    }

    #[test]
    fn test_transformer_part_stress() {
        let prediction = Transformer.part_stress(&inductor(1)).unwrap();
        let lambda_b = 0.0018 * (324.0f64 / 329.0).powf(15.6).exp();
        assert!((prediction.lambda_b - lambda_b).abs() < 1e-12);
        assert!((prediction.hazard_rate - lambda_b * 1.5).abs() < 1e-12);
        assert!((prediction.temperature_junction.unwrap() - 51.0).abs() < 1e-12);
    }

    #[test]
    fn test_coil_variable_construction_doubles() {
        let mut attrs = inductor(2);
        let fixed = Coil.part_stress(&attrs).unwrap();
        attrs.construction_id = 2;
        let variable = Coil.part_stress(&attrs).unwrap();
        assert!((variable.hazard_rate - 2.0 * fixed.hazard_rate).abs() < 1e-15);
    }

    #[test]
    fn test_unknown_insulation() {
        let mut attrs = inductor(1);
        attrs.insulation_id = 7;
        assert!(Transformer.part_stress(&attrs).is_err());
    }
}

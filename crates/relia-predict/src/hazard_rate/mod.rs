//! MIL-HDBK-217F hazard rate models
//!
//! Each part family is a strategy object implementing [`HazardRateModel`].
//! The registry maps `(category_id, subcategory_id)` to its strategy; the
//! item's prediction method then selects `parts_count` or `part_stress`.
//!
//! Models return rates in failures per 10^6 hours, the unit of every
//! handbook table.

mod capacitor;
mod inductor;
mod integrated_circuit;
mod relay;
mod resistor;
mod semiconductor;
mod switch;

use crate::config::PredictionConfig;
use crate::error::PredictError;
use relia_domain::{ComponentAttributes, Environment, PredictionMethod};
use std::collections::BTreeMap;
use tracing::debug;

/// Boltzmann's constant (eV/K)
pub(crate) const BOLTZMANN: f64 = 8.617e-5;

/// Result of one model evaluation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Prediction {
    /// Predicted hazard rate (failures per 10^6 hours)
    pub hazard_rate: f64,
    /// Base hazard rate
    pub lambda_b: f64,
    /// Every π-factor and constant used, keyed by name
    pub pi_factors: BTreeMap<String, f64>,
    /// Equation evaluated
    pub equation: String,
    /// Junction temperature, for models that derive one (°C)
    pub temperature_junction: Option<f64>,
}

impl Prediction {
    pub(crate) fn new(equation: &str) -> Self {
        Self {
            equation: equation.to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn base(mut self, lambda_b: f64) -> Self {
        self.lambda_b = lambda_b;
        self
    }

    pub(crate) fn factor(mut self, name: &str, value: f64) -> Self {
        self.pi_factors.insert(name.to_string(), value);
        self
    }

    pub(crate) fn junction(mut self, temperature: f64) -> Self {
        self.temperature_junction = Some(temperature);
        self
    }

    /// Store the rate after checking it is finite and non-negative
    pub(crate) fn finish(mut self, hazard_rate: f64) -> Result<Self, PredictError> {
        if !hazard_rate.is_finite() {
            return Err(PredictError::arithmetic(
                "hazard_rate_active",
                format!("{} evaluated to a non-finite value", self.equation),
            ));
        }
        if hazard_rate < 0.0 {
            return Err(PredictError::arithmetic(
                "hazard_rate_active",
                format!("{} evaluated to a negative rate", self.equation),
            ));
        }
        self.hazard_rate = hazard_rate;
        Ok(self)
    }

    /// λb times every recorded factor
    pub(crate) fn finish_product(self) -> Result<Self, PredictError> {
        let rate = self.pi_factors.values().fold(self.lambda_b, |acc, v| acc * v);
        self.finish(rate)
    }
}

/// One part family's prediction equations
pub trait HazardRateModel: Send + Sync {
    /// Family name
    fn name(&self) -> &'static str;

    /// Parts-count prediction: tabulated base rate × quality factor
    fn parts_count(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError>;

    /// Part-stress prediction from live operating conditions
    fn part_stress(&self, attributes: &ComponentAttributes) -> Result<Prediction, PredictError>;

    /// Stored stress ratio fields that `part_stress` reads
    fn stress_inputs(&self) -> &'static [&'static str] {
        &[]
    }
}

struct ModelEntry {
    category_id: u8,
    subcategory_id: u8,
    model: &'static dyn HazardRateModel,
}

static REGISTRY: [ModelEntry; 16] = [
    ModelEntry { category_id: 1, subcategory_id: 1, model: &integrated_circuit::Linear },
    ModelEntry { category_id: 1, subcategory_id: 2, model: &integrated_circuit::Logic },
    ModelEntry { category_id: 1, subcategory_id: 3, model: &integrated_circuit::PalPla },
    ModelEntry { category_id: 1, subcategory_id: 4, model: &integrated_circuit::Microprocessor },
    ModelEntry { category_id: 2, subcategory_id: 1, model: &semiconductor::LowFrequencyDiode },
    ModelEntry { category_id: 3, subcategory_id: 1, model: &resistor::Composition },
    ModelEntry { category_id: 3, subcategory_id: 2, model: &resistor::Film },
    ModelEntry { category_id: 3, subcategory_id: 3, model: &resistor::VariableNonWirewound },
    ModelEntry { category_id: 4, subcategory_id: 1, model: &capacitor::VariableCeramic },
    ModelEntry { category_id: 4, subcategory_id: 2, model: &capacitor::VariablePiston },
    ModelEntry { category_id: 4, subcategory_id: 3, model: &capacitor::AirTrimmer },
    ModelEntry { category_id: 4, subcategory_id: 4, model: &capacitor::Vacuum },
    ModelEntry { category_id: 5, subcategory_id: 1, model: &inductor::Transformer },
    ModelEntry { category_id: 5, subcategory_id: 2, model: &inductor::Coil },
    ModelEntry { category_id: 6, subcategory_id: 1, model: &relay::Mechanical },
    ModelEntry { category_id: 7, subcategory_id: 1, model: &switch::Toggle },
];

/// Strategy for a category/subcategory pair
pub fn model_for(
    category_id: u8,
    subcategory_id: u8,
) -> Result<&'static dyn HazardRateModel, PredictError> {
    REGISTRY
        .iter()
        .find(|entry| entry.category_id == category_id && entry.subcategory_id == subcategory_id)
        .map(|entry| entry.model)
        .ok_or_else(|| {
            PredictError::invalid(format!(
                "no hazard rate model for category {} subcategory {}",
                category_id, subcategory_id
            ))
        })
}

/// Every supported `(category_id, subcategory_id, family name)`
pub fn supported_models() -> impl Iterator<Item = (u8, u8, &'static str)> {
    REGISTRY
        .iter()
        .map(|entry| (entry.category_id, entry.subcategory_id, entry.model.name()))
}

/// Dispatch on `(category, subcategory, method)` and evaluate the model
pub fn predict(attributes: &ComponentAttributes) -> Result<Prediction, PredictError> {
    let model = model_for(attributes.category_id, attributes.subcategory_id)?;
    let method = attributes.prediction_method().ok_or_else(|| {
        PredictError::invalid(format!(
            "hazard rate method ID {} is neither parts count (1) nor part stress (2)",
            attributes.hazard_rate_method_id
        ))
    })?;
    let prediction = match method {
        PredictionMethod::PartsCount => model.parts_count(attributes)?,
        PredictionMethod::PartStress => model.part_stress(attributes)?,
    };
    debug!(
        hardware_id = attributes.hardware_id,
        model = model.name(),
        method = ?method,
        hazard_rate = prediction.hazard_rate,
        "hazard rate predicted"
    );
    Ok(prediction)
}

/// Predict the active hazard rate and record the model's working values
///
/// The returned copy carries `hazard_rate_active` in failures per hour
/// (model output divided by the configured multiplier), λb, the π-factors
/// and the equation. On error the input is untouched.
pub fn calculate_hazard_rate(
    attributes: &ComponentAttributes,
    config: &PredictionConfig,
) -> Result<ComponentAttributes, PredictError> {
    let prediction = predict(attributes)?;
    let hazard_rate_active = prediction.hazard_rate / config.hr_multiplier;
    if !hazard_rate_active.is_finite() {
        return Err(PredictError::arithmetic(
            "hazard_rate_active",
            "unit conversion produced a non-finite value",
        ));
    }
    Ok(ComponentAttributes {
        hazard_rate_active,
        lambda_b: prediction.lambda_b,
        pi_factors: prediction.pi_factors,
        hazard_rate_model: prediction.equation,
        temperature_junction: prediction
            .temperature_junction
            .unwrap_or(attributes.temperature_junction),
        ..attributes.clone()
    })
}

/// Value at a 1-based position of a handbook table
pub(crate) fn lookup(table: &[f64], id: u8, what: &str) -> Result<f64, PredictError> {
    if id == 0 {
        return Err(PredictError::invalid(format!("{} ID is not set", what)));
    }
    table.get(usize::from(id) - 1).copied().ok_or_else(|| {
        PredictError::invalid(format!(
            "{} ID {} is outside 1..={}",
            what,
            id,
            table.len()
        ))
    })
}

/// Active environment of an item
pub(crate) fn environment(attributes: &ComponentAttributes) -> Result<Environment, PredictError> {
    attributes.environment_active().ok_or_else(|| {
        PredictError::invalid(format!(
            "environment ID {} is not a known active environment",
            attributes.environment_active_id
        ))
    })
}

/// Environment-indexed value; a zero entry means the family is not rated there
pub(crate) fn by_environment(
    table: &[f64; Environment::COUNT],
    attributes: &ComponentAttributes,
    what: &str,
) -> Result<f64, PredictError> {
    let env = environment(attributes)?;
    let value = table[env.index()];
    if value == 0.0 {
        return Err(PredictError::invalid(format!(
            "{} has no value for environment {}",
            what, env
        )));
    }
    Ok(value)
}

/// Parts-count prediction shared by every family: `λb(env) × πQ`
pub(crate) fn parts_count_prediction(
    lambda_b: &[f64; Environment::COUNT],
    pi_q: &[f64],
    attributes: &ComponentAttributes,
) -> Result<Prediction, PredictError> {
    let base = by_environment(lambda_b, attributes, "parts count base rate")?;
    let quality = lookup(pi_q, attributes.quality_id, "quality")?;
    Prediction::new("lambdab * piQ")
        .base(base)
        .factor("piQ", quality)
        .finish_product()
}

/// Junction temperature: case + power × θjc, falling back to a supplied
/// junction temperature, then to ambient
pub(crate) fn junction_temperature(attributes: &ComponentAttributes) -> f64 {
    let rise = attributes.power_operating * attributes.thermal_resistance;
    if attributes.temperature_case > 0.0 {
        attributes.temperature_case + rise
    } else if attributes.temperature_junction > 0.0 {
        attributes.temperature_junction
    } else {
        attributes.temperature_active + rise
    }
}

/// Arrhenius temperature factor relative to `reference` kelvin
pub(crate) fn arrhenius(activation_energy: f64, temperature_c: f64, reference_k: f64) -> f64 {
    (-activation_energy / BOLTZMANN * (1.0 / (temperature_c + 273.0) - 1.0 / reference_k)).exp()
}

/// Index of the first bucket whose upper bound holds `value`
pub(crate) fn bucket(bounds: &[f64], value: f64, what: &str) -> Result<usize, PredictError> {
    bounds
        .iter()
        .position(|upper| value <= *upper)
        .ok_or_else(|| PredictError::invalid(format!("{} of {} is above the modelled range", what, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_families() {
        assert_eq!(supported_models().count(), 16);
        assert_eq!(model_for(1, 3).unwrap().name(), "PAL/PLA");
        assert!(model_for(9, 1).is_err());
        assert!(model_for(1, 9).is_err());
    }

    #[test]
    fn test_lookup_is_one_based() {
        let table = [0.25, 1.0, 2.0];
        assert_eq!(lookup(&table, 1, "quality").unwrap(), 0.25);
        assert_eq!(lookup(&table, 3, "quality").unwrap(), 2.0);
        assert!(lookup(&table, 0, "quality").is_err());
        assert!(lookup(&table, 4, "quality").is_err());
    }

    #[test]
    fn test_bucket() {
        let bounds = [200.0, 1000.0, 5000.0];
        assert_eq!(bucket(&bounds, 150.0, "gates").unwrap(), 0);
        assert_eq!(bucket(&bounds, 200.0, "gates").unwrap(), 0);
        assert_eq!(bucket(&bounds, 201.0, "gates").unwrap(), 1);
        assert!(bucket(&bounds, 5001.0, "gates").is_err());
    }

    #[test]
    fn test_unknown_method_is_invalid() {
        let mut attrs = ComponentAttributes::new_part(1, 7, 1);
        attrs.hazard_rate_method_id = 3;
        attrs.environment_active_id = 1;
        attrs.quality_id = 1;
        assert!(matches!(predict(&attrs), Err(PredictError::InvalidInput(_))));
    }

    #[test]
    fn test_non_finite_rate_rejected() {
        let err = Prediction::new("x").finish(f64::INFINITY).unwrap_err();
        assert!(matches!(err, PredictError::Arithmetic { .. }));
        assert!(Prediction::new("x").finish(f64::NAN).is_err());
    }

    #[test]
    fn test_calculate_converts_units() {
        let mut attrs = ComponentAttributes::new_part(1, 7, 1);
        attrs.environment_active_id = 1;
        attrs.quality_id = 1;
        let config = PredictionConfig::default();
        let prediction = predict(&attrs).unwrap();
        let updated = calculate_hazard_rate(&attrs, &config).unwrap();
        assert!((updated.hazard_rate_active - prediction.hazard_rate / 1e6).abs() < 1e-18);
        assert_eq!(updated.hazard_rate_model, "lambdab * piQ");
        assert_eq!(updated.pi_factors.get("piQ"), Some(&1.0));
    }
}

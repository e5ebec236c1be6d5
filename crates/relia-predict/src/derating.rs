//! Overstress (derating) analysis

use crate::config::{PredictionConfig, StressKind, StressLimits};
use crate::error::PredictError;
use relia_domain::ComponentAttributes;
use tracing::debug;

/// Outcome of checking one item against its limit table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeratingResult {
    /// Whether any limit is violated
    pub overstress: bool,
    /// One numbered reason per violated limit, in check order
    pub reasons: Vec<String>,
}

impl DeratingResult {
    fn flag(&mut self, reason: String) {
        self.overstress = true;
        let number = self.reasons.len() + 1;
        self.reasons.push(format!("{}. {}", number, reason));
    }
}

/// Whether `value` strictly exceeds `limit`
pub fn check_overstress(value: f64, limit: f64) -> bool {
    value > limit
}

fn environment_word(harsh: bool) -> &'static str {
    if harsh {
        "harsh"
    } else {
        "mild"
    }
}

/// Check ratios and temperatures against a category's limits
///
/// Ratios are upper-bounded. The temperature margin
/// (`temperature_rated_max` minus the hot-spot temperature) is
/// lower-bounded and is only checked when a rated maximum is known. The
/// hot-spot temperature is upper-bounded.
pub fn check_limits(attributes: &ComponentAttributes, limits: &StressLimits, harsh: bool) -> DeratingResult {
    let mut result = DeratingResult::default();
    let env = environment_word(harsh);

    let ratios = [
        (StressKind::Current, "current", attributes.current_ratio),
        (StressKind::Power, "power", attributes.power_ratio),
        (StressKind::Voltage, "voltage", attributes.voltage_ratio),
    ];
    for (kind, name, ratio) in ratios {
        let limit = limits.threshold(kind, harsh);
        if check_overstress(ratio, limit) {
            result.flag(format!(
                "Operating {} > {:.0}% rated {} in a {} environment.",
                name,
                limit * 100.0,
                name,
                env
            ));
        }
    }

    let temperature = attributes.hot_spot_temperature();
    if attributes.temperature_rated_max > 0.0 {
        let margin = attributes.temperature_rated_max - temperature;
        let minimum = limits.threshold(StressKind::TemperatureMargin, harsh);
        if margin < minimum {
            result.flag(format!(
                "Temperature margin {:.1}°C < {:.1}°C minimum in a {} environment.",
                margin, minimum, env
            ));
        }
    }

    let maximum = limits.threshold(StressKind::MaxTemperature, harsh);
    if check_overstress(temperature, maximum) {
        result.flag(format!(
            "Operating temperature {:.1}°C > {:.1}°C limit in a {} environment.",
            temperature, maximum, env
        ));
    }

    result
}

/// Run the derating analysis for one item
///
/// The active environment selects the harsh or mild row. Returns a copy of
/// the attributes with `overstress` and `reason` replaced.
pub fn derate(
    attributes: &ComponentAttributes,
    config: &PredictionConfig,
) -> Result<ComponentAttributes, PredictError> {
    let environment = attributes.environment_active().ok_or_else(|| {
        PredictError::invalid(format!(
            "environment ID {} is not a known active environment",
            attributes.environment_active_id
        ))
    })?;
    let limits = config.limits_for(attributes.category_id).ok_or_else(|| {
        PredictError::invalid(format!(
            "no derating limits for category ID {}",
            attributes.category_id
        ))
    })?;

    let result = check_limits(attributes, limits, environment.is_harsh());
    debug!(
        hardware_id = attributes.hardware_id,
        environment = %environment,
        overstress = result.overstress,
        "derating analysis complete"
    );

    Ok(ComponentAttributes {
        overstress: result.overstress,
        reason: result.reasons,
        ..attributes.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switch(environment_id: u8, current_ratio: f64) -> ComponentAttributes {
        let mut attrs = ComponentAttributes::new_part(1, 7, 1);
        attrs.environment_active_id = environment_id;
        attrs.current_ratio = current_ratio;
        attrs
    }

    #[test]
    fn test_harsh_limit_is_strict() {
        let config = PredictionConfig::default();
        // Ground, Mobile is harsh; switch limit 0.75
        let at_limit = derate(&switch(3, 0.75), &config).unwrap();
        assert!(!at_limit.overstress);
        assert!(at_limit.reason.is_empty());

        let above = derate(&switch(3, 1.75), &config).unwrap();
        assert!(above.overstress);
        assert_eq!(above.reason.len(), 1);
        assert!(above.reason[0].starts_with("1. Operating current > 75% rated current"));
    }

    #[test]
    fn test_mild_row_applies_in_benign_ground() {
        let config = PredictionConfig::default();
        let result = derate(&switch(1, 0.85), &config).unwrap();
        assert!(!result.overstress);
        let result = derate(&switch(3, 0.85), &config).unwrap();
        assert!(result.overstress);
    }

    #[test]
    fn test_reasons_numbered_sequentially() {
        let config = PredictionConfig::default();
        let mut attrs = ComponentAttributes::new_part(2, 5, 1);
        attrs.environment_active_id = 5;
        attrs.current_ratio = 0.8;
        attrs.voltage_ratio = 0.95;
        attrs.temperature_active = 130.0;
        let result = derate(&attrs, &config).unwrap();
        assert!(result.overstress);
        assert_eq!(result.reason.len(), 3);
        assert!(result.reason[0].starts_with("1. Operating current"));
        assert!(result.reason[1].starts_with("2. Operating voltage"));
        assert!(result.reason[2].starts_with("3. Operating temperature"));
    }

    #[test]
    fn test_temperature_margin_lower_bound() {
        let config = PredictionConfig::default();
        let mut attrs = ComponentAttributes::new_part(3, 4, 1);
        attrs.environment_active_id = 3;
        attrs.temperature_active = 80.0;
        attrs.temperature_rated_max = 85.0;
        let result = derate(&attrs, &config).unwrap();
        assert!(result.overstress);
        assert!(result.reason[0].contains("Temperature margin 5.0°C < 10.0°C"));

        attrs.temperature_active = 75.0;
        assert!(!derate(&attrs, &config).unwrap().overstress);
    }

    #[test]
    fn test_rerun_replaces_reasons() {
        let config = PredictionConfig::default();
        let first = derate(&switch(3, 2.0), &config).unwrap();
        let mut relaxed = first.clone();
        relaxed.current_ratio = 0.1;
        let second = derate(&relaxed, &config).unwrap();
        assert!(!second.overstress);
        assert!(second.reason.is_empty());
    }

    #[test]
    fn test_unknown_environment_is_invalid_input() {
        let config = PredictionConfig::default();
        let err = derate(&switch(0, 0.5), &config).unwrap_err();
        assert!(matches!(err, PredictError::InvalidInput(_)));
    }
}

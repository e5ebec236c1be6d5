//! Component attribute record
//!
//! One flat record per hardware item. The persistence layer assembles it by
//! joining several tables; the prediction pipeline reads it and hands back
//! an updated copy.

use crate::category::Category;
use crate::environment::{DormantEnvironment, Environment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where an item's hazard rate comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardRateType {
    /// Predicted by a part model (parts) or rolled up from children (assemblies)
    Assessed = 1,
    /// Entered directly as a hazard rate
    SpecifiedHazardRate = 2,
    /// Entered directly as an MTBF
    SpecifiedMtbf = 3,
    /// Fitted from an s-distribution; variances are supplied externally
    SDistribution = 4,
}

impl HazardRateType {
    /// Look up a hazard rate type by ID
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(HazardRateType::Assessed),
            2 => Some(HazardRateType::SpecifiedHazardRate),
            3 => Some(HazardRateType::SpecifiedMtbf),
            4 => Some(HazardRateType::SDistribution),
            _ => None,
        }
    }
}

/// Where an item's cost comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostType {
    /// Entered directly
    Specified = 1,
    /// Summed from children
    Calculated = 2,
}

impl CostType {
    /// Look up a cost type by ID
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(CostType::Specified),
            2 => Some(CostType::Calculated),
            _ => None,
        }
    }
}

/// MIL-HDBK-217F prediction method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictionMethod {
    /// Tabulated base rate × quality factor
    PartsCount = 1,
    /// Family-specific equation over live operating stresses
    PartStress = 2,
}

impl PredictionMethod {
    /// Look up a prediction method by ID
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PredictionMethod::PartsCount),
            2 => Some(PredictionMethod::PartStress),
            _ => None,
        }
    }
}

/// Flat attribute record for one hardware item
///
/// Field groups:
/// - identity and selectors (category, method, environment, quality)
/// - operating and rated stresses
/// - family-specific model inputs
/// - computed outputs (hazard rates, π-factors, ratios, metrics, cost)
///
/// Hazard rates are stored in failures per hour. Specified rates and
/// adjustment factors are entered in the configured multiplier units
/// (failures per 10^6 hours by default) and converted on every run, so the
/// inputs themselves are never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentAttributes {
    /// Hardware item (node) ID
    pub hardware_id: u32,
    /// Display name
    pub name: String,
    /// `true` for a real part, `false` for a pure aggregation point
    pub part: bool,
    /// Component category ID (0 for assemblies)
    pub category_id: u8,
    /// Subcategory ID within the category
    pub subcategory_id: u8,
    /// Number of identical items this record stands for
    pub quantity: u32,

    /// [`HazardRateType`] ID
    pub hazard_rate_type_id: u8,
    /// [`PredictionMethod`] ID
    pub hazard_rate_method_id: u8,
    /// [`CostType`] ID
    pub cost_type_id: u8,
    /// Active [`Environment`] ID
    pub environment_active_id: u8,
    /// [`DormantEnvironment`] ID
    pub environment_dormant_id: u8,
    /// 1-based quality level
    pub quality_id: u8,

    /// Mission duration (hours)
    pub mission_time: f64,
    /// Percentage of mission time the item operates
    pub duty_cycle: f64,

    /// Ambient operating temperature (°C)
    pub temperature_active: f64,
    /// Case temperature (°C)
    pub temperature_case: f64,
    /// Junction temperature (°C); computed when zero and a case temperature exists
    pub temperature_junction: f64,
    /// Temperature rise over ambient (°C)
    pub temperature_rise: f64,
    /// Maximum rated temperature (°C)
    pub temperature_rated_max: f64,
    /// Junction-to-case thermal resistance (°C/W)
    pub thermal_resistance: f64,

    /// Operating current (A)
    pub current_operating: f64,
    /// Rated current (A)
    pub current_rated: f64,
    /// Operating power (W)
    pub power_operating: f64,
    /// Rated power (W)
    pub power_rated: f64,
    /// Operating AC voltage (V)
    pub voltage_ac_operating: f64,
    /// Operating DC voltage (V)
    pub voltage_dc_operating: f64,
    /// Rated voltage (V)
    pub voltage_rated: f64,
    /// Nominal resistance (Ω)
    pub resistance: f64,

    /// Technology ID (IC technology, resistor specification, ...)
    pub technology_id: u8,
    /// Package ID
    pub package_id: u8,
    /// Gates, transistors or bits, depending on the family
    pub n_gates: u32,
    /// Number of functional pins
    pub n_pins: u32,
    /// Years the design has been in production
    pub years_production: f64,
    /// Application ID (diode application, relay load type, ...)
    pub application_id: u8,
    /// Construction ID
    pub construction_id: u8,
    /// Contact form ID
    pub contact_form_id: u8,
    /// Configuration ID
    pub configuration_id: u8,
    /// Insulation class ID
    pub insulation_id: u8,
    /// Potentiometer taps
    pub n_taps: u32,
    /// Switching cycles per hour
    pub n_cycles: f64,

    /// Specified hazard rate (multiplier units)
    pub hazard_rate_specified: f64,
    /// Specified MTBF (hours)
    pub mtbf_specified: f64,
    /// Additive adjustment to the active rate (multiplier units)
    pub add_adj_factor: f64,
    /// Multiplicative adjustment to the active rate
    pub mult_adj_factor: f64,
    /// Software hazard rate (failures/hour)
    pub hazard_rate_software: f64,

    /// Base hazard rate from the last model run
    pub lambda_b: f64,
    /// π-factors from the last model run, keyed by name (`piE`, `piQ`, ...)
    pub pi_factors: BTreeMap<String, f64>,
    /// Equation used by the last model run
    pub hazard_rate_model: String,

    /// Active hazard rate (failures/hour)
    pub hazard_rate_active: f64,
    /// Dormant hazard rate (failures/hour)
    pub hazard_rate_dormant: f64,
    /// Logistics hazard rate (failures/hour)
    pub hazard_rate_logistics: f64,
    /// Mission hazard rate (failures/hour)
    pub hazard_rate_mission: f64,
    /// Logistics MTBF (hours)
    pub mtbf_logistics: f64,
    /// Mission MTBF (hours)
    pub mtbf_mission: f64,
    /// Logistics reliability at the reference duration
    pub reliability_logistics: f64,
    /// Mission reliability at the mission time
    pub reliability_mission: f64,
    /// Variance of the specified hazard rate
    pub hr_specified_variance: f64,
    /// Variance of the logistics hazard rate
    pub hr_logistics_variance: f64,
    /// Variance of the mission hazard rate
    pub hr_mission_variance: f64,
    /// Variance of the specified MTBF
    pub mtbf_specified_variance: f64,
    /// Variance of the logistics MTBF
    pub mtbf_logistics_variance: f64,
    /// Variance of the mission MTBF
    pub mtbf_mission_variance: f64,

    /// Operating/rated current
    pub current_ratio: f64,
    /// Operating/rated power
    pub power_ratio: f64,
    /// Operating/rated voltage
    pub voltage_ratio: f64,
    /// Whether any derating limit is violated
    pub overstress: bool,
    /// Numbered reasons, one per violated limit
    pub reason: Vec<String>,

    /// Unit cost
    pub cost: f64,
    /// Cost of all units (or rolled-up cost for assemblies)
    pub total_cost: f64,
    /// Cost per mission hour
    pub cost_hour: f64,
    /// Number of parts represented
    pub total_part_count: u32,
    /// Total power dissipation (W)
    pub total_power_dissipation: f64,
}

impl Default for ComponentAttributes {
    fn default() -> Self {
        Self {
            hardware_id: 0,
            name: String::new(),
            part: false,
            category_id: 0,
            subcategory_id: 0,
            quantity: 1,
            hazard_rate_type_id: HazardRateType::Assessed as u8,
            hazard_rate_method_id: PredictionMethod::PartsCount as u8,
            cost_type_id: CostType::Calculated as u8,
            environment_active_id: 0,
            environment_dormant_id: 0,
            quality_id: 0,
            mission_time: 100.0,
            duty_cycle: 100.0,
            temperature_active: 0.0,
            temperature_case: 0.0,
            temperature_junction: 0.0,
            temperature_rise: 0.0,
            temperature_rated_max: 0.0,
            thermal_resistance: 0.0,
            current_operating: 0.0,
            current_rated: 0.0,
            power_operating: 0.0,
            power_rated: 0.0,
            voltage_ac_operating: 0.0,
            voltage_dc_operating: 0.0,
            voltage_rated: 0.0,
            resistance: 0.0,
            technology_id: 0,
            package_id: 0,
            n_gates: 0,
            n_pins: 0,
            years_production: 0.0,
            application_id: 0,
            construction_id: 0,
            contact_form_id: 0,
            configuration_id: 0,
            insulation_id: 0,
            n_taps: 0,
            n_cycles: 0.0,
            hazard_rate_specified: 0.0,
            mtbf_specified: 0.0,
            add_adj_factor: 0.0,
            mult_adj_factor: 1.0,
            hazard_rate_software: 0.0,
            lambda_b: 0.0,
            pi_factors: BTreeMap::new(),
            hazard_rate_model: String::new(),
            hazard_rate_active: 0.0,
            hazard_rate_dormant: 0.0,
            hazard_rate_logistics: 0.0,
            hazard_rate_mission: 0.0,
            mtbf_logistics: 0.0,
            mtbf_mission: 0.0,
            reliability_logistics: 1.0,
            reliability_mission: 1.0,
            hr_specified_variance: 0.0,
            hr_logistics_variance: 0.0,
            hr_mission_variance: 0.0,
            mtbf_specified_variance: 0.0,
            mtbf_logistics_variance: 0.0,
            mtbf_mission_variance: 0.0,
            current_ratio: 0.0,
            power_ratio: 0.0,
            voltage_ratio: 0.0,
            overstress: false,
            reason: Vec::new(),
            cost: 0.0,
            total_cost: 0.0,
            cost_hour: 0.0,
            total_part_count: 0,
            total_power_dissipation: 0.0,
        }
    }
}

impl ComponentAttributes {
    /// Create a part record in the given category and subcategory
    ///
    /// # Examples
    ///
    /// ```
    /// use relia_domain::ComponentAttributes;
    ///
    /// let resistor = ComponentAttributes::new_part(7, 3, 2);
    /// assert!(resistor.part);
    /// assert_eq!(resistor.quantity, 1);
    /// ```
    pub fn new_part(hardware_id: u32, category_id: u8, subcategory_id: u8) -> Self {
        Self {
            hardware_id,
            part: true,
            category_id,
            subcategory_id,
            ..Self::default()
        }
    }

    /// Create an assembly (aggregation point) record
    pub fn new_assembly(hardware_id: u32, name: impl Into<String>) -> Self {
        Self {
            hardware_id,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Component category, if the ID names one
    pub fn category(&self) -> Option<Category> {
        Category::from_id(self.category_id)
    }

    /// Active environment, if the ID names one
    pub fn environment_active(&self) -> Option<Environment> {
        Environment::from_id(self.environment_active_id)
    }

    /// Dormant environment, if the ID names one
    pub fn environment_dormant(&self) -> Option<DormantEnvironment> {
        DormantEnvironment::from_id(self.environment_dormant_id)
    }

    /// Hazard rate source, if the ID names one
    pub fn hazard_rate_type(&self) -> Option<HazardRateType> {
        HazardRateType::from_id(self.hazard_rate_type_id)
    }

    /// Cost source, if the ID names one
    pub fn cost_type(&self) -> Option<CostType> {
        CostType::from_id(self.cost_type_id)
    }

    /// Prediction method, if the ID names one
    pub fn prediction_method(&self) -> Option<PredictionMethod> {
        PredictionMethod::from_id(self.hazard_rate_method_id)
    }

    /// Combined AC and DC operating voltage
    pub fn voltage_operating(&self) -> f64 {
        self.voltage_ac_operating + self.voltage_dc_operating
    }

    /// Temperature used for thermal derating
    ///
    /// The junction temperature when one is known, then the case
    /// temperature, then the ambient operating temperature.
    pub fn hot_spot_temperature(&self) -> f64 {
        if self.temperature_junction > 0.0 {
            self.temperature_junction
        } else if self.temperature_case > 0.0 {
            self.temperature_case
        } else {
            self.temperature_active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let attrs = ComponentAttributes::default();
        assert_eq!(attrs.quantity, 1);
        assert_eq!(attrs.mult_adj_factor, 1.0);
        assert_eq!(attrs.hazard_rate_type(), Some(HazardRateType::Assessed));
        assert_eq!(attrs.cost_type(), Some(CostType::Calculated));
        assert_eq!(attrs.prediction_method(), Some(PredictionMethod::PartsCount));
        assert!(!attrs.part);
    }

    #[test]
    fn test_selectors() {
        let mut attrs = ComponentAttributes::new_part(3, 1, 3);
        attrs.environment_active_id = 2;
        attrs.environment_dormant_id = 1;
        assert_eq!(attrs.category(), Some(Category::IntegratedCircuit));
        assert_eq!(attrs.environment_active(), Some(Environment::GroundFixed));
        assert_eq!(attrs.environment_dormant(), Some(DormantEnvironment::Ground));

        attrs.environment_active_id = 99;
        assert_eq!(attrs.environment_active(), None);
    }

    #[test]
    fn test_voltage_operating_sums_ac_and_dc() {
        let mut attrs = ComponentAttributes::new_part(1, 4, 1);
        attrs.voltage_ac_operating = 3.5;
        attrs.voltage_dc_operating = 12.0;
        assert_eq!(attrs.voltage_operating(), 15.5);
    }

    #[test]
    fn test_hot_spot_temperature_precedence() {
        let mut attrs = ComponentAttributes::new_part(1, 1, 1);
        attrs.temperature_active = 30.0;
        assert_eq!(attrs.hot_spot_temperature(), 30.0);
        attrs.temperature_case = 40.0;
        assert_eq!(attrs.hot_spot_temperature(), 40.0);
        attrs.temperature_junction = 55.0;
        assert_eq!(attrs.hot_spot_temperature(), 55.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"hardware_id": 4, "part": true, "category_id": 3, "subcategory_id": 1}"#;
        let attrs: ComponentAttributes = serde_json::from_str(json).unwrap();
        assert_eq!(attrs.hardware_id, 4);
        assert_eq!(attrs.quantity, 1);
        assert_eq!(attrs.mission_time, 100.0);
        assert!(attrs.pi_factors.is_empty());
    }
}

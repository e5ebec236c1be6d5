//! Hazard analysis and the Hazard Risk Index (MIL-STD-882)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hazard probability level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Probability {
    /// Level E - Extremely Unlikely
    ExtremelyUnlikely = 1,
    /// Level D - Remote
    Remote = 2,
    /// Level C - Occasional
    Occasional = 3,
    /// Level B - Reasonably Probable
    ReasonablyProbable = 4,
    /// Level A - Frequent
    Frequent = 5,
}

impl Probability {
    /// All levels, least to most likely
    pub const ALL: [Probability; 5] = [
        Probability::ExtremelyUnlikely,
        Probability::Remote,
        Probability::Occasional,
        Probability::ReasonablyProbable,
        Probability::Frequent,
    ];

    /// Rank used in the risk index product
    pub fn rank(&self) -> u32 {
        *self as u32
    }

    /// Description as shown to users
    pub fn description(&self) -> &'static str {
        match self {
            Probability::ExtremelyUnlikely => "Level E - Extremely Unlikely",
            Probability::Remote => "Level D - Remote",
            Probability::Occasional => "Level C - Occasional",
            Probability::ReasonablyProbable => "Level B - Reasonably Probable",
            Probability::Frequent => "Level A - Frequent",
        }
    }
}

impl FromStr for Probability {
    type Err = HazardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.description() == s.trim())
            .ok_or_else(|| HazardError::UnknownProbability(s.to_string()))
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Hazard severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Insignificant
    Insignificant = 1,
    /// Slight
    Slight = 2,
    /// Low
    Low = 3,
    /// Medium
    Medium = 4,
    /// High
    High = 5,
    /// Major
    Major = 6,
}

impl Severity {
    /// All levels, least to most severe
    pub const ALL: [Severity; 6] = [
        Severity::Insignificant,
        Severity::Slight,
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Major,
    ];

    /// Rank used in the risk index product
    pub fn rank(&self) -> u32 {
        *self as u32
    }

    /// Description as shown to users
    pub fn description(&self) -> &'static str {
        match self {
            Severity::Insignificant => "Insignificant",
            Severity::Slight => "Slight",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Major => "Major",
        }
    }
}

impl FromStr for Severity {
    type Err = HazardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.description() == s.trim())
            .ok_or_else(|| HazardError::UnknownSeverity(s.to_string()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors raised while scoring hazards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HazardError {
    /// Probability description matches no level
    UnknownProbability(String),
    /// Severity description matches no level
    UnknownSeverity(String),
}

impl fmt::Display for HazardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardError::UnknownProbability(s) => write!(f, "unknown hazard probability '{}'", s),
            HazardError::UnknownSeverity(s) => write!(f, "unknown hazard severity '{}'", s),
        }
    }
}

impl std::error::Error for HazardError {}

/// Hazard Risk Index from textual probability and severity
///
/// # Examples
///
/// ```
/// use relia_domain::hazard::hazard_risk_index;
///
/// assert_eq!(hazard_risk_index("Level C - Occasional", "Medium").unwrap(), 12);
/// assert!(hazard_risk_index("Often", "Medium").is_err());
/// ```
pub fn hazard_risk_index(probability: &str, severity: &str) -> Result<u32, HazardError> {
    let probability: Probability = probability.parse()?;
    let severity: Severity = severity.parse()?;
    Ok(probability.rank() * severity.rank())
}

/// One (hardware item, hazard) row
///
/// Probability and severity are held as the descriptions users pick, for
/// the assembly and the system, before and after mitigation (`_f`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardAnalysis {
    /// Hardware item
    pub hardware_id: u32,
    /// Hazard ID
    pub hazard_id: u32,
    /// Hazard description
    pub potential_hazard: String,
    /// Assembly-level probability before mitigation
    pub assembly_probability: String,
    /// Assembly-level severity before mitigation
    pub assembly_severity: String,
    /// Assembly-level HRI before mitigation
    pub assembly_hri: u32,
    /// Assembly-level probability after mitigation
    pub assembly_probability_f: String,
    /// Assembly-level severity after mitigation
    pub assembly_severity_f: String,
    /// Assembly-level HRI after mitigation
    pub assembly_hri_f: u32,
    /// System-level probability before mitigation
    pub system_probability: String,
    /// System-level severity before mitigation
    pub system_severity: String,
    /// System-level HRI before mitigation
    pub system_hri: u32,
    /// System-level probability after mitigation
    pub system_probability_f: String,
    /// System-level severity after mitigation
    pub system_severity_f: String,
    /// System-level HRI after mitigation
    pub system_hri_f: u32,
}

impl HazardAnalysis {
    /// Return a copy with all four risk indices computed
    ///
    /// Nothing is returned if any description is unknown, so a record is
    /// never half-scored.
    pub fn with_risk_indices(&self) -> Result<Self, HazardError> {
        Ok(Self {
            assembly_hri: hazard_risk_index(&self.assembly_probability, &self.assembly_severity)?,
            assembly_hri_f: hazard_risk_index(
                &self.assembly_probability_f,
                &self.assembly_severity_f,
            )?,
            system_hri: hazard_risk_index(&self.system_probability, &self.system_severity)?,
            system_hri_f: hazard_risk_index(&self.system_probability_f, &self.system_severity_f)?,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HazardAnalysis {
        HazardAnalysis {
            hardware_id: 3,
            hazard_id: 1,
            potential_hazard: "Loss of cooling".to_string(),
            assembly_probability: "Level A - Frequent".to_string(),
            assembly_severity: "Major".to_string(),
            assembly_probability_f: "Level D - Remote".to_string(),
            assembly_severity_f: "Medium".to_string(),
            system_probability: "Level B - Reasonably Probable".to_string(),
            system_severity: "High".to_string(),
            system_probability_f: "Level E - Extremely Unlikely".to_string(),
            system_severity_f: "Slight".to_string(),
            ..HazardAnalysis::default()
        }
    }

    #[test]
    fn test_hri_extremes() {
        assert_eq!(hazard_risk_index("Level E - Extremely Unlikely", "Insignificant"), Ok(1));
        assert_eq!(hazard_risk_index("Level A - Frequent", "Major"), Ok(30));
    }

    #[test]
    fn test_unknown_descriptions() {
        assert_eq!(
            hazard_risk_index("Level F", "Major"),
            Err(HazardError::UnknownProbability("Level F".to_string()))
        );
        assert_eq!(
            hazard_risk_index("Level A - Frequent", "Catastrophic"),
            Err(HazardError::UnknownSeverity("Catastrophic".to_string()))
        );
    }

    #[test]
    fn test_all_four_indices() {
        let scored = sample().with_risk_indices().unwrap();
        assert_eq!(scored.assembly_hri, 30);
        assert_eq!(scored.assembly_hri_f, 8);
        assert_eq!(scored.system_hri, 20);
        assert_eq!(scored.system_hri_f, 2);
        assert_eq!(scored.potential_hazard, "Loss of cooling");
    }

    #[test]
    fn test_unknown_leaves_record_unscored() {
        let mut record = sample();
        record.system_severity_f = String::new();
        assert!(record.with_risk_indices().is_err());
        assert_eq!(record.assembly_hri, 0);
    }
}

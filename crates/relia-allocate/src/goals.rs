//! Goal derivation
//!
//! A user enters one of reliability, hazard rate or MTBF; the other two
//! follow from the exponential law at the record's mission time.

use crate::AllocationError;
use relia_domain::{AllocationRecord, GoalMeasure};

/// Derive the two goals that were not entered
///
/// # Examples
///
/// ```
/// use relia_allocate::calculate_goals;
/// use relia_domain::{AllocationRecord, GoalMeasure};
///
/// let record = AllocationRecord {
///     goal_measure: Some(GoalMeasure::Mtbf),
///     mtbf_goal: 1000.0,
///     mission_time: 100.0,
///     ..AllocationRecord::new(1)
/// };
/// let goals = calculate_goals(&record).unwrap();
/// assert!((goals.hazard_rate_goal - 0.001).abs() < 1e-12);
/// assert!((goals.reliability_goal - (-0.1f64).exp()).abs() < 1e-12);
/// ```
pub fn calculate_goals(record: &AllocationRecord) -> Result<AllocationRecord, AllocationError> {
    let measure = record.goal_measure.ok_or_else(|| {
        AllocationError::InvalidInput(format!(
            "node {} has no goal measure selected",
            record.hardware_id
        ))
    })?;
    let t = record.mission_time;
    let mut goals = record.clone();

    match measure {
        GoalMeasure::Reliability => {
            let r = record.reliability_goal;
            if !(r > 0.0 && r <= 1.0) {
                return Err(AllocationError::InvalidInput(format!(
                    "reliability goal {} is outside (0, 1]",
                    r
                )));
            }
            if t <= 0.0 {
                return Err(AllocationError::Arithmetic(format!(
                    "mission time {} cannot convert a reliability goal",
                    t
                )));
            }
            goals.hazard_rate_goal = -r.ln() / t;
            goals.mtbf_goal = reciprocal(goals.hazard_rate_goal, "hazard rate goal")?;
        }
        GoalMeasure::HazardRate => {
            goals.mtbf_goal = reciprocal(record.hazard_rate_goal, "hazard rate goal")?;
            goals.reliability_goal = (-record.hazard_rate_goal * t).exp();
        }
        GoalMeasure::Mtbf => {
            goals.hazard_rate_goal = reciprocal(record.mtbf_goal, "MTBF goal")?;
            goals.reliability_goal = (-t / record.mtbf_goal).exp();
        }
    }
    Ok(goals)
}

/// The goal a method apportions: reliability for AGREE and Equal, hazard
/// rate for ARINC and FOO
pub fn allocation_goal(record: &AllocationRecord) -> Result<f64, AllocationError> {
    let method = record.method.ok_or_else(|| {
        AllocationError::InvalidInput(format!(
            "node {} has no allocation method selected",
            record.hardware_id
        ))
    })?;
    if method.uses_reliability_goal() {
        Ok(record.reliability_goal)
    } else {
        Ok(record.hazard_rate_goal)
    }
}

pub(crate) fn reciprocal(value: f64, what: &str) -> Result<f64, AllocationError> {
    if value == 0.0 {
        return Err(AllocationError::Arithmetic(format!("{} is zero", what)));
    }
    let result = 1.0 / value;
    if !result.is_finite() {
        return Err(AllocationError::Arithmetic(format!("1 / {} is not finite", what)));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relia_domain::AllocationMethod;

    fn record(measure: GoalMeasure) -> AllocationRecord {
        AllocationRecord {
            goal_measure: Some(measure),
            mission_time: 10.0,
            ..AllocationRecord::new(2)
        }
    }

    #[test]
    fn test_from_reliability() {
        let goals = calculate_goals(&AllocationRecord {
            reliability_goal: 0.99,
            ..record(GoalMeasure::Reliability)
        })
        .unwrap();
        assert!((goals.hazard_rate_goal - (-(0.99f64).ln() / 10.0)).abs() < 1e-15);
        assert!((goals.mtbf_goal * goals.hazard_rate_goal - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_hazard_rate() {
        let goals = calculate_goals(&AllocationRecord {
            hazard_rate_goal: 0.002,
            ..record(GoalMeasure::HazardRate)
        })
        .unwrap();
        assert!((goals.mtbf_goal - 500.0).abs() < 1e-9);
        assert!((goals.reliability_goal - (-0.02f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_perfect_reliability_has_no_mtbf() {
        let err = calculate_goals(&AllocationRecord {
            reliability_goal: 1.0,
            ..record(GoalMeasure::Reliability)
        })
        .unwrap_err();
        assert!(matches!(err, AllocationError::Arithmetic(_)));
    }

    #[test]
    fn test_missing_measure() {
        assert!(matches!(
            calculate_goals(&AllocationRecord::new(1)),
            Err(AllocationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_allocation_goal_per_method() {
        let mut record = AllocationRecord {
            reliability_goal: 0.95,
            hazard_rate_goal: 0.004,
            ..AllocationRecord::new(1)
        };
        assert!(allocation_goal(&record).is_err());
        record.method = Some(AllocationMethod::Equal);
        assert_eq!(allocation_goal(&record).unwrap(), 0.95);
        record.method = Some(AllocationMethod::Foo);
        assert_eq!(allocation_goal(&record).unwrap(), 0.004);
    }
}

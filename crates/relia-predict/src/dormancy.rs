//! Dormant hazard rates
//!
//! A dormant item fails at a fraction of its active rate. The fraction
//! depends on the part category and on where the item operates versus
//! where it sits idle.

use relia_domain::{Category, ComponentAttributes, DormantEnvironment, Environment};

/// Columns of the conversion table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    GroundToGround,
    AirborneToAirborne,
    AirborneToGround,
    NavalToNaval,
    NavalToGround,
    SpaceToSpace,
    SpaceToGround,
}

impl Transition {
    fn column(self) -> usize {
        self as usize
    }
}

fn transition(active: Environment, dormant: DormantEnvironment) -> Option<Transition> {
    use DormantEnvironment as D;
    use Environment as E;

    match (active, dormant) {
        (E::GroundBenign | E::GroundFixed | E::GroundMobile, D::Ground) => {
            Some(Transition::GroundToGround)
        }
        (
            E::AirborneInhabitedCargo
            | E::AirborneInhabitedFighter
            | E::AirborneUninhabitedCargo
            | E::AirborneUninhabitedFighter
            | E::AirborneRotaryWinged,
            dormant,
        ) => match dormant {
            D::Airborne => Some(Transition::AirborneToAirborne),
            D::Ground => Some(Transition::AirborneToGround),
            _ => None,
        },
        (E::NavalSheltered | E::NavalUnsheltered, D::Naval) => Some(Transition::NavalToNaval),
        (E::NavalSheltered | E::NavalUnsheltered, D::Ground) => Some(Transition::NavalToGround),
        (E::SpaceFlight, D::Space) => Some(Transition::SpaceToSpace),
        (E::SpaceFlight, D::Ground) => Some(Transition::SpaceToGround),
        _ => None,
    }
}

fn factors(attributes: &ComponentAttributes) -> Option<[f64; 7]> {
    let row = match attributes.category()? {
        Category::IntegratedCircuit => [0.08, 0.06, 0.04, 0.06, 0.05, 0.10, 0.30],
        Category::Semiconductor if matches!(attributes.subcategory_id, 1 | 2) => {
            [0.04, 0.05, 0.01, 0.04, 0.03, 0.20, 0.80]
        }
        Category::Semiconductor => [0.05, 0.06, 0.02, 0.05, 0.03, 0.20, 1.00],
        Category::Resistor => [0.20, 0.06, 0.03, 0.10, 0.06, 0.50, 1.00],
        Category::Capacitor => [0.10, 0.10, 0.03, 0.10, 0.04, 0.20, 0.40],
        Category::Inductive => [0.20, 0.20, 0.20, 0.30, 0.30, 0.50, 1.00],
        Category::Relay => [0.20, 0.20, 0.04, 0.30, 0.08, 0.40, 0.90],
        Category::Switch => [0.40, 0.20, 0.10, 0.40, 0.20, 0.80, 1.00],
        Category::Connection => [0.005, 0.005, 0.003, 0.008, 0.003, 0.02, 0.03],
        Category::Meter | Category::Miscellaneous => return None,
    };
    Some(row)
}

/// Active-to-dormant conversion factor; zero when no conversion applies
pub fn dormancy_factor(attributes: &ComponentAttributes) -> f64 {
    let (Some(active), Some(dormant)) = (attributes.environment_active(), attributes.environment_dormant())
    else {
        return 0.0;
    };
    match (factors(attributes), transition(active, dormant)) {
        (Some(row), Some(transition)) => row[transition.column()],
        _ => 0.0,
    }
}

/// Dormant hazard rate for an item whose active rate is `active_rate`
///
/// Missile environments, meters, miscellaneous parts and unsupported
/// environment pairs all give 0.
pub fn dormant_hazard_rate(attributes: &ComponentAttributes, active_rate: f64) -> f64 {
    dormancy_factor(attributes) * active_rate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(category_id: u8, subcategory_id: u8, active: u8, dormant: u8) -> ComponentAttributes {
        let mut attrs = ComponentAttributes::new_part(1, category_id, subcategory_id);
        attrs.environment_active_id = active;
        attrs.environment_dormant_id = dormant;
        attrs
    }

    #[test]
    fn test_ground_to_ground_ic() {
        let attrs = part(1, 3, 2, 1);
        assert_eq!(dormancy_factor(&attrs), 0.08);
        assert!((dormant_hazard_rate(&attrs, 1e-6) - 8e-8).abs() < 1e-20);
    }

    #[test]
    fn test_airborne_transitions() {
        assert_eq!(dormancy_factor(&part(4, 1, 7, 2)), 0.10);
        assert_eq!(dormancy_factor(&part(4, 1, 7, 1)), 0.03);
        assert_eq!(dormancy_factor(&part(4, 1, 7, 3)), 0.0);
    }

    #[test]
    fn test_diode_versus_transistor_rows() {
        assert_eq!(dormancy_factor(&part(2, 1, 11, 1)), 0.80);
        assert_eq!(dormancy_factor(&part(2, 6, 11, 1)), 1.00);
    }

    #[test]
    fn test_unsupported_cases_are_zero() {
        // missile
        assert_eq!(dormancy_factor(&part(1, 1, 12, 1)), 0.0);
        // meter
        assert_eq!(dormancy_factor(&part(9, 1, 1, 1)), 0.0);
        // ground to space
        assert_eq!(dormancy_factor(&part(3, 1, 1, 4)), 0.0);
        // unset dormant environment
        assert_eq!(dormancy_factor(&part(3, 1, 1, 0)), 0.0);
    }
}

//! Operating environments (MIL-HDBK-217F environment codes)

use serde::{Deserialize, Serialize};

/// Active operating environment
///
/// The discriminant is the 1-based environment ID used by every π-factor
/// table: table index = `id - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Environment {
    /// Ground, Benign (GB)
    GroundBenign = 1,
    /// Ground, Fixed (GF)
    GroundFixed = 2,
    /// Ground, Mobile (GM)
    GroundMobile = 3,
    /// Naval, Sheltered (NS)
    NavalSheltered = 4,
    /// Naval, Unsheltered (NU)
    NavalUnsheltered = 5,
    /// Airborne, Inhabited Cargo (AIC)
    AirborneInhabitedCargo = 6,
    /// Airborne, Inhabited Fighter (AIF)
    AirborneInhabitedFighter = 7,
    /// Airborne, Uninhabited Cargo (AUC)
    AirborneUninhabitedCargo = 8,
    /// Airborne, Uninhabited Fighter (AUF)
    AirborneUninhabitedFighter = 9,
    /// Airborne, Rotary Winged (ARW)
    AirborneRotaryWinged = 10,
    /// Space, Flight (SF)
    SpaceFlight = 11,
    /// Missile, Flight (MF)
    MissileFlight = 12,
    /// Missile, Launch (ML)
    MissileLaunch = 13,
    /// Cannon, Launch (CL)
    CannonLaunch = 14,
}

impl Environment {
    /// Number of environments; every environment-indexed table has this length
    pub const COUNT: usize = 14;

    /// All environments in ID order
    pub const ALL: [Environment; 14] = [
        Environment::GroundBenign,
        Environment::GroundFixed,
        Environment::GroundMobile,
        Environment::NavalSheltered,
        Environment::NavalUnsheltered,
        Environment::AirborneInhabitedCargo,
        Environment::AirborneInhabitedFighter,
        Environment::AirborneUninhabitedCargo,
        Environment::AirborneUninhabitedFighter,
        Environment::AirborneRotaryWinged,
        Environment::SpaceFlight,
        Environment::MissileFlight,
        Environment::MissileLaunch,
        Environment::CannonLaunch,
    ];

    /// Look up an environment by its 1-based ID
    pub fn from_id(id: u8) -> Option<Self> {
        if id == 0 {
            return None;
        }
        Self::ALL.get(usize::from(id) - 1).copied()
    }

    /// The 1-based environment ID
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Zero-based position in environment-indexed tables
    pub fn index(&self) -> usize {
        usize::from(self.id()) - 1
    }

    /// Standard abbreviation (GB, GF, ...)
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Environment::GroundBenign => "GB",
            Environment::GroundFixed => "GF",
            Environment::GroundMobile => "GM",
            Environment::NavalSheltered => "NS",
            Environment::NavalUnsheltered => "NU",
            Environment::AirborneInhabitedCargo => "AIC",
            Environment::AirborneInhabitedFighter => "AIF",
            Environment::AirborneUninhabitedCargo => "AUC",
            Environment::AirborneUninhabitedFighter => "AUF",
            Environment::AirborneRotaryWinged => "ARW",
            Environment::SpaceFlight => "SF",
            Environment::MissileFlight => "MF",
            Environment::MissileLaunch => "ML",
            Environment::CannonLaunch => "CL",
        }
    }

    /// Whether derating uses the mild threshold row
    ///
    /// Benign Ground, Fixed Ground, Sheltered Naval and Space Flight are
    /// mild; everything else is harsh.
    pub fn is_mild(&self) -> bool {
        matches!(
            self,
            Environment::GroundBenign
                | Environment::GroundFixed
                | Environment::NavalSheltered
                | Environment::SpaceFlight
        )
    }

    /// Whether derating uses the harsh threshold row
    pub fn is_harsh(&self) -> bool {
        !self.is_mild()
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Environment an item sits in while not operating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DormantEnvironment {
    /// Stored or idle on the ground
    Ground = 1,
    /// Idle aboard an aircraft
    Airborne = 2,
    /// Idle aboard a ship
    Naval = 3,
    /// Idle in orbit
    Space = 4,
}

impl DormantEnvironment {
    /// Look up a dormant environment by its 1-based ID
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(DormantEnvironment::Ground),
            2 => Some(DormantEnvironment::Airborne),
            3 => Some(DormantEnvironment::Naval),
            4 => Some(DormantEnvironment::Space),
            _ => None,
        }
    }
}

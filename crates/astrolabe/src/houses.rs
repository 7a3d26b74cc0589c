//! House systems, cusp sets and house membership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ephemeris::{Ephemeris, GeoLocation};
use crate::error::{ChartError, EphemerisError};
use crate::zodiac::Longitude;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    Placidus,
    WholeSign,
    Koch,
    Equal,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
    Porphyry,
}

/// Every supported system, in the order names are listed in errors.
pub const HOUSE_SYSTEMS: [HouseSystem; 9] = [
    HouseSystem::Placidus,
    HouseSystem::WholeSign,
    HouseSystem::Koch,
    HouseSystem::Equal,
    HouseSystem::Regiomontanus,
    HouseSystem::Campanus,
    HouseSystem::Alcabitius,
    HouseSystem::Morinus,
    HouseSystem::Porphyry,
];

impl HouseSystem {
    /// Single-letter Swiss Ephemeris code.
    pub fn code(self) -> u8 {
        match self {
            HouseSystem::Placidus => b'P',
            HouseSystem::WholeSign => b'W',
            HouseSystem::Koch => b'K',
            HouseSystem::Equal => b'E',
            HouseSystem::Regiomontanus => b'R',
            HouseSystem::Campanus => b'C',
            HouseSystem::Alcabitius => b'B',
            HouseSystem::Morinus => b'M',
            HouseSystem::Porphyry => b'O',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HouseSystem::Placidus => "placidus",
            HouseSystem::WholeSign => "whole_sign",
            HouseSystem::Koch => "koch",
            HouseSystem::Equal => "equal",
            HouseSystem::Regiomontanus => "regiomontanus",
            HouseSystem::Campanus => "campanus",
            HouseSystem::Alcabitius => "alcabitius",
            HouseSystem::Morinus => "morinus",
            HouseSystem::Porphyry => "porphyry",
        }
    }
}

impl FromStr for HouseSystem {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        HOUSE_SYSTEMS
            .iter()
            .copied()
            .find(|system| system.name() == lower)
            .ok_or_else(|| EphemerisError::InvalidHouseSystem {
                system: s.to_string(),
                valid: HOUSE_SYSTEMS.iter().map(|system| system.name().to_string()).collect(),
            })
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Twelve cusps and the angles for one (instant, location, system).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCuspSet {
    system: HouseSystem,
    location: GeoLocation,
    instant: DateTime<Utc>,
    ascendant: Longitude,
    midheaven: Longitude,
    cusps: [Longitude; 12],
    armc: f64,
    obliquity: f64,
}

impl HouseCuspSet {
    pub fn compute(
        ephemeris: &dyn Ephemeris,
        instant: DateTime<Utc>,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<Self, ChartError> {
        location.validate()?;
        let raw = ephemeris.house_cusps(instant, &location, system)?;
        let (armc, obliquity) = ephemeris.armc_and_obliquity(instant, location.lon)?;

        let mut cusps = [Longitude::default(); 12];
        for (cusp, degrees) in cusps.iter_mut().zip(raw.cusps) {
            *cusp = Longitude::new(degrees)?;
        }

        Ok(Self {
            system,
            location,
            instant,
            ascendant: Longitude::new(raw.ascendant)?,
            midheaven: Longitude::new(raw.midheaven)?,
            cusps,
            armc,
            obliquity,
        })
    }

    pub fn system(&self) -> HouseSystem {
        self.system
    }

    pub fn location(&self) -> GeoLocation {
        self.location
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn ascendant(&self) -> Longitude {
        self.ascendant
    }

    pub fn midheaven(&self) -> Longitude {
        self.midheaven
    }

    pub fn descendant(&self) -> Longitude {
        self.ascendant.opposite()
    }

    pub fn imum_coeli(&self) -> Longitude {
        self.midheaven.opposite()
    }

    pub fn cusps(&self) -> &[Longitude; 12] {
        &self.cusps
    }

    /// Cusp `n` for n in 1..=12.
    pub fn cusp(&self, n: u8) -> Option<Longitude> {
        if (1..=12).contains(&n) {
            Some(self.cusps[usize::from(n - 1)])
        } else {
            None
        }
    }

    pub fn armc(&self) -> f64 {
        self.armc
    }

    pub fn obliquity(&self) -> f64 {
        self.obliquity
    }

    /// House (1..=12) containing an ecliptic longitude in [0, 360).
    ///
    /// A longitude equal to cusp n is house n. Anything else is placed by the
    /// backend's house position in this set's frame.
    pub fn house_of(&self, ephemeris: &dyn Ephemeris, longitude: f64) -> Result<u8, ChartError> {
        let lon = Longitude::checked(longitude)?;

        if self.system == HouseSystem::WholeSign {
            return Ok(whole_sign_house(lon, self.ascendant));
        }
        if let Some(n) = self.cusps.iter().position(|cusp| *cusp == lon) {
            return Ok(n as u8 + 1);
        }

        let position = ephemeris
            .house_position(
                self.armc,
                self.location.lat,
                self.obliquity,
                self.system,
                longitude,
            )
            .map_err(|e| {
                log::warn!("house position failed for {longitude}: {e}");
                ChartError::HousePosition {
                    longitude,
                    reason: e.to_string(),
                }
            })?;

        house_from_position(position).map_err(|reason| {
            log::warn!("house position {position} rejected for {longitude}: {reason}");
            ChartError::HousePosition { longitude, reason }
        })
    }
}

/// Rounding slack on a house position, in house units.
pub const CUSP_EPSILON: f64 = 1e-9;

/// `((sign(lon) - sign(asc) + 12) mod 12) + 1`
pub fn whole_sign_house(longitude: Longitude, ascendant: Longitude) -> u8 {
    (longitude.sign_index() + 12 - ascendant.sign_index()) % 12 + 1
}

/// House number from a continuous house position in [1, 13).
///
/// The house is the ceiling of the position; 13 wraps to 1. Positions within
/// [`CUSP_EPSILON`] of a whole number are on that cusp.
pub fn house_from_position(position: f64) -> Result<u8, String> {
    if position.is_nan() {
        return Err("house position is NaN".to_string());
    }
    if position == 0.0 {
        return Err("house position is zero".to_string());
    }
    if !(1.0..13.0).contains(&position) {
        return Err(format!("house position {position} outside [1, 13)"));
    }
    let nearest = position.round();
    let house = if (position - nearest).abs() < CUSP_EPSILON {
        nearest
    } else {
        position.ceil()
    };
    Ok((house as u8 - 1) % 12 + 1)
}

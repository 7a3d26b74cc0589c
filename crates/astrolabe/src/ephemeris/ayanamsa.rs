//! Tropical and sidereal zodiacs.
//!
//! swisseph 0.1 does not expose `swe_set_sid_mode`, so the offset of each
//! ayanamsa is its J2000 reference value carried forward by IAU 2006 general
//! precession.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ephemeris::adapter::julian_day;
use crate::error::EphemerisError;

pub const J2000_JD: f64 = 2_451_545.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Julian centuries since J2000.0.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}

/// IAU 2006 general precession in ecliptic longitude since J2000, in degrees.
pub fn general_precession(t: f64) -> f64 {
    let arcsec = (5_028.796_195
        + (1.105_434_8 + (0.000_079_64 + (-0.000_023_857 + (-0.000_000_038_3) * t) * t) * t) * t)
        * t;
    arcsec / 3_600.0
}

/// Sidereal zodiac conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ayanamsa {
    Lahiri,
    FaganBradley,
    DeLuce,
    Raman,
    Krishnamurti,
    Yukteshwar,
    DjwhalKhul,
}

/// Ayanamsa names accepted by [`Ayanamsa::from_str`].
const AYANAMSAS: &[(&str, Ayanamsa)] = &[
    ("lahiri", Ayanamsa::Lahiri),
    ("chitrapaksha", Ayanamsa::Lahiri),
    ("fagan_bradley", Ayanamsa::FaganBradley),
    ("de_luce", Ayanamsa::DeLuce),
    ("raman", Ayanamsa::Raman),
    ("krishnamurti", Ayanamsa::Krishnamurti),
    ("yukteshwar", Ayanamsa::Yukteshwar),
    ("djwhal_khul", Ayanamsa::DjwhalKhul),
];

impl Ayanamsa {
    /// Offset at J2000.0 in degrees.
    pub fn reference_j2000(self) -> f64 {
        match self {
            Ayanamsa::Lahiri => 23.853,
            Ayanamsa::FaganBradley => 24.736,
            Ayanamsa::DeLuce => 21.619,
            Ayanamsa::Raman => 22.370,
            Ayanamsa::Krishnamurti => 23.850,
            Ayanamsa::Yukteshwar => 22.376,
            Ayanamsa::DjwhalKhul => 22.883,
        }
    }

    /// Tropical-to-sidereal offset at an instant, in degrees.
    pub fn offset(self, at: DateTime<Utc>) -> f64 {
        let t = julian_centuries(julian_day(at));
        self.reference_j2000() + general_precession(t)
    }
}

impl FromStr for Ayanamsa {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        AYANAMSAS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, ayanamsa)| *ayanamsa)
            .ok_or_else(|| EphemerisError::InvalidAyanamsa {
                ayanamsa: s.to_string(),
                valid: AYANAMSAS.iter().map(|(name, _)| name.to_string()).collect(),
            })
    }
}

/// Zodiac in which chart longitudes are reported.
///
/// Houses and aspects are always computed tropically; a sidereal zodiac only
/// shifts reported longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zodiac {
    #[default]
    Tropical,
    Sidereal(Ayanamsa),
}

impl Zodiac {
    /// Degrees to subtract from a tropical longitude at `at`.
    pub fn offset(self, at: DateTime<Utc>) -> f64 {
        match self {
            Zodiac::Tropical => 0.0,
            Zodiac::Sidereal(ayanamsa) => ayanamsa.offset(at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_lahiri_offset_2019() {
        let at = Utc.with_ymd_and_hms(2019, 12, 14, 13, 39, 0).unwrap();
        let offset = Ayanamsa::Lahiri.offset(at);
        // roughly 24°07'
        assert!((offset - 24.12).abs() < 0.05, "offset = {offset}");
    }

    #[test]
    fn test_offset_at_j2000_is_reference() {
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        for ayanamsa in [Ayanamsa::FaganBradley, Ayanamsa::Raman] {
            assert!((ayanamsa.offset(j2000) - ayanamsa.reference_j2000()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_tropical_has_no_offset() {
        let at = Utc.with_ymd_and_hms(2019, 12, 14, 13, 39, 0).unwrap();
        assert_eq!(Zodiac::Tropical.offset(at), 0.0);
        assert_eq!(
            Zodiac::Sidereal(Ayanamsa::Lahiri).offset(at),
            Ayanamsa::Lahiri.offset(at)
        );
    }

    #[test]
    fn test_parse_ayanamsa() {
        assert_eq!("Chitrapaksha".parse::<Ayanamsa>(), Ok(Ayanamsa::Lahiri));
        assert!(matches!(
            "galactic".parse::<Ayanamsa>(),
            Err(EphemerisError::InvalidAyanamsa { .. })
        ));
    }
}

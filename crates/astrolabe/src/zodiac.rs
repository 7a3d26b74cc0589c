//! Ecliptic longitudes and the twelve zodiac signs.
//!
//! Every longitude the engine stores goes through [`Longitude`], so it is
//! finite and normalized to [0, 360).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::body::Planet;
use crate::error::ChartError;

/// Ecliptic longitude in degrees, normalized to [0, 360).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Longitude(f64);

impl Longitude {
    /// Wrap any finite angle into [0, 360).
    pub fn new(degrees: f64) -> Result<Self, ChartError> {
        if !degrees.is_finite() {
            return Err(ChartError::InvalidInput(format!(
                "longitude must be finite, got {degrees}"
            )));
        }
        let normalized = degrees.rem_euclid(360.0);
        // rem_euclid rounds tiny negative inputs up to exactly 360.0
        Ok(Self(if normalized >= 360.0 { 0.0 } else { normalized }))
    }

    /// Accept only a value already inside [0, 360).
    pub fn checked(degrees: f64) -> Result<Self, ChartError> {
        if !degrees.is_finite() || !(0.0..360.0).contains(&degrees) {
            return Err(ChartError::InvalidInput(format!(
                "longitude must be within [0, 360), got {degrees}"
            )));
        }
        Ok(Self(degrees))
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    /// `floor(longitude / 30) mod 12`
    pub fn sign_index(self) -> u8 {
        ((self.0 / 30.0).floor() as u8) % 12
    }

    pub fn sign(self) -> ZodiacSign {
        ZodiacSign::from_index(self.sign_index())
    }

    /// Whole degrees within the sign (0-29).
    pub fn degree_in_sign(self) -> u8 {
        (self.0 % 30.0).floor() as u8
    }

    pub fn minute(self) -> u8 {
        let fraction = (self.0 % 30.0).fract();
        ((fraction * 60.0).floor() as u8).min(59)
    }

    pub fn second(self) -> u8 {
        let minutes = (self.0 % 30.0).fract() * 60.0;
        ((minutes.fract() * 60.0).floor() as u8).min(59)
    }

    /// The same point in a sidereal frame shifted back by `offset` degrees.
    pub fn sidereal(self, offset: f64) -> Result<Self, ChartError> {
        Self::new(self.0 - offset)
    }

    /// The diametrically opposite point.
    pub fn opposite(self) -> Self {
        let shifted = (self.0 + 180.0) % 360.0;
        Self(shifted)
    }
}

impl TryFrom<f64> for Longitude {
    type Error = ChartError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Longitude> for f64 {
    fn from(value: Longitude) -> Self {
        value.0
    }
}

impl fmt::Display for Longitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}°{:02}'{:02}\" {}",
            self.degree_in_sign(),
            self.minute(),
            self.second(),
            self.sign()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % 12) as usize]
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    /// Planetary ruler of the sign.
    ///
    /// Modern rulership hands Scorpio, Aquarius and Pisces to the outer planets.
    pub fn ruler(self, modern: bool) -> Planet {
        match self {
            ZodiacSign::Aries => Planet::Mars,
            ZodiacSign::Taurus | ZodiacSign::Libra => Planet::Venus,
            ZodiacSign::Gemini | ZodiacSign::Virgo => Planet::Mercury,
            ZodiacSign::Cancer => Planet::Moon,
            ZodiacSign::Leo => Planet::Sun,
            ZodiacSign::Scorpio if modern => Planet::Pluto,
            ZodiacSign::Scorpio => Planet::Mars,
            ZodiacSign::Sagittarius => Planet::Jupiter,
            ZodiacSign::Capricorn => Planet::Saturn,
            ZodiacSign::Aquarius if modern => Planet::Uranus,
            ZodiacSign::Aquarius => Planet::Saturn,
            ZodiacSign::Pisces if modern => Planet::Neptune,
            ZodiacSign::Pisces => Planet::Jupiter,
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_into_range() {
        assert_eq!(Longitude::new(370.0).unwrap().degrees(), 10.0);
        assert_eq!(Longitude::new(-30.0).unwrap().degrees(), 330.0);
        assert_eq!(Longitude::new(360.0).unwrap().degrees(), 0.0);
        let tiny = Longitude::new(-1e-20).unwrap().degrees();
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(Longitude::new(f64::NAN), Err(ChartError::InvalidInput(_))));
        assert!(Longitude::new(f64::INFINITY).is_err());
        assert!(Longitude::checked(360.0).is_err());
        assert!(Longitude::checked(-0.5).is_err());
        assert!(Longitude::checked(359.9).is_ok());
    }

    #[test]
    fn test_sign_views() {
        // 95° + 65/128°, exact in binary
        let lon = Longitude::new(95.5078125).unwrap();
        assert_eq!(lon.sign_index(), 3);
        assert_eq!(lon.sign(), ZodiacSign::Cancer);
        assert_eq!(lon.degree_in_sign(), 5);
        assert_eq!(lon.minute(), 30);
        assert_eq!(lon.second(), 28);
    }

    #[test]
    fn test_sidereal_shift_wraps() {
        let lon = Longitude::new(10.0).unwrap();
        let sidereal = lon.sidereal(24.0).unwrap();
        assert!((sidereal.degrees() - 346.0).abs() < 1e-9);
        assert_eq!(sidereal.sign(), ZodiacSign::Pisces);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Longitude::new(200.0).unwrap().opposite().degrees(), 20.0);
    }

    #[test]
    fn test_sign_ruler_traditional() {
        assert_eq!(ZodiacSign::Aries.ruler(false), Planet::Mars);
        assert_eq!(ZodiacSign::Cancer.ruler(false), Planet::Moon);
        assert_eq!(ZodiacSign::Leo.ruler(false), Planet::Sun);
        assert_eq!(ZodiacSign::Scorpio.ruler(false), Planet::Mars);
    }

    #[test]
    fn test_sign_ruler_modern() {
        assert_eq!(ZodiacSign::Scorpio.ruler(true), Planet::Pluto);
        assert_eq!(ZodiacSign::Aquarius.ruler(true), Planet::Uranus);
        assert_eq!(ZodiacSign::Pisces.ruler(true), Planet::Neptune);
    }

    #[test]
    fn test_display() {
        let lon = Longitude::new(0.5).unwrap();
        assert_eq!(lon.to_string(), "00°30'00\" Aries");
    }
}

#![allow(dead_code)]

use astrolabe::ephemeris::{GeoLocation, RawHouses, RawPosition};
use astrolabe::{Ephemeris, EphemerisError, HouseSystem};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;

/// 2019-12-14 13:39:00 UTC
pub const EPOCH_SECONDS: i64 = 1_576_330_740;
pub const LATITUDE: f64 = 37.508_115_3;
pub const LONGITUDE: f64 = -122.285_452_8;

pub fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(EPOCH_SECONDS, 0).unwrap()
}

pub fn days_after_epoch(days: i64) -> DateTime<Utc> {
    epoch() + Duration::days(days)
}

pub fn location() -> GeoLocation {
    GeoLocation::new(LATITUDE, LONGITUDE).unwrap()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Longitude and daily speed at the epoch, indexed by catalog id.
///
/// Sun 10°, Moon 70° (sextile), Mercury 100° (square, retrograde),
/// Venus 130° (trine), Mars 190° (opposition), Saturn 5° (conjunction).
const PLANETS: [(f64, f64); 10] = [
    (10.0, 1.0),
    (70.0, 13.0),
    (100.0, -0.5),
    (130.0, 1.2),
    (190.0, 0.6),
    (250.0, 0.08),
    (5.0, -0.03),
    (33.0, 0.01),
    (300.0, 0.006),
    (222.0, 0.004),
];

/// Sidereal rotation per day, in degrees.
const SIDEREAL_RATE: f64 = 360.985_647;
const ARMC_AT_EPOCH: f64 = 100.0;
const OBLIQUITY: f64 = 23.44;

/// Deterministic ephemeris: every body moves linearly from its epoch
/// longitude. Houses are equal houses from an ascendant a quarter turn past
/// the ARMC; systems built on semi-arcs fail inside the polar circles.
#[derive(Debug, Clone, Default)]
pub struct FixedEphemeris {
    houses: Option<RawHouses>,
    house_position: Option<Result<f64, EphemerisError>>,
    cusp_skew: f64,
    failing_body: Option<i32>,
    overrides: HashMap<i32, (f64, f64)>,
}

impl FixedEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report these angles and cusps instead of computing them.
    pub fn with_houses(mut self, houses: RawHouses) -> Self {
        self.houses = Some(houses);
        self
    }

    /// Answer every house-position query with this value.
    pub fn with_house_position(mut self, result: Result<f64, EphemerisError>) -> Self {
        self.house_position = Some(result);
        self
    }

    /// Report cusps shifted by `degrees` from the frame house positions use.
    pub fn with_cusp_skew(mut self, degrees: f64) -> Self {
        self.cusp_skew = degrees;
        self
    }

    pub fn failing_on(mut self, catalog_id: i32) -> Self {
        self.failing_body = Some(catalog_id);
        self
    }

    pub fn with_body(mut self, catalog_id: i32, longitude: f64, speed: f64) -> Self {
        self.overrides.insert(catalog_id, (longitude, speed));
        self
    }

    fn base(&self, catalog_id: i32) -> (f64, f64) {
        if let Some(base) = self.overrides.get(&catalog_id) {
            return *base;
        }
        match catalog_id {
            0..=9 => PLANETS[catalog_id as usize],
            10 => (95.0, -0.053),
            11 => (96.0, -0.05),
            id => (f64::from(id.rem_euclid(360)) + 0.5, 0.2),
        }
    }
}

fn days_since_epoch(at: DateTime<Utc>) -> f64 {
    (at - epoch()).num_milliseconds() as f64 / 86_400_000.0
}

fn frame_ascendant(armc: f64) -> f64 {
    (armc + 90.0).rem_euclid(360.0)
}

fn needs_semi_arc(system: HouseSystem) -> bool {
    matches!(
        system,
        HouseSystem::Placidus | HouseSystem::Koch | HouseSystem::Alcabitius
    )
}

impl Ephemeris for FixedEphemeris {
    fn position(&self, catalog_id: i32, at: DateTime<Utc>) -> Result<RawPosition, EphemerisError> {
        if self.failing_body == Some(catalog_id) {
            return Err(EphemerisError::CalculationFailed {
                catalog_id,
                datetime: at,
                message: "no data".to_string(),
            });
        }
        let (longitude, speed) = self.base(catalog_id);
        Ok(RawPosition {
            longitude: (longitude + speed * days_since_epoch(at)).rem_euclid(360.0),
            latitude: 0.0,
            distance: 1.0,
            speed,
        })
    }

    fn house_cusps(
        &self,
        at: DateTime<Utc>,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<RawHouses, EphemerisError> {
        if let Some(houses) = self.houses {
            return Ok(houses);
        }
        if needs_semi_arc(system) && location.lat.abs() > 90.0 - OBLIQUITY {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("{system} undefined at latitude {}", location.lat),
            });
        }
        let (armc, _) = self.armc_and_obliquity(at, location.lon)?;
        let ascendant = (frame_ascendant(armc) + self.cusp_skew).rem_euclid(360.0);
        let first = match system {
            HouseSystem::WholeSign => (ascendant / 30.0).floor() * 30.0,
            _ => ascendant,
        };
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = (first + 30.0 * i as f64).rem_euclid(360.0);
        }
        Ok(RawHouses {
            ascendant,
            midheaven: (ascendant + 270.0).rem_euclid(360.0),
            cusps,
        })
    }

    fn armc_and_obliquity(
        &self,
        at: DateTime<Utc>,
        geo_longitude: f64,
    ) -> Result<(f64, f64), EphemerisError> {
        let armc = ARMC_AT_EPOCH + SIDEREAL_RATE * days_since_epoch(at) + geo_longitude;
        Ok((armc.rem_euclid(360.0), OBLIQUITY))
    }

    fn house_position(
        &self,
        armc: f64,
        _latitude: f64,
        _obliquity: f64,
        _system: HouseSystem,
        longitude: f64,
    ) -> Result<f64, EphemerisError> {
        match &self.house_position {
            Some(result) => result.clone(),
            None => Ok(1.0 + (longitude - frame_ascendant(armc)).rem_euclid(360.0) / 30.0),
        }
    }
}

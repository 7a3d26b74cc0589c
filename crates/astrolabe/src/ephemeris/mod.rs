pub mod adapter;
pub mod ayanamsa;
pub mod types;

pub use adapter::{julian_day, EphemerisConfig, SwissEphemeris};
pub use ayanamsa::{Ayanamsa, Zodiac};
pub use types::{GeoLocation, RawHouses, RawPosition};

use chrono::{DateTime, Utc};

use crate::error::EphemerisError;
use crate::houses::HouseSystem;

/// Source of body positions and house frames.
///
/// Implementations must be safe to share between threads: one backend is
/// shared by every chart built from it. Cusps and house positions must come
/// from the same frame, so a longitude on cusp n reports position n.
pub trait Ephemeris: Send + Sync {
    /// Tropical geocentric position of a body by catalog id.
    fn position(&self, catalog_id: i32, at: DateTime<Utc>) -> Result<RawPosition, EphemerisError>;

    /// Angles and cusps for a location.
    fn house_cusps(
        &self,
        at: DateTime<Utc>,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<RawHouses, EphemerisError>;

    /// ARMC and true obliquity in degrees. `geo_longitude` is east positive.
    fn armc_and_obliquity(
        &self,
        at: DateTime<Utc>,
        geo_longitude: f64,
    ) -> Result<(f64, f64), EphemerisError>;

    /// Continuous house position of an ecliptic longitude, in [1, 13).
    fn house_position(
        &self,
        armc: f64,
        latitude: f64,
        obliquity: f64,
        system: HouseSystem,
        longitude: f64,
    ) -> Result<f64, EphemerisError>;
}

//! Astrological chart engine.
//!
//! Body positions, house cusps and aspects for an instant and a place,
//! computed through an [`Ephemeris`] backend, plus transit comparison
//! against an existing chart.

pub mod aspects;
pub mod body;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod positions;
pub mod zodiac;

pub use aspects::{angular_separation, classify, AspectCalculator, AspectInfo, AspectKind, AspectMatch};
pub use body::{Asteroid, CelestialBody, LunarNode, Planet};
pub use chart::{Chart, ChartRequest, ChartSnapshot, TransitView};
pub use ephemeris::{Ayanamsa, Ephemeris, EphemerisConfig, GeoLocation, SwissEphemeris, Zodiac};
pub use error::{ChartError, EphemerisError};
pub use houses::{HouseCuspSet, HouseSystem};
pub use positions::{BodyPositionSet, Coordinate};
pub use zodiac::{Longitude, ZodiacSign};

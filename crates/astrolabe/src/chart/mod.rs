//! Chart assembly: positions, houses and aspects for one instant and place.

pub mod transit;

pub use transit::TransitView;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::aspects::{AspectCalculator, AspectInfo, DEFAULT_ORB};
use crate::body::{Asteroid, CelestialBody, Planet};
use crate::ephemeris::{Ayanamsa, Ephemeris, GeoLocation, Zodiac};
use crate::error::ChartError;
use crate::houses::{HouseCuspSet, HouseSystem};
use crate::positions::{BodyPositionSet, Coordinate};
use crate::zodiac::Longitude;

fn default_orb() -> f64 {
    DEFAULT_ORB
}

/// Everything needed to cast a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub instant: DateTime<Utc>,
    pub location: GeoLocation,
    pub house_system: HouseSystem,
    #[serde(default = "default_orb")]
    pub orb: f64,
    #[serde(default = "Asteroid::defaults")]
    pub asteroids: Vec<Asteroid>,
    #[serde(default)]
    pub zodiac: Zodiac,
}

impl ChartRequest {
    /// Placidus houses, an 8° orb, the default asteroids and the tropical
    /// zodiac.
    pub fn new(instant: DateTime<Utc>, location: GeoLocation) -> Self {
        Self {
            instant,
            location,
            house_system: HouseSystem::Placidus,
            orb: DEFAULT_ORB,
            asteroids: Asteroid::defaults(),
            zodiac: Zodiac::Tropical,
        }
    }

    pub fn with_house_system(mut self, house_system: HouseSystem) -> Self {
        self.house_system = house_system;
        self
    }

    pub fn with_orb(mut self, orb: f64) -> Self {
        self.orb = orb;
        self
    }

    pub fn with_asteroids(mut self, asteroids: Vec<Asteroid>) -> Self {
        self.asteroids = asteroids;
        self
    }

    pub fn with_zodiac(mut self, zodiac: Zodiac) -> Self {
        self.zodiac = zodiac;
        self
    }
}

/// Serializable view of a [`Chart`] without its ephemeris handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub request: ChartRequest,
    pub positions: BodyPositionSet,
    pub houses: HouseCuspSet,
    pub aspects: Vec<AspectInfo>,
}

/// An immutable chart. Cheap to share behind an `Arc`.
#[derive(Clone)]
pub struct Chart {
    ephemeris: Arc<dyn Ephemeris>,
    request: ChartRequest,
    positions: BodyPositionSet,
    houses: HouseCuspSet,
    aspects: Vec<AspectInfo>,
}

impl Chart {
    pub fn build(ephemeris: Arc<dyn Ephemeris>, request: ChartRequest) -> Result<Self, ChartError> {
        request.location.validate()?;
        let calculator = AspectCalculator::new(request.orb)?;

        let positions =
            BodyPositionSet::compute(ephemeris.as_ref(), request.instant, &request.asteroids)?;
        let houses = HouseCuspSet::compute(
            ephemeris.as_ref(),
            request.instant,
            request.location,
            request.house_system,
        )?;
        let aspects = calculator.within(&positions.planets)?;

        log::debug!(
            "chart at {} ({}): {} asteroids, {} aspects",
            request.instant,
            request.house_system,
            positions.asteroids.len(),
            aspects.len()
        );

        Ok(Self {
            ephemeris,
            request,
            positions,
            houses,
            aspects,
        })
    }

    pub fn request(&self) -> &ChartRequest {
        &self.request
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.request.instant
    }

    pub fn location(&self) -> GeoLocation {
        self.request.location
    }

    pub fn house_system(&self) -> HouseSystem {
        self.request.house_system
    }

    pub fn orb(&self) -> f64 {
        self.request.orb
    }

    pub fn asteroid_selection(&self) -> &[Asteroid] {
        &self.request.asteroids
    }

    pub fn zodiac(&self) -> Zodiac {
        self.request.zodiac
    }

    pub fn ephemeris(&self) -> &Arc<dyn Ephemeris> {
        &self.ephemeris
    }

    pub fn positions(&self) -> &BodyPositionSet {
        &self.positions
    }

    pub fn houses(&self) -> &HouseCuspSet {
        &self.houses
    }

    /// Aspects over all unordered planet pairs, in pair order.
    pub fn aspects(&self) -> &[AspectInfo] {
        &self.aspects
    }

    pub fn planet(&self, planet: Planet) -> &Coordinate {
        self.positions.planet(planet)
    }

    /// `None` when the body was not part of the selection.
    pub fn position(&self, body: &CelestialBody) -> Option<&Coordinate> {
        self.positions.get(body)
    }

    pub fn asteroid(&self, asteroid: &Asteroid) -> Option<&Coordinate> {
        self.positions.asteroids.get(asteroid)
    }

    pub fn aspects_involving(&self, planet: Planet) -> impl Iterator<Item = &AspectInfo> + '_ {
        self.aspects.iter().filter(move |aspect| aspect.involves(planet))
    }

    /// House of an arbitrary longitude in this chart's houses.
    pub fn house_of_longitude(&self, longitude: f64) -> Result<u8, ChartError> {
        self.houses.house_of(self.ephemeris.as_ref(), longitude)
    }

    pub fn house_of(&self, body: &CelestialBody) -> Result<u8, ChartError> {
        let coordinate = self
            .position(body)
            .ok_or_else(|| ChartError::NotComputed(body.to_string()))?;
        self.house_of_longitude(coordinate.longitude.degrees())
    }

    /// Ayanamsa offset at this chart's instant.
    pub fn sidereal_offset(&self, ayanamsa: Ayanamsa) -> f64 {
        ayanamsa.offset(self.request.instant)
    }

    /// A body's longitude in the requested zodiac. Stored positions stay
    /// tropical.
    pub fn zodiac_longitude(&self, body: &CelestialBody) -> Result<Longitude, ChartError> {
        let coordinate = self
            .position(body)
            .ok_or_else(|| ChartError::NotComputed(body.to_string()))?;
        coordinate.sidereal_longitude(self.request.zodiac.offset(self.request.instant))
    }

    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            request: self.request.clone(),
            positions: self.positions.clone(),
            houses: self.houses.clone(),
            aspects: self.aspects.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }
}

impl fmt::Debug for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chart")
            .field("request", &self.request)
            .field("positions", &self.positions)
            .field("houses", &self.houses)
            .field("aspects", &self.aspects)
            .finish_non_exhaustive()
    }
}

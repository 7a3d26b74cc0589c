use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::Chart;
use crate::aspects::{AspectCalculator, AspectInfo};
use crate::body::{CelestialBody, Planet};
use crate::error::ChartError;
use crate::houses::HouseCuspSet;
use crate::positions::{BodyPositionSet, Coordinate};

/// A second instant compared against a natal chart.
///
/// Positions and houses are computed at the transit instant using the natal
/// chart's location, house system, asteroid selection and ephemeris.
#[derive(Debug, Clone)]
pub struct TransitView {
    natal: Arc<Chart>,
    instant: DateTime<Utc>,
    orb: f64,
    positions: BodyPositionSet,
    houses: HouseCuspSet,
    aspects: Vec<AspectInfo>,
}

impl TransitView {
    pub fn build(natal: Arc<Chart>, instant: DateTime<Utc>, orb: f64) -> Result<Self, ChartError> {
        let calculator = AspectCalculator::new(orb)?;
        let ephemeris = natal.ephemeris().as_ref();

        let positions = BodyPositionSet::compute(ephemeris, instant, natal.asteroid_selection())?;
        let houses =
            HouseCuspSet::compute(ephemeris, instant, natal.location(), natal.house_system())?;
        // transit planet first, natal planet second
        let aspects = calculator.between(&positions.planets, &natal.positions().planets)?;

        log::debug!(
            "transit at {} against chart at {}: {} cross-aspects",
            instant,
            natal.instant(),
            aspects.len()
        );

        Ok(Self {
            natal,
            instant,
            orb,
            positions,
            houses,
            aspects,
        })
    }

    pub fn natal(&self) -> &Arc<Chart> {
        &self.natal
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn orb(&self) -> f64 {
        self.orb
    }

    pub fn positions(&self) -> &BodyPositionSet {
        &self.positions
    }

    pub fn houses(&self) -> &HouseCuspSet {
        &self.houses
    }

    /// Cross-aspects in (transit planet, natal planet) order.
    pub fn aspects(&self) -> &[AspectInfo] {
        &self.aspects
    }

    pub fn position(&self, body: &CelestialBody) -> Option<&Coordinate> {
        self.positions.get(body)
    }

    /// Aspects that land on a natal planet.
    pub fn aspects_to_natal(&self, planet: Planet) -> impl Iterator<Item = &AspectInfo> + '_ {
        self.aspects.iter().filter(move |aspect| aspect.second == planet)
    }

    /// Aspects made by a transiting planet.
    pub fn aspects_from_transit(&self, planet: Planet) -> impl Iterator<Item = &AspectInfo> + '_ {
        self.aspects.iter().filter(move |aspect| aspect.first == planet)
    }

    fn transit_longitude(&self, body: &CelestialBody) -> Result<f64, ChartError> {
        self.position(body)
            .map(|coordinate| coordinate.longitude.degrees())
            .ok_or_else(|| ChartError::NotComputed(body.to_string()))
    }

    /// House of a transiting body in the transit houses.
    pub fn house_of(&self, body: &CelestialBody) -> Result<u8, ChartError> {
        let longitude = self.transit_longitude(body)?;
        self.houses.house_of(self.natal.ephemeris().as_ref(), longitude)
    }

    /// House of a transiting body in the natal houses.
    pub fn natal_house_of(&self, body: &CelestialBody) -> Result<u8, ChartError> {
        let longitude = self.transit_longitude(body)?;
        self.natal.house_of_longitude(longitude)
    }
}

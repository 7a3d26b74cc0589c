//! Body positions at a single instant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::body::{Asteroid, CelestialBody, LunarNode, Planet};
use crate::ephemeris::{Ephemeris, RawPosition};
use crate::error::ChartError;
use crate::zodiac::Longitude;

/// Computed position of one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub body: CelestialBody,
    pub longitude: Longitude,
    /// Ecliptic latitude in degrees
    pub latitude: f64,
    /// Distance in AU
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
}

impl Coordinate {
    pub fn from_raw(body: CelestialBody, raw: RawPosition) -> Result<Self, ChartError> {
        if !raw.speed.is_finite() || !raw.latitude.is_finite() {
            return Err(ChartError::InvalidInput(format!(
                "{body}: non-finite latitude or speed"
            )));
        }
        Ok(Self {
            body,
            longitude: Longitude::new(raw.longitude)?,
            latitude: raw.latitude,
            distance: raw.distance,
            speed: raw.speed,
        })
    }

    pub fn is_retrograde(&self) -> bool {
        self.speed < 0.0
    }

    /// Longitude in a sidereal zodiac with the given ayanamsa offset.
    pub fn sidereal_longitude(&self, offset: f64) -> Result<Longitude, ChartError> {
        self.longitude.sidereal(offset)
    }
}

fn query(
    ephemeris: &dyn Ephemeris,
    body: CelestialBody,
    at: DateTime<Utc>,
) -> Result<Coordinate, ChartError> {
    let raw = ephemeris.position(body.catalog_id(), at)?;
    Coordinate::from_raw(body, raw)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPositions {
    pub sun: Coordinate,
    pub moon: Coordinate,
    pub mercury: Coordinate,
    pub venus: Coordinate,
    pub mars: Coordinate,
    pub jupiter: Coordinate,
    pub saturn: Coordinate,
    pub uranus: Coordinate,
    pub neptune: Coordinate,
    pub pluto: Coordinate,
}

impl PlanetPositions {
    pub fn compute(ephemeris: &dyn Ephemeris, at: DateTime<Utc>) -> Result<Self, ChartError> {
        let q = |planet: Planet| query(ephemeris, planet.into(), at);
        Ok(Self {
            sun: q(Planet::Sun)?,
            moon: q(Planet::Moon)?,
            mercury: q(Planet::Mercury)?,
            venus: q(Planet::Venus)?,
            mars: q(Planet::Mars)?,
            jupiter: q(Planet::Jupiter)?,
            saturn: q(Planet::Saturn)?,
            uranus: q(Planet::Uranus)?,
            neptune: q(Planet::Neptune)?,
            pluto: q(Planet::Pluto)?,
        })
    }

    pub fn get(&self, planet: Planet) -> &Coordinate {
        match planet {
            Planet::Sun => &self.sun,
            Planet::Moon => &self.moon,
            Planet::Mercury => &self.mercury,
            Planet::Venus => &self.venus,
            Planet::Mars => &self.mars,
            Planet::Jupiter => &self.jupiter,
            Planet::Saturn => &self.saturn,
            Planet::Uranus => &self.uranus,
            Planet::Neptune => &self.neptune,
            Planet::Pluto => &self.pluto,
        }
    }

    /// Positions in catalog order, Sun first.
    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> + '_ {
        Planet::ALL.into_iter().map(move |planet| self.get(planet))
    }
}

/// North nodes as queried, and the south nodes derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePositions {
    pub mean_node: Coordinate,
    pub true_node: Coordinate,
    pub mean_south_node: Coordinate,
    pub true_south_node: Coordinate,
}

/// The north node's longitude plus 180°, latitude mirrored, same speed.
fn opposite_node(node: LunarNode, north: &Coordinate) -> Coordinate {
    Coordinate {
        body: CelestialBody::SouthNode(node),
        longitude: north.longitude.opposite(),
        latitude: -north.latitude,
        distance: north.distance,
        speed: north.speed,
    }
}

impl NodePositions {
    pub fn compute(ephemeris: &dyn Ephemeris, at: DateTime<Utc>) -> Result<Self, ChartError> {
        let mean_node = query(ephemeris, LunarNode::Mean.into(), at)?;
        let true_node = query(ephemeris, LunarNode::True.into(), at)?;
        Ok(Self::from_north(mean_node, true_node))
    }

    pub fn from_north(mean_node: Coordinate, true_node: Coordinate) -> Self {
        Self {
            mean_south_node: opposite_node(LunarNode::Mean, &mean_node),
            true_south_node: opposite_node(LunarNode::True, &true_node),
            mean_node,
            true_node,
        }
    }

    /// North node of the given kind.
    pub fn get(&self, node: LunarNode) -> &Coordinate {
        match node {
            LunarNode::Mean => &self.mean_node,
            LunarNode::True => &self.true_node,
        }
    }

    pub fn south_node(&self, node: LunarNode) -> &Coordinate {
        match node {
            LunarNode::Mean => &self.mean_south_node,
            LunarNode::True => &self.true_south_node,
        }
    }
}

/// Asteroid positions in selection order.
///
/// Lookups match the whole [`Asteroid`], catalog id and name, so a body
/// requested under one name is not found under another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsteroidPositions {
    positions: Vec<Coordinate>,
}

impl AsteroidPositions {
    pub fn compute(
        ephemeris: &dyn Ephemeris,
        at: DateTime<Utc>,
        selection: &[Asteroid],
    ) -> Result<Self, ChartError> {
        let mut positions: Vec<Coordinate> = Vec::with_capacity(selection.len());
        for asteroid in selection {
            let body = CelestialBody::Asteroid(asteroid.clone());
            if positions.iter().any(|known| known.body == body) {
                continue;
            }
            positions.push(query(ephemeris, body, at)?);
        }
        Ok(Self { positions })
    }

    pub fn get(&self, asteroid: &Asteroid) -> Option<&Coordinate> {
        self.positions.iter().find(|coordinate| match &coordinate.body {
            CelestialBody::Asteroid(known) => known == asteroid,
            _ => false,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> + '_ {
        self.positions.iter()
    }
}

/// Every requested body at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPositionSet {
    pub instant: DateTime<Utc>,
    pub planets: PlanetPositions,
    pub nodes: NodePositions,
    pub asteroids: AsteroidPositions,
}

impl BodyPositionSet {
    /// Query every planet, both nodes and the selected asteroids. The first
    /// failing query aborts the set.
    pub fn compute(
        ephemeris: &dyn Ephemeris,
        at: DateTime<Utc>,
        asteroids: &[Asteroid],
    ) -> Result<Self, ChartError> {
        Ok(Self {
            instant: at,
            planets: PlanetPositions::compute(ephemeris, at)?,
            nodes: NodePositions::compute(ephemeris, at)?,
            asteroids: AsteroidPositions::compute(ephemeris, at, asteroids)?,
        })
    }

    /// `None` for an asteroid that was not requested.
    pub fn get(&self, body: &CelestialBody) -> Option<&Coordinate> {
        match body {
            CelestialBody::Planet(planet) => Some(self.planets.get(*planet)),
            CelestialBody::Node(node) => Some(self.nodes.get(*node)),
            CelestialBody::SouthNode(node) => Some(self.nodes.south_node(*node)),
            CelestialBody::Asteroid(asteroid) => self.asteroids.get(asteroid),
        }
    }

    pub fn planet(&self, planet: Planet) -> &Coordinate {
        self.planets.get(planet)
    }
}

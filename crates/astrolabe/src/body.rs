//! Celestial body identities.
//!
//! Planets and lunar nodes are closed sets; asteroids are open and
//! identified by their Swiss Ephemeris catalog number.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Offset Swiss Ephemeris adds to a minor-planet number to form its body id.
pub const AST_OFFSET: i32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    /// The ten planets in catalog order. Chart aspects iterate in this order.
    pub const ALL: [Planet; 10] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
    ];

    pub fn catalog_id(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Planet::Sun => "sun",
            Planet::Moon => "moon",
            Planet::Mercury => "mercury",
            Planet::Venus => "venus",
            Planet::Mars => "mars",
            Planet::Jupiter => "jupiter",
            Planet::Saturn => "saturn",
            Planet::Uranus => "uranus",
            Planet::Neptune => "neptune",
            Planet::Pluto => "pluto",
        }
    }
}

impl FromStr for Planet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Planet::ALL
            .iter()
            .copied()
            .find(|planet| planet.name() == lower)
            .ok_or_else(|| format!("unknown planet: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LunarNode {
    Mean,
    True,
}

impl LunarNode {
    pub fn catalog_id(self) -> i32 {
        match self {
            LunarNode::Mean => 10,
            LunarNode::True => 11,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LunarNode::Mean => "mean_node",
            LunarNode::True => "true_node",
        }
    }

    pub fn south_name(self) -> &'static str {
        match self {
            LunarNode::Mean => "mean_south_node",
            LunarNode::True => "true_south_node",
        }
    }
}

/// A minor body requested by catalog id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asteroid {
    pub catalog_id: i32,
    pub name: String,
}

impl Asteroid {
    pub fn new(catalog_id: i32, name: impl Into<String>) -> Self {
        Self {
            catalog_id,
            name: name.into(),
        }
    }

    /// A numbered minor planet, e.g. `Asteroid::numbered(433, "Eros")`.
    pub fn numbered(number: i32, name: impl Into<String>) -> Self {
        Self::new(AST_OFFSET + number, name)
    }

    pub fn chiron() -> Self {
        Self::new(15, "Chiron")
    }

    pub fn pholus() -> Self {
        Self::new(16, "Pholus")
    }

    pub fn ceres() -> Self {
        Self::new(17, "Ceres")
    }

    pub fn pallas() -> Self {
        Self::new(18, "Pallas")
    }

    pub fn juno() -> Self {
        Self::new(19, "Juno")
    }

    pub fn vesta() -> Self {
        Self::new(20, "Vesta")
    }

    /// The ten asteroids a chart tracks unless told otherwise.
    pub fn defaults() -> Vec<Asteroid> {
        vec![
            Self::chiron(),
            Self::pholus(),
            Self::ceres(),
            Self::pallas(),
            Self::juno(),
            Self::vesta(),
            Self::numbered(10, "Hygiea"),
            Self::numbered(16, "Psyche"),
            Self::numbered(80, "Sappho"),
            Self::numbered(433, "Eros"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CelestialBody {
    Planet(Planet),
    Node(LunarNode),
    /// Point opposite a north node. Derived, never queried.
    SouthNode(LunarNode),
    Asteroid(Asteroid),
}

impl CelestialBody {
    /// Catalog id to query. A south node reports its north node's id.
    pub fn catalog_id(&self) -> i32 {
        match self {
            CelestialBody::Planet(planet) => planet.catalog_id(),
            CelestialBody::Node(node) | CelestialBody::SouthNode(node) => node.catalog_id(),
            CelestialBody::Asteroid(asteroid) => asteroid.catalog_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CelestialBody::Planet(planet) => planet.name(),
            CelestialBody::Node(node) => node.name(),
            CelestialBody::SouthNode(node) => node.south_name(),
            CelestialBody::Asteroid(asteroid) => &asteroid.name,
        }
    }

    pub fn as_planet(&self) -> Option<Planet> {
        match self {
            CelestialBody::Planet(planet) => Some(*planet),
            _ => None,
        }
    }
}

impl From<Planet> for CelestialBody {
    fn from(planet: Planet) -> Self {
        CelestialBody::Planet(planet)
    }
}

impl From<LunarNode> for CelestialBody {
    fn from(node: LunarNode) -> Self {
        CelestialBody::Node(node)
    }
}

impl From<Asteroid> for CelestialBody {
    fn from(asteroid: Asteroid) -> Self {
        CelestialBody::Asteroid(asteroid)
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_planet_catalog_ids_follow_order() {
        for (index, planet) in Planet::ALL.iter().enumerate() {
            assert_eq!(planet.catalog_id(), index as i32);
        }
    }

    #[test]
    fn test_default_asteroids_are_distinct() {
        let defaults = Asteroid::defaults();
        assert_eq!(defaults.len(), 10);
        let ids: HashSet<i32> = defaults.iter().map(|a| a.catalog_id).collect();
        assert_eq!(ids.len(), 10);
        assert!(ids.contains(&10_433));
    }

    #[test]
    fn test_body_identity() {
        let body: CelestialBody = Asteroid::ceres().into();
        assert_eq!(body.catalog_id(), 17);
        assert_eq!(body.name(), "Ceres");
        assert_eq!(body.as_planet(), None);
        assert_eq!(CelestialBody::from(LunarNode::True).catalog_id(), 11);
        let south = CelestialBody::SouthNode(LunarNode::True);
        assert_ne!(south, CelestialBody::from(LunarNode::True));
        assert_eq!(south.to_string(), "true_south_node");
        assert_eq!("Mars".parse::<Planet>(), Ok(Planet::Mars));
        assert!("vulcan".parse::<Planet>().is_err());
    }
}

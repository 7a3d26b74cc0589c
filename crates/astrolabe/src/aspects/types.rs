use serde::{Deserialize, Serialize};
use std::fmt;

use crate::body::Planet;

/// Within this many degrees an aspect is "exact".
pub const EXACT_ORB: f64 = 0.1;

/// The five canonical aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    /// Classification order. The first kind within orb wins.
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact angle in degrees.
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of classifying one separation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectMatch {
    pub kind: AspectKind,
    /// Signed deviation: separation minus the exact angle
    pub remainder: f64,
}

impl AspectMatch {
    pub fn orb(&self) -> f64 {
        self.remainder.abs()
    }
}

/// An aspect between two planets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectInfo {
    pub first: Planet,
    pub second: Planet,
    pub kind: AspectKind,
    /// Absolute deviation from the exact angle
    pub orb: f64,
    /// Whether the aspect is exact (within 0.1 degrees)
    pub exact: bool,
    /// Whether either planet is retrograde
    pub retrograde: bool,
}

impl AspectInfo {
    pub fn new(first: Planet, second: Planet, found: AspectMatch, retrograde: bool) -> Self {
        let orb = found.orb();
        Self {
            first,
            second,
            kind: found.kind,
            orb,
            exact: orb < EXACT_ORB,
            retrograde,
        }
    }

    pub fn involves(&self, planet: Planet) -> bool {
        self.first == planet || self.second == planet
    }

    /// Always false: motion toward exactness is not tracked.
    pub fn is_applying(&self) -> bool {
        false
    }
}

impl fmt::Display for AspectInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({:.2}°)",
            self.first.name(),
            self.kind,
            self.second.name(),
            self.orb
        )
    }
}

use crate::aspects::types::{AspectInfo, AspectKind, AspectMatch};
use crate::body::Planet;
use crate::error::ChartError;
use crate::positions::PlanetPositions;
use crate::zodiac::Longitude;

/// Default orb tolerance in degrees.
pub const DEFAULT_ORB: f64 = 8.0;

/// Minimal angular distance between two longitudes, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let raw_diff = (a - b).abs() % 360.0;
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// Match the separation of two longitudes against the canonical aspects.
///
/// Kinds are tried in [`AspectKind::ALL`] order and the first one within
/// `orb` wins, even if a later kind would be closer. Both longitudes must
/// lie in [0, 360).
pub fn classify(a: f64, b: f64, orb: f64) -> Result<Option<AspectMatch>, ChartError> {
    let a = Longitude::checked(a)?;
    let b = Longitude::checked(b)?;
    validate_orb(orb)?;

    let separation = angular_separation(a.degrees(), b.degrees());
    Ok(AspectKind::ALL.into_iter().find_map(|kind| {
        let remainder = separation - kind.angle();
        (remainder.abs() <= orb).then_some(AspectMatch { kind, remainder })
    }))
}

pub fn validate_orb(orb: f64) -> Result<(), ChartError> {
    if !orb.is_finite() || orb < 0.0 {
        return Err(ChartError::InvalidInput(format!(
            "orb must be a non-negative number, got {orb}"
        )));
    }
    Ok(())
}

/// Aspect calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectCalculator {
    orb: f64,
}

impl AspectCalculator {
    pub fn new(orb: f64) -> Result<Self, ChartError> {
        validate_orb(orb)?;
        Ok(Self { orb })
    }

    pub fn orb(&self) -> f64 {
        self.orb
    }

    /// Aspects among one set of planets: every unordered pair, `i < j`, in
    /// catalog order.
    pub fn within(&self, planets: &PlanetPositions) -> Result<Vec<AspectInfo>, ChartError> {
        let mut aspects = Vec::new();
        for (i, &first) in Planet::ALL.iter().enumerate() {
            for &second in &Planet::ALL[i + 1..] {
                if let Some(aspect) = self.pair(first, second, planets, planets)? {
                    aspects.push(aspect);
                }
            }
        }
        Ok(aspects)
    }

    /// Aspects from every planet in `from` to every planet in `to`, including
    /// a planet to its own counterpart.
    pub fn between(
        &self,
        from: &PlanetPositions,
        to: &PlanetPositions,
    ) -> Result<Vec<AspectInfo>, ChartError> {
        let mut aspects = Vec::new();
        for first in Planet::ALL {
            for second in Planet::ALL {
                if let Some(aspect) = self.pair(first, second, from, to)? {
                    aspects.push(aspect);
                }
            }
        }
        Ok(aspects)
    }

    fn pair(
        &self,
        first: Planet,
        second: Planet,
        from: &PlanetPositions,
        to: &PlanetPositions,
    ) -> Result<Option<AspectInfo>, ChartError> {
        let a = from.get(first);
        let b = to.get(second);
        let found = classify(a.longitude.degrees(), b.longitude.degrees(), self.orb)?;
        Ok(found.map(|m| AspectInfo::new(first, second, m, a.is_retrograde() || b.is_retrograde())))
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self { orb: DEFAULT_ORB }
    }
}

use anyhow::Context;
use astrolabe::{Asteroid, ChartRequest, EphemerisConfig, GeoLocation, HouseSystem, Zodiac};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

const CONFIG_PATHS: [&str; 2] = ["configs/astrolabe.toml", "../../configs/astrolabe.toml"];

#[derive(Debug, Clone)]
pub struct ChartSettings {
    pub ephemeris: EphemerisConfig,
    pub house_system: HouseSystem,
    pub orb: f64,
    pub zodiac: Zodiac,
    pub asteroids: Vec<Asteroid>,
}

impl ChartSettings {
    /// A chart request for `instant` and `location` using these settings.
    pub fn request(&self, instant: DateTime<Utc>, location: GeoLocation) -> ChartRequest {
        ChartRequest::new(instant, location)
            .with_house_system(self.house_system)
            .with_orb(self.orb)
            .with_asteroids(self.asteroids.clone())
            .with_zodiac(self.zodiac)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartToml {
    #[serde(default = "default_house_system")]
    house_system: String,
    #[serde(default = "default_orb")]
    orb: f64,
    #[serde(default = "default_zodiac")]
    zodiac: String,
    #[serde(default)]
    ayanamsa: Option<String>,
}

impl Default for ChartToml {
    fn default() -> Self {
        Self {
            house_system: default_house_system(),
            orb: default_orb(),
            zodiac: default_zodiac(),
            ayanamsa: None,
        }
    }
}

fn default_house_system() -> String {
    "placidus".to_string()
}

fn default_orb() -> f64 {
    8.0
}

fn default_zodiac() -> String {
    "tropical".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
struct CustomAsteroidToml {
    id: i32,
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct AsteroidsToml {
    #[serde(default = "default_true")]
    defaults: bool,
    #[serde(default)]
    custom: Vec<CustomAsteroidToml>,
}

impl Default for AsteroidsToml {
    fn default() -> Self {
        Self {
            defaults: true,
            custom: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    chart: ChartToml,
    #[serde(default)]
    asteroids: AsteroidsToml,
}

/// Try common relative paths for `configs/astrolabe.toml`.
pub fn read_config_text() -> anyhow::Result<String> {
    for p in &CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            log::debug!("loaded chart settings from {p}");
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load astrolabe.toml from {:?}", CONFIG_PATHS);
}

pub fn parse_settings(text: &str) -> anyhow::Result<ChartSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse astrolabe.toml: {e}"))?;
    let RootConfigToml {
        ephemeris,
        chart,
        asteroids,
    } = root;

    let ephemeris = match ephemeris.path {
        Some(path) => EphemerisConfig::new(path),
        None => EphemerisConfig::from_env(),
    };

    let house_system: HouseSystem = chart
        .house_system
        .parse()
        .context("chart.house_system")?;

    if !chart.orb.is_finite() || chart.orb < 0.0 {
        anyhow::bail!("chart.orb must be a non-negative number, got {}", chart.orb);
    }

    let zodiac = match chart.zodiac.to_lowercase().as_str() {
        "tropical" => Zodiac::Tropical,
        "sidereal" => {
            let name = chart.ayanamsa.as_deref().unwrap_or("lahiri");
            Zodiac::Sidereal(name.parse().context("chart.ayanamsa")?)
        }
        other => anyhow::bail!(
            "chart.zodiac must be \"tropical\" or \"sidereal\", got {other:?}"
        ),
    };

    let mut selection = if asteroids.defaults {
        Asteroid::defaults()
    } else {
        Vec::new()
    };
    for custom in asteroids.custom {
        if custom.id < 0 {
            anyhow::bail!("asteroid {} has a negative catalog id {}", custom.name, custom.id);
        }
        if selection.iter().any(|a| a.catalog_id == custom.id) {
            log::warn!("asteroid {} ({}) is already selected", custom.name, custom.id);
            continue;
        }
        selection.push(Asteroid::new(custom.id, custom.name));
    }

    Ok(ChartSettings {
        ephemeris,
        house_system,
        orb: chart.orb,
        zodiac,
        asteroids: selection,
    })
}

pub fn load_settings() -> anyhow::Result<ChartSettings> {
    let text = read_config_text()?;
    parse_settings(&text)
}

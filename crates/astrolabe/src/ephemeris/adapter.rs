use chrono::{DateTime, Datelike, Timelike, Utc};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};
use swisseph::swe::{calc, calc_ut, degnorm, deltat, house_pos, houses_ex, julday, set_ephe_path, sidtime};
use swisseph::{AscMc, Cusp};

use crate::ephemeris::types::{GeoLocation, RawHouses, RawPosition};
use crate::ephemeris::Ephemeris;
use crate::error::EphemerisError;
use crate::houses::HouseSystem;

const DEFAULT_PATH: &str = "/usr/local/share/swisseph";
const PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

// FLG_SWIEPH | FLG_SPEED
const CALC_FLAGS: u32 = 2 | 256;
const HOUSE_FLAGS: i32 = 0;
// SE_ECL_NUT: obliquity and nutation instead of a body
const ECL_NUT: i32 = -1;
const GREG_CAL: u32 = 1;

/// Ephemeris data path for the whole process. Set once.
static INSTALLED_PATH: OnceLock<PathBuf> = OnceLock::new();

/// The C library keeps global state; calls are serialized.
static SWISS_LOCK: Mutex<()> = Mutex::new(());

fn swiss_lock() -> MutexGuard<'static, ()> {
    SWISS_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Julian day (UT) of an instant.
pub fn julian_day(at: DateTime<Utc>) -> f64 {
    let seconds = f64::from(at.second()) + f64::from(at.nanosecond()) * 1e-9;
    let hour_decimal = f64::from(at.hour()) + f64::from(at.minute()) / 60.0 + seconds / 3600.0;
    julday(at.year(), at.month() as i32, at.day() as i32, hour_decimal, GREG_CAL)
}

/// Where the Swiss Ephemeris data files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EphemerisConfig {
    pub path: PathBuf,
}

impl EphemerisConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `SWISS_EPHEMERIS_PATH`, falling back to `/usr/local/share/swisseph`.
    pub fn from_env() -> Self {
        let path = env::var(PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PATH));
        Self { path }
    }

    /// Point the process at this data path and return a backend.
    ///
    /// The path is process-wide. Installing the same path again is a no-op;
    /// installing a different one fails with
    /// [`EphemerisError::AlreadyConfigured`].
    pub fn install(&self) -> Result<SwissEphemeris, EphemerisError> {
        if !self.path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: self.path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }
        let Some(path_str) = self.path.to_str() else {
            return Err(EphemerisError::FileNotFound {
                path: self.path.display().to_string(),
                message: "Ephemeris path is not valid UTF-8".to_string(),
            });
        };

        let installed = INSTALLED_PATH.get_or_init(|| {
            let _guard = swiss_lock();
            set_ephe_path(path_str);
            log::info!("Swiss Ephemeris data path set to {}", self.path.display());
            self.path.clone()
        });

        if installed != &self.path {
            return Err(EphemerisError::AlreadyConfigured {
                current: installed.display().to_string(),
                requested: self.path.display().to_string(),
            });
        }

        Ok(SwissEphemeris {
            path: installed.clone(),
        })
    }
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Swiss Ephemeris backend. Obtained from [`EphemerisConfig::install`].
#[derive(Debug, Clone)]
pub struct SwissEphemeris {
    path: PathBuf,
}

impl SwissEphemeris {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Ephemeris for SwissEphemeris {
    fn position(&self, catalog_id: i32, at: DateTime<Utc>) -> Result<RawPosition, EphemerisError> {
        let failed = |message: String| EphemerisError::CalculationFailed {
            catalog_id,
            datetime: at,
            message,
        };
        if catalog_id < 0 {
            return Err(failed(format!("Unknown body id: {catalog_id}")));
        }

        let jd = julian_day(at);
        let result = {
            let _guard = swiss_lock();
            calc_ut(jd, catalog_id as u32, CALC_FLAGS)
        }
        .map_err(|e| failed(format!("Swiss Ephemeris error: {}", e)))?;

        let out = result.out;
        let position = RawPosition {
            longitude: degnorm(out[0]),
            latitude: out[1],
            distance: out[2],
            speed: out[3],
        };
        if !position.longitude.is_finite() || !position.speed.is_finite() {
            return Err(failed("non-finite result".to_string()));
        }
        Ok(position)
    }

    fn house_cusps(
        &self,
        at: DateTime<Utc>,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<RawHouses, EphemerisError> {
        let jd = julian_day(at);
        let (c, a) = {
            let _guard = swiss_lock();
            houses_ex(jd, HOUSE_FLAGS, location.lat, location.lon, system.code() as i32)
        };
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let houses = RawHouses {
            ascendant: degnorm(ascmc.ascendant),
            midheaven: degnorm(ascmc.mc),
            cusps: [
                cusps.first,
                cusps.second,
                cusps.third,
                cusps.fourth,
                cusps.fifth,
                cusps.sixth,
                cusps.seventh,
                cusps.eighth,
                cusps.ninth,
                cusps.tenth,
                cusps.eleventh,
                cusps.twelfth,
            ]
            .map(degnorm),
        };

        let finite = houses.ascendant.is_finite()
            && houses.midheaven.is_finite()
            && houses.cusps.iter().all(|cusp| cusp.is_finite());
        if !finite {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "{system} houses at ({}, {}) produced non-finite values",
                    location.lat, location.lon
                ),
            });
        }
        Ok(houses)
    }

    /// ARMC from apparent sidereal time, true obliquity from `SE_ECL_NUT`.
    ///
    /// This is the same frame `houses_ex` builds its cusps in.
    fn armc_and_obliquity(
        &self,
        at: DateTime<Utc>,
        geo_longitude: f64,
    ) -> Result<(f64, f64), EphemerisError> {
        let jd_ut = julian_day(at);
        let (sidereal_hours, nutation) = {
            let _guard = swiss_lock();
            (sidtime(jd_ut), calc(jd_ut + deltat(jd_ut), ECL_NUT, 0))
        };
        let nutation = nutation.map_err(|e| EphemerisError::HouseCalculationFailed {
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        let armc = degnorm(sidereal_hours * 15.0 + geo_longitude);
        let obliquity = nutation.out[0];
        if !armc.is_finite() || !obliquity.is_finite() {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("non-finite sidereal frame at {at}"),
            });
        }
        Ok((armc, obliquity))
    }

    fn house_position(
        &self,
        armc: f64,
        latitude: f64,
        obliquity: f64,
        system: HouseSystem,
        longitude: f64,
    ) -> Result<f64, EphemerisError> {
        let position = {
            let _guard = swiss_lock();
            house_pos(armc, latitude, obliquity, system.code() as i32, longitude, 0.0)
        }
        .map_err(|e| EphemerisError::HousePositionFailed {
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        if position.is_nan() {
            return Err(EphemerisError::HousePositionFailed {
                message: format!("{system} position of {longitude} is NaN"),
            });
        }
        Ok(position)
    }
}

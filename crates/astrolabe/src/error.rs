use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors reported by an [`Ephemeris`](crate::ephemeris::Ephemeris) backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Ephemeris path already configured as {current}, refusing {requested}")]
    AlreadyConfigured { current: String, requested: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Invalid ayanamsa: {ayanamsa}. Valid ayanamsas: {valid:?}")]
    InvalidAyanamsa { ayanamsa: String, valid: Vec<String> },
    #[error("Failed to calculate position for body {catalog_id} at {datetime}: {message}")]
    CalculationFailed {
        catalog_id: i32,
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("House position failed: {message}")]
    HousePositionFailed { message: String },
}

/// Errors produced while building or querying a chart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("no house found for longitude {longitude}: {reason}")]
    HousePosition { longitude: f64, reason: String },
    #[error("{0} was not part of the chart selection")]
    NotComputed(String),
}

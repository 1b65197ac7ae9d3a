use crate::ephemeris::types::{GeoLocation, HouseSystem};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Coordinates out of range: lat={lat}, lon={lon}")]
    InvalidLocation { lat: f64, lon: f64 },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed {
        body: String,
        jd: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("Ephemeris unavailable: {message}")]
    Unavailable { message: String },
}

/// Astronomical oracle consumed by the sign resolver.
///
/// Implementations may hold process-global state (the Swiss Ephemeris keeps
/// the observer location globally), so `set_observer` followed by a query
/// must run without interleaving. [`crate::SignResolver`] guarantees that.
pub trait Ephemeris: Send {
    /// Set the topocentric observer (longitude, latitude, altitude 0).
    fn set_observer(&mut self, location: GeoLocation) -> Result<(), EphemerisError>;

    /// Ecliptic longitude of the Moon in degrees at `jd_ut`.
    fn moon_longitude(&mut self, jd_ut: f64) -> Result<f64, EphemerisError>;

    /// Ecliptic degree of the ascendant (first angle of the house computation).
    fn ascendant(
        &mut self,
        jd_ut: f64,
        location: GeoLocation,
        house_system: HouseSystem,
    ) -> Result<f64, EphemerisError>;
}

//! Julian Day + coordinates → moon sign / ascendant sign.

use crate::ephemeris::{Ephemeris, EphemerisConfig, EphemerisError, GeoLocation};
use crate::sign::Sign;
use std::sync::Mutex;

/// Resolves the moon sign (rashi) and ascendant sign (lagna) through an
/// ephemeris oracle.
///
/// The oracle sits behind a mutex: setting the observer and running the
/// query happen in one critical section, so one request's coordinates can
/// never leak into another request's computation.
pub struct SignResolver {
    oracle: Mutex<Box<dyn Ephemeris>>,
    config: EphemerisConfig,
}

impl SignResolver {
    pub fn new(oracle: Box<dyn Ephemeris>, config: EphemerisConfig) -> Self {
        Self {
            oracle: Mutex::new(oracle),
            config,
        }
    }

    pub fn from_oracle<E: Ephemeris + 'static>(oracle: E, config: EphemerisConfig) -> Self {
        Self::new(Box::new(oracle), config)
    }

    pub fn config(&self) -> &EphemerisConfig {
        &self.config
    }

    /// Sign of the Moon's ecliptic longitude as seen from `(lat, lon)`.
    pub fn moon_sign(&self, jd: f64, lat: f64, lon: f64) -> Result<Sign, EphemerisError> {
        let location = GeoLocation::new(lat, lon);
        let longitude = self.locked(|oracle| {
            oracle.set_observer(location)?;
            oracle.moon_longitude(jd)
        })?;
        let sign = bucket("moon", jd, longitude)?;
        log::debug!(
            "moon sign: jd={:.5} lat={} lon={} longitude={:.4} -> {}",
            jd,
            lat,
            lon,
            longitude,
            sign
        );
        Ok(sign)
    }

    /// Sign of the ascendant for the configured house system.
    pub fn ascendant_sign(&self, jd: f64, lat: f64, lon: f64) -> Result<Sign, EphemerisError> {
        let location = GeoLocation::new(lat, lon);
        let house_system = self.config.house_system;
        let degree = self.locked(|oracle| oracle.ascendant(jd, location, house_system))?;
        let sign = bucket("ascendant", jd, degree)?;
        log::debug!(
            "ascendant sign: jd={:.5} lat={} lon={} houses={} degree={:.4} -> {}",
            jd,
            lat,
            lon,
            house_system,
            degree,
            sign
        );
        Ok(sign)
    }

    fn locked<T>(
        &self,
        query: impl FnOnce(&mut dyn Ephemeris) -> Result<T, EphemerisError>,
    ) -> Result<T, EphemerisError> {
        let mut guard = self.oracle.lock().map_err(|_| EphemerisError::Unavailable {
            message: "ephemeris lock poisoned by an earlier panic".to_string(),
        })?;
        query(&mut **guard)
    }
}

fn bucket(body: &str, jd: f64, degree: f64) -> Result<Sign, EphemerisError> {
    if !degree.is_finite() {
        return Err(EphemerisError::CalculationFailed {
            body: body.to_string(),
            jd,
            message: format!("oracle returned non-finite degree {}", degree),
        });
    }
    Ok(Sign::from_longitude(degree))
}

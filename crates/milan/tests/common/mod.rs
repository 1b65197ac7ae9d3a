#![allow(dead_code)]

use milan::{Ephemeris, EphemerisConfig, EphemerisError, GeoLocation, HouseSystem, SignResolver};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How the fake oracle answers a moon query.
#[derive(Debug, Clone, Copy)]
pub enum MoonModel {
    /// Always the same longitude.
    Fixed(f64),
    /// The longitude equals the current observer's longitude, so a query
    /// answered with another request's observer is detectable.
    FromObserver,
}

/// In-memory oracle that mimics the process-global observer state of the
/// Swiss Ephemeris.
#[derive(Clone)]
pub struct FakeEphemeris {
    observer: Arc<Mutex<Option<GeoLocation>>>,
    moon: MoonModel,
    ascendant: Option<f64>,
    fail: bool,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl FakeEphemeris {
    pub fn fixed(moon: f64, ascendant: f64) -> Self {
        Self {
            observer: Arc::new(Mutex::new(None)),
            moon: MoonModel::Fixed(moon),
            ascendant: Some(ascendant),
            fail: false,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Moon and ascendant both follow the observer longitude.
    pub fn from_observer() -> Self {
        Self {
            moon: MoonModel::FromObserver,
            ascendant: None,
            ..Self::fixed(0.0, 0.0)
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::fixed(0.0, 0.0)
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Shared counter of oracle calls, usable after the fake is boxed.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    fn observer_lon(&self) -> Result<f64, EphemerisError> {
        let observer = *self.observer.lock().unwrap();
        observer.map(|o| o.lon).ok_or_else(|| EphemerisError::Unavailable {
            message: "observer not set".to_string(),
        })
    }
}

impl Ephemeris for FakeEphemeris {
    fn set_observer(&mut self, location: GeoLocation) -> Result<(), EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.observer.lock().unwrap() = Some(location);
        Ok(())
    }

    fn moon_longitude(&mut self, jd_ut: f64) -> Result<f64, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EphemerisError::FileNotFound {
                path: "/nonexistent/ephe".to_string(),
                message: format!("no data for JD {}", jd_ut),
            });
        }
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        match self.moon {
            MoonModel::Fixed(lon) => Ok(lon),
            MoonModel::FromObserver => self.observer_lon(),
        }
    }

    fn ascendant(
        &mut self,
        _jd_ut: f64,
        location: GeoLocation,
        _house_system: HouseSystem,
    ) -> Result<f64, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EphemerisError::HouseCalculationFailed {
                message: "fake failure".to_string(),
            });
        }
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        Ok(self.ascendant.unwrap_or(location.lon))
    }
}

pub fn resolver(fake: FakeEphemeris) -> SignResolver {
    SignResolver::from_oracle(fake, EphemerisConfig::default())
}

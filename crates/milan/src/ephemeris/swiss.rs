use crate::ephemeris::{Ephemeris, EphemerisConfig, EphemerisError, GeoLocation, HouseSystem};
use std::ffi::CString;
use std::fs;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::AscMc;

// Swiss Ephemeris constants: SE_MOON, SEFLG_SWIEPH, SEFLG_TOPOCTR
const SE_MOON: u32 = 1;
const FLG_SWIEPH: i32 = 2;
const FLG_TOPOCTR: i32 = 32 * 1024;

/// Extension of the Swiss Ephemeris data files (`semo_18.se1`, ...).
const DATA_FILE_EXT: &str = "se1";

// Not wrapped by the swisseph crate; resolved against the bundled C library.
extern "C" {
    fn swe_set_topo(geolon: f64, geolat: f64, geoalt: f64);
}

/// Swiss Ephemeris oracle.
///
/// The C library keeps the data path and the observer location in global
/// state. Wrap a single instance in [`crate::SignResolver`] so queries are
/// serialized.
pub struct SwissEphemeris {
    ephemeris_path: PathBuf,
    topocentric: bool,
}

impl SwissEphemeris {
    /// Register the data path with the library.
    ///
    /// A missing directory is not an error here: it only fails the Moon
    /// queries that need the files.
    pub fn new(config: &EphemerisConfig) -> Result<Self, EphemerisError> {
        let path = config.ephemeris_path.clone();
        let path_text = path.to_string_lossy().into_owned();
        // The C side would silently truncate at an interior NUL.
        CString::new(path_text.as_bytes()).map_err(|_| EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: "Path contains an interior NUL byte.".to_string(),
        })?;

        if !has_data_files(&path) {
            log::warn!(
                "No .{} data files in {}; Moon queries will fail",
                DATA_FILE_EXT,
                path.display()
            );
        }

        set_ephe_path(&path_text);
        log::info!("Swiss Ephemeris path set to {}", path.display());

        Ok(Self {
            ephemeris_path: path,
            topocentric: config.topocentric,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }

    /// Fails unless the data directory holds at least one `.se1` file, so
    /// an empty directory never falls back to the Moshier approximation.
    fn ensure_files(&self) -> Result<(), EphemerisError> {
        if has_data_files(&self.ephemeris_path) {
            return Ok(());
        }
        Err(EphemerisError::FileNotFound {
            path: self.ephemeris_path.display().to_string(),
            message: "No Swiss Ephemeris data files (*.se1) found. Please ensure Swiss Ephemeris data files are installed.".to_string(),
        })
    }
}

fn has_data_files(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    entries.filter_map(Result::ok).any(|entry| {
        entry
            .path()
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case(DATA_FILE_EXT))
    })
}

impl Ephemeris for SwissEphemeris {
    fn set_observer(&mut self, location: GeoLocation) -> Result<(), EphemerisError> {
        if !location.is_valid() {
            return Err(EphemerisError::InvalidLocation {
                lat: location.lat,
                lon: location.lon,
            });
        }
        unsafe {
            swe_set_topo(location.lon, location.lat, 0.0);
        }
        Ok(())
    }

    fn moon_longitude(&mut self, jd_ut: f64) -> Result<f64, EphemerisError> {
        self.ensure_files()?;

        let mut flags = FLG_SWIEPH;
        if self.topocentric {
            flags |= FLG_TOPOCTR;
        }

        let result = calc_ut(jd_ut, SE_MOON, flags as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body: "moon".to_string(),
                jd: jd_ut,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let longitude = result.out[0];
        if !longitude.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body: "moon".to_string(),
                jd: jd_ut,
                message: "non-finite longitude".to_string(),
            });
        }
        Ok(longitude % 360.0)
    }

    fn ascendant(
        &mut self,
        jd_ut: f64,
        location: GeoLocation,
        house_system: HouseSystem,
    ) -> Result<f64, EphemerisError> {
        if !location.is_valid() {
            return Err(EphemerisError::InvalidLocation {
                lat: location.lat,
                lon: location.lon,
            });
        }

        let (_cusps, angles) = houses_ex(
            jd_ut,
            0,
            location.lat,
            location.lon,
            house_system.code() as i32,
        );
        let ascmc = AscMc::from_array(angles);
        let asc = ascmc.ascendant;
        if !asc.is_finite() {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "no ascendant for {} houses at lat={}, lon={}",
                    house_system, location.lat, location.lon
                ),
            });
        }
        Ok(asc % 360.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sign::Sign;
    use crate::time::to_julian_day;

    fn adapter() -> SwissEphemeris {
        let path = std::env::var("SWISS_EPHEMERIS_PATH").unwrap_or_else(|_| "./ephe".to_string());
        SwissEphemeris::new(&EphemerisConfig {
            ephemeris_path: PathBuf::from(path),
            ..EphemerisConfig::default()
        })
        .unwrap()
    }

    #[test]
    #[ignore] // Requires Swiss Ephemeris files
    fn test_moon_longitude_j2000() {
        let mut eph = adapter();
        eph.set_observer(GeoLocation::new(0.0, 0.0)).unwrap();
        let lon = eph.moon_longitude(to_julian_day(2000, 1, 1, 12, 0)).unwrap();
        // Tropical geocentric Moon at J2000 is ~223.3 degrees
        assert!((lon - 223.3).abs() < 0.5, "lon = {}", lon);
        assert_eq!(Sign::from_longitude(lon), Sign::Vrischika);
    }

    #[test]
    fn test_rejects_out_of_range_location() {
        let mut eph = SwissEphemeris {
            ephemeris_path: PathBuf::from("/nonexistent"),
            topocentric: false,
        };
        let err = eph.set_observer(GeoLocation::new(95.0, 0.0)).unwrap_err();
        assert!(matches!(err, EphemerisError::InvalidLocation { .. }));
        let err = eph
            .ascendant(2_451_545.0, GeoLocation::new(0.0, 200.0), HouseSystem::Placidus)
            .unwrap_err();
        assert!(matches!(err, EphemerisError::InvalidLocation { .. }));
    }

    #[test]
    fn test_missing_files_fail_lazily() {
        let mut eph = SwissEphemeris {
            ephemeris_path: PathBuf::from("/nonexistent/ephe"),
            topocentric: false,
        };
        let err = eph.moon_longitude(2_451_545.0).unwrap_err();
        assert!(matches!(err, EphemerisError::FileNotFound { .. }));
    }

    #[test]
    fn test_empty_directory_has_no_data_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.txt"), "placeholder").unwrap();
        let mut eph = SwissEphemeris {
            ephemeris_path: dir.path().to_path_buf(),
            topocentric: false,
        };
        let err = eph.moon_longitude(2_451_545.0).unwrap_err();
        assert!(matches!(err, EphemerisError::FileNotFound { .. }));

        std::fs::write(dir.path().join("semo_18.se1"), b"").unwrap();
        assert!(has_data_files(dir.path()));
        assert!(eph.ensure_files().is_ok());
    }
}

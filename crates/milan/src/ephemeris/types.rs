use crate::ephemeris::EphemerisError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Geographic location coordinates (degrees, east/north positive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && self.lat.abs() <= 90.0
            && self.lon.abs() <= 180.0
    }
}

/// House system used for the ascendant query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HouseSystem {
    Placidus,
    Koch,
    Porphyry,
    Regiomontanus,
    Campanus,
    Equal,
    WholeSign,
    Alcabitius,
    Morinus,
}

/// House system mapping: (config name, variant, Swiss Ephemeris code)
const HOUSE_SYSTEMS: &[(&str, HouseSystem, u8)] = &[
    ("placidus", HouseSystem::Placidus, b'P'),
    ("koch", HouseSystem::Koch, b'K'),
    ("porphyry", HouseSystem::Porphyry, b'O'),
    ("regiomontanus", HouseSystem::Regiomontanus, b'R'),
    ("campanus", HouseSystem::Campanus, b'C'),
    ("equal", HouseSystem::Equal, b'E'),
    ("whole_sign", HouseSystem::WholeSign, b'W'),
    ("alcabitius", HouseSystem::Alcabitius, b'A'),
    ("morinus", HouseSystem::Morinus, b'M'),
];

impl HouseSystem {
    fn entry(self) -> &'static (&'static str, HouseSystem, u8) {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system, _)| *system == self)
            .unwrap_or(&HOUSE_SYSTEMS[0])
    }

    pub fn name(self) -> &'static str {
        self.entry().0
    }

    /// One-byte house system code understood by Swiss Ephemeris.
    pub fn code(self) -> u8 {
        self.entry().2
    }
}

impl Default for HouseSystem {
    fn default() -> Self {
        HouseSystem::Alcabitius
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = EphemerisError;

    /// Accepts the config name (`placidus`, `whole_sign`, ...) or the single
    /// Swiss code letter (`P`, `A`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        HOUSE_SYSTEMS
            .iter()
            .find(|(name, _, code)| {
                *name == lower || (lower.len() == 1 && lower.as_bytes()[0] == code.to_ascii_lowercase())
            })
            .map(|(_, system, _)| *system)
            .ok_or_else(|| EphemerisError::InvalidHouseSystem {
                system: s.to_string(),
                valid: HOUSE_SYSTEMS.iter().map(|(name, _, _)| name.to_string()).collect(),
            })
    }
}

impl TryFrom<String> for HouseSystem {
    type Error = EphemerisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HouseSystem> for String {
    fn from(value: HouseSystem) -> Self {
        value.name().to_string()
    }
}

/// Process-wide oracle configuration, established once at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisConfig {
    /// Directory holding the ephemeris data files
    pub ephemeris_path: PathBuf,
    /// House system for the ascendant query
    #[serde(default)]
    pub house_system: HouseSystem,
    /// Query the Moon from the observer's position instead of the geocenter
    #[serde(default)]
    pub topocentric: bool,
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        Self {
            ephemeris_path: PathBuf::from("./ephe"),
            house_system: HouseSystem::default(),
            topocentric: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_system_codes() {
        assert_eq!(HouseSystem::Alcabitius.code(), b'A');
        assert_eq!(HouseSystem::Placidus.code(), b'P');
        assert_eq!(HouseSystem::WholeSign.code(), b'W');
    }

    #[test]
    fn test_house_system_parse() {
        assert_eq!("placidus".parse::<HouseSystem>().unwrap(), HouseSystem::Placidus);
        assert_eq!("Whole_Sign".parse::<HouseSystem>().unwrap(), HouseSystem::WholeSign);
        assert_eq!("A".parse::<HouseSystem>().unwrap(), HouseSystem::Alcabitius);

        match "topocentric".parse::<HouseSystem>() {
            Err(EphemerisError::InvalidHouseSystem { system, valid }) => {
                assert_eq!(system, "topocentric");
                assert!(valid.contains(&"koch".to_string()));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_location_validity() {
        assert!(GeoLocation::new(28.61, 77.21).is_valid());
        assert!(GeoLocation::new(-90.0, 180.0).is_valid());
        assert!(!GeoLocation::new(91.0, 0.0).is_valid());
        assert!(!GeoLocation::new(0.0, -180.5).is_valid());
        assert!(!GeoLocation::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_config_defaults() {
        let config = EphemerisConfig::default();
        assert_eq!(config.house_system, HouseSystem::Alcabitius);
        assert!(!config.topocentric);
        assert_eq!(config.ephemeris_path, PathBuf::from("./ephe"));
    }
}

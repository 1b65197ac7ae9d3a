//! Compatibility scoring between two people.
//!
//! Three independent methods are offered: name numerology, moon-sign (rashi)
//! matching and ascendant-sign (lagna) matching. Signs are derived from a
//! birth moment and location through an [`ephemeris::Ephemeris`] oracle.

pub mod compatibility;
pub mod description;
pub mod ephemeris;
pub mod error;
pub mod numerology;
pub mod resolver;
pub mod service;
pub mod sign;
pub mod time;

pub use compatibility::{Compatibility, RuleBook, RuleTable, RuleTableDef, Tier};
pub use description::{describe, DescriptionLadder};
pub use ephemeris::{Ephemeris, EphemerisConfig, EphemerisError, GeoLocation, HouseSystem};
pub use error::{MatchError, ValidationError};
pub use numerology::{name_compatibility, name_score, NameMatch};
pub use resolver::SignResolver;
pub use service::{LagnaMatch, Matchmaker, NameMatchRequest, RashiMatch, SignMatchRequest};
pub use sign::Sign;
pub use time::{to_julian_day, BirthMoment};

#[cfg(feature = "swisseph")]
pub use ephemeris::SwissEphemeris;

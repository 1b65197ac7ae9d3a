pub mod oracle;
pub mod types;

#[cfg(feature = "swisseph")]
pub mod swiss;

pub use oracle::{Ephemeris, EphemerisError};
pub use types::{EphemerisConfig, GeoLocation, HouseSystem};

#[cfg(feature = "swisseph")]
pub use swiss::SwissEphemeris;

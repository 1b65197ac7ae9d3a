//! The twelve zodiacal signs (rashis).
//!
//! The ecliptic is divided into 12 equal signs of 30 degrees each, starting
//! from Mesha at 0 degrees. Both the moon sign (rashi) and the ascendant sign
//! (lagna) are values of [`Sign`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SIGN_SPAN_DEG: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sign {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 signs in ecliptic order (0 = Mesha, 11 = Meena).
pub const ALL_SIGNS: [Sign; 12] = [
    Sign::Mesha,
    Sign::Vrishabha,
    Sign::Mithuna,
    Sign::Karka,
    Sign::Simha,
    Sign::Kanya,
    Sign::Tula,
    Sign::Vrischika,
    Sign::Dhanu,
    Sign::Makara,
    Sign::Kumbha,
    Sign::Meena,
];

// Short or regional spellings seen in hand-written pair tables.
const LABEL_ALIASES: &[(&str, Sign)] = &[
    ("mesh", Sign::Mesha),
    ("vrishabh", Sign::Vrishabha),
    ("mithun", Sign::Mithuna),
    ("kark", Sign::Karka),
    ("karkata", Sign::Karka),
    ("simh", Sign::Simha),
    ("vrishchika", Sign::Vrischika),
    ("vrishchik", Sign::Vrischika),
    ("makar", Sign::Makara),
    ("kumbh", Sign::Kumbha),
    ("meen", Sign::Meena),
];

impl Sign {
    /// Sanskrit name, the canonical label.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based ordinal (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: usize) -> Sign {
        ALL_SIGNS[index % 12]
    }

    /// Sign containing the given ecliptic longitude.
    ///
    /// The longitude is normalized into [0, 360) first. A longitude exactly on
    /// a 30 degree boundary belongs to the sign that starts there.
    pub fn from_longitude(longitude_deg: f64) -> Sign {
        let lon = normalize_degrees(longitude_deg);
        let idx = (lon / SIGN_SPAN_DEG).floor() as usize;
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        ALL_SIGNS[idx.min(11)]
    }

    /// Lenient label lookup for hand-maintained tables.
    ///
    /// Returns the sign and whether `label` was the canonical Sanskrit name.
    /// Case-insensitive Sanskrit names, Western names and a few short forms
    /// (`Kark`, `Meen`, ...) resolve but are reported as non-canonical.
    pub fn resolve_label(label: &str) -> Option<(Sign, bool)> {
        let trimmed = label.trim();
        if let Ok(sign) = trimmed.parse::<Sign>() {
            return Some((sign, trimmed == label));
        }
        let lower = trimmed.to_lowercase();
        ALL_SIGNS
            .iter()
            .find(|s| s.name().to_lowercase() == lower || s.western_name().to_lowercase() == lower)
            .copied()
            .or_else(|| {
                LABEL_ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == lower)
                    .map(|(_, sign)| *sign)
            })
            .map(|sign| (sign, false))
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sign '{0}'")]
pub struct UnknownSign(pub String);

/// Strict parse: only the canonical Sanskrit names are accepted.
impl FromStr for Sign {
    type Err = UnknownSign;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_SIGNS
            .iter()
            .find(|sign| sign.name() == s)
            .copied()
            .ok_or_else(|| UnknownSign(s.to_string()))
    }
}

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    value.rem_euclid(360.0)
}

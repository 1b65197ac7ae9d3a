//! Calendar → Julian Day conversion and birth timestamp parsing.

use crate::error::ValidationError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Julian Day of a Gregorian calendar date and wall-clock time.
///
/// Meeus, "Astronomical Algorithms" ch. 7; agrees with `swe_julday` for the
/// Gregorian calendar. Seconds are not part of the input. No calendar
/// validation is done here: callers must reject illegal dates first.
pub fn to_julian_day(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> f64 {
    let hour_decimal = hour as f64 + minute as f64 / 60.0;
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
        + hour_decimal / 24.0
}

/// Birth date and time with minute precision.
///
/// Wall-clock values are kept exactly as given; no timezone normalization
/// takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthMoment {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

impl BirthMoment {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    /// Parse an ISO-8601 timestamp for request field `field`.
    ///
    /// Accepts a bare date (midnight), a date-time with `T` or a space, with
    /// or without seconds, and RFC 3339 with an offset. An offset is ignored;
    /// the local wall-clock time is used.
    pub fn parse(field: &str, text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::missing(field));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(Self::from_naive(&dt.naive_local()));
        }
        for fmt in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
                return Ok(Self::from_naive(&dt));
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Ok(Self::new(date.year(), date.month(), date.day(), 0, 0));
        }

        Err(ValidationError::new(
            field,
            format!("Invalid ISO datetime: '{}'", text),
        ))
    }

    fn from_naive(dt: &NaiveDateTime) -> Self {
        Self::new(dt.year(), dt.month(), dt.day(), dt.hour(), dt.minute())
    }

    pub fn julian_day(&self) -> f64 {
        to_julian_day(self.year, self.month, self.day, self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_j2000_epoch() {
        assert!((to_julian_day(2000, 1, 1, 12, 0) - 2_451_545.0).abs() < EPS);
    }

    #[test]
    fn test_known_dates() {
        // Meeus example 7.a: 1957 Oct 4.81
        let jd = to_julian_day(1957, 10, 4, 19, 26);
        assert!((jd - 2_436_116.309_722).abs() < 1e-5);
        assert!((to_julian_day(1987, 1, 27, 0, 0) - 2_446_822.5).abs() < EPS);
        assert!((to_julian_day(1988, 6, 19, 12, 0) - 2_447_332.0).abs() < EPS);
    }

    #[test]
    fn test_minutes_are_fractional_hours() {
        let whole = to_julian_day(1995, 8, 15, 6, 0);
        let half = to_julian_day(1995, 8, 15, 6, 30);
        assert!((half - whole - 0.5 / 24.0).abs() < EPS);
    }

    #[test]
    fn test_monotonic_over_boundaries() {
        let moments = [
            BirthMoment::new(1999, 12, 31, 23, 59),
            BirthMoment::new(2000, 1, 1, 0, 0),
            BirthMoment::new(2000, 1, 1, 0, 1),
            BirthMoment::new(2000, 2, 28, 23, 59),
            BirthMoment::new(2000, 2, 29, 0, 0),
            BirthMoment::new(2000, 3, 1, 0, 0),
            BirthMoment::new(2000, 12, 31, 12, 0),
            BirthMoment::new(2001, 1, 1, 12, 0),
        ];
        for pair in moments.windows(2) {
            assert!(pair[1].julian_day() > pair[0].julian_day(), "{:?}", pair);
        }
    }

    #[test]
    fn test_parse_variants() {
        let expected = BirthMoment::new(1990, 5, 17, 14, 35);
        for text in [
            "1990-05-17T14:35",
            "1990-05-17T14:35:59",
            "1990-05-17T14:35:10.250",
            "1990-05-17 14:35",
            "1990-05-17 14:35:00",
            "1990-05-17T14:35:00+05:30",
            "1990-05-17T14:35:00Z",
        ] {
            assert_eq!(BirthMoment::parse("dob1", text).unwrap(), expected, "{}", text);
        }
        assert_eq!(
            BirthMoment::parse("dob1", "1990-05-17").unwrap(),
            BirthMoment::new(1990, 5, 17, 0, 0)
        );
    }

    #[test]
    fn test_parse_rejects_illegal_dates() {
        for text in ["1990-02-30T10:00", "1990-13-01", "not a date", "17/05/1990"] {
            let err = BirthMoment::parse("dob2", text).unwrap_err();
            assert_eq!(err.field, "dob2");
        }
        assert_eq!(BirthMoment::parse("dob2", "  ").unwrap_err().message, "Missing 'dob2'");
    }
}

//! Name numerology: a name reduces to a single digit, two digits to a percent.

use serde::{Deserialize, Serialize};

pub const MIN_PERCENT: i32 = 40;
pub const MAX_PERCENT: i32 = 100;

/// Report ladder for name matches: (threshold, text), evaluated top-down.
///
/// Kept apart from the description ladders; rows may repeat text.
const NAME_REPORTS: &[(i32, &str)] = &[
    (90, "Strong bond likely by name vibrations and sound resonance."),
    (81, "Create an ascendant harmony that bridges differences and strengthens partnership."),
    (71, "Sustain a balanced ascendant understanding that leads to lasting cooperation."),
    (61, "Foster a supportive ascendant alignment that deepens trust and unity."),
    (51, "Maintain a stable ascendant connection that encourages empathy and teamwork."),
    (41, "Develop a steady ascendant relationship that inspires cooperation and mutual respect."),
];
const NAME_REPORT_DEFAULT: &str = "Names show moderate compatibility impact.";

/// Result of the name-compatibility method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMatch {
    pub name1: String,
    pub name2: String,
    pub score1: u8,
    pub score2: u8,
    pub compatibility_percent: i32,
    pub report: String,
}

/// Digit in [1, 9]: letter values (a=1 .. z=26) summed, mod 9, plus one.
///
/// Only alphabetic characters count; a name without letters scores 1.
pub fn name_score(name: &str) -> u8 {
    let sum: i64 = name
        .chars()
        .filter(|c| c.is_alphabetic())
        .map(|c| lowercase_code(c) - 96)
        .sum();
    (sum.rem_euclid(9) + 1) as u8
}

fn lowercase_code(c: char) -> i64 {
    c.to_lowercase().next().unwrap_or(c) as i64
}

pub fn name_compatibility(name1: &str, name2: &str) -> NameMatch {
    let score1 = name_score(name1);
    let score2 = name_score(name2);

    let base = 100 - (score1 as i32 - score2 as i32).abs() * 10;
    let len1 = name1.chars().count() as i64;
    let len2 = name2.chars().count() as i64;
    let length_penalty = ((len1 - len2).abs() * 5).min(i32::MAX as i64) as i32;

    let compatibility_percent = base.saturating_sub(length_penalty).clamp(MIN_PERCENT, MAX_PERCENT);

    NameMatch {
        name1: name1.to_string(),
        name2: name2.to_string(),
        score1,
        score2,
        compatibility_percent,
        report: name_report(compatibility_percent).to_string(),
    }
}

pub fn name_report(percent: i32) -> &'static str {
    NAME_REPORTS
        .iter()
        .find(|(threshold, _)| percent >= *threshold)
        .map(|(_, text)| *text)
        .unwrap_or(NAME_REPORT_DEFAULT)
}

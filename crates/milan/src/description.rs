//! Long-form descriptions for a compatibility percent.
//!
//! Presentation only: a ladder turns a percent into prose and never feeds
//! back into the score. Any `i32` is accepted.

/// Ladder thresholds, highest first. Values below the last fall to the default row.
pub const THRESHOLDS: [i32; 6] = [91, 81, 71, 61, 51, 41];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionLadder {
    name: &'static str,
    rows: [&'static str; 6],
    default: &'static str,
}

const MOON_ROWS: [&str; 6] = [
    "{name1} and {name2} have exceptional emotional compatibility as per their moon signs. Their feelings run in the same direction, so comfort, care and loyalty come naturally and the bond deepens with every shared experience.",
    "{name1} and {name2} have strong emotional compatibility as per their moon signs. Each senses what the other needs without many words, which makes support easy to give and easy to receive.",
    "{name1} and {name2} share a warm emotional connection through their moon signs. Moods may differ at times, yet both recover quickly and find their way back to mutual understanding.",
    "{name1} and {name2} have a steady emotional rapport according to their moon signs. Patience with each other's rhythms turns small differences into a source of balance.",
    "{name1} and {name2} show moderate emotional harmony through their moon signs. Open conversations about feelings help the relationship grow beyond first impressions.",
    "{name1} and {name2} have differing emotional temperaments as per their moon signs. Conscious effort and empathy can still build a caring and dependable bond.",
];
const MOON_DEFAULT: &str = "{name1} and {name2} have contrasting moon signs, and their emotional needs may pull in different directions. Understanding, patience and honest communication are the keys to a lasting connection.";

const ASCENDANT_ROWS: [&str; 6] = [
    "{name1} and {name2} share a balanced ascendant (Lagna) connection. A balanced ascendant connection can create an atmosphere of mutual respect, where both individuals appreciate each other's perspectives. This harmony encourages open dialogue, reduces misunderstandings, and allows for healthy compromises. Such alignment fosters emotional security and strengthens the foundation for long-term cooperation in personal, professional, or creative partnerships.",
    "{name1} and {name2} share a balanced ascendant (Lagna) connection. When ascendants align in a balanced way, it becomes easier to bridge differences without conflict. Each person feels understood and valued, leading to a deeper bond. This kind of connection not only nurtures emotional harmony but also inspires shared goals, trust, and a willingness to work together effectively.",
    "{name1} and {name2} share a balanced ascendant (Lagna) connection. A harmonious ascendant relationship naturally promotes cooperation by highlighting shared values and mutual empathy. Differences are handled with patience, and disagreements transform into opportunities for growth. In such a connection, both individuals contribute equally to the relationship, building a supportive environment where trust and collaboration thrive without unnecessary tension.",
    "{name1} and {name2} share a balanced ascendant (Lagna) connection. In astrology, a balanced ascendant connection symbolizes a meeting point of energies that complement each other. This alignment allows for smooth communication and an intuitive understanding of one another's needs. As a result, both partners are more willing to adapt, compromise, and nurture a lasting relationship based on cooperation and harmony.",
    "{name1} and {name2} share a balanced ascendant (Lagna) connection. The strength of a balanced ascendant connection lies in its ability to maintain equality between two individuals. It ensures neither dominates the relationship, allowing both to feel empowered and valued. Such mutual respect becomes the foundation for productive collaboration, where joint efforts consistently lead to shared success and fulfillment.",
    "{name1} and {name2} share a balanced ascendant (Lagna) connection. A well-balanced ascendant alignment creates space for emotional safety, open communication, and teamwork. It supports each person's individuality while reinforcing their shared vision. This combination of independence and unity enables both partners to face challenges together, turning obstacles into opportunities and strengthening their commitment to mutual growth and cooperation.",
];
const ASCENDANT_DEFAULT: &str = "{name1} and {name2} share a balanced ascendant (Lagna) connection. A balanced ascendant connection weaves together understanding, patience, and shared purpose, enabling both individuals to grow in harmony while respecting each other's uniqueness; this mutual alignment nurtures cooperation, reduces conflict, and transforms the relationship into a supportive partnership where both feel equally valued and inspired to achieve common dreams.";

impl DescriptionLadder {
    /// Prose for moon-sign (rashi) matches.
    pub const fn moon() -> Self {
        Self {
            name: "moon",
            rows: MOON_ROWS,
            default: MOON_DEFAULT,
        }
    }

    /// Prose for ascendant-sign (lagna) matches.
    pub const fn ascendant() -> Self {
        Self {
            name: "ascendant",
            rows: ASCENDANT_ROWS,
            default: ASCENDANT_DEFAULT,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Template for `percent`: first row whose threshold is met, else the default.
    pub fn template(&self, percent: i32) -> &'static str {
        THRESHOLDS
            .iter()
            .zip(self.rows.iter())
            .find(|(threshold, _)| percent >= **threshold)
            .map(|(_, row)| *row)
            .unwrap_or(self.default)
    }

    pub fn describe(&self, name1: &str, name2: &str, percent: i32) -> String {
        self.template(percent)
            .replace("{name1}", name1)
            .replace("{name2}", name2)
    }
}

/// Describe with the ascendant ladder.
pub fn describe(name1: &str, name2: &str, percent: i32) -> String {
    DescriptionLadder::ascendant().describe(name1, name2, percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_edges() {
        let ladder = DescriptionLadder::moon();
        assert_eq!(ladder.template(91), MOON_ROWS[0]);
        assert_eq!(ladder.template(90), MOON_ROWS[1]);
        assert_eq!(ladder.template(81), MOON_ROWS[1]);
        assert_eq!(ladder.template(71), MOON_ROWS[2]);
        assert_eq!(ladder.template(61), MOON_ROWS[3]);
        assert_eq!(ladder.template(51), MOON_ROWS[4]);
        assert_eq!(ladder.template(41), MOON_ROWS[5]);
        assert_eq!(ladder.template(40), MOON_DEFAULT);
    }

    #[test]
    fn test_open_ended_top_and_bottom() {
        assert_eq!(describe("Asha", "Ravi", 95), describe("Asha", "Ravi", 999));
        assert_eq!(describe("Asha", "Ravi", i32::MAX), describe("Asha", "Ravi", 91));
        assert_eq!(
            describe("Asha", "Ravi", -5),
            ASCENDANT_DEFAULT.replace("{name1}", "Asha").replace("{name2}", "Ravi")
        );
        assert_eq!(describe("Asha", "Ravi", i32::MIN), describe("Asha", "Ravi", 0));
    }

    #[test]
    fn test_names_interpolated() {
        let text = DescriptionLadder::moon().describe("Asha", "Ravi", 85);
        assert!(text.starts_with("Asha and Ravi "));
        assert!(!text.contains("{name"));
    }

    #[test]
    fn test_ladders_are_distinct() {
        let moon = DescriptionLadder::moon();
        let asc = DescriptionLadder::ascendant();
        for percent in [100, 85, 75, 65, 55, 45, 0] {
            assert_ne!(moon.template(percent), asc.template(percent));
        }
    }
}

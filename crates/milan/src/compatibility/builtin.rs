//! Built-in, versioned pair rule tables.
//!
//! The moon-sign and ascendant-sign services have each shipped two table
//! revisions with different memberships and percentages. All four are kept
//! as separate named variants; none is derived from another.

use crate::compatibility::table::{Outcome, RuleTable, Tier};
use crate::sign::Sign::{self, *};
use std::sync::Arc;

pub const RASHI_V1: &str = "rashi-v1";
pub const RASHI_V2: &str = "rashi-v2";
pub const LAGNA_V1: &str = "lagna-v1";
pub const LAGNA_V2: &str = "lagna-v2";

pub const DEFAULT_MOON_TABLE: &str = RASHI_V2;
pub const DEFAULT_ASCENDANT_TABLE: &str = LAGNA_V2;

struct TierSpec {
    tier: Tier,
    percent: i32,
    label: &'static str,
    pairs: &'static [(Sign, Sign)],
}

struct TableSpec {
    name: &'static str,
    identity: (i32, &'static str),
    tiers: &'static [TierSpec],
    fallback: (i32, &'static str),
}

const RASHI_GOOD_PAIRS: &[(Sign, Sign)] = &[(Karka, Vrischika), (Mesha, Dhanu), (Tula, Kumbha)];

// Shared by rashi-v2 and lagna-v2.
const MATCH_PAIRS: &[(Sign, Sign)] = &[
    (Mesha, Vrischika),
    (Vrishabha, Kanya),
    (Tula, Kumbha),
    (Karka, Meena),
    (Vrischika, Karka),
];

const LOVE_PAIRS: &[(Sign, Sign)] = &[
    (Mesha, Karka),
    (Vrishabha, Meena),
    (Dhanu, Kumbha),
    (Karka, Meena),
    (Vrischika, Simha),
];

const TABLES: &[TableSpec] = &[
    TableSpec {
        name: RASHI_V1,
        identity: (75, "Both share similar emotional traits."),
        tiers: &[TierSpec {
            tier: Tier::Good,
            percent: 90,
            label: "Emotionally aligned. Great bonding possible.",
            pairs: RASHI_GOOD_PAIRS,
        }],
        fallback: (50, "Some emotional differences may exist."),
    },
    TableSpec {
        name: RASHI_V2,
        identity: (90, "Both share similar emotional traits."),
        tiers: &[
            TierSpec {
                tier: Tier::Good,
                percent: 81,
                label: "Create an ascendant harmony that bridges differences and strengthens partnership.",
                pairs: RASHI_GOOD_PAIRS,
            },
            TierSpec {
                tier: Tier::Match,
                percent: 71,
                label: "Emotionally aligned. Great bonding possible.",
                pairs: MATCH_PAIRS,
            },
            TierSpec {
                tier: Tier::Love,
                percent: 61,
                label: "Foster a supportive ascendant alignment that deepens trust and unity.",
                pairs: LOVE_PAIRS,
            },
        ],
        fallback: (50, "Some emotional differences may exist."),
    },
    TableSpec {
        name: LAGNA_V1,
        identity: (85, "Excellent physical and mental resonance."),
        tiers: &[TierSpec {
            tier: Tier::Good,
            percent: 75,
            label: "Complementary personalities with balance.",
            pairs: &[
                (Mesha, Simha),
                (Vrishabha, Kanya),
                (Tula, Kumbha),
                (Karka, Meena),
                (Vrischika, Karka),
            ],
        }],
        fallback: (60, "Some work needed in mutual understanding."),
    },
    TableSpec {
        name: LAGNA_V2,
        identity: (85, "Excellent physical and mental resonance."),
        tiers: &[
            TierSpec {
                tier: Tier::Good,
                percent: 90,
                label: "Cultivate a harmonious ascendant bond that fosters trust and collaboration.",
                pairs: &[
                    (Mesha, Simha),
                    (Vrishabha, Tula),
                    (Tula, Makara),
                    (Karka, Meena),
                    (Vrischika, Karka),
                ],
            },
            TierSpec {
                tier: Tier::Match,
                percent: 81,
                label: "Build an ascendant relationship rooted in balance, paving the way for shared respect and unity.",
                pairs: MATCH_PAIRS,
            },
            TierSpec {
                tier: Tier::Love,
                percent: 71,
                label: "Nurture a well-balanced ascendant link that promotes openness and collective growth.",
                pairs: LOVE_PAIRS,
            },
        ],
        fallback: (41, "Maintain a stable ascendant connection that encourages empathy and teamwork."),
    },
];

fn build(spec: &TableSpec) -> RuleTable {
    let tiers = spec
        .tiers
        .iter()
        .map(|t| (t.tier, Outcome::new(t.percent, t.label), t.pairs.to_vec()))
        .collect();
    match RuleTable::new(
        spec.name,
        Outcome::new(spec.identity.0, spec.identity.1),
        tiers,
        Outcome::new(spec.fallback.0, spec.fallback.1),
    ) {
        Ok(table) => table,
        // Static data; covered by tests below.
        Err(e) => unreachable!("built-in table {} is malformed: {}", spec.name, e),
    }
}

lazy_static::lazy_static! {
    static ref BUILTIN_TABLES: Vec<Arc<RuleTable>> = TABLES.iter().map(|spec| Arc::new(build(spec))).collect();
}

/// All built-in tables, in declaration order.
pub fn builtin_tables() -> &'static [Arc<RuleTable>] {
    &BUILTIN_TABLES
}

pub fn builtin_table(name: &str) -> Option<Arc<RuleTable>> {
    BUILTIN_TABLES.iter().find(|t| t.name() == name).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtins_compile() {
        let names: Vec<&str> = builtin_tables().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec![RASHI_V1, RASHI_V2, LAGNA_V1, LAGNA_V2]);
        for spec in TABLES {
            assert!(RuleTable::new(
                spec.name,
                Outcome::new(spec.identity.0, spec.identity.1),
                spec.tiers.iter().map(|t| (t.tier, Outcome::new(t.percent, t.label), t.pairs.to_vec())).collect(),
                Outcome::new(spec.fallback.0, spec.fallback.1),
            )
            .is_ok());
        }
    }

    #[test]
    fn test_identity_percent_differs_per_table() {
        let identity = |name: &str| builtin_table(name).unwrap().identity().percent;
        assert_eq!(identity(RASHI_V1), 75);
        assert_eq!(identity(RASHI_V2), 90);
        assert_eq!(identity(LAGNA_V1), 85);
        assert_eq!(identity(LAGNA_V2), 85);
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(builtin_table("rashi-v3").is_none());
    }
}

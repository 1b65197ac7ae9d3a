use milan::compatibility::{builtin_table, builtin_tables, compatibility, RuleTable, Tier};
use milan::sign::ALL_SIGNS;
use milan::{RuleBook, RuleTableDef, Sign};

#[test]
fn test_identity_for_every_sign_and_table() {
    for table in builtin_tables() {
        for sign in ALL_SIGNS {
            let result = table.compatibility(sign, sign);
            assert_eq!(result.tier, Tier::Identity, "{} {}", table.name(), sign);
            assert_eq!(result.percent, table.identity().percent);
        }
    }
}

#[test]
fn test_symmetry_over_all_pairs() {
    for table in builtin_tables() {
        for a in ALL_SIGNS {
            for b in ALL_SIGNS {
                assert_eq!(
                    compatibility(a, b, table),
                    compatibility(b, a, table),
                    "{}: {} / {}",
                    table.name(),
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_rashi_v2_tiers() {
    let t = builtin_table("rashi-v2").unwrap();
    // Karka-Meena is listed under both match and love; match wins.
    let r = t.compatibility(Sign::Meena, Sign::Karka);
    assert_eq!((r.tier, r.percent), (Tier::Match, 71));
    // Tula-Kumbha is good and match; good wins.
    assert_eq!(t.compatibility(Sign::Kumbha, Sign::Tula).percent, 81);
    assert_eq!(t.tier_of(Sign::Mesha, Sign::Karka), Tier::Love);
    let r = t.compatibility(Sign::Mesha, Sign::Tula);
    assert_eq!((r.tier, r.percent), (Tier::Fallback, 50));
    assert_eq!(r.label, "Some emotional differences may exist.");
}

#[test]
fn test_rashi_v1_tiers() {
    let t = builtin_table("rashi-v1").unwrap();
    assert_eq!(t.compatibility(Sign::Vrischika, Sign::Karka).percent, 90);
    assert_eq!(t.compatibility(Sign::Dhanu, Sign::Mesha).percent, 90);
    assert_eq!(t.compatibility(Sign::Mesha, Sign::Karka).percent, 50);
    assert_eq!(t.compatibility(Sign::Simha, Sign::Simha).percent, 75);
}

#[test]
fn test_lagna_tables() {
    let v1 = builtin_table("lagna-v1").unwrap();
    assert_eq!(v1.compatibility(Sign::Simha, Sign::Mesha).percent, 75);
    assert_eq!(v1.compatibility(Sign::Mesha, Sign::Dhanu).percent, 60);

    let v2 = builtin_table("lagna-v2").unwrap();
    assert_eq!(v2.compatibility(Sign::Makara, Sign::Tula).percent, 90);
    assert_eq!(v2.compatibility(Sign::Kanya, Sign::Vrishabha).percent, 81);
    assert_eq!(v2.compatibility(Sign::Kumbha, Sign::Dhanu).percent, 71);
    let r = v2.compatibility(Sign::Mesha, Sign::Makara);
    assert_eq!((r.tier, r.percent), (Tier::Fallback, 41));
}

#[test]
fn test_tables_are_distinct_variants() {
    let v1 = builtin_table("lagna-v1").unwrap();
    let v2 = builtin_table("lagna-v2").unwrap();
    assert_ne!(
        v1.compatibility(Sign::Vrishabha, Sign::Tula),
        v2.compatibility(Sign::Vrishabha, Sign::Tula)
    );
}

const LEGACY_TABLE: &str = r#"
name = "legacy-rashi"
identity = { percent = 75, label = "Both share similar emotional traits." }
fallback = { percent = 50, label = "Some emotional differences may exist." }

[[tiers]]
tier = "good"
percent = 90
label = "Emotionally aligned. Great bonding possible."
pairs = [["kark", "Vrischika"], ["Mesha", "Leo"], ["Tula", "Kumbha"]]
"#;

#[test]
fn test_table_definition_from_toml() {
    let def: RuleTableDef = toml::from_str(LEGACY_TABLE).unwrap();
    let table = RuleTable::from_def(&def).unwrap();

    assert_eq!(table.tier_of(Sign::Karka, Sign::Vrischika), Tier::Good);
    assert_eq!(table.tier_of(Sign::Simha, Sign::Mesha), Tier::Good);
    let flagged: Vec<_> = table.flagged_labels().iter().map(|f| (f.label.as_str(), f.resolved)).collect();
    assert_eq!(flagged, vec![("kark", Sign::Karka), ("Leo", Sign::Simha)]);

    let book = RuleBook::with_tables(&[def]).unwrap().select("legacy-rashi", "lagna-v2").unwrap();
    assert_eq!(book.moon_table().compatibility(Sign::Tula, Sign::Kumbha).percent, 90);
}

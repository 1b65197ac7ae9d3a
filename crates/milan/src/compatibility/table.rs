use crate::sign::Sign;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Rule tiers in precedence order; the first that applies wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Identity,
    Good,
    Match,
    Love,
    Fallback,
}

/// Unordered pair of distinct-or-equal signs, stored lower ordinal first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignPair {
    low: Sign,
    high: Sign,
}

impl SignPair {
    pub fn new(a: Sign, b: Sign) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn signs(&self) -> (Sign, Sign) {
        (self.low, self.high)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub percent: i32,
    pub label: String,
}

impl Outcome {
    pub fn new(percent: i32, label: impl Into<String>) -> Self {
        Self {
            percent,
            label: label.into(),
        }
    }
}

/// Result of a sign-pair lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compatibility {
    pub percent: i32,
    pub label: String,
    pub tier: Tier,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleTableError {
    #[error("table '{table}': unknown sign label '{label}'")]
    UnknownSign { table: String, label: String },
    #[error("table '{table}': tier '{tier:?}' cannot hold pairs")]
    ReservedTier { table: String, tier: Tier },
    #[error("table '{table}': tier '{tier:?}' defined twice")]
    DuplicateTier { table: String, tier: Tier },
    #[error("rule table '{0}' is defined more than once")]
    DuplicateTable(String),
    #[error("unknown rule table '{name}'. Available tables: {available:?}")]
    UnknownTable { name: String, available: Vec<String> },
}

/// A pair label that resolved to a sign only through lenient matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedLabel {
    pub label: String,
    pub resolved: Sign,
}

/// Serializable rule table definition with free-form sign labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTableDef {
    pub name: String,
    pub identity: Outcome,
    #[serde(default)]
    pub tiers: Vec<TierDef>,
    pub fallback: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierDef {
    pub tier: Tier,
    pub percent: i32,
    pub label: String,
    pub pairs: Vec<[String; 2]>,
}

/// Compiled pair rule table.
///
/// Pairs are keyed by [`SignPair`], so lookups are order independent. When a
/// pair is listed in several tiers the higher-precedence tier keeps it.
#[derive(Debug, Clone)]
pub struct RuleTable {
    name: String,
    identity: Outcome,
    tiers: Vec<(Tier, Outcome)>,
    pairs: HashMap<SignPair, usize>,
    fallback: Outcome,
    flagged: Vec<FlaggedLabel>,
}

impl RuleTable {
    /// Build a table from already-typed tiers. Tiers are ordered by precedence.
    pub fn new(
        name: impl Into<String>,
        identity: Outcome,
        tiers: Vec<(Tier, Outcome, Vec<(Sign, Sign)>)>,
        fallback: Outcome,
    ) -> Result<Self, RuleTableError> {
        let name = name.into();
        let mut tiers = tiers;
        tiers.sort_by_key(|(tier, _, _)| *tier);

        let mut outcomes = Vec::with_capacity(tiers.len());
        let mut pairs = HashMap::new();
        for (tier, outcome, members) in tiers {
            if matches!(tier, Tier::Identity | Tier::Fallback) {
                return Err(RuleTableError::ReservedTier { table: name, tier });
            }
            if outcomes.iter().any(|(t, _)| *t == tier) {
                return Err(RuleTableError::DuplicateTier { table: name, tier });
            }
            let idx = outcomes.len();
            outcomes.push((tier, outcome));
            for (a, b) in members {
                if a == b {
                    log::debug!("table '{}': {}-{} is covered by the identity rule", name, a, b);
                    continue;
                }
                pairs.entry(SignPair::new(a, b)).or_insert(idx);
            }
        }

        Ok(Self {
            name,
            identity,
            tiers: outcomes,
            pairs,
            fallback,
            flagged: Vec::new(),
        })
    }

    /// Compile a definition, resolving its sign labels.
    ///
    /// Labels that are not canonical Sanskrit names (`kark`, `Leo`, ...) are
    /// kept, resolved leniently, and flagged with a warning.
    pub fn from_def(def: &RuleTableDef) -> Result<Self, RuleTableError> {
        let mut flagged = Vec::new();
        let mut resolve = |label: &str| -> Result<Sign, RuleTableError> {
            match Sign::resolve_label(label) {
                Some((sign, true)) => Ok(sign),
                Some((sign, false)) => {
                    log::warn!(
                        "table '{}': non-canonical sign label '{}' read as {}",
                        def.name,
                        label,
                        sign
                    );
                    if !flagged.iter().any(|f: &FlaggedLabel| f.label == label) {
                        flagged.push(FlaggedLabel {
                            label: label.to_string(),
                            resolved: sign,
                        });
                    }
                    Ok(sign)
                }
                None => Err(RuleTableError::UnknownSign {
                    table: def.name.clone(),
                    label: label.to_string(),
                }),
            }
        };

        let mut tiers = Vec::with_capacity(def.tiers.len());
        for tier in &def.tiers {
            let mut members = Vec::with_capacity(tier.pairs.len());
            for [a, b] in &tier.pairs {
                members.push((resolve(a)?, resolve(b)?));
            }
            tiers.push((tier.tier, Outcome::new(tier.percent, tier.label.clone()), members));
        }

        let mut table = Self::new(def.name.clone(), def.identity.clone(), tiers, def.fallback.clone())?;
        table.flagged = flagged;
        log::debug!(
            "compiled rule table '{}' ({} pairs, {} flagged labels)",
            table.name,
            table.pairs.len(),
            table.flagged.len()
        );
        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Labels that needed lenient resolution when the table was compiled.
    pub fn flagged_labels(&self) -> &[FlaggedLabel] {
        &self.flagged
    }

    /// Outcome for two signs: identity, then tiers in precedence order,
    /// then the fallback.
    pub fn compatibility(&self, a: Sign, b: Sign) -> Compatibility {
        if a == b {
            return Compatibility {
                percent: self.identity.percent,
                label: self.identity.label.clone(),
                tier: Tier::Identity,
            };
        }
        match self.pairs.get(&SignPair::new(a, b)) {
            Some(&idx) => {
                let (tier, outcome) = &self.tiers[idx];
                Compatibility {
                    percent: outcome.percent,
                    label: outcome.label.clone(),
                    tier: *tier,
                }
            }
            None => Compatibility {
                percent: self.fallback.percent,
                label: self.fallback.label.clone(),
                tier: Tier::Fallback,
            },
        }
    }

    pub fn tier_of(&self, a: Sign, b: Sign) -> Tier {
        self.compatibility(a, b).tier
    }

    pub fn identity(&self) -> &Outcome {
        &self.identity
    }

    pub fn fallback(&self) -> &Outcome {
        &self.fallback
    }
}

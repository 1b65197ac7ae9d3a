//! Pair compatibility engine.
//!
//! Two signs are scored against a named [`RuleTable`]. The moon-sign and the
//! ascendant-sign services each select their own table through a
//! [`RuleBook`]; tables are never merged.

pub mod builtin;
pub mod table;

pub use builtin::{builtin_table, builtin_tables, DEFAULT_ASCENDANT_TABLE, DEFAULT_MOON_TABLE};
pub use table::{
    Compatibility, FlaggedLabel, Outcome, RuleTable, RuleTableDef, RuleTableError, SignPair, Tier,
    TierDef,
};

use crate::sign::Sign;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Score two signs against `table`.
pub fn compatibility(a: Sign, b: Sign, table: &RuleTable) -> Compatibility {
    table.compatibility(a, b)
}

/// Registry of rule tables plus the active selection for each service.
#[derive(Debug, Clone)]
pub struct RuleBook {
    tables: BTreeMap<String, Arc<RuleTable>>,
    moon: Arc<RuleTable>,
    ascendant: Arc<RuleTable>,
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleBook {
    /// Built-in tables with the default selections.
    pub fn builtin() -> Self {
        let tables: BTreeMap<String, Arc<RuleTable>> = builtin_tables()
            .iter()
            .map(|t| (t.name().to_string(), Arc::clone(t)))
            .collect();
        let moon = Arc::clone(&tables[DEFAULT_MOON_TABLE]);
        let ascendant = Arc::clone(&tables[DEFAULT_ASCENDANT_TABLE]);
        Self {
            tables,
            moon,
            ascendant,
        }
    }

    /// Built-in tables plus custom definitions. A custom table may not reuse
    /// a built-in name.
    pub fn with_tables(defs: &[RuleTableDef]) -> Result<Self, RuleTableError> {
        let mut book = Self::builtin();
        for def in defs {
            if book.tables.contains_key(&def.name) {
                return Err(RuleTableError::DuplicateTable(def.name.clone()));
            }
            let table = RuleTable::from_def(def)?;
            book.tables.insert(def.name.clone(), Arc::new(table));
        }
        Ok(book)
    }

    /// Choose the tables that govern moon-sign and ascendant-sign requests.
    pub fn select(mut self, moon: &str, ascendant: &str) -> Result<Self, RuleTableError> {
        self.moon = self.lookup(moon)?;
        self.ascendant = self.lookup(ascendant)?;
        log::debug!(
            "rule tables selected: moon={} ascendant={}",
            self.moon.name(),
            self.ascendant.name()
        );
        Ok(self)
    }

    fn lookup(&self, name: &str) -> Result<Arc<RuleTable>, RuleTableError> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| RuleTableError::UnknownTable {
                name: name.to_string(),
                available: self.names().map(str::to_string).collect(),
            })
    }

    pub fn table(&self, name: &str) -> Option<&RuleTable> {
        self.tables.get(name).map(|t| t.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn moon_table(&self) -> &RuleTable {
        &self.moon
    }

    pub fn ascendant_table(&self) -> &RuleTable {
        &self.ascendant
    }
}

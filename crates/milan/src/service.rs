//! Transport-agnostic request handling for the three match methods.
//!
//! Requests arrive as JSON values. Every field is validated before the
//! ephemeris is consulted, and a request either yields a complete result or
//! an error, never a partial result.

use crate::compatibility::{RuleBook, Tier};
use crate::description::DescriptionLadder;
use crate::ephemeris::GeoLocation;
use crate::error::{MatchError, ValidationError};
use crate::numerology::{name_compatibility, NameMatch};
use crate::resolver::SignResolver;
use crate::sign::Sign;
use crate::time::BirthMoment;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct NameMatchRequest {
    pub name1: String,
    pub name2: String,
}

impl NameMatchRequest {
    /// Both names must be present as strings; empty names are allowed and
    /// score through the numerology identity.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let map = object(body)?;
        Ok(Self {
            name1: string_field(map, "name1", true)?,
            name2: string_field(map, "name2", true)?,
        })
    }
}

/// One person of a sign-match request
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRecord {
    pub name: String,
    pub birth: BirthMoment,
    pub location: GeoLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignMatchRequest {
    pub first: PersonRecord,
    pub second: PersonRecord,
}

impl SignMatchRequest {
    pub fn new(first: PersonRecord, second: PersonRecord) -> Self {
        Self { first, second }
    }

    /// Expects `name1, name2, dob1, dob2, lat1, lon1, lat2, lon2`.
    /// Coordinates may be JSON numbers or numeric strings.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let map = object(body)?;
        let name1 = string_field(map, "name1", false)?;
        let name2 = string_field(map, "name2", false)?;
        let dob1 = timestamp_field(map, "dob1")?;
        let dob2 = timestamp_field(map, "dob2")?;
        let lat1 = coordinate_field(map, "lat1")?;
        let lon1 = coordinate_field(map, "lon1")?;
        let lat2 = coordinate_field(map, "lat2")?;
        let lon2 = coordinate_field(map, "lon2")?;

        Ok(Self {
            first: PersonRecord {
                name: name1,
                birth: dob1,
                location: GeoLocation::new(lat1, lon1),
            },
            second: PersonRecord {
                name: name2,
                birth: dob2,
                location: GeoLocation::new(lat2, lon2),
            },
        })
    }
}

fn object(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    body.as_object()
        .ok_or_else(|| ValidationError::new("body", "No JSON data received"))
}

fn present<'a>(map: &'a Map<String, Value>, field: &str) -> Result<&'a Value, ValidationError> {
    match map.get(field) {
        None | Some(Value::Null) => Err(ValidationError::missing(field)),
        Some(value) => Ok(value),
    }
}

fn string_field(
    map: &Map<String, Value>,
    field: &str,
    allow_empty: bool,
) -> Result<String, ValidationError> {
    let text = present(map, field)?
        .as_str()
        .ok_or_else(|| ValidationError::new(field, "must be a string"))?;
    if !allow_empty && text.trim().is_empty() {
        return Err(ValidationError::missing(field));
    }
    Ok(text.to_string())
}

fn timestamp_field(map: &Map<String, Value>, field: &str) -> Result<BirthMoment, ValidationError> {
    let text = present(map, field)?
        .as_str()
        .ok_or_else(|| ValidationError::new(field, "must be an ISO datetime string"))?;
    BirthMoment::parse(field, text)
}

fn coordinate_field(map: &Map<String, Value>, field: &str) -> Result<f64, ValidationError> {
    let value = match present(map, field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::new(field, "must be a number")),
    }
}

/// Moon-sign (rashi) match response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RashiMatch {
    pub name1: String,
    pub rashi1: Sign,
    pub name2: String,
    pub rashi2: Sign,
    pub compatibility_percent: i32,
    pub category: String,
    pub description: String,
    #[serde(skip)]
    pub tier: Tier,
}

/// Ascendant-sign (lagna) match response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LagnaMatch {
    pub name1: String,
    pub lagna1: Sign,
    pub name2: String,
    pub lagna2: Sign,
    pub compatibility_percent: i32,
    pub category: String,
    pub description: String,
    #[serde(skip)]
    pub tier: Tier,
}

/// Wires sign resolution, rule tables and description ladders per method.
pub struct Matchmaker {
    resolver: SignResolver,
    rules: RuleBook,
    moon_ladder: DescriptionLadder,
    ascendant_ladder: DescriptionLadder,
}

impl Matchmaker {
    pub fn new(resolver: SignResolver, rules: RuleBook) -> Self {
        Self {
            resolver,
            rules,
            moon_ladder: DescriptionLadder::moon(),
            ascendant_ladder: DescriptionLadder::ascendant(),
        }
    }

    pub fn resolver(&self) -> &SignResolver {
        &self.resolver
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    pub fn name_match(&self, request: &NameMatchRequest) -> NameMatch {
        name_compatibility(&request.name1, &request.name2)
    }

    pub fn rashi_match(&self, request: &SignMatchRequest) -> Result<RashiMatch, MatchError> {
        let (a, b) = (&request.first, &request.second);
        let rashi1 = self
            .resolver
            .moon_sign(a.birth.julian_day(), a.location.lat, a.location.lon)?;
        let rashi2 = self
            .resolver
            .moon_sign(b.birth.julian_day(), b.location.lat, b.location.lon)?;

        let result = self.rules.moon_table().compatibility(rashi1, rashi2);
        Ok(RashiMatch {
            name1: a.name.clone(),
            rashi1,
            name2: b.name.clone(),
            rashi2,
            compatibility_percent: result.percent,
            description: self.moon_ladder.describe(&a.name, &b.name, result.percent),
            category: result.label,
            tier: result.tier,
        })
    }

    pub fn lagna_match(&self, request: &SignMatchRequest) -> Result<LagnaMatch, MatchError> {
        let (a, b) = (&request.first, &request.second);
        let lagna1 = self
            .resolver
            .ascendant_sign(a.birth.julian_day(), a.location.lat, a.location.lon)?;
        let lagna2 = self
            .resolver
            .ascendant_sign(b.birth.julian_day(), b.location.lat, b.location.lon)?;

        let result = self.rules.ascendant_table().compatibility(lagna1, lagna2);
        Ok(LagnaMatch {
            name1: a.name.clone(),
            lagna1,
            name2: b.name.clone(),
            lagna2,
            compatibility_percent: result.percent,
            description: self.ascendant_ladder.describe(&a.name, &b.name, result.percent),
            category: result.label,
            tier: result.tier,
        })
    }

    pub fn name_from_json(&self, body: &Value) -> Result<NameMatch, MatchError> {
        let request = NameMatchRequest::from_json(body)?;
        Ok(self.name_match(&request))
    }

    pub fn rashi_from_json(&self, body: &Value) -> Result<RashiMatch, MatchError> {
        let request = SignMatchRequest::from_json(body)?;
        self.rashi_match(&request)
    }

    pub fn lagna_from_json(&self, body: &Value) -> Result<LagnaMatch, MatchError> {
        let request = SignMatchRequest::from_json(body)?;
        self.lagna_match(&request)
    }
}

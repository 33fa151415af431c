use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::drug::Drug;
use crate::utils::serde::flatten;

/// Keys resolved into `name` rather than copied into derived views.
pub(crate) const NAME_SOURCE_KEYS: [&str; 5] = [
    "brand_name",
    "generic_name",
    "name",
    "substance_name",
    "openfda",
];

const OVERVIEW_FIELDS: [&str; 9] = [
    "name",
    "last_updated",
    "effective_time",
    "purpose",
    "indications_and_usage",
    "active_ingredient",
    "dosage_and_administration",
    "warnings",
    "boxed_warning",
];

/// Safety sections weighted into the risk score. Sections sharing a group are
/// counted once per group.
const RISK_SECTIONS: [(&[&str], u32); 7] = [
    (&["boxed_warning"], 4),
    (&["contraindications"], 2),
    (&["warnings_and_cautions", "warnings"], 2),
    (&["drug_abuse_and_dependence", "controlled_substance"], 2),
    (&["drug_interactions"], 1),
    (&["overdosage"], 1),
    (&["pregnancy", "pregnancy_or_breast_feeding"], 1),
];

const HIGH_RISK_THRESHOLD: u32 = 6;
const MODERATE_RISK_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    pub category: RiskCategory,
    pub score: u32,
}

impl RiskScore {
    pub fn as_pair(&self) -> (RiskCategory, u32) {
        (self.category, self.score)
    }
}

fn has_content(value: &Value) -> bool {
    match flatten(value) {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

pub(crate) fn risk_score(fields: &Map<String, Value>) -> RiskScore {
    let score = RISK_SECTIONS
        .iter()
        .filter(|(keys, _)| {
            keys.iter()
                .any(|key| fields.get(*key).is_some_and(has_content))
        })
        .map(|(_, weight)| weight)
        .sum::<u32>();

    let category = if score >= HIGH_RISK_THRESHOLD {
        RiskCategory::High
    } else if score >= MODERATE_RISK_THRESHOLD {
        RiskCategory::Moderate
    } else {
        RiskCategory::Low
    };

    RiskScore { category, score }
}

pub(crate) fn comprehensive(drug: &Drug) -> Map<String, Value> {
    let mut out: Map<String, Value> = drug
        .raw_drug()
        .iter()
        .filter(|(key, _)| !NAME_SOURCE_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), flatten(value).clone()))
        .collect();

    out.insert(
        "name".to_string(),
        drug.name().map_or(Value::Null, |v| Value::String(v.to_string())),
    );
    if let Some(date) = drug.date() {
        out.insert("last_updated".to_string(), Value::String(date.to_string()));
    }
    out
}

/// The `OVERVIEW_FIELDS` entries of [`comprehensive`]. Equal to it when the
/// record has no fields outside that set.
pub(crate) fn overview(drug: &Drug) -> Map<String, Value> {
    let mut full = comprehensive(drug);
    OVERVIEW_FIELDS
        .iter()
        .filter_map(|key| full.remove_entry(*key))
        .collect()
}

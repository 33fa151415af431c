use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DrugLabelError;
use crate::sources::openfda::LabelResponse;
use crate::transform;
use crate::transform::drug::RiskScore;
use crate::utils::serde::{FieldValue, flatten};

/// One drug label result together with the response metadata it came with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DrugParts")]
pub struct Drug {
    metadata: Map<String, Value>,
    fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct DrugParts {
    metadata: Map<String, Value>,
    fields: Map<String, Value>,
}

impl TryFrom<DrugParts> for Drug {
    type Error = DrugLabelError;

    fn try_from(parts: DrugParts) -> Result<Self, Self::Error> {
        Self::new(parts.metadata, parts.fields)
    }
}

impl Drug {
    /// Both mappings must be non-empty. No further shape checks are made, so
    /// unknown keys are kept as they arrived.
    pub fn new(
        metadata: Map<String, Value>,
        fields: Map<String, Value>,
    ) -> Result<Self, DrugLabelError> {
        if metadata.is_empty() {
            return Err(DrugLabelError::InvalidArgument(
                "drug metadata must be a non-empty mapping".into(),
            ));
        }
        if fields.is_empty() {
            return Err(DrugLabelError::InvalidArgument(
                "drug fields must be a non-empty mapping".into(),
            ));
        }
        Ok(Self { metadata, fields })
    }

    /// Builds a drug from the first result of a label search.
    pub fn from_response(response: &LabelResponse) -> Result<Self, DrugLabelError> {
        let Some(first) = response.results.first() else {
            return Err(DrugLabelError::UnexpectedResponse(
                "label search returned no results".into(),
            ));
        };
        Self::new(response.meta.clone(), first.clone())
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn openfda(&self) -> Option<&Map<String, Value>> {
        self.fields.get("openfda").and_then(Value::as_object)
    }

    /// Resolves a display name from, in order: `openfda.brand_name`,
    /// `openfda.generic_name`, top-level `name`, `openfda.substance_name`.
    pub fn name(&self) -> Option<&str> {
        let openfda = self.openfda();
        let from_openfda = |key: &str| {
            openfda
                .and_then(|o| o.get(key))
                .and_then(|v| FieldValue::from(v).first_str())
        };

        from_openfda("brand_name")
            .or_else(|| from_openfda("generic_name"))
            .or_else(|| {
                self.fields
                    .get("name")
                    .and_then(|v| FieldValue::from(v).first_str())
            })
            .or_else(|| from_openfda("substance_name"))
    }

    pub fn raw_drug(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// `meta.last_updated`, when it is a string.
    pub fn date(&self) -> Option<&str> {
        self.metadata.get("last_updated").and_then(Value::as_str)
    }

    /// Looks up a top-level field, unwrapping single-entry list wrappers.
    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).map(flatten)
    }

    pub fn drug_comprehensive(&self) -> Map<String, Value> {
        transform::drug::comprehensive(self)
    }

    pub fn drug_overview(&self) -> Map<String, Value> {
        transform::drug::overview(self)
    }

    pub fn risk_score(&self) -> RiskScore {
        transform::drug::risk_score(&self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn advil_response() -> LabelResponse {
        serde_json::from_value(json!({
            "meta": {
                "disclaimer": "Do not rely on openFDA to make decisions regarding medical care.",
                "last_updated": "2024-05-01",
                "results": {"skip": 0, "limit": 1, "total": 12}
            },
            "results": [{
                "id": "b2b5a9c6",
                "effective_time": "20230915",
                "purpose": ["Pain reliever/fever reducer"],
                "active_ingredient": ["Ibuprofen 200 mg (NSAID)"],
                "stop_use": [],
                "version": "7",
                "openfda": {
                    "brand_name": ["Advil"],
                    "generic_name": ["IBUPROFEN"],
                    "substance_name": ["IBUPROFEN"],
                    "route": ["ORAL"]
                }
            }]
        }))
        .expect("valid fixture")
    }

    #[test]
    fn new_rejects_empty_mappings() {
        let err = Drug::new(Map::new(), object(json!({"id": "x"}))).unwrap_err();
        assert!(matches!(err, DrugLabelError::InvalidArgument(_)));

        let err = Drug::new(object(json!({"last_updated": "2024"})), Map::new()).unwrap_err();
        assert!(matches!(err, DrugLabelError::InvalidArgument(_)));
    }

    #[test]
    fn deserialize_goes_through_new() {
        let err = serde_json::from_value::<Drug>(json!({"metadata": {}, "fields": {}}))
            .unwrap_err();
        assert!(err.to_string().contains("non-empty mapping"));

        let err = serde_json::from_value::<Drug>(json!({
            "metadata": {"last_updated": "2024-05-01"},
            "fields": {}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("fields"));
    }

    #[test]
    fn serialized_drug_reads_back_equal() {
        let drug = Drug::from_response(&advil_response()).unwrap();
        let value = serde_json::to_value(&drug).unwrap();
        let back: Drug = serde_json::from_value(value).unwrap();
        assert_eq!(back, drug);
    }

    #[test]
    fn from_response_requires_a_result() {
        let mut resp = advil_response();
        resp.results.clear();
        let err = Drug::from_response(&resp).unwrap_err();
        assert!(matches!(err, DrugLabelError::UnexpectedResponse(_)));
    }

    #[test]
    fn raw_drug_round_trips_fields() {
        let resp = advil_response();
        let drug = Drug::from_response(&resp).unwrap();
        assert_eq!(drug.raw_drug(), &resp.results[0]);
        assert_eq!(drug.metadata(), &resp.meta);
    }

    #[test]
    fn name_prefers_brand_then_generic_then_name_then_substance() {
        let meta = object(json!({"last_updated": "2024-05-01"}));

        let drug = Drug::from_response(&advil_response()).unwrap();
        assert_eq!(drug.name(), Some("Advil"));

        let generic = Drug::new(
            meta.clone(),
            object(json!({"openfda": {"brand_name": [], "generic_name": ["IBUPROFEN"]}})),
        )
        .unwrap();
        assert_eq!(generic.name(), Some("IBUPROFEN"));

        let named = Drug::new(
            meta.clone(),
            object(json!({"name": "Custom", "openfda": {"substance_name": ["X"]}})),
        )
        .unwrap();
        assert_eq!(named.name(), Some("Custom"));

        let substance = Drug::new(
            meta.clone(),
            object(json!({"openfda": {"brand_name": [" "], "substance_name": ["OXYCODONE"]}})),
        )
        .unwrap();
        assert_eq!(substance.name(), Some("OXYCODONE"));

        let unnamed = Drug::new(meta, object(json!({"id": "x"}))).unwrap();
        assert_eq!(unnamed.name(), None);
    }

    #[test]
    fn date_reads_last_updated() {
        let drug = Drug::from_response(&advil_response()).unwrap();
        assert_eq!(drug.date(), Some("2024-05-01"));

        let undated = Drug::new(object(json!({"total": 1})), object(json!({"id": "x"}))).unwrap();
        assert_eq!(undated.date(), None);
    }

    #[test]
    fn parameter_flattens_lists_and_keeps_scalars() {
        let drug = Drug::from_response(&advil_response()).unwrap();
        assert_eq!(
            drug.parameter("purpose"),
            Some(&json!("Pain reliever/fever reducer"))
        );
        assert_eq!(drug.parameter("version"), Some(&json!("7")));
        assert_eq!(drug.parameter("stop_use"), Some(&json!([])));
        assert_eq!(drug.parameter("missing"), None);

        let pair = Drug::new(
            object(json!({"last_updated": "2024-05-01"})),
            object(json!({"route": ["X", "Y"]})),
        )
        .unwrap();
        assert_eq!(pair.parameter("route"), Some(&json!("X")));
    }

    #[test]
    fn parameter_agrees_with_raw_fields_for_every_key() {
        let drug = Drug::from_response(&advil_response()).unwrap();
        for (key, raw) in drug.raw_drug() {
            let expected = match raw {
                Value::Array(items) if !items.is_empty() => &items[0],
                other => other,
            };
            assert_eq!(drug.parameter(key), Some(expected), "{key}");
        }
    }

    #[test]
    fn overview_and_comprehensive_are_populated() {
        let drug = Drug::from_response(&advil_response()).unwrap();
        let full = drug.drug_comprehensive();
        assert!(!full.is_empty());
        assert_eq!(full["name"], "Advil");

        let overview = drug.drug_overview();
        assert_eq!(overview["last_updated"], "2024-05-01");
        assert_eq!(overview["active_ingredient"], "Ibuprofen 200 mg (NSAID)");
    }
}

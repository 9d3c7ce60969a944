use crate::fields::{FieldCatalog, extract_unique_fields};
use crate::score::Outcome;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Samples sent to the collaborator per run.
pub const MAX_SIMULATED_SAMPLES: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateDoc {
    #[serde(rename = "_source")]
    pub source: SampleEnvelope,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleEnvelope {
    pub message: String,
    pub original_index: usize,
}

/// Wrap the first `MAX_SIMULATED_SAMPLES` samples for a simulate call.
pub fn build_docs<S: AsRef<str>>(samples: &[S]) -> Vec<SimulateDoc> {
    samples
        .iter()
        .take(MAX_SIMULATED_SAMPLES)
        .enumerate()
        .map(|(original_index, sample)| SimulateDoc {
            source: SampleEnvelope {
                message: sample.as_ref().to_string(),
                original_index,
            },
        })
        .collect()
}

/// One processed doc. Both parts are kept raw so unexpected shapes still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulateResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl SimulateResult {
    /// The structured output (`doc._source`), if it is a mapping.
    pub fn payload(&self) -> Option<&Map<String, Value>> {
        self.doc.as_ref()?.get("_source")?.as_object()
    }

    pub fn outcome(&self) -> Outcome {
        match &self.error {
            None => Outcome::Success,
            Some(error) => Outcome::Failure {
                reason: error
                    .get("reason")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulateResponse {
    #[serde(default)]
    pub docs: Vec<SimulateResult>,
}

impl SimulateResponse {
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.docs.iter().map(SimulateResult::outcome).collect()
    }

    pub fn unique_fields(&self) -> FieldCatalog {
        extract_unique_fields(self.docs.iter().map(SimulateResult::payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_build_docs_wraps_and_caps() {
        let samples: Vec<String> = (0..250).map(|i| format!("s{}", i)).collect();
        let docs = build_docs(&samples);
        assert_eq!(docs.len(), MAX_SIMULATED_SAMPLES);
        assert_eq!(
            serde_json::to_value(&docs[7]).unwrap(),
            json!({ "_source": { "message": "s7", "original_index": 7 } })
        );
    }

    #[test]
    fn test_response_outcomes() {
        let response: SimulateResponse = serde_json::from_value(json!({
            "docs": [
                { "doc": { "_source": { "a": 1 } } },
                { "error": { "type": "illegal_argument_exception", "reason": "bad grok" } },
                { "error": { "type": "x" } },
                { "error": null, "doc": { "_source": { "b": 2 } } }
            ]
        }))
        .unwrap();

        assert_eq!(
            response.outcomes(),
            vec![
                Outcome::Success,
                Outcome::failure("bad grok"),
                Outcome::Failure { reason: None },
                Outcome::Success,
            ]
        );
    }

    #[test]
    fn test_payload_tolerates_odd_shapes() {
        let response: SimulateResponse = serde_json::from_value(json!({
            "docs": [
                {},
                { "doc": {} },
                { "doc": { "_source": "text" } },
                { "doc": { "_source": { "message": "ok" } } }
            ]
        }))
        .unwrap();

        let payloads: Vec<bool> = response
            .docs
            .iter()
            .map(|d| d.payload().is_some())
            .collect();
        assert_eq!(payloads, vec![false, false, false, true]);
        assert_eq!(Value::Object(response.unique_fields()), json!({ "message": "ok" }));
    }

    #[test]
    fn test_missing_docs_key_is_empty() {
        let response: SimulateResponse = serde_json::from_str("{}").unwrap();
        assert!(response.docs.is_empty());
    }
}

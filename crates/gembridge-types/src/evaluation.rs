//! Gemara Layer 4 evaluation model (reverse-direction output).
//!
//! Serialized as YAML with keys in declaration order, matching the layer 4
//! document layout.

use crate::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// The layer 4 envelope wrapping all evaluations extracted from one input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationEnvelope {
    pub gemara_version: String,
    pub layer: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub evaluations: Vec<Evaluation>,
}

impl EvaluationEnvelope {
    pub fn new(evaluations: Vec<Evaluation>) -> Self {
        Self {
            gemara_version: ids::GEMARA_VERSION.to_string(),
            layer: ids::EVALUATION_LAYER,
            kind: ids::ENVELOPE_TYPE_EVALUATION.to_string(),
            evaluations,
        }
    }
}

/// One declarative evaluation record, derived from one execution result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Evaluation {
    pub evaluation: EvaluationMeta,
    pub subject: EvaluatedSubject,
    pub assessment: Assessment,
    pub policy: EvaluatedPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<Vec<ControlStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub findings: Option<Vec<Finding>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<EvaluationContext>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationMeta {
    /// Derived from the result end timestamp; see the reverse mapper for
    /// the collision caveat.
    pub id: String,
    pub timestamp: String,
    pub duration_ms: i64,
    pub evaluator: String,
    pub evaluator_version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvaluatedSubject {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub identifiers: Vec<SubjectIdentifier>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubjectIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Assessment {
    pub status: String,
    pub summary: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvaluatedPolicy {
    pub id: String,
    pub version: String,
    pub description: String,
}

/// Per-control rollup. Controls are not independently evaluated by this
/// format: every entry carries the overall result status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ControlStatus {
    pub id: String,
    pub framework: String,
    pub status: String,
}

/// One per-check outcome, derived from one eval_result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub id: String,
    pub status: String,
    pub timestamp: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FindingError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<Evidence>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FindingError {
    pub message: String,
    pub remediation: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Evidence {
    #[serde(rename = "type")]
    pub kind: String,
    pub digest: JsonValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationContext {
    pub runtime: String,
    pub assert_mode: String,
    pub values: JsonValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_pins_layer_and_type() {
        let envelope = EvaluationEnvelope::new(Vec::new());
        assert_eq!(envelope.gemara_version, "1.0");
        assert_eq!(envelope.layer, 4);
        assert_eq!(envelope.kind, "evaluation");
    }

    #[test]
    fn optional_blocks_are_omitted_from_the_wire() {
        let evaluation = Evaluation {
            evaluation: EvaluationMeta {
                id: "ampel-eval-20240101T000000".to_string(),
                timestamp: "2024-01-01T00:00:00Z".to_string(),
                duration_ms: 0,
                evaluator: ids::EVALUATOR_NAME.to_string(),
                evaluator_version: ids::EVALUATOR_VERSION.to_string(),
            },
            subject: EvaluatedSubject {
                name: "unknown".to_string(),
                kind: ids::SUBJECT_TYPE_ARTIFACT.to_string(),
                identifiers: Vec::new(),
            },
            assessment: Assessment {
                status: "PASS".to_string(),
                summary: "ok".to_string(),
            },
            policy: EvaluatedPolicy {
                id: "p".to_string(),
                version: "v1".to_string(),
                description: String::new(),
            },
            controls: None,
            findings: None,
            context: None,
        };
        let json = serde_json::to_value(&evaluation).expect("serialize");
        assert!(json.get("controls").is_none());
        assert!(json.get("findings").is_none());
        assert!(json.get("context").is_none());
        assert_eq!(json["subject"]["type"], "artifact");
    }
}

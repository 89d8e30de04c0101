//! Ampel execution result model (reverse-direction input).
//!
//! Results arrive from the Ampel engine in several wrappings (bare,
//! result-set, in-toto statement, raw predicate); the shape detector in
//! `gembridge-convert` picks these structs out of the raw document.
//! Every field is defaulted: partially-populated results must never fail
//! to decode.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

fn default_subject_name() -> String {
    "unknown".to_string()
}

fn default_control_class() -> String {
    crate::ids::CONTROL_FRAMEWORK_CUSTOM.to_string()
}

fn default_eval_status() -> String {
    crate::ids::STATUS_UNKNOWN.to_string()
}

fn default_statement_kind() -> String {
    crate::ids::EVIDENCE_TYPE_ATTESTATION.to_string()
}

fn default_statement_digest() -> JsonValue {
    JsonValue::String(String::new())
}

/// The runtime output of evaluating one policy against one subject.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExecutionResult {
    pub status: String,
    pub date_start: String,
    pub date_end: String,
    pub subject: Subject,
    pub policy: PolicyRef,
    pub meta: ResultMeta,
    pub eval_results: Vec<EvalResult>,
    /// Free-form context values recorded by the engine.
    pub context: JsonValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Subject {
    #[serde(default = "default_subject_name")]
    pub name: String,
    /// Algorithm name -> hex digest.
    pub digest: BTreeMap<String, String>,
}

impl Default for Subject {
    fn default() -> Self {
        Self {
            name: default_subject_name(),
            digest: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PolicyRef {
    pub id: String,
    pub version: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ResultMeta {
    pub description: String,
    pub runtime: String,
    pub assert_mode: String,
    pub controls: Vec<ControlRef>,
}

/// A control declared as satisfied by the evaluated policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ControlRef {
    pub id: String,
    #[serde(default = "default_control_class")]
    pub class: String,
}

impl Default for ControlRef {
    fn default() -> Self {
        Self {
            id: String::new(),
            class: default_control_class(),
        }
    }
}

/// One per-tenet outcome inside an execution result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EvalResult {
    /// Absent ids are replaced with a positional `check-{index}` downstream.
    pub id: Option<String>,
    #[serde(default = "default_eval_status")]
    pub status: String,
    pub date: String,
    pub assessment: AssessmentMessage,
    pub error: ErrorDetail,
    /// Arbitrary structured payload produced by the tenet.
    pub output: JsonValue,
    /// Evidence references into the attestation store.
    pub statements: Vec<StatementRef>,
}

impl Default for EvalResult {
    fn default() -> Self {
        Self {
            id: None,
            status: default_eval_status(),
            date: String::new(),
            assessment: AssessmentMessage::default(),
            error: ErrorDetail::default(),
            output: JsonValue::Null,
            statements: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AssessmentMessage {
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ErrorDetail {
    pub message: String,
    pub guidance: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StatementRef {
    #[serde(rename = "type", default = "default_statement_kind")]
    pub kind: String,
    #[serde(default = "default_statement_digest")]
    pub digest: JsonValue,
}

impl Default for StatementRef {
    fn default() -> Self {
        Self {
            kind: default_statement_kind(),
            digest: default_statement_digest(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_decodes_to_documented_defaults() {
        let result: ExecutionResult = serde_json::from_str("{}").expect("empty result");
        assert_eq!(result.status, "");
        assert_eq!(result.subject.name, "unknown");
        assert!(result.eval_results.is_empty());
        assert!(result.context.is_null());
    }

    #[test]
    fn eval_result_status_defaults_to_unknown_only_when_missing() {
        let missing: EvalResult = serde_json::from_str("{}").expect("no status");
        assert_eq!(missing.status, "UNKNOWN");

        let explicit: EvalResult =
            serde_json::from_str(r#"{"status": ""}"#).expect("explicit empty status");
        assert_eq!(explicit.status, "");
    }

    #[test]
    fn statement_ref_defaults_type_and_digest() {
        let stmt: StatementRef = serde_json::from_str("{}").expect("empty statement");
        assert_eq!(stmt.kind, "attestation");
        assert_eq!(stmt.digest, JsonValue::String(String::new()));
    }
}

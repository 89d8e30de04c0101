//! Finding and control projection for the reverse direction.
//!
//! Findings are derived 1:1 from eval_results, order preserved. Controls
//! are a rollup only: the engine does not evaluate controls individually,
//! so every declared control is stamped with the overall result status.

use gembridge_types::evaluation::{ControlStatus, Evidence, Finding, FindingError};
use gembridge_types::result::{EvalResult, ResultMeta};
use gembridge_types::ids;
use serde_json::Value as JsonValue;

/// Map one eval_result to a declarative finding. `index` supplies the
/// positional fallback id for results the engine left unnamed.
pub fn from_eval_result(eval: &EvalResult, index: usize) -> Finding {
    let description = if eval.status == ids::STATUS_PASS {
        eval.assessment.message.clone()
    } else {
        eval.error.message.clone()
    };

    let error = (!eval.error.guidance.is_empty()).then(|| FindingError {
        message: eval.error.message.clone(),
        remediation: eval.error.guidance.clone(),
    });

    let evidence: Vec<Evidence> = eval
        .statements
        .iter()
        .map(|stmt| Evidence {
            kind: stmt.kind.clone(),
            digest: stmt.digest.clone(),
        })
        .collect();

    Finding {
        id: eval
            .id
            .clone()
            .unwrap_or_else(|| format!("check-{index}")),
        status: eval.status.clone(),
        timestamp: eval.date.clone(),
        description,
        error,
        outputs: value_is_present(&eval.output).then(|| eval.output.clone()),
        evidence: (!evidence.is_empty()).then_some(evidence),
    }
}

/// Stamp the overall result status onto each control the policy declares.
pub fn project_controls(meta: &ResultMeta, status: &str) -> Vec<ControlStatus> {
    meta.controls
        .iter()
        .map(|control| ControlStatus {
            id: control.id.clone(),
            framework: control.class.clone(),
            status: status.to_string(),
        })
        .collect()
}

/// Presence test for free-form payloads: null, empty containers, empty
/// strings, zero, and false all count as absent.
pub(crate) fn value_is_present(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(items) => !items.is_empty(),
        JsonValue::Object(map) => !map.is_empty(),
    }
}

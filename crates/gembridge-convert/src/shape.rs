//! Input-shape detection for the reverse direction.
//!
//! Ampel results arrive in several wrappings. The classifier probes keys
//! in a fixed priority order and extracts the result list for the shape
//! it recognizes. An unrecognized document is not an error: it yields an
//! empty list and the caller decides how to report that.

use gembridge_types::{ExecutionResult, ids};
use serde_json::Value as JsonValue;

/// The recognized input wrappings, in probe priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultShape {
    /// In-toto statement whose predicate holds a result set.
    EnvelopedResultSet,
    /// In-toto statement whose predicate is a single result.
    EnvelopedResult,
    /// A single result at the top level.
    BareResult,
    /// A `{results: [...]}` set at the top level.
    BareResultSet,
    /// Raw `{predicateType, predicate}` pair holding a result set.
    RawPredicateResultSet,
    /// Raw `{predicateType, predicate}` pair holding a single result.
    RawPredicateResult,
    /// None of the above; no results extracted.
    Unrecognized,
}

impl ResultShape {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultShape::EnvelopedResultSet => "enveloped result set",
            ResultShape::EnvelopedResult => "enveloped result",
            ResultShape::BareResult => "bare result",
            ResultShape::BareResultSet => "bare result set",
            ResultShape::RawPredicateResultSet => "raw predicate result set",
            ResultShape::RawPredicateResult => "raw predicate result",
            ResultShape::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for ResultShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification outcome: the shape tag plus the extracted results.
#[derive(Clone, Debug)]
pub struct DetectedInput {
    pub shape: ResultShape,
    pub results: Vec<ExecutionResult>,
}

impl DetectedInput {
    fn empty() -> Self {
        Self {
            shape: ResultShape::Unrecognized,
            results: Vec::new(),
        }
    }
}

/// Classify a decoded document and extract its execution results.
///
/// Probe order: in-toto `_type` statement, bare result (`status` +
/// `policy`), bare result set (`results`), raw predicate
/// (`predicateType` + `predicate`). Decoding a recognized result that is
/// structurally malformed is the only error path.
pub fn detect(doc: &JsonValue) -> Result<DetectedInput, serde_json::Error> {
    if doc.get("_type").and_then(JsonValue::as_str) == Some(ids::STATEMENT_TYPE_IN_TOTO) {
        return match doc.get("predicate") {
            Some(predicate) => detect_predicate(
                predicate,
                ResultShape::EnvelopedResultSet,
                ResultShape::EnvelopedResult,
            ),
            None => Ok(DetectedInput::empty()),
        };
    }

    if doc.get("status").is_some() && doc.get("policy").is_some() {
        return Ok(DetectedInput {
            shape: ResultShape::BareResult,
            results: vec![decode(doc)?],
        });
    }

    if let Some(results) = doc.get("results") {
        return Ok(DetectedInput {
            shape: ResultShape::BareResultSet,
            results: decode_list(results)?,
        });
    }

    if doc.get("predicateType").is_some()
        && let Some(predicate) = doc.get("predicate")
    {
        return detect_predicate(
            predicate,
            ResultShape::RawPredicateResultSet,
            ResultShape::RawPredicateResult,
        );
    }

    Ok(DetectedInput::empty())
}

fn detect_predicate(
    predicate: &JsonValue,
    set_shape: ResultShape,
    single_shape: ResultShape,
) -> Result<DetectedInput, serde_json::Error> {
    if let Some(results) = predicate.get("results") {
        Ok(DetectedInput {
            shape: set_shape,
            results: decode_list(results)?,
        })
    } else if predicate.get("policy").is_some() {
        Ok(DetectedInput {
            shape: single_shape,
            results: vec![decode(predicate)?],
        })
    } else {
        Ok(DetectedInput::empty())
    }
}

fn decode(value: &JsonValue) -> Result<ExecutionResult, serde_json::Error> {
    serde_json::from_value(value.clone())
}

fn decode_list(value: &JsonValue) -> Result<Vec<ExecutionResult>, serde_json::Error> {
    match value.as_array() {
        Some(entries) => entries.iter().map(decode).collect(),
        None => Ok(Vec::new()),
    }
}

//! The two conversion use cases: text in, text out.

use crate::error::{ConvertError, ConvertResult, InputFormat};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use gembridge_convert::{forward, reverse, shape};
use gembridge_types::{EvaluationEnvelope, PolicyDocument, PolicySet};
use time::OffsetDateTime;

/// Forward conversion output: the typed set plus its serialized form.
#[derive(Clone, Debug)]
pub struct ForwardOutput {
    pub policy_set: PolicySet,
    pub json: String,
}

/// Gemara Layer 3 YAML -> Ampel policy set JSON.
pub fn run_forward(yaml_text: &str) -> ConvertResult<ForwardOutput> {
    let doc: PolicyDocument = serde_yaml::from_str(yaml_text).map_err(|err| ConvertError::Parse {
        format: InputFormat::Yaml,
        message: err.to_string(),
    })?;

    let policy_set = forward::convert_document(&doc, OffsetDateTime::now_utc());
    let json = serde_json::to_string_pretty(&policy_set).context("serialize policy set")?;

    Ok(ForwardOutput { policy_set, json })
}

/// Reverse conversion output: the shape the detector matched, the typed
/// envelope, and its serialized form.
#[derive(Clone, Debug)]
pub struct ReverseOutput {
    pub shape: shape::ResultShape,
    pub envelope: EvaluationEnvelope,
    pub yaml: String,
}

/// Ampel execution results JSON -> Gemara Layer 4 evaluation YAML.
///
/// A document the detector cannot place yields [`ConvertError::EmptyResult`],
/// reported by the CLI as a warning with a non-zero exit.
pub fn run_reverse(json_text: &str) -> ConvertResult<ReverseOutput> {
    let doc: serde_json::Value =
        serde_json::from_str(json_text).map_err(|err| ConvertError::Parse {
            format: InputFormat::Json,
            message: err.to_string(),
        })?;

    let detected = shape::detect(&doc).context("decode execution results")?;
    let evaluations = reverse::convert_results(&detected.results);
    if evaluations.is_empty() {
        return Err(ConvertError::EmptyResult);
    }

    let envelope = EvaluationEnvelope::new(evaluations);
    let yaml = serde_yaml::to_string(&envelope).context("serialize evaluation envelope")?;

    Ok(ReverseOutput {
        shape: detected.shape,
        envelope,
        yaml,
    })
}

/// Default forward output path: the input file stem with an `.ampel.json`
/// suffix, in the current directory (matching the original tool).
pub fn default_forward_output(input: &Utf8Path) -> Utf8PathBuf {
    let stem = input.file_stem().unwrap_or("policy");
    Utf8PathBuf::from(format!("{stem}.ampel.json"))
}

/// Read an input document, mapping a missing file to the dedicated
/// [`ConvertError::InputNotFound`] variant.
pub fn read_input_file(path: &Utf8Path) -> ConvertResult<String> {
    std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ConvertError::InputNotFound {
                path: path.to_string(),
            }
        } else {
            ConvertError::Unexpected(
                anyhow::Error::new(err).context(format!("read input: {path}")),
            )
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gembridge_test_util::{SAMPLE_POLICY_YAML, SAMPLE_STATEMENT_JSON, normalize_converted_at};

    #[test]
    fn forward_converts_the_sample_document() {
        let out = run_forward(SAMPLE_POLICY_YAML).expect("forward conversion");
        assert_eq!(out.policy_set.id, "acme-supply-chain");
        assert_eq!(out.policy_set.policies.len(), 3);
        assert!(out.json.contains("PENDING_IMPLEMENTATION"));
    }

    #[test]
    fn forward_is_idempotent_modulo_converted_at() {
        let first = run_forward(SAMPLE_POLICY_YAML).expect("first run");
        let second = run_forward(SAMPLE_POLICY_YAML).expect("second run");

        let first: serde_json::Value = serde_json::from_str(&first.json).expect("first json");
        let second: serde_json::Value = serde_json::from_str(&second.json).expect("second json");
        assert_eq!(
            normalize_converted_at(first),
            normalize_converted_at(second)
        );
    }

    #[test]
    fn forward_rejects_malformed_yaml() {
        let err = run_forward("title: [unclosed").expect_err("parse failure");
        match err {
            ConvertError::Parse { format, .. } => assert_eq!(format, InputFormat::Yaml),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reverse_converts_the_sample_statement() {
        let out = run_reverse(SAMPLE_STATEMENT_JSON).expect("reverse conversion");
        assert_eq!(out.shape, shape::ResultShape::EnvelopedResultSet);
        assert_eq!(out.envelope.evaluations.len(), 2);
        assert!(out.yaml.starts_with("gemara_version:"));
    }

    #[test]
    fn reverse_reports_empty_result_for_unrecognized_input() {
        let err = run_reverse(r#"{"hello": "world"}"#).expect_err("empty result");
        assert!(matches!(err, ConvertError::EmptyResult));
    }

    #[test]
    fn reverse_rejects_malformed_json() {
        let err = run_reverse("{not json").expect_err("parse failure");
        match err {
            ConvertError::Parse { format, .. } => assert_eq!(format, InputFormat::Json),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn default_output_path_swaps_the_extension() {
        assert_eq!(
            default_forward_output(Utf8Path::new("policies/baseline.yaml")),
            Utf8PathBuf::from("baseline.ampel.json")
        );
        assert_eq!(
            default_forward_output(Utf8Path::new("policy.yml")),
            Utf8PathBuf::from("policy.ampel.json")
        );
    }
}

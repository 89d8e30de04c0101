//! Ampel execution results -> Gemara Layer 4 evaluations.
//!
//! One evaluation per result, findings 1:1 with eval_results. Timestamp
//! handling is deliberately forgiving: a result with unparsable dates
//! still converts, with its duration clamped to zero.

use crate::finding;
use gembridge_types::evaluation::{
    Assessment, EvaluatedPolicy, EvaluatedSubject, Evaluation, EvaluationContext, EvaluationMeta,
    SubjectIdentifier,
};
use gembridge_types::result::{ExecutionResult, Subject};
use gembridge_types::ids;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const DEFAULT_PASS_SUMMARY: &str = "All policy tenets validated successfully";

/// Convert every extracted result, preserving input order.
pub fn convert_results(results: &[ExecutionResult]) -> Vec<Evaluation> {
    results.iter().map(evaluation_from_result).collect()
}

pub fn evaluation_from_result(result: &ExecutionResult) -> Evaluation {
    let controls = finding::project_controls(&result.meta, &result.status);
    let findings: Vec<_> = result
        .eval_results
        .iter()
        .enumerate()
        .map(|(index, eval)| finding::from_eval_result(eval, index))
        .collect();

    Evaluation {
        evaluation: EvaluationMeta {
            id: evaluation_id(&result.date_end),
            timestamp: result.date_end.clone(),
            duration_ms: duration_ms(&result.date_start, &result.date_end),
            evaluator: ids::EVALUATOR_NAME.to_string(),
            evaluator_version: ids::EVALUATOR_VERSION.to_string(),
        },
        subject: map_subject(&result.subject),
        assessment: Assessment {
            status: result.status.clone(),
            summary: summarize(result),
        },
        policy: EvaluatedPolicy {
            id: result.policy.id.clone(),
            version: result.policy.version.clone(),
            description: result.meta.description.clone(),
        },
        controls: (!controls.is_empty()).then_some(controls),
        findings: (!findings.is_empty()).then_some(findings),
        context: context_block(result),
    }
}

/// Flattened, lexically sortable id derived from the end timestamp.
///
/// Two results ending at the same instant collide. The upstream format
/// carries no disambiguator and none is invented here.
fn evaluation_id(date_end: &str) -> String {
    let flattened: String = date_end
        .chars()
        .filter(|c| !matches!(c, ':' | '.' | 'Z'))
        .collect();
    format!("{}{}", ids::EVALUATION_ID_PREFIX, flattened)
}

/// Millisecond delta between the RFC 3339 start and end stamps; 0 when
/// either side fails to parse.
fn duration_ms(start: &str, end: &str) -> i64 {
    match (
        OffsetDateTime::parse(start, &Rfc3339),
        OffsetDateTime::parse(end, &Rfc3339),
    ) {
        (Ok(start), Ok(end)) => (end - start).whole_milliseconds() as i64,
        _ => 0,
    }
}

fn summarize(result: &ExecutionResult) -> String {
    let description = &result.meta.description;
    if result.status == ids::STATUS_PASS {
        if description.is_empty() {
            return DEFAULT_PASS_SUMMARY.to_string();
        }
    } else if result.status == ids::STATUS_FAIL {
        // First non-passing check explains the failure.
        if let Some(failed) = result
            .eval_results
            .iter()
            .find(|eval| eval.status != ids::STATUS_PASS)
            && !failed.error.message.is_empty()
        {
            return failed.error.message.clone();
        }
    }
    description.clone()
}

fn map_subject(subject: &Subject) -> EvaluatedSubject {
    EvaluatedSubject {
        name: subject.name.clone(),
        kind: ids::SUBJECT_TYPE_ARTIFACT.to_string(),
        identifiers: subject
            .digest
            .iter()
            .map(|(algorithm, value)| SubjectIdentifier {
                kind: algorithm.clone(),
                value: value.clone(),
            })
            .collect(),
    }
}

fn context_block(result: &ExecutionResult) -> Option<EvaluationContext> {
    finding::value_is_present(&result.context).then(|| EvaluationContext {
        runtime: result.meta.runtime.clone(),
        assert_mode: result.meta.assert_mode.clone(),
        values: result.context.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gembridge_types::result::{ControlRef, ErrorDetail, EvalResult, PolicyRef, ResultMeta};
    use serde_json::json;

    fn result() -> ExecutionResult {
        ExecutionResult {
            status: "PASS".to_string(),
            date_start: "2024-01-01T00:00:00Z".to_string(),
            date_end: "2024-01-01T00:00:01.500Z".to_string(),
            policy: PolicyRef {
                id: "osps-b-b-01".to_string(),
                version: "v1.0.0".to_string(),
            },
            ..ExecutionResult::default()
        }
    }

    fn eval(status: &str, error_message: &str) -> EvalResult {
        EvalResult {
            status: status.to_string(),
            error: ErrorDetail {
                message: error_message.to_string(),
                guidance: String::new(),
            },
            ..EvalResult::default()
        }
    }

    #[test]
    fn duration_is_millisecond_delta() {
        let evaluation = evaluation_from_result(&result());
        assert_eq!(evaluation.evaluation.duration_ms, 1500);
        assert_eq!(evaluation.evaluation.timestamp, "2024-01-01T00:00:01.500Z");
    }

    #[test]
    fn duration_clamps_to_zero_on_parse_failure() {
        let mut r = result();
        r.date_start = "not-a-timestamp".to_string();
        assert_eq!(evaluation_from_result(&r).evaluation.duration_ms, 0);

        let mut r = result();
        r.date_end = String::new();
        assert_eq!(evaluation_from_result(&r).evaluation.duration_ms, 0);
    }

    #[test]
    fn evaluation_id_flattens_the_end_timestamp() {
        let evaluation = evaluation_from_result(&result());
        assert_eq!(evaluation.evaluation.id, "ampel-eval-2024-01-01T000001500");
    }

    #[test]
    fn identical_end_timestamps_collide() {
        let a = evaluation_from_result(&result());
        let mut other = result();
        other.policy.id = "different-policy".to_string();
        let b = evaluation_from_result(&other);
        assert_eq!(a.evaluation.id, b.evaluation.id);
    }

    #[test]
    fn pass_summary_prefers_description_then_fixed_phrase() {
        let mut r = result();
        r.meta.description = "All supply chain checks".to_string();
        assert_eq!(
            evaluation_from_result(&r).assessment.summary,
            "All supply chain checks"
        );

        let r = result();
        assert_eq!(
            evaluation_from_result(&r).assessment.summary,
            "All policy tenets validated successfully"
        );
    }

    #[test]
    fn fail_summary_scans_for_first_non_pass_eval() {
        let mut r = result();
        r.status = "FAIL".to_string();
        r.eval_results = vec![eval("PASS", ""), eval("FAIL", "disk full"), eval("FAIL", "late")];
        assert_eq!(evaluation_from_result(&r).assessment.summary, "disk full");
    }

    #[test]
    fn fail_summary_falls_back_to_description() {
        let mut r = result();
        r.status = "FAIL".to_string();
        r.meta.description = "baseline checks".to_string();
        assert_eq!(
            evaluation_from_result(&r).assessment.summary,
            "baseline checks"
        );
    }

    #[test]
    fn other_statuses_use_description_verbatim() {
        let mut r = result();
        r.status = "SOFTFAIL".to_string();
        r.meta.description = "advisory only".to_string();
        let evaluation = evaluation_from_result(&r);
        assert_eq!(evaluation.assessment.status, "SOFTFAIL");
        assert_eq!(evaluation.assessment.summary, "advisory only");
    }

    #[test]
    fn subject_digests_become_identifiers() {
        let mut r = result();
        r.subject.name = "registry/app:1.2.3".to_string();
        r.subject
            .digest
            .insert("sha256".to_string(), "abc123".to_string());

        let subject = evaluation_from_result(&r).subject;
        assert_eq!(subject.name, "registry/app:1.2.3");
        assert_eq!(subject.kind, "artifact");
        assert_eq!(subject.identifiers.len(), 1);
        assert_eq!(subject.identifiers[0].kind, "sha256");
        assert_eq!(subject.identifiers[0].value, "abc123");
    }

    #[test]
    fn missing_subject_maps_to_unknown_artifact() {
        let subject = evaluation_from_result(&result()).subject;
        assert_eq!(subject.name, "unknown");
        assert!(subject.identifiers.is_empty());
    }

    #[test]
    fn controls_and_findings_omitted_when_empty() {
        let evaluation = evaluation_from_result(&result());
        assert!(evaluation.controls.is_none());
        assert!(evaluation.findings.is_none());
        assert!(evaluation.context.is_none());
    }

    #[test]
    fn findings_map_one_to_one_in_order() {
        let mut r = result();
        r.eval_results = vec![eval("PASS", ""), eval("FAIL", "x"), eval("PASS", "")];
        let findings = evaluation_from_result(&r).findings.expect("findings");
        assert_eq!(findings.len(), 3);
        assert_eq!(findings[0].id, "check-0");
        assert_eq!(findings[2].id, "check-2");
    }

    #[test]
    fn context_block_carries_runtime_and_assert_mode() {
        let mut r = result();
        r.context = json!({"registry": "internal"});
        r.meta.runtime = "cel@v14.0".to_string();
        r.meta.assert_mode = "AND".to_string();

        let context = evaluation_from_result(&r).context.expect("context");
        assert_eq!(context.runtime, "cel@v14.0");
        assert_eq!(context.assert_mode, "AND");
        assert_eq!(context.values, json!({"registry": "internal"}));
    }

    #[test]
    fn empty_context_object_is_dropped() {
        let mut r = result();
        r.context = json!({});
        assert!(evaluation_from_result(&r).context.is_none());
    }

    #[test]
    fn declared_controls_receive_overall_status() {
        let mut r = result();
        r.status = "FAIL".to_string();
        r.meta = ResultMeta {
            controls: vec![ControlRef {
                id: "AC-2".to_string(),
                class: "nist".to_string(),
            }],
            ..ResultMeta::default()
        };
        let controls = evaluation_from_result(&r).controls.expect("controls");
        assert_eq!(controls[0].status, "FAIL");
    }
}

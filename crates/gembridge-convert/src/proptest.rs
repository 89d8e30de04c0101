//! Property-based tests for the conversion engine.
//!
//! These verify the structural invariants that unit tests can only spot
//! check: policy count/order against arbitrary documents, id derivation,
//! and the 1:1 findings mapping.

use crate::{forward, reverse};
use gembridge_types::{
    Modification, PolicyDocument, PolicyMapping,
    result::{EvalResult, ExecutionResult},
};
use proptest::prelude::*;
use time::macros::datetime;

fn arb_id() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9.-]{0,15}").unwrap()
}

fn arb_modification() -> impl Strategy<Value = Modification> {
    (arb_id(), any::<bool>()).prop_map(|(target_id, with_title)| Modification {
        target_id,
        title: with_title.then(|| "Title".to_string()),
        ..Modification::default()
    })
}

fn arb_mapping() -> impl Strategy<Value = PolicyMapping> {
    (
        arb_id(),
        prop::collection::vec(arb_modification(), 0..4),
        prop::collection::vec(arb_modification(), 0..4),
        prop::collection::vec(arb_modification(), 0..4),
    )
        .prop_map(
            |(reference_id, controls, assessments, guidelines)| PolicyMapping {
                reference_id,
                control_modifications: controls,
                assessment_requirement_modifications: assessments,
                guideline_modifications: guidelines,
                ..PolicyMapping::default()
            },
        )
}

fn arb_document() -> impl Strategy<Value = PolicyDocument> {
    (
        prop::collection::vec(arb_mapping(), 0..3),
        prop::collection::vec(arb_mapping(), 0..3),
    )
        .prop_map(|(guidance, control)| PolicyDocument {
            guidance_references: guidance,
            control_references: control,
            ..PolicyDocument::default()
        })
}

fn modification_count(doc: &PolicyDocument) -> usize {
    doc.guidance_references
        .iter()
        .chain(&doc.control_references)
        .map(|m| {
            m.control_modifications.len()
                + m.assessment_requirement_modifications.len()
                + m.guideline_modifications.len()
        })
        .sum()
}

proptest! {
    #[test]
    fn policy_count_matches_modification_count(doc in arb_document()) {
        let set = forward::convert_document(&doc, datetime!(2024-06-01 12:00:00 UTC));
        let expected = modification_count(&doc);
        if expected == 0 {
            // Fallback guarantee: never an empty set.
            prop_assert_eq!(set.policies.len(), 1);
            prop_assert!(set.policies[0].meta.note.is_some());
        } else {
            prop_assert_eq!(set.policies.len(), expected);
        }
    }

    #[test]
    fn policy_ids_never_contain_dots(doc in arb_document()) {
        let set = forward::convert_document(&doc, datetime!(2024-06-01 12:00:00 UTC));
        for policy in &set.policies {
            prop_assert!(!policy.id.contains('.'), "id: {}", policy.id);
        }
    }

    #[test]
    fn every_policy_carries_exactly_one_tenet(doc in arb_document()) {
        let set = forward::convert_document(&doc, datetime!(2024-06-01 12:00:00 UTC));
        for policy in &set.policies {
            prop_assert_eq!(policy.tenets.len(), 1);
            prop_assert!(policy.tenets[0].code.contains("TODO"));
        }
    }

    #[test]
    fn findings_map_one_to_one(count in 0usize..8) {
        let result = ExecutionResult {
            status: "FAIL".to_string(),
            eval_results: vec![EvalResult::default(); count],
            ..ExecutionResult::default()
        };
        let evaluation = reverse::evaluation_from_result(&result);
        match evaluation.findings {
            None => prop_assert_eq!(count, 0),
            Some(findings) => prop_assert_eq!(findings.len(), count),
        }
    }
}

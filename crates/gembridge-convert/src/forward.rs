//! Gemara Layer 3 document -> Ampel policy set.
//!
//! One executable policy is emitted per authored modification, walking
//! guidance references before control references and, within each
//! mapping, the control / assessment / guideline lists in that order. A
//! document with no modifications at all still yields one basic template
//! policy, so the output set is never empty.

use crate::tenet;
use gembridge_types::{
    CommonSpec, ContextSpec, ContextVar, MappingType, Modification, ModificationCategory, Policy,
    PolicyDocument, PolicyMapping, PolicyMeta, PolicySet, PolicySetMeta, PredicateSpec, ScopeSpec,
    ids,
};
use time::OffsetDateTime;

const BASIC_POLICY_DESCRIPTION: &str = "Basic policy template";
const BASIC_POLICY_NOTE: &str =
    "This is a template policy. Please customize with specific tenets.";

/// Convert one authored document into a runnable policy-set skeleton.
///
/// `converted_at` is stamped into the set meta and is the only field that
/// varies between runs on identical input.
pub fn convert_document(doc: &PolicyDocument, converted_at: OffsetDateTime) -> PolicySet {
    let mut policies = Vec::new();
    for mapping in &doc.guidance_references {
        convert_mapping(mapping, MappingType::Guidance, &mut policies);
    }
    for mapping in &doc.control_references {
        convert_mapping(mapping, MappingType::Control, &mut policies);
    }
    if policies.is_empty() {
        policies.push(basic_policy(doc));
    }

    PolicySet {
        id: first_non_empty(&[doc.metadata.id.as_str(), ids::DEFAULT_POLICY_SET_ID]).to_string(),
        version: first_non_empty(&[
            doc.metadata.version.as_str(),
            ids::DEFAULT_POLICY_SET_VERSION,
        ])
        .to_string(),
        meta: PolicySetMeta {
            description: first_non_empty(&[doc.purpose.as_str(), doc.title.as_str()]).to_string(),
            source: ids::POLICY_SET_SOURCE.to_string(),
            organization_id: doc.organization_id.clone(),
            converted_at,
            implementation_plan: (!doc.implementation_plan.is_empty())
                .then(|| doc.implementation_plan.clone()),
            contacts: doc.contacts.clone(),
        },
        common: context_from_scope(&doc.scope).map(|context| CommonSpec { context }),
        policies,
    }
}

/// Derive typed context variables from a scope block. Only the three
/// recognized keys contribute; an all-empty scope yields no context.
pub fn context_from_scope(scope: &ScopeSpec) -> Option<ContextSpec> {
    let spec = ContextSpec {
        boundaries: (!scope.boundaries.is_empty()).then(|| ContextVar::list(&scope.boundaries)),
        technologies: (!scope.technologies.is_empty())
            .then(|| ContextVar::list(&scope.technologies)),
        providers: (!scope.providers.is_empty()).then(|| ContextVar::list(&scope.providers)),
    };
    (!spec.is_empty()).then_some(spec)
}

fn convert_mapping(mapping: &PolicyMapping, mapping_type: MappingType, out: &mut Vec<Policy>) {
    let groups = [
        (ModificationCategory::Control, &mapping.control_modifications),
        (
            ModificationCategory::Assessment,
            &mapping.assessment_requirement_modifications,
        ),
        (
            ModificationCategory::Guideline,
            &mapping.guideline_modifications,
        ),
    ];
    for (category, modifications) in groups {
        for modification in modifications {
            out.push(policy_from_modification(
                modification,
                mapping,
                mapping_type,
                category,
            ));
        }
    }
}

fn policy_from_modification(
    m: &Modification,
    mapping: &PolicyMapping,
    mapping_type: MappingType,
    category: ModificationCategory,
) -> Policy {
    // Dots would collide with Ampel's id namespace separators.
    let id = format!("{}-{}", mapping.reference_id, m.target_id).replace('.', "-");

    let description = first_non_empty(&[
        m.title.as_deref().unwrap_or(""),
        m.objective.as_deref().unwrap_or(""),
        m.modification_rationale.as_str(),
    ])
    .to_string();

    Policy {
        id,
        version: ids::POLICY_VERSION.to_string(),
        meta: PolicyMeta {
            description,
            reference_id: Some(mapping.reference_id.clone()),
            target_id: Some(m.target_id.clone()),
            modification_type: Some(m.modification_type),
            modification_rationale: Some(m.modification_rationale.clone()),
            mapping_type: Some(mapping_type),
            category: Some(category),
            note: None,
        },
        context: context_from_scope(&mapping.in_scope),
        tenets: vec![tenet::synthesize(category, m)],
        predicates: PredicateSpec::default_types(),
    }
}

/// Template policy emitted when the document authored no modifications.
fn basic_policy(doc: &PolicyDocument) -> Policy {
    Policy {
        id: first_non_empty(&[doc.metadata.id.as_str(), ids::DEFAULT_BASIC_POLICY_ID]).to_string(),
        version: first_non_empty(&[doc.metadata.version.as_str(), ids::POLICY_VERSION]).to_string(),
        meta: PolicyMeta {
            description: first_non_empty(&[
                doc.purpose.as_str(),
                doc.title.as_str(),
                BASIC_POLICY_DESCRIPTION,
            ])
            .to_string(),
            note: Some(BASIC_POLICY_NOTE.to_string()),
            ..PolicyMeta::default()
        },
        context: context_from_scope(&doc.scope),
        tenets: vec![tenet::generic(None)],
        predicates: PredicateSpec::in_toto_only(),
    }
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|s| !s.is_empty())
        .unwrap_or("")
}

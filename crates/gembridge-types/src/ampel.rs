//! Ampel policy set model (forward-direction output).
//!
//! Field order matters: serde emits keys in declaration order and the
//! generated JSON is meant to be diff-friendly. Wire names that are not
//! plain snake_case are pinned with explicit renames.

use crate::gemara::{ImplementationPlan, MappingType, ModificationCategory, ModificationType};
use crate::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// A runnable Ampel policy set: the top-level forward-conversion output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicySet {
    pub id: String,
    pub version: String,
    pub meta: PolicySetMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common: Option<CommonSpec>,
    pub policies: Vec<Policy>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicySetMeta {
    pub description: String,
    pub source: String,
    #[serde(rename = "organization-id")]
    pub organization_id: String,
    /// Stamped at conversion time; the only non-deterministic output field.
    #[serde(rename = "converted-at", with = "time::serde::rfc3339")]
    #[schemars(with = "String")]
    pub converted_at: OffsetDateTime,
    #[serde(
        rename = "implementation-plan",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub implementation_plan: Option<ImplementationPlan>,
    #[serde(default, skip_serializing_if = "JsonValue::is_null")]
    pub contacts: JsonValue,
}

/// Shared definitions applied to every policy in the set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CommonSpec {
    pub context: ContextSpec,
}

/// Scope-derived context variables. A struct rather than a map so the
/// recognized slots keep their wire order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ContextSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundaries: Option<ContextVar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<ContextVar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub providers: Option<ContextVar>,
}

impl ContextSpec {
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_none() && self.technologies.is_none() && self.providers.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContextVar {
    #[serde(rename = "type")]
    pub kind: String,
    pub default: Vec<String>,
    pub required: bool,
}

impl ContextVar {
    /// A non-required list variable defaulted from authored scope values.
    pub fn list(values: &[String]) -> Self {
        Self {
            kind: ids::CONTEXT_TYPE_LIST.to_string(),
            default: values.to_vec(),
            required: false,
        }
    }
}

/// One executable policy; carries exactly one tenet in this conversion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Policy {
    pub id: String,
    pub version: String,
    pub meta: PolicyMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextSpec>,
    pub tenets: Vec<Tenet>,
    pub predicates: PredicateSpec,
}

/// Policy provenance. Modification-derived policies populate the full
/// block; the basic fallback policy carries only description and note.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PolicyMeta {
    pub description: String,
    #[serde(rename = "reference-id", skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(rename = "target-id", skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(rename = "modification-type", skip_serializing_if = "Option::is_none")]
    pub modification_type: Option<ModificationType>,
    #[serde(
        rename = "modification-rationale",
        skip_serializing_if = "Option::is_none"
    )]
    pub modification_rationale: Option<String>,
    #[serde(rename = "mapping-type", skip_serializing_if = "Option::is_none")]
    pub mapping_type: Option<MappingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ModificationCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One runnable check: an expression, its declared outputs, and the
/// human-facing success/failure messaging.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Tenet {
    pub runtime: String,
    pub code: String,
    pub outputs: BTreeMap<String, TenetOutput>,
    pub assessment: AssessmentSpec,
    pub error: ErrorSpec,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TenetOutput {
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AssessmentSpec {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorSpec {
    pub message: String,
    pub guidance: String,
}

/// Attestation statement types a policy accepts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PredicateSpec {
    pub types: Vec<String>,
}

impl PredicateSpec {
    /// The placeholder pair stamped on modification-derived policies.
    pub fn default_types() -> Self {
        Self {
            types: vec![
                ids::STATEMENT_TYPE_IN_TOTO.to_string(),
                ids::PREDICATE_TYPE_SLSA_PROVENANCE.to_string(),
            ],
        }
    }

    /// The single-URI list stamped on the basic fallback policy.
    pub fn in_toto_only() -> Self {
        Self {
            types: vec![ids::STATEMENT_TYPE_IN_TOTO.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn policy_set_meta_serializes_kebab_wire_names() {
        let meta = PolicySetMeta {
            description: "desc".to_string(),
            source: ids::POLICY_SET_SOURCE.to_string(),
            organization_id: "acme".to_string(),
            converted_at: datetime!(2024-01-01 00:00:00 UTC),
            implementation_plan: None,
            contacts: JsonValue::Null,
        };
        let json = serde_json::to_value(&meta).expect("serialize");
        assert_eq!(json["organization-id"], "acme");
        assert_eq!(json["converted-at"], "2024-01-01T00:00:00Z");
        assert!(json.get("implementation-plan").is_none());
        assert!(json.get("contacts").is_none());
    }

    #[test]
    fn empty_context_slots_are_omitted() {
        let spec = ContextSpec {
            boundaries: Some(ContextVar::list(&["prod".to_string()])),
            technologies: None,
            providers: None,
        };
        let json = serde_json::to_value(&spec).expect("serialize");
        assert_eq!(json["boundaries"]["type"], "list");
        assert_eq!(json["boundaries"]["required"], false);
        assert!(json.get("technologies").is_none());
    }
}

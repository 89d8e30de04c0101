//! Gemara Layer 3 policy document model (forward-direction input).
//!
//! Authored documents are frequently partial: every field is defaulted so
//! a half-filled document still deserializes and converts. Wire names are
//! kebab-case throughout.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

fn default_unknown() -> String {
    "unknown".to_string()
}

/// An authored Gemara Layer 3 policy document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "kebab-case")]
pub struct PolicyDocument {
    pub metadata: DocumentMetadata,
    pub organization_id: String,
    pub title: String,
    pub purpose: String,
    pub scope: ScopeSpec,
    /// Free-form contact block, copied verbatim into the output meta.
    #[serde(skip_serializing_if = "JsonValue::is_null")]
    pub contacts: JsonValue,
    pub guidance_references: Vec<PolicyMapping>,
    pub control_references: Vec<PolicyMapping>,
    pub implementation_plan: ImplementationPlan,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DocumentMetadata {
    pub id: String,
    pub version: String,
}

/// Document- or mapping-level scope. Only these three keys are recognized;
/// anything else in an authored scope block is dropped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScopeSpec {
    pub boundaries: Vec<String>,
    pub technologies: Vec<String>,
    pub providers: Vec<String>,
}

impl ScopeSpec {
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty() && self.technologies.is_empty() && self.providers.is_empty()
    }
}

/// One reference into an external catalog, with the authored modifications
/// applied against it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "kebab-case")]
pub struct PolicyMapping {
    #[serde(default = "default_unknown")]
    pub reference_id: String,
    pub in_scope: ScopeSpec,
    pub out_of_scope: ScopeSpec,
    pub control_modifications: Vec<Modification>,
    pub assessment_requirement_modifications: Vec<Modification>,
    pub guideline_modifications: Vec<Modification>,
}

impl Default for PolicyMapping {
    fn default() -> Self {
        Self {
            reference_id: default_unknown(),
            in_scope: ScopeSpec::default(),
            out_of_scope: ScopeSpec::default(),
            control_modifications: Vec::new(),
            assessment_requirement_modifications: Vec::new(),
            guideline_modifications: Vec::new(),
        }
    }
}

/// An authored change against one referenced control, assessment
/// requirement, or guideline.
///
/// The struct carries the union of the category-specific optional fields;
/// which of them are meaningful is decided by the list the modification
/// came from (see [`ModificationCategory`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "kebab-case")]
pub struct Modification {
    #[serde(default = "default_unknown")]
    pub target_id: String,
    pub modification_type: ModificationType,
    pub modification_rationale: String,

    // control + guideline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    // control
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    // assessment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub applicability: Vec<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    // guideline
    pub recommendations: Vec<String>,
}

impl Default for Modification {
    fn default() -> Self {
        Self {
            target_id: default_unknown(),
            modification_type: ModificationType::default(),
            modification_rationale: String::new(),
            title: None,
            objective: None,
            text: None,
            applicability: Vec::new(),
            recommendation: None,
            recommendations: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ModificationType {
    #[default]
    Clarify,
    IncreaseStrictness,
    ReduceStrictness,
    Exclude,
}

impl ModificationType {
    pub fn as_str(self) -> &'static str {
        match self {
            ModificationType::Clarify => "clarify",
            ModificationType::IncreaseStrictness => "increase-strictness",
            ModificationType::ReduceStrictness => "reduce-strictness",
            ModificationType::Exclude => "exclude",
        }
    }
}

impl std::fmt::Display for ModificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which modification list an entry came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModificationCategory {
    Control,
    Assessment,
    Guideline,
}

impl ModificationCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ModificationCategory::Control => "control",
            ModificationCategory::Assessment => "assessment",
            ModificationCategory::Guideline => "guideline",
        }
    }
}

/// Which reference list a mapping came from (guidance catalogs vs control
/// catalogs).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MappingType {
    Guidance,
    Control,
}

impl MappingType {
    pub fn as_str(self) -> &'static str {
        match self {
            MappingType::Guidance => "guidance",
            MappingType::Control => "control",
        }
    }
}

/// Recognized implementation-plan keys. The authored block is free-form;
/// only these entries survive into the output meta.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImplementationPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_process: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notified_parties: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation_points: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforcement: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforcement_methods: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noncompliance_plan: Option<JsonValue>,
}

impl ImplementationPlan {
    pub fn is_empty(&self) -> bool {
        self.notification_process.is_none()
            && self.notified_parties.is_none()
            && self.evaluation.is_none()
            && self.evaluation_points.is_none()
            && self.enforcement.is_none()
            && self.enforcement_methods.is_none()
            && self.noncompliance_plan.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_deserializes_with_defaults() {
        let doc: PolicyDocument = serde_json::from_str(r#"{"title": "Supply Chain Policy"}"#)
            .expect("partial document");
        assert_eq!(doc.title, "Supply Chain Policy");
        assert_eq!(doc.metadata.id, "");
        assert!(doc.guidance_references.is_empty());
        assert!(doc.scope.is_empty());
    }

    #[test]
    fn missing_reference_and_target_ids_default_to_unknown() {
        let mapping: PolicyMapping = serde_json::from_str("{}").expect("empty mapping");
        assert_eq!(mapping.reference_id, "unknown");

        let modification: Modification = serde_json::from_str("{}").expect("empty modification");
        assert_eq!(modification.target_id, "unknown");
        assert_eq!(modification.modification_type, ModificationType::Clarify);
    }

    #[test]
    fn modification_type_round_trips_kebab_case() {
        let parsed: ModificationType =
            serde_json::from_str(r#""increase-strictness""#).expect("kebab variant");
        assert_eq!(parsed, ModificationType::IncreaseStrictness);
        assert_eq!(parsed.to_string(), "increase-strictness");
    }

    #[test]
    fn implementation_plan_keeps_recognized_keys_only() {
        let plan: ImplementationPlan = serde_json::from_str(
            r#"{"notification-process": "email", "made-up-key": true, "enforcement-methods": ["ci"]}"#,
        )
        .expect("plan");
        assert!(plan.notification_process.is_some());
        assert!(plan.enforcement_methods.is_some());
        assert!(plan.evaluation.is_none());
    }
}

//! Placeholder tenet synthesis for the forward direction.
//!
//! The generated `code` fields are deliberately non-functional: each is an
//! always-true CEL expression carrying a `// TODO:` marker, and every
//! output expression embeds the `PENDING_IMPLEMENTATION` sentinel so
//! downstream tooling can detect unimplemented policies. Only the text
//! content differs between the four variants.

use gembridge_types::{
    AssessmentSpec, ErrorSpec, Modification, ModificationCategory, ModificationType, Tenet,
    TenetOutput, ids,
};
use std::collections::BTreeMap;

const CODE_CLARIFY: &str = "true  // TODO: Implement clarified validation logic";
const CODE_INCREASE_STRICTNESS: &str = "true  // TODO: Implement stricter validation logic";
const CODE_REDUCE_STRICTNESS: &str = "true  // TODO: Implement relaxed validation logic";
const CODE_EXCLUDE: &str = "true  // TODO: Implement exclusion logic";
const CODE_ASSESSMENT: &str = "true  // TODO: Implement assessment validation logic";
const CODE_GUIDELINE: &str = "true  // TODO: Implement guideline validation logic";
const CODE_GENERIC: &str = "true  // TODO: Implement validation logic";

const OUTPUT_CONTROL_STATUS: &str =
    "\"PENDING_IMPLEMENTATION\"  // TODO: Extract actual control status";
const OUTPUT_ASSESSMENT_RESULT: &str =
    "\"PENDING_IMPLEMENTATION\"  // TODO: Extract assessment result";
const OUTPUT_GUIDELINE_COMPLIANCE: &str =
    "\"PENDING_IMPLEMENTATION\"  // TODO: Extract compliance status";
const OUTPUT_PENDING: &str = "\"PENDING_IMPLEMENTATION\"";

const FALLBACK_CONTROL_TITLE: &str = "Control Check";
const FALLBACK_GUIDELINE_TITLE: &str = "Guideline Check";
const FALLBACK_ASSESSMENT_MESSAGE: &str = "Assessment requirement validated";
const FALLBACK_ASSESSMENT_GUIDANCE: &str = "Review the assessment requirements";
const FALLBACK_GUIDELINE_GUIDANCE: &str = "Review guideline requirements";
const FALLBACK_GENERIC_GUIDANCE: &str = "Review policy requirements";
const GENERIC_MESSAGE: &str = "Policy requirement validated";
const GENERIC_ERROR_MESSAGE: &str = "Policy validation failed";

/// Build the single tenet for one modification, dispatched on category.
pub fn synthesize(category: ModificationCategory, modification: &Modification) -> Tenet {
    match category {
        ModificationCategory::Control => control(modification),
        ModificationCategory::Assessment => assessment(modification),
        ModificationCategory::Guideline => guideline(modification),
    }
}

/// The category-free tenet used by the basic fallback policy.
pub fn generic(rationale: Option<&str>) -> Tenet {
    Tenet {
        runtime: ids::TENET_RUNTIME.to_string(),
        code: CODE_GENERIC.to_string(),
        outputs: single_output("status", OUTPUT_PENDING),
        assessment: AssessmentSpec {
            message: GENERIC_MESSAGE.to_string(),
        },
        error: ErrorSpec {
            message: GENERIC_ERROR_MESSAGE.to_string(),
            guidance: rationale
                .filter(|r| !r.is_empty())
                .unwrap_or(FALLBACK_GENERIC_GUIDANCE)
                .to_string(),
        },
    }
}

fn control(m: &Modification) -> Tenet {
    let title = m.title.as_deref().unwrap_or(FALLBACK_CONTROL_TITLE);
    let objective = m.objective.as_deref().unwrap_or("");

    let code = match m.modification_type {
        ModificationType::IncreaseStrictness => CODE_INCREASE_STRICTNESS,
        ModificationType::ReduceStrictness => CODE_REDUCE_STRICTNESS,
        ModificationType::Exclude => CODE_EXCLUDE,
        ModificationType::Clarify => CODE_CLARIFY,
    };

    let message = format!("{title}: {objective}");
    let message = message.trim_matches([':', ' ']).to_string();

    Tenet {
        runtime: ids::TENET_RUNTIME.to_string(),
        code: code.to_string(),
        outputs: single_output("control_status", OUTPUT_CONTROL_STATUS),
        assessment: AssessmentSpec { message },
        error: ErrorSpec {
            message: format!("Control validation failed: {title}"),
            guidance: format!(
                "Review the control requirements and ensure compliance. Modification type: {}",
                m.modification_type
            ),
        },
    }
}

fn assessment(m: &Modification) -> Tenet {
    // The applicability list is carried verbatim as a literal expression.
    let applicability =
        serde_json::to_string(&m.applicability).unwrap_or_else(|_| "[]".to_string());

    let mut outputs = single_output("assessment_result", OUTPUT_ASSESSMENT_RESULT);
    outputs.insert(
        "applicability".to_string(),
        TenetOutput {
            code: applicability,
        },
    );

    Tenet {
        runtime: ids::TENET_RUNTIME.to_string(),
        code: CODE_ASSESSMENT.to_string(),
        outputs,
        assessment: AssessmentSpec {
            message: m
                .text
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or(FALLBACK_ASSESSMENT_MESSAGE)
                .to_string(),
        },
        error: ErrorSpec {
            message: "Assessment validation failed".to_string(),
            guidance: m
                .recommendation
                .as_deref()
                .filter(|r| !r.is_empty())
                .unwrap_or(FALLBACK_ASSESSMENT_GUIDANCE)
                .to_string(),
        },
    }
}

fn guideline(m: &Modification) -> Tenet {
    let title = m.title.as_deref().unwrap_or(FALLBACK_GUIDELINE_TITLE);

    let guidance = if m.recommendations.is_empty() {
        FALLBACK_GUIDELINE_GUIDANCE.to_string()
    } else {
        m.recommendations.join(" | ")
    };

    Tenet {
        runtime: ids::TENET_RUNTIME.to_string(),
        code: CODE_GUIDELINE.to_string(),
        outputs: single_output("guideline_compliance", OUTPUT_GUIDELINE_COMPLIANCE),
        assessment: AssessmentSpec {
            message: format!("Guideline validated: {title}"),
        },
        error: ErrorSpec {
            message: format!("Guideline validation failed: {title}"),
            guidance,
        },
    }
}

fn single_output(name: &str, code: &str) -> BTreeMap<String, TenetOutput> {
    BTreeMap::from([(
        name.to_string(),
        TenetOutput {
            code: code.to_string(),
        },
    )])
}

//! Stable DTOs and IDs used across the gembridge workspace.
//!
//! This crate is intentionally boring:
//! - serde models for the four wire schemas (Gemara Layer 3 policy
//!   documents, Ampel policy sets, Ampel execution results, Gemara
//!   Layer 4 evaluation reports)
//! - stable string IDs and wire constants
//!
//! No conversion logic lives here; see `gembridge-convert`.

#![forbid(unsafe_code)]

pub mod ampel;
pub mod evaluation;
pub mod gemara;
pub mod ids;
pub mod result;

pub use ampel::{
    AssessmentSpec, CommonSpec, ContextSpec, ContextVar, ErrorSpec, Policy, PolicyMeta, PolicySet,
    PolicySetMeta, PredicateSpec, Tenet, TenetOutput,
};
pub use evaluation::{
    Assessment, ControlStatus, EvaluatedPolicy, EvaluatedSubject, Evaluation, EvaluationContext,
    EvaluationEnvelope, EvaluationMeta, Evidence, Finding, FindingError, SubjectIdentifier,
};
pub use gemara::{
    DocumentMetadata, ImplementationPlan, MappingType, Modification, ModificationCategory,
    ModificationType, PolicyDocument, PolicyMapping, ScopeSpec,
};
pub use result::{
    AssessmentMessage, ControlRef, ErrorDetail, EvalResult, ExecutionResult, PolicyRef, ResultMeta,
    StatementRef, Subject,
};

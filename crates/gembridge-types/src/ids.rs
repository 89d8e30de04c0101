//! Stable wire constants shared by both conversion directions.
//!
//! Everything here is part of the emitted formats: downstream tooling keys
//! off these literals, so they must not drift.

// Attestation statement / predicate type URIs.
pub const STATEMENT_TYPE_IN_TOTO: &str = "https://in-toto.io/Statement/v1";
pub const PREDICATE_TYPE_SLSA_PROVENANCE: &str = "https://slsa.dev/provenance/v1";

// Ampel tenet runtime identifier (CEL expression language, pinned version).
pub const TENET_RUNTIME: &str = "cel@v14.0";

/// Sentinel embedded in every generated output expression. Tooling scans
/// for this literal to find policies whose logic is not yet implemented.
pub const PENDING_SENTINEL: &str = "PENDING_IMPLEMENTATION";

// Context variable typing.
pub const CONTEXT_TYPE_LIST: &str = "list";

// Result statuses (passed through verbatim; anything else is "other").
pub const STATUS_PASS: &str = "PASS";
pub const STATUS_FAIL: &str = "FAIL";
pub const STATUS_UNKNOWN: &str = "UNKNOWN";

// Gemara Layer 4 evaluation envelope.
pub const GEMARA_VERSION: &str = "1.0";
pub const EVALUATION_LAYER: u32 = 4;
pub const ENVELOPE_TYPE_EVALUATION: &str = "evaluation";
pub const EVALUATION_ID_PREFIX: &str = "ampel-eval-";
pub const EVALUATOR_NAME: &str = "ampel";
pub const EVALUATOR_VERSION: &str = "1.0";
pub const SUBJECT_TYPE_ARTIFACT: &str = "artifact";
pub const EVIDENCE_TYPE_ATTESTATION: &str = "attestation";
pub const CONTROL_FRAMEWORK_CUSTOM: &str = "custom";

// Ampel policy set defaults (forward direction).
pub const POLICY_SET_SOURCE: &str = "Converted from Gemara Layer 3 Policy";
pub const DEFAULT_POLICY_SET_ID: &str = "gemara-policy";
pub const DEFAULT_POLICY_SET_VERSION: &str = "1.0.0";
pub const DEFAULT_BASIC_POLICY_ID: &str = "basic-policy";
pub const POLICY_VERSION: &str = "v1.0.0";

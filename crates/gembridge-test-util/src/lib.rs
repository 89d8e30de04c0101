//! Shared test utilities for the gembridge workspace.
//!
//! Holds the canonical sample documents used across crate boundaries and
//! the normalization helper for golden comparisons: the forward direction
//! stamps a wall-clock `converted-at` into its output, so two otherwise
//! identical runs differ in exactly that field.

use serde_json::Value;

/// Replace every `converted-at` value with a fixed placeholder, at any
/// depth, so converted documents can be compared structurally.
pub fn normalize_converted_at(mut value: Value) -> Value {
    normalize_recursive(&mut value);
    value
}

fn normalize_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.contains_key("converted-at") {
                map.insert(
                    "converted-at".to_string(),
                    Value::String("__TIMESTAMP__".to_string()),
                );
            }
            for val in map.values_mut() {
                normalize_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_recursive(val);
            }
        }
        _ => {}
    }
}

/// A small but representative Gemara Layer 3 policy document: one
/// guidance reference with two modifications, one control reference with
/// one, scope on both levels, and an implementation plan.
pub const SAMPLE_POLICY_YAML: &str = r#"
metadata:
  id: acme-supply-chain
  version: 1.2.0
organization-id: acme
title: Acme supply chain policy
purpose: Keep release artifacts attestable
scope:
  boundaries:
    - production
  technologies:
    - rust
    - go
contacts:
  owner: security@acme.example
guidance-references:
  - reference-id: OSPS-B
    in-scope:
      technologies:
        - rust
    control-modifications:
      - target-id: B-01
        modification-type: increase-strictness
        modification-rationale: Builds must be hermetic
        title: Hermetic builds
        objective: No network access during build
    guideline-modifications:
      - target-id: B-07
        modification-type: clarify
        modification-rationale: Pin all dependencies
        title: Dependency pinning
        recommendations:
          - pin digests
          - use lockfiles
control-references:
  - reference-id: NIST.SP.800-53
    assessment-requirement-modifications:
      - target-id: AC-2.1
        modification-type: clarify
        modification-rationale: Access reviews quarterly
        text: Accounts are reviewed quarterly
        applicability:
          - prod
        recommendation: Automate the review
implementation-plan:
  notification-process: email the security list
  enforcement-methods:
    - ci
"#;

/// An in-toto statement wrapping a result set with one passing and one
/// failing execution result.
pub const SAMPLE_STATEMENT_JSON: &str = r#"{
  "_type": "https://in-toto.io/Statement/v1",
  "subject": [{"name": "registry/app", "digest": {"sha256": "abc123"}}],
  "predicateType": "https://carabiner.dev/ampel/results/v1",
  "predicate": {
    "results": [
      {
        "status": "PASS",
        "date_start": "2024-01-01T00:00:00Z",
        "date_end": "2024-01-01T00:00:01.500Z",
        "subject": {"name": "registry/app:1.2.3", "digest": {"sha256": "abc123"}},
        "policy": {"id": "osps-b-b-01", "version": "v1.0.0"},
        "meta": {
          "description": "Hermetic build checks",
          "runtime": "cel@v14.0",
          "assert_mode": "AND",
          "controls": [{"id": "B-01", "class": "osps"}]
        },
        "eval_results": [
          {
            "id": "hermetic",
            "status": "PASS",
            "date": "2024-01-01T00:00:01Z",
            "assessment": {"message": "build was hermetic"},
            "statements": [{"type": "provenance", "digest": "sha256:def456"}]
          }
        ]
      },
      {
        "status": "FAIL",
        "date_start": "2024-01-01T00:01:00Z",
        "date_end": "2024-01-01T00:01:02Z",
        "subject": {"name": "registry/app:1.2.3", "digest": {"sha256": "abc123"}},
        "policy": {"id": "osps-b-b-07", "version": "v1.0.0"},
        "meta": {"description": "Dependency pinning checks"},
        "eval_results": [
          {"id": "lockfile", "status": "PASS", "assessment": {"message": "lockfile present"}},
          {
            "id": "digests",
            "status": "FAIL",
            "error": {"message": "unpinned base image", "guidance": "pin the base image digest"}
          }
        ]
      }
    ]
  }
}"#;

/// A single bare execution result (no envelope).
pub const SAMPLE_RESULT_JSON: &str = r#"{
  "status": "PASS",
  "date_start": "2024-03-05T10:00:00Z",
  "date_end": "2024-03-05T10:00:03Z",
  "subject": {"name": "registry/tool:2.0", "digest": {"sha512": "ff00"}},
  "policy": {"id": "basic-policy", "version": "v1.0.0"},
  "meta": {"description": "Baseline policy"},
  "eval_results": [
    {"id": "baseline", "status": "PASS", "assessment": {"message": "ok"}}
  ]
}"#;

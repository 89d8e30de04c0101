//! Human-readable CLI output for conversions.

use crate::convert::ForwardOutput;
use camino::Utf8Path;
use std::fmt::Write;

/// Summary block printed after a successful forward conversion.
pub fn render_forward_summary(output_path: &Utf8Path, out: &ForwardOutput) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Ampel PolicySet saved to: {output_path}");
    let _ = writeln!(text);
    let _ = writeln!(text, "Conversion summary:");
    let _ = writeln!(text, "  PolicySet ID: {}", out.policy_set.id);
    let _ = writeln!(text, "  Policies:     {}", out.policy_set.policies.len());
    text
}

/// Fixed follow-up block: the generated tenets are templates and require
/// manual implementation before the set is runnable.
pub const FORWARD_FOLLOW_UP: &str = "\
Important notes:
  - This conversion creates TEMPLATE policies that require implementation
  - All 'code' fields contain placeholders marked with 'TODO'
  - You must implement actual CEL evaluation logic for each tenet
  - Review and customize the 'predicates.types' for each policy
  - Add signer 'identities' if attestation verification is needed

Next steps:
  1. Review the generated Ampel PolicySet
  2. Implement CEL code in each tenet's 'code' field
  3. Customize predicate types based on your attestation format
  4. Add signer identities for attestation verification
  5. Test with: ampel verify --policy <output_file> <attestation>
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::run_forward;
    use gembridge_test_util::SAMPLE_POLICY_YAML;

    #[test]
    fn summary_names_the_set_and_counts_policies() {
        let out = run_forward(SAMPLE_POLICY_YAML).expect("forward conversion");
        let summary = render_forward_summary(Utf8Path::new("out/policy.ampel.json"), &out);
        assert!(summary.contains("out/policy.ampel.json"));
        assert!(summary.contains("acme-supply-chain"));
        assert!(summary.contains("Policies:     3"));
    }

    #[test]
    fn follow_up_flags_the_placeholder_contract() {
        assert!(FORWARD_FOLLOW_UP.contains("TEMPLATE"));
        assert!(FORWARD_FOLLOW_UP.contains("TODO"));
    }
}

//! Report generation for conformance results.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::fixtures::FixtureSet;
use crate::verify::VerificationSummary;

/// A conformance report over one or more fixture sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Report title.
    pub title: String,
    /// Runtime mode tested (strict, hardened or both).
    pub mode: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    /// SHA-256 over the canonical JSON of the fixture sets, in order.
    pub fixture_digest: String,
    /// Verification summary.
    pub summary: VerificationSummary,
}

/// Hex SHA-256 of the compact JSON encoding of each set, concatenated.
pub fn fixture_digest(sets: &[FixtureSet]) -> Result<String, serde_json::Error> {
    let mut hasher = Sha256::new();
    for set in sets {
        hasher.update(serde_json::to_vec(set)?);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

impl ConformanceReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Mode: {}\n", self.mode));
        out.push_str(&format!("- Timestamp: {}\n", self.timestamp));
        out.push_str(&format!("- Fixture digest: `{}`\n", self.fixture_digest));
        out.push_str(&format!("- Total: {}\n", self.summary.total));
        out.push_str(&format!("- Passed: {}\n", self.summary.passed));
        out.push_str(&format!("- Failed: {}\n\n", self.summary.failed));

        out.push_str("| Case | Section | Mode | Status |\n");
        out.push_str("|------|---------|------|--------|\n");
        for r in &self.summary.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                r.case_name, r.spec_section, r.mode, status
            ));
        }

        let failures: Vec<_> = self.summary.results.iter().filter(|r| !r.passed).collect();
        if !failures.is_empty() {
            out.push_str("\n## Failures\n");
            for r in failures {
                out.push_str(&format!("\n### {} ({})\n\n```\n", r.case_name, r.mode));
                out.push_str(r.diff.as_deref().unwrap_or("(no diff)"));
                out.push_str("\n```\n");
            }
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

//! Container/image-scan (Trivy) report parser.

use super::{ReportParser, SourceDocument};
use crate::model::{Finding, ToolReport};
use crate::severity::{normalize, ToolFamily};
use serde_json::Value;
use tracing::warn;

/// Parses `trivy-report.json`: `{"Results": [{"Vulnerabilities": [...]}]}`
/// with severity tokens LOW/MEDIUM/HIGH/CRITICAL/UNKNOWN (UNKNOWN lands in
/// the INFO bucket). Raw severity labels are tallied as well, feeding the
/// "mostly Medium" hint when this tool is the top offender.
pub struct TrivyParser;

impl TrivyParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TrivyParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportParser for TrivyParser {
    fn family(&self) -> ToolFamily {
        ToolFamily::Trivy
    }

    fn parse(&self, document: &SourceDocument) -> ToolReport {
        let mut report = ToolReport::new();
        let SourceDocument::Json(value) = document else {
            return report;
        };
        let Some(results) = value.get("Results").and_then(Value::as_array) else {
            warn!("trivy report has no Results array, treating as empty");
            return report;
        };

        for result in results {
            // A result with no Vulnerabilities key (e.g., a clean layer) is normal.
            let Some(vulns) = result.get("Vulnerabilities").and_then(Value::as_array) else {
                continue;
            };
            for vuln in vulns {
                let Some(vuln) = vuln.as_object() else {
                    warn!("skipping non-object trivy vulnerability entry");
                    continue;
                };
                let raw = vuln
                    .get("Severity")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                report.tally_raw_severity(raw);

                let mut finding = Finding::new(self.family(), normalize(self.family(), raw));
                let id = vuln.get("VulnerabilityID").and_then(Value::as_str);
                let pkg = vuln.get("PkgName").and_then(Value::as_str);
                finding = match (id, pkg) {
                    (Some(id), Some(pkg)) => finding.with_identifier(format!("{id} in {pkg}")),
                    (Some(id), None) => finding.with_identifier(id),
                    (None, Some(pkg)) => finding.with_message(format!("in {pkg}")),
                    (None, None) => finding,
                };
                report.record(&finding);
            }
        }
        report
    }
}

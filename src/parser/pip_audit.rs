//! Dependency-audit (pip-audit) report parser.

use super::{ReportParser, SourceDocument};
use crate::model::{Finding, ToolReport};
use crate::severity::{normalize, ToolFamily};
use serde::Deserialize;
use tracing::warn;

/// Parses `pip-audit-report.json`.
///
/// The report is known to appear in two synonymous wire shapes: a flat list
/// of packages (older output) or an object wrapping the same list under
/// `dependencies`. Both are adapted into one internal representation before
/// counting proceeds, so they yield identical results.
pub struct PipAuditParser;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AuditReport {
    Wrapped { dependencies: Vec<Dependency> },
    Flat(Vec<Dependency>),
}

impl AuditReport {
    fn into_dependencies(self) -> Vec<Dependency> {
        match self {
            AuditReport::Wrapped { dependencies } => dependencies,
            AuditReport::Flat(dependencies) => dependencies,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Dependency {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "vulnerabilities")]
    vulns: Vec<Vulnerability>,
}

#[derive(Debug, Deserialize)]
struct Vulnerability {
    #[serde(default)]
    id: Option<String>,
    /// Absent severity is a valid state; it defaults to MEDIUM downstream.
    #[serde(default)]
    severity: Option<String>,
    #[serde(default)]
    advisory: Option<String>,
}

impl PipAuditParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PipAuditParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportParser for PipAuditParser {
    fn family(&self) -> ToolFamily {
        ToolFamily::PipAudit
    }

    fn parse(&self, document: &SourceDocument) -> ToolReport {
        let mut report = ToolReport::new();
        let SourceDocument::Json(value) = document else {
            return report;
        };
        let audit = match AuditReport::deserialize(value) {
            Ok(audit) => audit,
            Err(e) => {
                warn!("pip-audit report has an unexpected shape, treating as empty: {e}");
                return report;
            }
        };

        for dependency in audit.into_dependencies() {
            for vuln in dependency.vulns {
                let raw = vuln.severity.as_deref().unwrap_or_default();
                let mut finding = Finding::new(self.family(), normalize(self.family(), raw))
                    .with_identifier(vuln.id.as_deref().unwrap_or("VULN"));
                match (vuln.advisory.as_deref(), dependency.name.as_deref()) {
                    (Some(advisory), _) => finding = finding.with_message(advisory.trim()),
                    (None, Some(name)) => finding = finding.with_message(format!("in {name}")),
                    (None, None) => {}
                }
                report.record(&finding);
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn parse(value: Value) -> ToolReport {
        PipAuditParser::new().parse(&SourceDocument::Json(value))
    }

    #[test]
    fn test_flat_shape() {
        let report = parse(json!([
            {"name": "requests", "vulns": [
                {"id": "PYSEC-2024-1", "severity": "HIGH", "advisory": "header smuggling"}
            ]},
            {"name": "urllib3", "vulns": []}
        ]));
        assert_eq!(report.counts.high, 1);
        assert_eq!(report.highlights, vec!["[pip-audit] PYSEC-2024-1: header smuggling"]);
    }

    #[test]
    fn test_wrapped_shape_yields_identical_counts() {
        let vulns = json!([
            {"id": "PYSEC-2024-1", "severity": "CRITICAL"},
            {"id": "PYSEC-2024-2", "severity": "LOW"}
        ]);
        let flat = parse(json!([{"name": "flask", "vulns": vulns.clone()}]));
        let wrapped = parse(json!({"dependencies": [{"name": "flask", "vulns": vulns}]}));
        assert_eq!(flat.counts, wrapped.counts);
        assert_eq!(flat.highlights, wrapped.highlights);
    }

    #[test]
    fn test_vulnerabilities_key_is_a_synonym_for_vulns() {
        let report = parse(json!({
            "dependencies": [
                {"name": "django", "vulnerabilities": [{"id": "CVE-2024-1", "severity": "HIGH"}]}
            ]
        }));
        assert_eq!(report.counts.high, 1);
    }

    #[test]
    fn test_absent_severity_defaults_to_medium() {
        let report = parse(json!([{"name": "jinja2", "vulns": [{"id": "PYSEC-2024-9"}]}]));
        assert_eq!(report.counts.medium, 1);
    }

    #[test]
    fn test_unrecognized_severity_defaults_to_medium() {
        let report = parse(json!([{"vulns": [{"severity": "MODERATE"}]}]));
        assert_eq!(report.counts.medium, 1);
    }

    #[test]
    fn test_unexpected_shape_is_empty_not_fatal() {
        let report = parse(json!({"totally": "different"}));
        assert!(report.counts.is_empty());
    }
}

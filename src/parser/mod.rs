//! Per-tool report parsers.
//!
//! Each parser turns one scanner family's native document shape into a
//! [`ToolReport`]. Absent documents are a legitimate "no data" state, and
//! malformed documents never abort a run: offending records are skipped
//! with a warning and everything else still counts.

pub mod bandit;
pub mod pip_audit;
pub mod semgrep;
pub mod trivy;
pub mod zap;

use crate::model::ToolReport;
use crate::severity::ToolFamily;

pub use bandit::BanditParser;
pub use pip_audit::PipAuditParser;
pub use semgrep::SemgrepParser;
pub use trivy::TrivyParser;
pub use zap::ZapParser;

/// A source report in whichever form it arrived.
///
/// Shape differences between families (structured JSON vs. the dynamic
/// scanner's raw text) are made explicit here instead of sniffed downstream.
#[derive(Debug, Clone)]
pub enum SourceDocument {
    /// The artifact was never produced. Not an error.
    Missing,
    /// A parsed JSON report.
    Json(serde_json::Value),
    /// An unstructured text report (dynamic scan).
    Text(String),
}

impl SourceDocument {
    pub fn is_missing(&self) -> bool {
        matches!(self, SourceDocument::Missing)
    }
}

/// Capability shared by all tool parsers: produce zero or more findings
/// from a tool-specific document that may be absent or malformed.
pub trait ReportParser {
    fn family(&self) -> ToolFamily;

    /// Never fails; degraded inputs yield a (possibly empty) report.
    fn parse(&self, document: &SourceDocument) -> ToolReport;
}

/// Dispatch to the parser for a family.
pub fn parse_report(family: ToolFamily, document: &SourceDocument) -> ToolReport {
    match family {
        ToolFamily::Bandit => BanditParser::new().parse(document),
        ToolFamily::Semgrep => SemgrepParser::new().parse(document),
        ToolFamily::PipAudit => PipAuditParser::new().parse(document),
        ToolFamily::Trivy => TrivyParser::new().parse(document),
        ToolFamily::Zap => ZapParser::new().parse(document),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_document_yields_empty_report_for_every_family() {
        for family in ToolFamily::ALL {
            let report = parse_report(family, &SourceDocument::Missing);
            assert!(report.counts.is_empty(), "{family} should be empty");
            assert!(report.highlights.is_empty());
        }
    }

    #[test]
    fn test_wrong_document_kind_yields_empty_report() {
        // Text handed to a JSON parser and vice versa is degraded, not fatal.
        let report = parse_report(
            ToolFamily::Bandit,
            &SourceDocument::Text("not json".to_string()),
        );
        assert!(report.counts.is_empty());

        let report = parse_report(ToolFamily::Zap, &SourceDocument::Json(serde_json::json!({})));
        assert!(report.counts.is_empty());
    }
}

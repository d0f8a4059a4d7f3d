//! Static-analysis (Bandit) report parser.

use super::{ReportParser, SourceDocument};
use crate::model::{Finding, ToolReport};
use crate::severity::{normalize, ToolFamily};
use serde_json::Value;
use tracing::warn;

/// Parses `bandit-report.json`: `{"results": [{"issue_severity", "test_id",
/// "issue_text"}]}` with severity tokens LOW/MEDIUM/HIGH.
pub struct BanditParser;

impl BanditParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BanditParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportParser for BanditParser {
    fn family(&self) -> ToolFamily {
        ToolFamily::Bandit
    }

    fn parse(&self, document: &SourceDocument) -> ToolReport {
        let mut report = ToolReport::new();
        let SourceDocument::Json(value) = document else {
            return report;
        };
        let Some(results) = value.get("results").and_then(Value::as_array) else {
            warn!("bandit report has no results array, treating as empty");
            return report;
        };

        for item in results {
            let Some(item) = item.as_object() else {
                warn!("skipping non-object bandit result entry");
                continue;
            };
            let raw = item
                .get("issue_severity")
                .and_then(Value::as_str)
                .unwrap_or_default();
            let mut finding = Finding::new(self.family(), normalize(self.family(), raw));
            if let Some(id) = item.get("test_id").and_then(Value::as_str) {
                finding = finding.with_identifier(id);
            }
            if let Some(text) = item.get("issue_text").and_then(Value::as_str) {
                finding = finding.with_message(text.trim());
            }
            report.record(&finding);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;
    use serde_json::json;

    fn parse(value: Value) -> ToolReport {
        BanditParser::new().parse(&SourceDocument::Json(value))
    }

    #[test]
    fn test_counts_by_severity() {
        let report = parse(json!({
            "results": [
                {"issue_severity": "HIGH", "test_id": "B605", "issue_text": "shell injection"},
                {"issue_severity": "MEDIUM", "test_id": "B108", "issue_text": "temp file"},
                {"issue_severity": "LOW", "test_id": "B101", "issue_text": "assert used"},
                {"issue_severity": "LOW", "test_id": "B311", "issue_text": "weak random"}
            ]
        }));
        assert_eq!(report.counts.high, 1);
        assert_eq!(report.counts.medium, 1);
        assert_eq!(report.counts.low, 2);
        assert_eq!(report.counts.critical, 0);
    }

    #[test]
    fn test_high_findings_become_highlights() {
        let report = parse(json!({
            "results": [
                {"issue_severity": "HIGH", "test_id": "B605", "issue_text": " shell injection "}
            ]
        }));
        assert_eq!(report.highlights, vec!["[Bandit] B605: shell injection"]);
    }

    #[test]
    fn test_missing_severity_falls_through_to_default() {
        let report = parse(json!({"results": [{"test_id": "B999"}]}));
        assert_eq!(report.counts.medium, 1);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let report = parse(json!({
            "results": [
                "just a string",
                42,
                {"issue_severity": "HIGH", "test_id": "B605"}
            ]
        }));
        assert_eq!(report.counts.total(), 1);
    }

    #[test]
    fn test_document_without_results_is_empty() {
        let report = parse(json!({"errors": []}));
        assert!(report.counts.is_empty());
    }

    #[test]
    fn test_severity_is_accepted_lowercase() {
        let report = parse(json!({"results": [{"issue_severity": "high"}]}));
        assert_eq!(report.counts.get(Severity::High), 1);
    }
}

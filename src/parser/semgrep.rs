//! Code-pattern-scan (Semgrep) report parser.

use super::{ReportParser, SourceDocument};
use crate::model::{Finding, ToolReport};
use crate::severity::{normalize, ToolFamily};
use serde_json::Value;
use tracing::warn;

/// Parses `semgrep-report.json`. The severity token lives under
/// `results[].extra.severity` in current output, with `results[].severity`
/// as the older top-level synonym; both are accepted.
pub struct SemgrepParser;

impl SemgrepParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SemgrepParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportParser for SemgrepParser {
    fn family(&self) -> ToolFamily {
        ToolFamily::Semgrep
    }

    fn parse(&self, document: &SourceDocument) -> ToolReport {
        let mut report = ToolReport::new();
        let SourceDocument::Json(value) = document else {
            return report;
        };
        let Some(results) = value.get("results").and_then(Value::as_array) else {
            warn!("semgrep report has no results array, treating as empty");
            return report;
        };

        for item in results {
            let Some(item) = item.as_object() else {
                warn!("skipping non-object semgrep result entry");
                continue;
            };
            let extra = item.get("extra").and_then(Value::as_object);
            let raw = extra
                .and_then(|e| e.get("severity"))
                .or_else(|| item.get("severity"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            let mut finding = Finding::new(self.family(), normalize(self.family(), raw));
            if let Some(id) = item.get("check_id").and_then(Value::as_str) {
                finding = finding.with_identifier(id);
            }
            if let Some(msg) = extra.and_then(|e| e.get("message")).and_then(Value::as_str) {
                finding = finding.with_message(msg.trim());
            }
            report.record(&finding);
        }
        report
    }
}

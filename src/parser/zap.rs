//! Dynamic-scan (ZAP) artifact parser.
//!
//! The dynamic scanner emits an HTML report; this is deliberately NOT parsed
//! as HTML. The contract is a coarse phrase-count heuristic: each
//! case-insensitive `Risk Level: <level>` occurrence counts as one finding
//! at that level.

use super::{ReportParser, SourceDocument};
use crate::model::ToolReport;
use crate::severity::{normalize, ToolFamily};
use regex::Regex;
use tracing::warn;

const RISK_PHRASES: [(&str, &str); 3] = [
    (r"(?i)RISK LEVEL:\s*HIGH", "HIGH"),
    (r"(?i)RISK LEVEL:\s*MEDIUM", "MEDIUM"),
    (r"(?i)RISK LEVEL:\s*LOW", "LOW"),
];

pub struct ZapParser;

impl ZapParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ZapParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportParser for ZapParser {
    fn family(&self) -> ToolFamily {
        ToolFamily::Zap
    }

    fn parse(&self, document: &SourceDocument) -> ToolReport {
        let mut report = ToolReport::new();
        let SourceDocument::Text(content) = document else {
            return report;
        };

        for (pattern, token) in RISK_PHRASES {
            let regex = match Regex::new(pattern) {
                Ok(regex) => regex,
                Err(e) => {
                    warn!("invalid risk phrase pattern: {e}");
                    continue;
                }
            };
            let occurrences = regex.find_iter(content).count() as u32;
            report
                .counts
                .add(normalize(self.family(), token), occurrences);
        }
        report
    }
}

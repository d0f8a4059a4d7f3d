use crate::severity::{Severity, ToolFamily};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of highlight strings a single tool report carries.
pub const MAX_HIGHLIGHTS: usize = 50;

/// Count of findings per canonical severity bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityCounts {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub info: u32,
}

impl SeverityCounts {
    pub fn get(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Info => self.info,
        }
    }

    pub fn add(&mut self, severity: Severity, n: u32) {
        let bucket = match severity {
            Severity::Critical => &mut self.critical,
            Severity::High => &mut self.high,
            Severity::Medium => &mut self.medium,
            Severity::Low => &mut self.low,
            Severity::Info => &mut self.info,
        };
        *bucket = bucket.saturating_add(n);
    }

    pub fn bump(&mut self, severity: Severity) {
        self.add(severity, 1);
    }

    pub fn merge(&mut self, other: &SeverityCounts) {
        for severity in Severity::ALL {
            self.add(severity, other.get(severity));
        }
    }

    pub fn total(&self) -> u32 {
        Severity::ALL
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(self.get(*s)))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// One normalized reported issue. Ephemeral: produced and consumed within a
/// single aggregation run, never persisted individually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub tool: ToolFamily,
    pub severity: Severity,
    pub identifier: Option<String>,
    pub message: Option<String>,
}

impl Finding {
    pub fn new(tool: ToolFamily, severity: Severity) -> Self {
        Self {
            tool,
            severity,
            identifier: None,
            message: None,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Human-readable one-liner for downstream reporting collaborators.
    pub fn highlight(&self) -> String {
        let tag = self.tool.display_name();
        match (self.identifier.as_deref(), self.message.as_deref()) {
            (Some(id), Some(msg)) => format!("[{}] {}: {}", tag, id, msg),
            (Some(id), None) => format!("[{}] {}", tag, id),
            (None, Some(msg)) => format!("[{}] {}", tag, msg),
            (None, None) => format!("[{}] finding", tag),
        }
    }
}

/// What a single tool parser produces: counts by canonical severity plus a
/// bounded list of high-risk highlight strings, in document order.
#[derive(Debug, Clone, Default)]
pub struct ToolReport {
    pub counts: SeverityCounts,
    pub highlights: Vec<String>,
    /// Tally of raw (pre-normalization) severity labels, uppercased. Used
    /// for the container-scan "mostly Medium" hint on the top offender.
    pub raw_severity_tally: BTreeMap<String, usize>,
}

impl ToolReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a finding and, when it is CRITICAL/HIGH, keep its highlight.
    pub fn record(&mut self, finding: &Finding) {
        self.counts.bump(finding.severity);
        if finding.severity.is_actionable() {
            self.push_highlight(finding.highlight());
        }
    }

    pub fn push_highlight(&mut self, highlight: String) {
        if self.highlights.len() < MAX_HIGHLIGHTS {
            self.highlights.push(highlight);
        }
    }

    pub fn tally_raw_severity(&mut self, raw: &str) {
        let label = raw.trim().to_ascii_uppercase();
        if !label.is_empty() {
            *self.raw_severity_tally.entry(label).or_default() += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.counts.total()
    }
}

//! Merges per-tool reports into totals and the per-tool breakdown.

use crate::model::{SeverityCounts, ToolReport, MAX_HIGHLIGHTS};
use crate::severity::ToolFamily;
use std::collections::BTreeMap;

/// The tool that contributed the most findings, for notification purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopOffender {
    pub tool: ToolFamily,
    pub findings: u32,
    /// Most frequent raw severity label among that tool's findings, when
    /// available (container scans only), e.g. `Medium`.
    pub severity_hint: Option<String>,
}

/// Result of merging every tool's report.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    pub totals: SeverityCounts,
    /// Always contains every known tool family, zero-filled when its source
    /// report was absent. Absence is "no data", not an error.
    pub by_tool: BTreeMap<ToolFamily, SeverityCounts>,
    /// High-risk highlights merged in declared family order, bounded.
    pub highlights: Vec<String>,
    pub top_offender: Option<TopOffender>,
}

/// Sum every tool's buckets into totals, zero-fill absent families, merge
/// highlights, and pick the top offender (ties broken by the declared
/// family order).
pub fn aggregate(reports: &[(ToolFamily, ToolReport)]) -> Aggregate {
    let mut by_tool: BTreeMap<ToolFamily, SeverityCounts> = ToolFamily::ALL
        .iter()
        .map(|family| (*family, SeverityCounts::default()))
        .collect();
    let mut totals = SeverityCounts::default();
    let mut highlights = Vec::new();
    let mut top: Option<(ToolFamily, u32)> = None;

    for family in ToolFamily::ALL {
        let Some((_, report)) = reports.iter().find(|(f, _)| *f == family) else {
            continue;
        };
        totals.merge(&report.counts);
        by_tool.insert(family, report.counts);

        for highlight in &report.highlights {
            if highlights.len() >= MAX_HIGHLIGHTS {
                break;
            }
            highlights.push(highlight.clone());
        }

        let count = report.total();
        if count > 0 && top.is_none_or(|(_, best)| count > best) {
            top = Some((family, count));
        }
    }

    let top_offender = top.map(|(tool, findings)| TopOffender {
        tool,
        findings,
        severity_hint: match tool {
            ToolFamily::Trivy => reports
                .iter()
                .find(|(f, _)| *f == tool)
                .and_then(|(_, report)| most_frequent_label(report)),
            _ => None,
        },
    });

    Aggregate {
        totals,
        by_tool,
        highlights,
        top_offender,
    }
}

/// Most frequent raw severity label, title-cased. Ties resolve to the
/// alphabetically first label for determinism.
fn most_frequent_label(report: &ToolReport) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for (label, count) in &report.raw_severity_tally {
        if best.is_none_or(|(_, n)| *count > n) {
            best = Some((label.as_str(), *count));
        }
    }
    best.map(|(label, _)| title_case(label))
}

fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

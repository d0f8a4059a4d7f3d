//! Single-run pipeline: load prior document, parse all tool reports,
//! aggregate, score, append history, write.

use crate::aggregator::{aggregate, TopOffender};
use crate::error::Result;
use crate::history::{HistoryEntry, ScoreHistory};
use crate::insights::InsightsDocument;
use crate::model::ToolReport;
use crate::parser::{parse_report, SourceDocument};
use crate::scoring::PostureScore;
use crate::severity::ToolFamily;
use chrono::Utc;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Locations of the five source artifacts for one run.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub bandit: PathBuf,
    pub semgrep: PathBuf,
    pub pip_audit: PathBuf,
    pub trivy: PathBuf,
    pub zap: PathBuf,
}

impl ReportPaths {
    /// Conventional artifact names under a single root directory.
    pub fn from_root(root: &Path) -> Self {
        Self {
            bandit: root.join("bandit-report.json"),
            semgrep: root.join("semgrep-report.json"),
            pip_audit: root.join("pip-audit-report.json"),
            trivy: root.join("trivy-report.json"),
            zap: root.join("report_html.html"),
        }
    }

    fn for_family(&self, family: ToolFamily) -> &Path {
        match family {
            ToolFamily::Bandit => &self.bandit,
            ToolFamily::Semgrep => &self.semgrep,
            ToolFamily::PipAudit => &self.pip_audit,
            ToolFamily::Trivy => &self.trivy,
            ToolFamily::Zap => &self.zap,
        }
    }
}

/// What one run produced: the persisted document plus run-scoped extras
/// (delta and top offender) for notification output.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub document: InsightsDocument,
    /// Score movement versus the previous run. Informational only.
    pub delta: i64,
    pub top_offender: Option<TopOffender>,
}

fn load_json_document(path: &Path) -> SourceDocument {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("report not present: {}", path.display());
            return SourceDocument::Missing;
        }
        Err(e) => {
            warn!("could not read report {}: {e}", path.display());
            return SourceDocument::Missing;
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => SourceDocument::Json(value),
        Err(e) => {
            warn!("report {} is not valid JSON, skipping: {e}", path.display());
            SourceDocument::Missing
        }
    }
}

fn load_text_document(path: &Path) -> SourceDocument {
    match fs::read_to_string(path) {
        Ok(text) => SourceDocument::Text(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("report not present: {}", path.display());
            SourceDocument::Missing
        }
        Err(e) => {
            warn!("could not read report {}: {e}", path.display());
            SourceDocument::Missing
        }
    }
}

fn load_document(family: ToolFamily, path: &Path) -> SourceDocument {
    match family {
        ToolFamily::Zap => load_text_document(path),
        _ => load_json_document(path),
    }
}

/// Execute one aggregation run and persist the insights document at
/// `output`. Every degraded input recovers to a safe default; the final
/// write is the only failure that propagates.
pub fn run(paths: &ReportPaths, output: &Path) -> Result<RunOutcome> {
    let mut history = InsightsDocument::load(output)
        .map(|prior| prior.history)
        .unwrap_or_else(ScoreHistory::new);

    let documents: Vec<(ToolFamily, SourceDocument)> = ToolFamily::ALL
        .iter()
        .map(|family| (*family, load_document(*family, paths.for_family(*family))))
        .collect();

    // Parsers are pure functions over disjoint documents; the fan-out joins
    // before aggregation. Sequential execution would be equally correct.
    let reports: Vec<(ToolFamily, ToolReport)> = documents
        .par_iter()
        .map(|(family, document)| (*family, parse_report(*family, document)))
        .collect();

    for (family, report) in &reports {
        debug!(
            "{family}: {} finding(s), {} highlight(s)",
            report.total(),
            report.highlights.len()
        );
    }

    let merged = aggregate(&reports);
    let posture = PostureScore::from_totals(&merged.totals);
    history.push(HistoryEntry::new(Utc::now().to_rfc3339(), posture.score));
    let delta = history.delta();

    let document = InsightsDocument {
        version: env!("CARGO_PKG_VERSION").to_string(),
        generated: Utc::now().to_rfc3339(),
        counts: merged.totals,
        score: posture.score,
        grade: posture.grade,
        by_tool: merged.by_tool,
        highlights: merged.highlights,
        history,
    };
    document.save(output)?;

    Ok(RunOutcome {
        document,
        delta,
        top_offender: merged.top_offender,
    })
}

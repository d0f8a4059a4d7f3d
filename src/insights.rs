//! The persisted insights document: the sole interface to downstream
//! notifiers and dashboards, and the only state this crate keeps between
//! runs.

use crate::error::{InsightsError, Result};
use crate::history::ScoreHistory;
use crate::model::SeverityCounts;
use crate::scoring::Grade;
use crate::severity::ToolFamily;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Rolling summary artifact. Read once at run start (to recover prior
/// history), atomically rewritten once at run end. Concurrent runs are not
/// supported and must be serialized by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InsightsDocument {
    /// Version of the writing tool, for forward-compatibility triage.
    pub version: String,
    /// Generation timestamp, RFC 3339 UTC.
    pub generated: String,
    /// Severity totals across all tools.
    pub counts: SeverityCounts,
    pub score: u32,
    pub grade: Grade,
    /// Per-tool breakdown; every known family is always present.
    pub by_tool: BTreeMap<ToolFamily, SeverityCounts>,
    /// High/critical highlight strings for reporting collaborators.
    pub highlights: Vec<String>,
    /// Trailing window of past scores, oldest first, at most 30 entries.
    pub history: ScoreHistory,
}

impl InsightsDocument {
    /// Load the prior document. Absent, unreadable, or corrupt files all
    /// degrade to `None` (a fresh history) with at most a warning; a run
    /// must never fail because the previous one left bad state behind.
    pub fn load(path: &Path) -> Option<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no prior insights document at {}", path.display());
                return None;
            }
            Err(e) => {
                warn!(
                    "could not read prior insights document {}: {e}",
                    path.display()
                );
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(document) => Some(document),
            Err(e) => {
                warn!(
                    "prior insights document {} is corrupt, starting fresh: {e}",
                    path.display()
                );
                None
            }
        }
    }

    /// Persist the document: write a sibling temp file, then rename over
    /// the target so readers never observe a half-written artifact. This is
    /// the only failure in the pipeline that propagates to the caller.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, format!("{json}\n")).map_err(|e| InsightsError::WriteError {
            path: tmp.display().to_string(),
            source: e,
        })?;
        fs::rename(&tmp, path).map_err(|e| InsightsError::WriteError {
            path: path.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryEntry;

    fn sample() -> InsightsDocument {
        let mut history = ScoreHistory::new();
        history.push(HistoryEntry::new("2026-08-25T00:00:00Z", 92));
        InsightsDocument {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated: "2026-08-25T00:00:00Z".to_string(),
            counts: SeverityCounts {
                medium: 2,
                low: 2,
                ..Default::default()
            },
            score: 92,
            grade: Grade::Excellent,
            by_tool: ToolFamily::ALL
                .iter()
                .map(|f| (*f, SeverityCounts::default()))
                .collect(),
            highlights: Vec::new(),
            history,
        }
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("insights.json");
        sample().save(&path).unwrap();

        let loaded = InsightsDocument::load(&path).unwrap();
        assert_eq!(loaded.score, 92);
        assert_eq!(loaded.grade, Grade::Excellent);
        assert_eq!(loaded.history.len(), 1);
        assert_eq!(loaded.by_tool.len(), 5);
        // No temp file left behind.
        assert!(!dir.path().join("insights.json.tmp").exists());
    }

    #[test]
    fn test_load_missing_is_none() {
        assert!(InsightsDocument::load(Path::new("/nonexistent/insights.json")).is_none());
    }

    #[test]
    fn test_load_corrupt_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("insights.json");
        fs::write(&path, "{ definitely not json").unwrap();
        assert!(InsightsDocument::load(&path).is_none());
    }

    #[test]
    fn test_load_tolerates_missing_fields() {
        // A document written by an older version or edited by hand.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("insights.json");
        fs::write(&path, r#"{"score": 70, "history": [{"ts": "t", "score": 70}]}"#).unwrap();
        let loaded = InsightsDocument::load(&path).unwrap();
        assert_eq!(loaded.score, 70);
        assert_eq!(loaded.history.len(), 1);
        assert!(loaded.counts.is_empty());
    }

    #[test]
    fn test_save_to_unwritable_location_fails() {
        let err = sample()
            .save(Path::new("/nonexistent/dir/insights.json"))
            .unwrap_err();
        assert!(matches!(err, InsightsError::WriteError { .. }));
    }

    #[test]
    fn test_serialized_field_names_are_stable() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("generated").is_some());
        assert!(json.get("counts").is_some());
        assert!(json.get("score").is_some());
        assert!(json.get("grade").is_some());
        assert!(json.get("by_tool").is_some());
        assert!(json.get("history").is_some());
        assert_eq!(json["by_tool"]["pip_audit"]["critical"], 0);
        assert_eq!(json["grade"], "Excellent");
    }
}

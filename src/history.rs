use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of trailing score entries kept for trend reporting.
pub const HISTORY_CAPACITY: usize = 30;

/// One past run: timestamp (RFC 3339 UTC) plus the score it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub ts: String,
    pub score: u32,
}

impl HistoryEntry {
    pub fn new(ts: impl Into<String>, score: u32) -> Self {
        Self {
            ts: ts.into(),
            score,
        }
    }
}

/// Bounded rolling window of past scores, oldest first.
///
/// The capacity invariant is enforced by the type itself: `push` evicts
/// oldest-first once the window exceeds [`HISTORY_CAPACITY`], and
/// deserializing an over-long document goes through the same path, so the
/// bound holds from the moment a prior document is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<HistoryEntry>", into = "Vec<HistoryEntry>")]
pub struct ScoreHistory(VecDeque<HistoryEntry>);

impl ScoreHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry, dropping from the front past capacity.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.0.push_back(entry);
        while self.0.len() > HISTORY_CAPACITY {
            self.0.pop_front();
        }
    }

    /// Score movement versus the previous run. Zero when fewer than two
    /// entries exist. Informational only; never gates any behavior.
    pub fn delta(&self) -> i64 {
        if self.0.len() < 2 {
            return 0;
        }
        let last = &self.0[self.0.len() - 1];
        let prev = &self.0[self.0.len() - 2];
        i64::from(last.score) - i64::from(prev.score)
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.0.back()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.0.iter()
    }
}

impl From<Vec<HistoryEntry>> for ScoreHistory {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        let mut history = ScoreHistory::default();
        for entry in entries {
            history.push(entry);
        }
        history
    }
}

impl From<ScoreHistory> for Vec<HistoryEntry> {
    fn from(history: ScoreHistory) -> Self {
        history.0.into_iter().collect()
    }
}

use crate::model::SeverityCounts;
use serde::{Deserialize, Serialize};

/// Posture score configuration: weighted penalty per finding, higher score
/// is better. INFO findings carry no penalty.
pub const CRITICAL_WEIGHT: u32 = 15;
pub const HIGH_WEIGHT: u32 = 10;
pub const MEDIUM_WEIGHT: u32 = 3;
pub const LOW_WEIGHT: u32 = 1;
const BASE_SCORE: u32 = 100;

/// Qualitative grade derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Grade {
    #[default]
    Excellent,
    Good,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    Poor,
}

impl Grade {
    /// Thresholds evaluated high-to-low, first match wins.
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Grade::Excellent,
            75..=89 => Grade::Good,
            50..=74 => Grade::NeedsAttention,
            _ => Grade::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::Good => "Good",
            Grade::NeedsAttention => "Needs Attention",
            Grade::Poor => "Poor",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weighted 0-100 posture score plus its grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostureScore {
    pub score: u32,
    pub grade: Grade,
}

impl PostureScore {
    /// Pure and history-independent: `max(0, 100 - penalty)` where the
    /// penalty is 15/10/3/1 per critical/high/medium/low finding.
    pub fn from_totals(totals: &SeverityCounts) -> Self {
        let penalty = totals
            .critical
            .saturating_mul(CRITICAL_WEIGHT)
            .saturating_add(totals.high.saturating_mul(HIGH_WEIGHT))
            .saturating_add(totals.medium.saturating_mul(MEDIUM_WEIGHT))
            .saturating_add(totals.low.saturating_mul(LOW_WEIGHT));
        let score = BASE_SCORE.saturating_sub(penalty);
        Self {
            score,
            grade: Grade::from_score(score),
        }
    }
}

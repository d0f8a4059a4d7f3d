pub mod aggregator;
pub mod cli;
pub mod error;
pub mod history;
pub mod insights;
pub mod model;
pub mod parser;
pub mod reporter;
pub mod run;
pub mod scoring;
pub mod severity;

pub use aggregator::{aggregate, Aggregate, TopOffender};
pub use cli::{Cli, OutputFormat};
pub use error::{InsightsError, Result};
pub use history::{HistoryEntry, ScoreHistory, HISTORY_CAPACITY};
pub use insights::InsightsDocument;
pub use model::{Finding, SeverityCounts, ToolReport};
pub use parser::{parse_report, ReportParser, SourceDocument};
pub use reporter::{JsonReporter, Reporter, TerminalReporter};
pub use run::{ReportPaths, RunOutcome};
pub use scoring::{Grade, PostureScore};
pub use severity::{normalize, Severity, ToolFamily};

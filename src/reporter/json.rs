use crate::reporter::Reporter;
use crate::run::RunOutcome;

/// Emits the insights document itself, so scripted callers consume exactly
/// what was persisted.
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn report(&self, outcome: &RunOutcome) -> String {
        serde_json::to_string_pretty(&outcome.document)
            .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize document: {}"}}"#, e))
    }
}

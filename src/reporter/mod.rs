pub mod json;
pub mod terminal;

use crate::run::RunOutcome;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

pub trait Reporter {
    fn report(&self, outcome: &RunOutcome) -> String;
}

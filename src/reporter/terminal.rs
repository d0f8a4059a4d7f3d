use crate::reporter::Reporter;
use crate::run::RunOutcome;
use crate::scoring::Grade;
use crate::severity::Severity;
use colored::Colorize;

/// Number of highlight lines shown in the run summary; the full list lives
/// in the insights document.
const SHOWN_HIGHLIGHTS: usize = 5;

pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn grade_label(&self, grade: &Grade) -> colored::ColoredString {
        let label = grade.as_str();
        match grade {
            Grade::Excellent => label.green().bold(),
            Grade::Good => label.cyan(),
            Grade::NeedsAttention => label.yellow().bold(),
            Grade::Poor => label.red().bold(),
        }
    }

    fn delta_label(&self, delta: i64) -> String {
        match delta {
            d if d > 0 => format!("+{d}").green().to_string(),
            d if d < 0 => format!("{d}").red().to_string(),
            _ => "+0".dimmed().to_string(),
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, outcome: &RunOutcome) -> String {
        let doc = &outcome.document;
        let mut out = String::new();

        out.push_str(&format!("{}\n", "Security Posture".bold()));
        for (family, counts) in &doc.by_tool {
            out.push_str(&format!("  {:<10}", family.as_str()));
            for severity in Severity::ALL {
                out.push_str(&format!(" {}:{:<4}", severity.as_str(), counts.get(severity)));
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "\n  Totals: {} critical, {} high, {} medium, {} low, {} info\n",
            doc.counts.critical, doc.counts.high, doc.counts.medium, doc.counts.low, doc.counts.info
        ));
        out.push_str(&format!(
            "  Score: {}/100 ({})  delta {}\n",
            doc.score.to_string().bold(),
            self.grade_label(&doc.grade),
            self.delta_label(outcome.delta)
        ));

        if let Some(offender) = &outcome.top_offender {
            match &offender.severity_hint {
                Some(hint) => out.push_str(&format!(
                    "  Most findings: {} ({}, mostly {})\n",
                    offender.tool, offender.findings, hint
                )),
                None => out.push_str(&format!(
                    "  Most findings: {} ({})\n",
                    offender.tool, offender.findings
                )),
            }
        }

        if !doc.highlights.is_empty() {
            out.push_str(&format!("\n  {}\n", "High-risk highlights:".bold()));
            let shown = if self.verbose {
                doc.highlights.len()
            } else {
                SHOWN_HIGHLIGHTS.min(doc.highlights.len())
            };
            for highlight in &doc.highlights[..shown] {
                out.push_str(&format!("  - {highlight}\n"));
            }
            let remaining = doc.highlights.len() - shown;
            if remaining > 0 {
                out.push_str(&format!("  ... and {remaining} more\n"));
            }
        }

        out
    }
}

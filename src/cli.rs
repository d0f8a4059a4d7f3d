use crate::run::ReportPaths;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "sec-insights",
    version,
    about = "Aggregates security scanner reports into a posture score with trend history",
    long_about = "sec-insights ingests bandit, semgrep, pip-audit, trivy, and ZAP report \
                  artifacts, normalizes their severities into one taxonomy, and writes a \
                  rolling insights document with a 0-100 posture score. Absent reports count \
                  as zero findings; a run only fails when the document cannot be written."
)]
pub struct Cli {
    /// Directory containing the report artifacts
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Override the static-analysis report path
    #[arg(long, value_name = "PATH")]
    pub bandit: Option<PathBuf>,

    /// Override the code-pattern-scan report path
    #[arg(long, value_name = "PATH")]
    pub semgrep: Option<PathBuf>,

    /// Override the dependency-audit report path
    #[arg(long = "pip-audit", value_name = "PATH")]
    pub pip_audit: Option<PathBuf>,

    /// Override the container-scan report path
    #[arg(long, value_name = "PATH")]
    pub trivy: Option<PathBuf>,

    /// Override the dynamic-scan report path
    #[arg(long, value_name = "PATH")]
    pub zap: Option<PathBuf>,

    /// Insights document path (default: <ROOT>/insights.json)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Run summary format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn report_paths(&self) -> ReportPaths {
        let defaults = ReportPaths::from_root(&self.root);
        ReportPaths {
            bandit: self.bandit.clone().unwrap_or(defaults.bandit),
            semgrep: self.semgrep.clone().unwrap_or(defaults.semgrep),
            pip_audit: self.pip_audit.clone().unwrap_or(defaults.pip_audit),
            trivy: self.trivy.clone().unwrap_or(defaults.trivy),
            zap: self.zap.clone().unwrap_or(defaults.zap),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.root.join("insights.json"))
    }
}

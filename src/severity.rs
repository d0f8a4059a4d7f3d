use serde::{Deserialize, Serialize};

/// Canonical severity scale every tool-specific vocabulary is normalized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// All severities, highest first.
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Info => "info",
        }
    }

    pub fn is_actionable(&self) -> bool {
        matches!(self, Severity::Critical | Severity::High)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// One distinct scanner/source type. Declaration order is the fixed
/// priority order used for tie-breaking and stable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolFamily {
    Bandit,
    Semgrep,
    PipAudit,
    Trivy,
    Zap,
}

impl ToolFamily {
    pub const ALL: [ToolFamily; 5] = [
        ToolFamily::Bandit,
        ToolFamily::Semgrep,
        ToolFamily::PipAudit,
        ToolFamily::Trivy,
        ToolFamily::Zap,
    ];

    /// Wire name used as the key in the insights document.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolFamily::Bandit => "bandit",
            ToolFamily::Semgrep => "semgrep",
            ToolFamily::PipAudit => "pip_audit",
            ToolFamily::Trivy => "trivy",
            ToolFamily::Zap => "zap",
        }
    }

    /// Human-readable name used in highlight strings.
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolFamily::Bandit => "Bandit",
            ToolFamily::Semgrep => "Semgrep",
            ToolFamily::PipAudit => "pip-audit",
            ToolFamily::Trivy => "Trivy",
            ToolFamily::Zap => "ZAP",
        }
    }
}

impl std::fmt::Display for ToolFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a tool-specific severity token to the canonical scale.
///
/// Total over all inputs: unrecognized or empty tokens take the family
/// default instead of erroring, so malformed upstream data degrades
/// gracefully. The tables are per-family because scanners do not share a
/// severity vocabulary (Semgrep's ERROR is a HIGH, Trivy's UNKNOWN is an
/// INFO, a pip-audit vulnerability with no severity at all is a MEDIUM).
pub fn normalize(family: ToolFamily, raw: &str) -> Severity {
    let token = raw.trim().to_ascii_uppercase();
    match family {
        ToolFamily::Bandit | ToolFamily::Zap => match token.as_str() {
            "HIGH" => Severity::High,
            "MEDIUM" => Severity::Medium,
            "LOW" => Severity::Low,
            _ => Severity::Medium,
        },
        ToolFamily::Semgrep => match token.as_str() {
            "ERROR" => Severity::High,
            "WARNING" => Severity::Medium,
            "INFO" => Severity::Low,
            _ => Severity::Medium,
        },
        ToolFamily::PipAudit => match token.as_str() {
            "CRITICAL" => Severity::Critical,
            "HIGH" => Severity::High,
            "MEDIUM" => Severity::Medium,
            "LOW" => Severity::Low,
            _ => Severity::Medium,
        },
        ToolFamily::Trivy => match token.as_str() {
            "CRITICAL" => Severity::Critical,
            "HIGH" => Severity::High,
            "MEDIUM" => Severity::Medium,
            "LOW" => Severity::Low,
            // UNKNOWN and anything else
            _ => Severity::Info,
        },
    }
}

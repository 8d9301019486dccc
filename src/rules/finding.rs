use serde::{Deserialize, Serialize};

/// A concrete rule match: one rule firing in one file at one line.
///
/// Findings carry the severity copied from their rule at detection time and
/// reference the rule by id only, so they serialize independently of the
/// catalog. The JSON field names are the stable wire format consumed by
/// external renderers and bulk tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Unique rule identifier (e.g., "EXEC-001").
    pub rule_id: String,
    /// Severity level, copied from the rule.
    pub severity: Severity,
    /// Human-readable rule title.
    pub title: String,
    /// Machine description of what the rule detects.
    pub description: String,
    /// Rendered plain-English explanation for non-expert readers.
    pub plain_english: String,
    /// Path relative to the skill root.
    pub file: String,
    /// 1-based line number, if the finding points at a specific line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Trimmed matched line, truncated to 200 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_content: Option<String>,
    /// Suggested remediation.
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "info" => Some(Self::Info),
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "crit" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Three-tier classification derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rating {
    Green,
    Yellow,
    Red,
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Green => write!(f, "GREEN"),
            Self::Yellow => write!(f, "YELLOW"),
            Self::Red => write!(f, "RED"),
        }
    }
}

/// Result of scanning one skill directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillScanResult {
    pub skill_name: String,
    pub skill_path: String,
    /// Findings in discovery order (file then line), not severity order.
    pub findings: Vec<Finding>,
    pub score: u8,
    pub rating: Rating,
    pub scanned_files: usize,
    /// Scan duration in milliseconds.
    pub scan_duration: u64,
}

/// Result of scanning a whole setup: every skill under a skills root plus
/// configuration-level findings supplied by the config checker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupScanResult {
    pub overall_score: u8,
    pub overall_rating: Rating,
    pub skills: Vec<SkillScanResult>,
    pub config_findings: Vec<Finding>,
    pub total_findings: usize,
    pub scan_duration: u64,
    /// Descriptive only; never feeds back into the score.
    pub summary: String,
}

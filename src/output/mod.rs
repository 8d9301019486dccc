pub mod conversational;
pub mod json;
pub mod markdown;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rules::{SetupScanResult, SkillScanResult};

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Detailed,
    Conversational,
    Json,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "detailed" | "markdown" | "md" => Some(Self::Detailed),
            "conversational" | "chat" => Some(Self::Conversational),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Render a single-skill result. The conversational format only exists for
/// setup reports, so it falls back to the detailed report here.
pub fn render_skill(result: &SkillScanResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::render_skill(result),
        OutputFormat::Detailed | OutputFormat::Conversational => {
            Ok(markdown::format_skill_report(result))
        }
    }
}

/// Render a setup-level result in the requested format.
pub fn render_setup(result: &SetupScanResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::render_setup(result),
        OutputFormat::Detailed => Ok(markdown::format_setup_report(result)),
        OutputFormat::Conversational => Ok(conversational::format_conversational(result)),
    }
}

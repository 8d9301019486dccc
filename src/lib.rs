//! Skillscan: security scanner for AI-agent skill and MCP server packages.
//!
//! Walks a skill directory, matches file contents against a curated catalog
//! of regex rules grouped by security category, and reduces the findings to
//! a 0-100 risk score with a GREEN/YELLOW/RED rating. Detection is purely
//! lexical: fast, simple, and honest about accepting false positives and
//! false negatives in exchange.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use skillscan::scan;
//!
//! let result = scan(Path::new("./my-skill"));
//! println!("Score: {}/100 ({})", result.score, result.rating);
//! ```

pub mod checker;
pub mod config;
pub mod error;
pub mod output;
pub mod rules;
pub mod scanner;
pub mod scoring;

use std::path::Path;

pub use rules::{Finding, Rating, Severity, SetupScanResult, SkillScanResult};

/// Scan one skill directory. Infallible: a missing or unreadable directory
/// yields an empty, maximal-score result rather than an error.
pub fn scan(path: &Path) -> SkillScanResult {
    scanner::scan_skill(path)
}

/// Scan every skill under `skills_dir` (one immediate subdirectory each)
/// and fold in externally supplied configuration findings.
pub fn scan_setup(skills_dir: &Path, config_findings: Vec<Finding>) -> SetupScanResult {
    scanner::scan_setup(skills_dir, config_findings)
}

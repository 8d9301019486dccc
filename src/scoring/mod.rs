//! Score and rating computation.
//!
//! Two scales live here on purpose. Per-skill scoring applies diminishing
//! returns per rule (repeated findings of one rule usually reflect one
//! systemic habit, not N independent risks). Setup-level config findings use
//! a flat, harsher scale because they are rarer and each is independently
//! actionable. The two are not unified; unifying would silently change
//! scoring outcomes.

use std::collections::HashMap;

use crate::rules::{Finding, Rating, Severity, SkillScanResult};

/// Extra occurrences of the same rule counted beyond the first.
const MAX_EXTRA_OCCURRENCES: usize = 5;

/// Weight of each extra occurrence relative to the first.
const DIMINISHING_FACTOR: f64 = 0.3;

/// Per-skill deduction weight for one finding of the given severity.
pub fn severity_weight(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 25.0,
        Severity::High => 15.0,
        Severity::Medium => 8.0,
        Severity::Low => 3.0,
        Severity::Info => 0.0,
    }
}

/// Flat setup-level penalty for one configuration finding.
fn config_penalty(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 20.0,
        Severity::High => 10.0,
        Severity::Medium => 5.0,
        Severity::Low => 2.0,
        Severity::Info => 0.0,
    }
}

/// Reduce one skill's findings to a score in [0, 100].
///
/// Findings are grouped by rule id; each group deducts
/// `weight + min(count - 1, 5) * 0.3 * weight`. Grouping makes the result
/// independent of finding order.
pub fn compute_score(findings: &[Finding]) -> u8 {
    if findings.is_empty() {
        return 100;
    }

    let mut by_rule: HashMap<&str, (Severity, usize)> = HashMap::new();
    for finding in findings {
        let slot = by_rule
            .entry(finding.rule_id.as_str())
            .or_insert((finding.severity, 0));
        slot.1 += 1;
    }

    let total_deduction: f64 = by_rule
        .values()
        .map(|&(severity, count)| rule_deduction(severity, count))
        .sum();

    clamp_round(100.0 - total_deduction)
}

/// Deduction for one rule group: first occurrence at full weight, each
/// extra occurrence (capped at 5) at 30% of the weight.
pub fn rule_deduction(severity: Severity, count: usize) -> f64 {
    let weight = severity_weight(severity);
    let extra = count.saturating_sub(1).min(MAX_EXTRA_OCCURRENCES);
    weight + extra as f64 * (weight * DIMINISHING_FACTOR)
}

/// Fold per-skill scores and config findings into one setup-level score.
///
/// Base is the unrounded mean of skill scores (100 when there are no
/// skills); each config finding then subtracts its flat penalty.
pub fn compute_overall_score(skills: &[SkillScanResult], config_findings: &[Finding]) -> u8 {
    if skills.is_empty() && config_findings.is_empty() {
        return 100;
    }

    let mut score = 100.0;
    if !skills.is_empty() {
        score = skills.iter().map(|s| s.score as f64).sum::<f64>() / skills.len() as f64;
    }

    for finding in config_findings {
        score -= config_penalty(finding.severity);
    }

    clamp_round(score)
}

/// Map a score to its rating tier. Total and exhaustive over [0, 100].
pub fn score_to_rating(score: u8) -> Rating {
    if score >= 80 {
        Rating::Green
    } else if score >= 50 {
        Rating::Yellow
    } else {
        Rating::Red
    }
}

/// 20-slot text bar used by the markdown and conversational reports.
pub fn score_bar(score: u8) -> String {
    let filled = ((score as f64) / 5.0).round() as usize;
    let filled = filled.min(20);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(20 - filled))
}

fn clamp_round(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}

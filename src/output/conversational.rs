//! Conversational setup report, written for an agent to relay verbatim.

use crate::rules::{Rating, SetupScanResult, Severity, SkillScanResult};

pub fn format_conversational(result: &SetupScanResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    if result.total_findings == 0 {
        lines.push(
            "I scanned your entire setup and everything looks clean. No security issues found."
                .into(),
        );
        lines.push(String::new());
        lines.push(format!(
            "**Overall Score: {}/100** {}",
            result.overall_score, result.overall_rating
        ));
        return lines.join("\n");
    }

    let critical: usize = result
        .skills
        .iter()
        .flat_map(|s| &s.findings)
        .chain(&result.config_findings)
        .filter(|f| f.severity == Severity::Critical)
        .count();

    if critical > 0 {
        lines.push(format!(
            "I found **{} security issues** in your setup, including **{critical} critical** \
             ones that need immediate attention.",
            result.total_findings
        ));
    } else {
        lines.push(format!(
            "I found **{} security issues** in your setup. Nothing critical, but there are \
             things worth reviewing.",
            result.total_findings
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "**Overall Score: {}/100** {}",
        result.overall_score, result.overall_rating
    ));
    lines.push(String::new());

    let red_skills: Vec<&SkillScanResult> = result
        .skills
        .iter()
        .filter(|s| s.rating == Rating::Red)
        .collect();
    let yellow_skills: Vec<&SkillScanResult> = result
        .skills
        .iter()
        .filter(|s| s.rating == Rating::Yellow)
        .collect();
    let green_skills: Vec<&SkillScanResult> = result
        .skills
        .iter()
        .filter(|s| s.rating == Rating::Green)
        .collect();

    if !red_skills.is_empty() {
        lines.push("### Skills you should remove:".into());
        lines.push(String::new());
        for skill in &red_skills {
            let top = skill
                .findings
                .iter()
                .find(|f| f.severity == Severity::Critical)
                .or_else(|| skill.findings.first());
            let reason = top.map(|f| f.plain_english.as_str()).unwrap_or("");
            lines.push(format!(
                "- **{}** (Score: {}/100): {reason}",
                skill.skill_name, skill.score
            ));
        }
        lines.push(String::new());
    }

    if !yellow_skills.is_empty() {
        lines.push("### Skills to review:".into());
        lines.push(String::new());
        for skill in &yellow_skills {
            let reason = skill
                .findings
                .first()
                .map(|f| f.plain_english.as_str())
                .unwrap_or("");
            lines.push(format!(
                "- **{}** (Score: {}/100): {reason}",
                skill.skill_name, skill.score
            ));
        }
        lines.push(String::new());
    }

    if !green_skills.is_empty() {
        let names: Vec<&str> = green_skills.iter().map(|s| s.skill_name.as_str()).collect();
        lines.push(format!("### Clean skills: {}", names.join(", ")));
        lines.push(String::new());
    }

    if !result.config_findings.is_empty() {
        lines.push("### Configuration issues:".into());
        lines.push(String::new());
        for finding in &result.config_findings {
            lines.push(format!("- **{}**: {}", finding.title, finding.plain_english));
        }
        lines.push(String::new());
    }

    lines.push("### What to do next:".into());
    lines.push(String::new());
    let mut step = 1;
    if !red_skills.is_empty() {
        let names: Vec<&str> = red_skills.iter().map(|s| s.skill_name.as_str()).collect();
        lines.push(format!("{step}. **Remove these skills now**: {}", names.join(", ")));
        step += 1;
    }
    if !yellow_skills.is_empty() {
        let names: Vec<&str> = yellow_skills.iter().map(|s| s.skill_name.as_str()).collect();
        lines.push(format!(
            "{step}. **Review these skills**: {}. Check if you trust their authors.",
            names.join(", ")
        ));
        step += 1;
    }
    if !result.config_findings.is_empty() {
        lines.push(format!("{step}. **Fix configuration issues** listed above"));
    }

    lines.join("\n")
}

//! Detailed markdown reports for skill and setup scans.

use crate::rules::{Finding, Severity, SetupScanResult, SkillScanResult};
use crate::scoring::score_bar;

/// Full report for one skill: score header, findings grouped by severity,
/// action items.
pub fn format_skill_report(result: &SkillScanResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("## {}", result.skill_name));
    lines.push(String::new());
    lines.push(format!(
        "**Score: {}/100** {} {}",
        result.score,
        result.rating,
        score_bar(result.score)
    ));
    lines.push(format!(
        "Scanned {} files in {}ms",
        result.scanned_files, result.scan_duration
    ));
    lines.push(String::new());

    if result.findings.is_empty() {
        lines.push("No security issues found. This skill looks clean.".into());
        return lines.join("\n");
    }

    let groups = [
        (Severity::Critical, "CRITICAL"),
        (Severity::High, "HIGH"),
        (Severity::Medium, "MEDIUM"),
        (Severity::Low, "LOW"),
        (Severity::Info, "INFO"),
    ];

    let mut critical_count = 0;
    let mut high_count = 0;
    for (severity, heading) in groups {
        let group: Vec<&Finding> = result
            .findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect();
        if group.is_empty() {
            continue;
        }
        match severity {
            Severity::Critical => critical_count = group.len(),
            Severity::High => high_count = group.len(),
            _ => {}
        }
        lines.push(format!("### {} ({})", heading, group.len()));
        lines.push(String::new());
        for finding in group {
            lines.push(format_finding(finding));
        }
    }

    lines.push("### What to do".into());
    lines.push(String::new());
    if critical_count > 0 {
        lines.push(format!(
            "- **Remove immediately**: This skill has {} critical issue{}. Do not use it until \
             these are resolved.",
            critical_count,
            plural(critical_count)
        ));
    } else if high_count > 0 {
        lines.push(format!(
            "- **Review carefully**: This skill has {} high-severity issue{}. Only use it if \
             you trust the author.",
            high_count,
            plural(high_count)
        ));
    } else {
        lines.push("- **Proceed with caution**: Minor issues found. Review the details above.".into());
    }

    lines.join("\n")
}

/// Full setup report: overall header, config issues, per-skill table, then
/// detailed sections for skills with findings (worst first).
pub fn format_setup_report(result: &SetupScanResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Skillscan Security Report".into());
    lines.push(String::new());
    lines.push(format!(
        "**Overall Score: {}/100** {} {}",
        result.overall_score,
        result.overall_rating,
        score_bar(result.overall_score)
    ));
    lines.push(String::new());
    lines.push(result.summary.clone());
    lines.push(String::new());

    if !result.config_findings.is_empty() {
        lines.push("## Configuration Issues".into());
        lines.push(String::new());
        for finding in &result.config_findings {
            lines.push(format_finding(finding));
        }
    }

    if result.skills.is_empty() {
        lines.push("No skills found to scan.".into());
    } else {
        let mut sorted: Vec<&SkillScanResult> = result.skills.iter().collect();
        sorted.sort_by_key(|s| s.score);

        lines.push(format!("## Skills ({} scanned)", sorted.len()));
        lines.push(String::new());

        lines.push("| Skill | Score | Rating | Issues |".into());
        lines.push("|-------|-------|--------|--------|".into());
        for skill in &sorted {
            lines.push(format!(
                "| {} | {}/100 | {} | {} |",
                skill.skill_name,
                skill.score,
                skill.rating,
                skill.findings.len()
            ));
        }
        lines.push(String::new());

        let with_findings: Vec<&&SkillScanResult> =
            sorted.iter().filter(|s| !s.findings.is_empty()).collect();
        if !with_findings.is_empty() {
            lines.push("## Detailed Findings".into());
            lines.push(String::new());
            for skill in with_findings {
                lines.push(format_skill_report(skill));
                lines.push(String::new());
                lines.push("---".into());
                lines.push(String::new());
            }
        }
    }

    lines.push(String::new());
    lines.push("---".into());
    lines.push(format!(
        "*Scanned in {}ms by skillscan v{}*",
        result.scan_duration,
        env!("CARGO_PKG_VERSION")
    ));

    lines.join("\n")
}

pub(super) fn format_finding(finding: &Finding) -> String {
    let mut lines: Vec<String> = Vec::new();
    let location = match finding.line {
        Some(line) => format!("`{}`:{}", finding.file, line),
        None => format!("`{}`", finding.file),
    };
    lines.push(format!(
        "**{}** [{}]",
        finding.title,
        finding.severity.to_string().to_uppercase()
    ));
    lines.push(format!("File: {location}"));
    lines.push(String::new());
    lines.push(finding.plain_english.clone());
    lines.push(String::new());
    if let Some(matched) = &finding.matched_content {
        lines.push("```".into());
        lines.push(matched.clone());
        lines.push("```".into());
        lines.push(String::new());
    }
    lines.push(format!("**Fix:** {}", finding.recommendation));
    lines.push(String::new());
    lines.join("\n")
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Compact one-line rendering for log output and summaries.
pub fn format_finding_short(finding: &Finding) -> String {
    let location = match finding.line {
        Some(line) => format!("{}:{}", finding.file, line),
        None => finding.file.clone(),
    };
    format!(
        "[{}] {} in {}",
        finding.severity.to_string().to_uppercase(),
        finding.title,
        location
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rating;

    fn finding(severity: Severity) -> Finding {
        Finding {
            rule_id: "EXEC-001".into(),
            severity,
            title: "Dynamic code execution with eval()".into(),
            description: "d".into(),
            plain_english: "This skill can run arbitrary code.".into(),
            file: "index.js".into(),
            line: Some(4),
            matched_content: Some("eval(x)".into()),
            recommendation: "Remove this skill.".into(),
        }
    }

    fn skill_result(findings: Vec<Finding>, score: u8, rating: Rating) -> SkillScanResult {
        SkillScanResult {
            skill_name: "demo-skill".into(),
            skill_path: "/tmp/demo-skill".into(),
            findings,
            score,
            rating,
            scanned_files: 3,
            scan_duration: 12,
        }
    }

    #[test]
    fn clean_skill_report_is_short() {
        let report = format_skill_report(&skill_result(vec![], 100, Rating::Green));
        assert!(report.contains("**Score: 100/100** GREEN"));
        assert!(report.contains("No security issues found"));
        assert!(!report.contains("### What to do"));
    }

    #[test]
    fn critical_findings_produce_remove_advice() {
        let report =
            format_skill_report(&skill_result(vec![finding(Severity::Critical)], 75, Rating::Yellow));
        assert!(report.contains("### CRITICAL (1)"));
        assert!(report.contains("**Remove immediately**"));
        assert!(report.contains("`index.js`:4"));
        assert!(report.contains("```\neval(x)\n```"));
    }

    #[test]
    fn setup_report_sorts_skills_worst_first() {
        let result = SetupScanResult {
            overall_score: 88,
            overall_rating: Rating::Green,
            skills: vec![
                skill_result(vec![], 100, Rating::Green),
                skill_result(vec![finding(Severity::Critical)], 75, Rating::Yellow),
            ],
            config_findings: vec![],
            total_findings: 1,
            scan_duration: 20,
            summary: "Found 1 issue across 2 skills.".into(),
        };
        let report = format_setup_report(&result);
        let table_75 = report.find("| demo-skill | 75/100 |").unwrap();
        let table_100 = report.find("| demo-skill | 100/100 |").unwrap();
        assert!(table_75 < table_100);
        assert!(report.contains("## Detailed Findings"));
    }

    #[test]
    fn short_form_includes_severity_and_location() {
        let line = format_finding_short(&finding(Severity::High));
        assert_eq!(
            line,
            "[HIGH] Dynamic code execution with eval() in index.js:4"
        );
    }
}

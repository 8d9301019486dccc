//! The rule-matching pass: files × applicable rules × lines × patterns.

use std::collections::HashSet;

use crate::rules::{Finding, Rule};
use crate::scanner::walker::FileEntry;

/// Maximum length of the matched-content snippet attached to a finding.
const SNIPPET_LEN: usize = 200;

/// Run every applicable rule over every line of every file.
///
/// Patterns are evaluated in declaration order and a rule flags a line at
/// most once, even when several of its patterns match. The (ruleId, file,
/// line) triple is deduplicated, so the output never contains two findings
/// for the same rule on the same line. Findings come back in discovery
/// order: file, then line.
pub fn match_files(files: &[FileEntry], rules: &[Rule]) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut seen: HashSet<(&str, &str, usize)> = HashSet::new();

    for file in files {
        for rule in rules {
            if !rule.applies_to_file(&file.relative_path) {
                continue;
            }

            for (idx, line) in file.content.split('\n').enumerate() {
                let line_no = idx + 1;
                for pattern in &rule.patterns {
                    if !pattern.is_match(line) {
                        continue;
                    }
                    if seen.insert((rule.id, file.relative_path.as_str(), line_no)) {
                        let trimmed = line.trim();
                        findings.push(Finding {
                            rule_id: rule.id.to_string(),
                            severity: rule.severity,
                            title: rule.title.to_string(),
                            description: rule.description.to_string(),
                            plain_english: (rule.explain)(&file.relative_path, trimmed),
                            file: file.relative_path.clone(),
                            line: Some(line_no),
                            matched_content: Some(truncate(trimmed, SNIPPET_LEN)),
                            recommendation: rule.recommendation.to_string(),
                        });
                    }
                    // One finding per rule per line; stop at the first
                    // matching pattern.
                    break;
                }
            }
        }
    }

    findings
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{builtin, Severity};
    use regex::Regex;
    use std::path::PathBuf;

    fn entry(rel: &str, content: &str) -> FileEntry {
        FileEntry {
            path: PathBuf::from(rel),
            relative_path: rel.into(),
            content: content.into(),
            size: content.len() as u64,
        }
    }

    fn synthetic_rule(patterns: &[&str]) -> Rule {
        Rule {
            id: "TEST-001",
            severity: Severity::High,
            title: "Test rule",
            description: "test",
            applies_to: Regex::new(r"\.js$").unwrap(),
            patterns: patterns.iter().map(|p| Regex::new(p).unwrap()).collect(),
            explain: |file, matched| format!("{file}: {matched}"),
            recommendation: "fix it",
        }
    }

    #[test]
    fn one_finding_per_rule_per_line_even_with_multiple_matching_patterns() {
        let rules = vec![synthetic_rule(&["foo", "fo+"])];
        let files = vec![entry("a.js", "foo bar\nclean\n")];
        let findings = match_files(&files, &rules);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, Some(1));
    }

    #[test]
    fn separate_lines_yield_separate_findings() {
        let rules = vec![synthetic_rule(&["foo"])];
        let files = vec![entry("a.js", "foo\nfoo\n")];
        let findings = match_files(&files, &rules);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].line, Some(1));
        assert_eq!(findings[1].line, Some(2));
    }

    #[test]
    fn file_predicate_filters_files() {
        let rules = vec![synthetic_rule(&["foo"])];
        let files = vec![entry("a.py", "foo\n"), entry("b.js", "foo\n")];
        let findings = match_files(&files, &rules);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].file, "b.js");
    }

    #[test]
    fn snippet_is_trimmed_and_truncated() {
        let rules = vec![synthetic_rule(&["foo"])];
        let long_line = format!("   foo{}", "x".repeat(400));
        let files = vec![entry("a.js", &long_line)];
        let findings = match_files(&files, &rules);
        let snippet = findings[0].matched_content.as_deref().unwrap();
        assert_eq!(snippet.len(), 200);
        assert!(snippet.starts_with("foo"));
    }

    #[test]
    fn finding_copies_rule_fields() {
        let rules = vec![synthetic_rule(&["foo"])];
        let files = vec![entry("a.js", "foo")];
        let findings = match_files(&files, &rules);
        let f = &findings[0];
        assert_eq!(f.rule_id, "TEST-001");
        assert_eq!(f.severity, Severity::High);
        assert_eq!(f.plain_english, "a.js: foo");
        assert_eq!(f.recommendation, "fix it");
    }

    #[test]
    fn catalog_flags_eval_in_javascript() {
        let rules = builtin::all_rules();
        let files = vec![entry("index.js", "eval(userInput);\n")];
        let findings = match_files(&files, &rules);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "EXEC-001");
        assert_eq!(findings[0].severity, Severity::Critical);
    }

    #[test]
    fn matcher_is_stateless_across_invocations() {
        let rules = vec![synthetic_rule(&["foo"])];
        let files = vec![entry("a.js", "foo\n")];
        let first = match_files(&files, &rules);
        let second = match_files(&files, &rules);
        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].rule_id, second[0].rule_id);
    }
}

pub mod builtin;
pub mod finding;

use once_cell::sync::Lazy;
use regex::Regex;

pub use finding::{Finding, Rating, Severity, SetupScanResult, SkillScanResult};

/// A declarative detection rule.
///
/// Every rule runs the same algorithm (pattern search over lines plus
/// template fill), so rules are plain data rather than a trait object per
/// detector. Identity is the `id` field; rules are read-only after catalog
/// construction.
#[derive(Debug)]
pub struct Rule {
    /// Unique, stable identifier (e.g., "EXEC-001").
    pub id: &'static str,
    pub severity: Severity,
    pub title: &'static str,
    pub description: &'static str,
    /// File-applicability predicate, matched against the relative path.
    pub applies_to: Regex,
    /// Content patterns, evaluated in order with first-match-wins per line.
    pub patterns: Vec<Regex>,
    /// Plain-English explanation template: (relative path, matched line).
    pub explain: fn(&str, &str) -> String,
    pub recommendation: &'static str,
}

impl Rule {
    /// Whether this rule applies to a file at the given relative path.
    pub fn applies_to_file(&self, relative_path: &str) -> bool {
        self.applies_to.is_match(relative_path)
    }
}

/// The full rule catalog, built once on first use and immutable after.
///
/// Callers pass the slice into the matcher explicitly, which keeps the
/// matcher testable against synthetic rule lists.
pub fn catalog() -> &'static [Rule] {
    static CATALOG: Lazy<Vec<Rule>> = Lazy::new(builtin::all_rules);
    &CATALOG
}

/// Look up a catalog rule by id.
pub fn rule_by_id(id: &str) -> Option<&'static Rule> {
    catalog().iter().find(|r| r.id == id)
}

/// All catalog rules with the given severity.
pub fn rules_by_severity(severity: Severity) -> Vec<&'static Rule> {
    catalog().iter().filter(|r| r.severity == severity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rule_ids_are_unique() {
        let mut seen = HashSet::new();
        for rule in catalog() {
            assert!(seen.insert(rule.id), "duplicate rule id {}", rule.id);
        }
    }

    #[test]
    fn every_rule_has_patterns() {
        for rule in catalog() {
            assert!(!rule.patterns.is_empty(), "{} has no patterns", rule.id);
        }
    }

    #[test]
    fn all_seven_categories_present() {
        for prefix in ["EXEC", "NET", "FS", "OBF", "PI", "ENV", "SEC"] {
            assert!(
                catalog().iter().any(|r| r.id.starts_with(prefix)),
                "no rules for category {prefix}"
            );
        }
    }

    #[test]
    fn lookup_by_id() {
        let rule = rule_by_id("EXEC-001").expect("EXEC-001 in catalog");
        assert_eq!(rule.severity, Severity::Critical);
        assert!(rule_by_id("NOPE-999").is_none());
    }

    #[test]
    fn filter_by_severity() {
        let critical = rules_by_severity(Severity::Critical);
        assert!(critical.iter().any(|r| r.id == "EXEC-001"));
        assert!(critical.iter().all(|r| r.severity == Severity::Critical));
    }

    #[test]
    fn explain_interpolates_file_path() {
        let rule = rule_by_id("EXEC-001").unwrap();
        let text = (rule.explain)("src/index.js", "eval(input)");
        assert!(text.contains("src/index.js"));
    }
}

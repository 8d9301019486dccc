//! The scan pipeline: collect files, match rules, score.

pub mod matcher;
pub mod walker;

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::rules::{self, Finding, Rating, Severity, SetupScanResult, SkillScanResult};
use crate::scoring::{compute_overall_score, compute_score, score_to_rating};

pub use walker::FileEntry;

/// Scan one skill directory: walk, match, score.
///
/// Never fails: a missing or unreadable directory produces an empty file
/// list and therefore a clean result, not an error. "Nothing found to scan"
/// must never look like "everything is dangerous".
pub fn scan_skill(path: &Path) -> SkillScanResult {
    let start = Instant::now();
    let files = walker::walk_directory(path);
    let findings = matcher::match_files(&files, rules::catalog());
    let score = compute_score(&findings);

    SkillScanResult {
        skill_name: skill_name(path),
        skill_path: path.to_string_lossy().into_owned(),
        findings,
        score,
        rating: score_to_rating(score),
        scanned_files: files.len(),
        scan_duration: start.elapsed().as_millis() as u64,
    }
}

/// Scan a whole setup: each immediate subdirectory of `skills_dir` is one
/// skill, and `config_findings` come from the configuration checker.
///
/// An unreadable skills root is a "nothing to scan" state: score 100,
/// rating GREEN, empty skill list, diagnostic summary.
pub fn scan_setup(skills_dir: &Path, config_findings: Vec<Finding>) -> SetupScanResult {
    let start = Instant::now();

    let entries = match std::fs::read_dir(skills_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %skills_dir.display(), error = %e, "skills root unreadable");
            return SetupScanResult {
                overall_score: 100,
                overall_rating: Rating::Green,
                skills: vec![],
                total_findings: config_findings.len(),
                config_findings,
                scan_duration: start.elapsed().as_millis() as u64,
                summary: format!("Could not read skills directory: {}", skills_dir.display()),
            };
        }
    };

    let mut skill_dirs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.path())
        .collect();
    skill_dirs.sort();

    let skills: Vec<SkillScanResult> = skill_dirs.iter().map(|dir| scan_skill(dir)).collect();

    let overall_score = compute_overall_score(&skills, &config_findings);
    let total_findings =
        config_findings.len() + skills.iter().map(|s| s.findings.len()).sum::<usize>();
    let summary = generate_summary(&skills, &config_findings);

    SetupScanResult {
        overall_score,
        overall_rating: score_to_rating(overall_score),
        skills,
        total_findings,
        config_findings,
        scan_duration: start.elapsed().as_millis() as u64,
        summary,
    }
}

/// Skill name shown in reports: the directory's base name.
pub fn skill_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Human summary of a setup scan. Descriptive only; the overall score is
/// computed independently and never derived from this text.
fn generate_summary(skills: &[SkillScanResult], config_findings: &[Finding]) -> String {
    let total_findings =
        config_findings.len() + skills.iter().map(|s| s.findings.len()).sum::<usize>();
    let critical_count = config_findings
        .iter()
        .filter(|f| f.severity == Severity::Critical)
        .count()
        + skills
            .iter()
            .flat_map(|s| &s.findings)
            .filter(|f| f.severity == Severity::Critical)
            .count();
    let red_skills: Vec<&SkillScanResult> =
        skills.iter().filter(|s| s.rating == Rating::Red).collect();

    if total_findings == 0 {
        return "No security issues found. Your setup looks clean.".into();
    }

    let mut parts = vec![format!(
        "Found {} issue{} across {} skill{}.",
        total_findings,
        plural(total_findings),
        skills.len(),
        plural(skills.len()),
    )];

    if critical_count > 0 {
        parts.push(format!(
            "{} critical issue{} require{} immediate attention.",
            critical_count,
            plural(critical_count),
            if critical_count == 1 { "s" } else { "" },
        ));
    }

    if !red_skills.is_empty() {
        let names: Vec<&str> = red_skills.iter().map(|s| s.skill_name.as_str()).collect();
        parts.push(format!(
            "{} skill{} rated RED: {}.",
            red_skills.len(),
            plural(red_skills.len()),
            names.join(", "),
        ));
    }

    parts.join(" ")
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn config_finding(severity: Severity) -> Finding {
        Finding {
            rule_id: "CFG-002".into(),
            severity,
            title: "t".into(),
            description: "d".into(),
            plain_english: "p".into(),
            file: "config.json".into(),
            line: None,
            matched_content: None,
            recommendation: "r".into(),
        }
    }

    #[test]
    fn eval_only_skill_scores_75_yellow() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.js", "eval(userInput);\n");

        let result = scan_skill(dir.path());
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].rule_id, "EXEC-001");
        assert_eq!(result.findings[0].severity, Severity::Critical);
        assert_eq!(result.score, 75);
        assert_eq!(result.rating, Rating::Yellow);
        assert_eq!(result.scanned_files, 1);
    }

    #[test]
    fn ssh_key_plus_telegram_scores_50_yellow() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "index.js",
            "const key = fs.readFileSync('/home/u/.ssh/id_rsa');\n\
             fetch('https://api.telegram.org/bot' + token + '/sendMessage');\n",
        );

        let result = scan_skill(dir.path());
        let rule_ids: Vec<&str> = result.findings.iter().map(|f| f.rule_id.as_str()).collect();
        assert!(rule_ids.contains(&"FS-001"));
        assert!(rule_ids.contains(&"NET-001"));
        assert_eq!(result.findings.len(), 2);
        assert_eq!(result.score, 50);
        assert_eq!(result.rating, Rating::Yellow);
    }

    #[test]
    fn clean_skill_scores_100_green() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.js", "export function add(a, b) { return a + b; }\n");
        write(dir.path(), "README.md", "A calculator skill.\n");

        let result = scan_skill(dir.path());
        assert!(result.findings.is_empty());
        assert_eq!(result.score, 100);
        assert_eq!(result.rating, Rating::Green);
    }

    #[test]
    fn scanning_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.js", "eval(x)\n");
        write(dir.path(), "b.py", "os.system('ls')\n");

        let first = scan_skill(dir.path());
        let second = scan_skill(dir.path());
        assert_eq!(first.findings.len(), second.findings.len());
        assert_eq!(first.score, second.score);
        let ids = |r: &SkillScanResult| {
            r.findings
                .iter()
                .map(|f| (f.rule_id.clone(), f.file.clone(), f.line))
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn adding_a_flagged_file_never_raises_the_score() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "clean.js", "const x = 1;\n");
        let before = scan_skill(dir.path());

        write(dir.path(), "dirty.js", "eval(payload)\n");
        let after = scan_skill(dir.path());
        assert!(after.score < before.score);
    }

    #[test]
    fn nonexistent_skills_root_scores_100_green() {
        let result = scan_setup(Path::new("/nonexistent/skillscan-setup"), vec![]);
        assert_eq!(result.overall_score, 100);
        assert_eq!(result.overall_rating, Rating::Green);
        assert!(result.skills.is_empty());
        assert!(result.summary.contains("Could not read skills directory"));
    }

    #[test]
    fn setup_scan_walks_immediate_subdirectories_only() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "clean-skill/index.js", "const x = 1;\n");
        write(root.path(), "dirty-skill/index.js", "eval(x)\n");
        // A stray file at the root is not a skill.
        write(root.path(), "notes.txt", "not a skill\n");

        let result = scan_setup(root.path(), vec![]);
        assert_eq!(result.skills.len(), 2);
        assert_eq!(result.skills[0].skill_name, "clean-skill");
        assert_eq!(result.skills[0].score, 100);
        assert_eq!(result.skills[1].skill_name, "dirty-skill");
        assert_eq!(result.skills[1].score, 75);
        // Mean(100, 75) = 87.5, rounds to 88.
        assert_eq!(result.overall_score, 88);
        assert_eq!(result.total_findings, 1);
    }

    #[test]
    fn config_findings_fold_into_overall_score() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "skill-a/index.js", "const x = 1;\n");

        let result = scan_setup(root.path(), vec![config_finding(Severity::Critical)]);
        assert_eq!(result.overall_score, 80);
        assert_eq!(result.overall_rating, Rating::Green);
        assert_eq!(result.total_findings, 1);
        assert!(result.summary.contains("1 critical issue"));
    }

    #[test]
    fn clean_setup_summary() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "skill-a/index.js", "const x = 1;\n");

        let result = scan_setup(root.path(), vec![]);
        assert_eq!(result.summary, "No security issues found. Your setup looks clean.");
    }

    #[test]
    fn summary_names_red_skills() {
        let root = tempfile::tempdir().unwrap();
        // Three distinct critical rules: 100 - 75 = 25, RED.
        write(
            root.path(),
            "bad-skill/index.js",
            "eval(x)\n\
             fetch('https://api.telegram.org/bot1/sendMessage')\n\
             fs.readFileSync('/home/u/.ssh/id_rsa')\n",
        );

        let result = scan_setup(root.path(), vec![]);
        assert_eq!(result.skills[0].score, 25);
        assert_eq!(result.skills[0].rating, Rating::Red);
        assert!(result.summary.contains("rated RED: bad-skill"));
    }
}

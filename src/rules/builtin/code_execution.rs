use super::{re, source_files};
use crate::rules::{Rule, Severity};

pub fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "EXEC-001",
            severity: Severity::Critical,
            title: "Dynamic code execution with eval()",
            description: "Uses eval() or similar to execute dynamically constructed code",
            applies_to: source_files(),
            patterns: vec![
                re(r"\beval\s*\("),
                re(r"\bnew\s+Function\s*\("),
                re(r#"\bexec\s*\(\s*(?:f["']|["`]|compile)"#),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" uses eval() or dynamic code execution. This means it \
                     can run arbitrary code at runtime, a common technique in malware to hide \
                     what it actually does."
                )
            },
            recommendation:
                "Remove this skill immediately unless you trust the author completely. Dynamic \
                 code execution is the #1 red flag in malicious skills.",
        },
        Rule {
            id: "EXEC-002",
            severity: Severity::High,
            title: "Child process execution",
            description: "Spawns shell commands or child processes",
            applies_to: source_files(),
            patterns: vec![
                re(r"\bchild_process\b"),
                re(r"\bexecSync\b"),
                re(r"\bspawnSync?\b"),
                re(r"\bexecFileSync?\b"),
                re(r"\bsubprocess\.(run|call|Popen|check_output)\b"),
                re(r"\bos\.system\s*\("),
                re(r"\bos\.popen\s*\("),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" can run system commands on your computer. This gives it \
                     the ability to install software, delete files, or do anything you can do in \
                     a terminal."
                )
            },
            recommendation:
                "Only allow this if the skill explicitly needs to run commands (like a git or \
                 docker skill). If it's a simple data skill, this is suspicious.",
        },
        Rule {
            id: "EXEC-003",
            severity: Severity::Critical,
            title: "Shell command with string interpolation",
            description: "Constructs shell commands using string interpolation or concatenation",
            applies_to: source_files(),
            patterns: vec![
                re(r"exec(?:Sync)?\s*\(\s*`[^`]*\$\{"),
                re(r#"exec(?:Sync)?\s*\(\s*['"][^'"]*['"]\s*\+"#),
                re(r#"os\.system\s*\(\s*f['"]"#),
                re(r#"subprocess\.(?:run|call|Popen)\s*\(\s*f['"]"#),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" builds shell commands by inserting variables into \
                     strings. This is a command injection vulnerability: an attacker could trick \
                     it into running malicious commands."
                )
            },
            recommendation:
                "Remove this skill. Shell commands built from user input are extremely dangerous \
                 and a hallmark of malicious code.",
        },
    ]
}

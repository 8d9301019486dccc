use super::{re, source_files};
use crate::rules::{Rule, Severity};

pub fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "ENV-001",
            severity: Severity::High,
            title: "Bulk environment variable harvesting",
            description: "Reads all environment variables, not just specific ones needed",
            applies_to: source_files(),
            patterns: vec![
                // Bare `process.env` / `os.environ` without a member or index
                // access right after it. The regex crate has no lookahead, so
                // the next character (or end of line) is matched explicitly.
                re(r"process\.env(?:[^.\[]|$)"),
                re(r"Object\.\w+\(process\.env\)"),
                re(r"JSON\.stringify\(process\.env\)"),
                re(r"os\.environ(?:[^.\[]|$)"),
                re(r"dict\(os\.environ\)"),
                re(r"\{.*\.\.\.process\.env"),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" reads ALL of your environment variables at once. \
                     Environment variables often contain API keys, database passwords, and \
                     tokens. A legitimate skill only needs specific variables, not all of them."
                )
            },
            recommendation:
                "Check if this skill actually needs environment variables. If it does, it \
                 should only access specific named ones (like OPENAI_API_KEY), not dump all of \
                 them.",
        },
        Rule {
            id: "ENV-002",
            severity: Severity::Critical,
            title: "Environment variables sent over network",
            description: "Reads environment variables and sends them via HTTP",
            applies_to: source_files(),
            patterns: vec![
                re(r"process\.env[\s\S]{0,100}(?:fetch|axios|request|http)"),
                re(r"(?:fetch|axios|request|http)[\s\S]{0,100}process\.env"),
                re(r"os\.environ[\s\S]{0,100}(?:urlopen|requests|urllib)"),
                re(r"(?:urlopen|requests|urllib)[\s\S]{0,100}os\.environ"),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" reads your environment variables AND sends data over \
                     the network. This is the classic pattern for credential theft: read your \
                     secrets, send them to the attacker."
                )
            },
            recommendation:
                "Remove this skill immediately. This pattern is almost always malicious.",
        },
    ]
}

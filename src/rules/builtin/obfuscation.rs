use super::re;
use crate::rules::{Rule, Severity};
use regex::Regex;

fn obfuscation_files() -> Regex {
    re(r"(?i)\.(js|ts|mjs|cjs|py|rb|json|md)$")
}

fn javascript_files() -> Regex {
    re(r"(?i)\.(js|mjs|cjs|ts)$")
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "OBF-001",
            severity: Severity::High,
            title: "Base64-encoded string decoded at runtime",
            description:
                "Decodes base64-encoded strings at runtime, often used to hide malicious payloads",
            applies_to: obfuscation_files(),
            patterns: vec![
                re(r"atob\s*\("),
                re(r#"Buffer\.from\s*\([^)]+,\s*['"]base64['"]\)"#),
                re(r"base64\.b64decode\s*\("),
                re(r"base64\.decodebytes\s*\("),
                re(r"Base64\.decode64\s*\("),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" decodes hidden base64-encoded content at runtime. This \
                     is a common obfuscation technique: the actual malicious code is hidden as \
                     an encoded string so it doesn't show up in simple code reviews."
                )
            },
            recommendation:
                "Investigate what's being decoded. If you can't determine it's benign data \
                 (like an image), this is highly suspicious.",
        },
        Rule {
            id: "OBF-002",
            severity: Severity::High,
            title: "Hex-encoded string decoded at runtime",
            description: "Decodes hex-encoded strings, another obfuscation method",
            applies_to: obfuscation_files(),
            patterns: vec![
                re(r#"Buffer\.from\s*\([^)]+,\s*['"]hex['"]\)"#),
                re(r"bytes\.fromhex\s*\("),
                re(r"(?i)\\x[0-9a-f]{2}(?:\\x[0-9a-f]{2}){5,}"),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" decodes hex-encoded content at runtime. Like base64, \
                     hex encoding is used to hide the true contents of strings: URLs, commands, \
                     or other payloads."
                )
            },
            recommendation:
                "Decode the hex string yourself to see what it contains. If it's a URL or \
                 command, this skill is likely malicious.",
        },
        Rule {
            id: "OBF-003",
            severity: Severity::Medium,
            title: "Hidden Unicode characters",
            description:
                "Contains invisible Unicode characters that could be used for homograph attacks \
                 or hiding code",
            applies_to: obfuscation_files(),
            patterns: vec![
                re(r"[\u{200B}\u{200C}\u{200D}\u{2060}\u{FEFF}]"),
                re(r"[\u{202A}-\u{202E}]"),
                re(r"[\u{2066}-\u{2069}]"),
                re(r"\u{00AD}"),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" contains invisible Unicode characters. These can be \
                     used to hide malicious code that looks normal in a text editor but actually \
                     does something different, for example making a URL look like it goes to \
                     google.com when it actually goes to evil.com."
                )
            },
            recommendation:
                "View the raw file in a hex editor. This pattern is used in supply-chain \
                 attacks to make code appear safe while actually being malicious.",
        },
        Rule {
            id: "OBF-004",
            severity: Severity::High,
            title: "Obfuscated JavaScript patterns",
            description: "Uses common JS obfuscation patterns to hide code intent",
            applies_to: javascript_files(),
            patterns: vec![
                re(r#"\[['"]\\x"#),
                re(r"String\.fromCharCode\s*\("),
                re(r#"\['constructor'\]\s*\(\s*['"]return"#),
                re(r#"\bwindow\[(?:['"]\\x|atob)"#),
                re(r#"\[["']apply["']\]"#),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" uses JavaScript obfuscation techniques to hide what it \
                     does. Legitimate code is written to be readable; obfuscated code is written \
                     to avoid detection."
                )
            },
            recommendation:
                "Remove this skill. There is no legitimate reason for an MCP skill to use code \
                 obfuscation.",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str) -> Rule {
        rules().into_iter().find(|r| r.id == id).unwrap()
    }

    #[test]
    fn base64_decode_matches() {
        let r = rule("OBF-001");
        assert!(r.patterns.iter().any(|p| p.is_match("atob(payload)")));
        assert!(r
            .patterns
            .iter()
            .any(|p| p.is_match("Buffer.from(data, 'base64')")));
        assert!(r.patterns.iter().any(|p| p.is_match("base64.b64decode(blob)")));
    }

    #[test]
    fn zero_width_characters_match() {
        let r = rule("OBF-003");
        assert!(r.patterns.iter().any(|p| p.is_match("link\u{200B}text")));
        assert!(r.patterns.iter().any(|p| p.is_match("rtl\u{202E}override")));
        assert!(!r.patterns.iter().any(|p| p.is_match("plain ascii text")));
    }

    #[test]
    fn hex_escape_run_matches() {
        let r = rule("OBF-002");
        assert!(r
            .patterns
            .iter()
            .any(|p| p.is_match(r"var s = '\x68\x74\x74\x70\x73\x3a\x2f\x2f';")));
    }

    #[test]
    fn obf_004_applies_only_to_javascript() {
        let r = rule("OBF-004");
        assert!(r.applies_to_file("lib/payload.js"));
        assert!(!r.applies_to_file("script.py"));
    }
}

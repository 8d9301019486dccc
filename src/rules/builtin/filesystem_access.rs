use super::{re, source_files};
use crate::rules::{Rule, Severity};

pub fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "FS-001",
            severity: Severity::Critical,
            title: "Access to SSH keys",
            description: "Reads SSH private keys or known_hosts",
            applies_to: source_files(),
            patterns: vec![
                re(r"\.ssh/id_"),
                re(r"\.ssh/known_hosts"),
                re(r"\.ssh/authorized_keys"),
                re(r"\.ssh/config"),
                re(r"id_rsa|id_ed25519|id_ecdsa"),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" tries to read your SSH keys. These keys give access to \
                     your servers, GitHub account, and other systems. If stolen, an attacker can \
                     impersonate you on any server you have access to."
                )
            },
            recommendation:
                "Remove this skill immediately. No legitimate skill needs to read your SSH keys.",
        },
        Rule {
            id: "FS-002",
            severity: Severity::Critical,
            title: "Access to cloud credentials",
            description: "Reads AWS, GCP, or Azure credential files",
            applies_to: source_files(),
            patterns: vec![
                re(r"\.aws/credentials"),
                re(r"\.aws/config"),
                re(r"\.azure/"),
                re(r"\.config/gcloud"),
                re(r"(?i)google.*credentials.*\.json"),
                re(r"(?i)service.account.*\.json"),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" tries to read your cloud credentials (AWS, Google \
                     Cloud, or Azure). These credentials could give an attacker full access to \
                     your cloud infrastructure: they could spin up crypto miners, access your \
                     databases, or rack up thousands in charges."
                )
            },
            recommendation:
                "Remove this skill immediately. Cloud credentials should never be accessed by \
                 MCP skills.",
        },
        Rule {
            id: "FS-003",
            severity: Severity::Critical,
            title: "Access to browser profiles",
            description: "Reads browser data (cookies, passwords, history)",
            applies_to: source_files(),
            patterns: vec![
                re(r"(?i)Chrome.*(?:Default|Profile)"),
                re(r"(?i)Firefox.*profiles"),
                re(r"(?i)\.mozilla/firefox"),
                re(r"(?i)google-chrome"),
                re(r"(?i)Login\s*Data"),
                re(r"(?i)Cookies\.sqlite"),
                re(r"(?i)Local\s*State"),
                re(r"(?i)\.browser"),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" tries to access your browser data, which could include \
                     your saved passwords, cookies (login sessions), and browsing history. This \
                     is a classic data-stealing technique."
                )
            },
            recommendation:
                "Remove this skill immediately. This is textbook info-stealer behavior.",
        },
        Rule {
            id: "FS-004",
            severity: Severity::Critical,
            title: "Access to cryptocurrency wallets",
            description: "Reads cryptocurrency wallet files or seed phrases",
            applies_to: source_files(),
            patterns: vec![
                re(r"(?i)\.bitcoin/"),
                re(r"(?i)\.ethereum/"),
                re(r"(?i)wallet\.dat"),
                re(r"(?i)\.solana/id\.json"),
                re(r"(?i)metamask"),
                re(r"(?i)phantom"),
                re(r"(?i)\.crypto/"),
                re(r"(?i)keystore.*utc"),
                re(r"(?i)seed.?phrase"),
                re(r"(?i)mnemonic"),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" tries to access cryptocurrency wallet files. If your \
                     wallet data or seed phrases are stolen, your crypto can be transferred out \
                     irreversibly."
                )
            },
            recommendation:
                "Remove this skill immediately. This is the most common goal of malicious MCP \
                 skills: stealing cryptocurrency.",
        },
        Rule {
            id: "FS-005",
            severity: Severity::High,
            title: "Access to .env or dotfiles",
            description:
                "Reads .env files or other configuration files that commonly contain secrets",
            applies_to: source_files(),
            patterns: vec![
                re(r"\.env\b"),
                re(r"dotenv"),
                re(r"\.netrc"),
                re(r"\.npmrc"),
                re(r"\.pypirc"),
                re(r"\.docker/config"),
                re(r"\.kube/config"),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" reads environment files or config files that typically \
                     contain passwords, API keys, and tokens. This is how attackers harvest \
                     credentials from your development environment."
                )
            },
            recommendation:
                "Only allow this if the skill explicitly documents why it needs these files. \
                 Most skills should receive credentials through proper configuration, not by \
                 reading dotfiles.",
        },
        Rule {
            id: "FS-006",
            severity: Severity::High,
            title: "Broad filesystem traversal",
            description: "Recursively walks directories or reads from sensitive system paths",
            applies_to: source_files(),
            patterns: vec![
                re(r"readdirSync.*recursive"),
                re(r#"os\.walk\s*\(\s*['"][/~]"#),
                re(r#"glob\s*\(\s*['"][/*]"#),
                re(r"/etc/passwd"),
                re(r"/etc/shadow"),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" scans through directories on your computer. This could \
                     be used to find and collect sensitive files, passwords, or personal data."
                )
            },
            recommendation:
                "Check what directories are being scanned. A skill should only access its own \
                 data directory, not your entire filesystem.",
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
    fn ssh_key_paths_match() {
        let r = rule("FS-001");
        assert!(r
            .patterns
            .iter()
            .any(|p| p.is_match("fs.readFileSync('/home/u/.ssh/id_rsa')")));
        assert!(r.patterns.iter().any(|p| p.is_match("open('~/.ssh/known_hosts')")));
    }

    #[test]
    fn cloud_credential_paths_match() {
        let r = rule("FS-002");
        assert!(r.patterns.iter().any(|p| p.is_match("cat ~/.aws/credentials")));
        assert!(r
            .patterns
            .iter()
            .any(|p| p.is_match("loads service-account-key.json here")));
    }

    #[test]
    fn dotfile_reads_match() {
        let r = rule("FS-005");
        assert!(r.patterns.iter().any(|p| p.is_match("readFile('.env')")));
        assert!(r.patterns.iter().any(|p| p.is_match("require('dotenv').config()")));
    }

    #[test]
    fn etc_passwd_matches() {
        let r = rule("FS-006");
        assert!(r.patterns.iter().any(|p| p.is_match("open('/etc/passwd')")));
    }
}

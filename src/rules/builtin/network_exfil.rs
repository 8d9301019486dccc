use super::re;
use crate::rules::{Rule, Severity};
use regex::Regex;

fn network_source_files() -> Regex {
    re(r"(?i)\.(js|ts|mjs|cjs|py|rb|json)$")
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "NET-001",
            severity: Severity::Critical,
            title: "Data exfiltration to Telegram Bot API",
            description: "Sends data to Telegram Bot API, commonly used for data exfiltration",
            applies_to: network_source_files(),
            patterns: vec![
                re(r"(?i)api\.telegram\.org/bot"),
                re(r"(?i)telegram\.org/bot.*sendMessage"),
                re(r"(?i)telegram\.org/bot.*sendDocument"),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" sends data to a Telegram bot. This is the #1 method \
                     used by malicious skills to steal your data: your API keys, passwords, or \
                     files get sent to an attacker's Telegram chat."
                )
            },
            recommendation:
                "Remove this skill immediately. Legitimate skills have no reason to communicate \
                 with Telegram bots.",
        },
        Rule {
            id: "NET-002",
            severity: Severity::Critical,
            title: "Data exfiltration via Discord webhook",
            description: "Sends data to Discord webhooks, commonly used for data exfiltration",
            applies_to: network_source_files(),
            patterns: vec![
                re(r"(?i)discord(?:app)?\.com/api/webhooks/"),
                re(r"(?i)discord\.com/api/webhooks"),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" sends data to a Discord webhook. Attackers use Discord \
                     webhooks to receive stolen data because they're free, anonymous, and hard \
                     to trace."
                )
            },
            recommendation:
                "Remove this skill immediately unless it's explicitly a Discord integration \
                 skill AND you set up the webhook yourself.",
        },
        Rule {
            id: "NET-003",
            severity: Severity::High,
            title: "Outbound HTTP to hardcoded IP address",
            description: "Makes HTTP requests to hardcoded IP addresses instead of domain names",
            applies_to: network_source_files(),
            patterns: vec![
                re(r"https?://\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}"),
                re(r#"fetch\s*\(\s*['"`]https?://\d{1,3}\."#),
                re(r#"axios\.\w+\s*\(\s*['"`]https?://\d{1,3}\."#),
                re(r#"requests\.\w+\s*\(\s*['"`]https?://\d{1,3}\."#),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" connects to a raw IP address instead of a normal \
                     website. Legitimate services use domain names. Raw IP addresses are often \
                     used to avoid detection and connect to attacker-controlled servers."
                )
            },
            recommendation:
                "Investigate what this IP address is. If you can't determine it's a legitimate \
                 service, remove this skill.",
        },
        Rule {
            id: "NET-004",
            severity: Severity::Medium,
            title: "Data encoding before transmission",
            description: "Encodes data (base64/hex) before sending it over the network",
            applies_to: network_source_files(),
            patterns: vec![
                re(r"btoa\s*\(.*fetch"),
                re(r"base64.*(?:fetch|axios|request|http)"),
                re(r"(?:fetch|axios|request|http).*base64"),
                re(r"b64encode.*(?:urlopen|requests|urllib)"),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" encodes data before sending it to a server. While \
                     encoding itself isn't always malicious, this pattern is common in data \
                     theft: the encoding hides what's being sent."
                )
            },
            recommendation:
                "Check what data is being encoded and where it's being sent. If you can't \
                 determine both, this is suspicious.",
        },
        Rule {
            id: "NET-005",
            severity: Severity::High,
            title: "Outbound connection to paste/webhook service",
            description:
                "Connects to paste services or generic webhook endpoints used for exfiltration",
            applies_to: network_source_files(),
            patterns: vec![
                re(r"(?i)pastebin\.com"),
                re(r"(?i)paste\.ee"),
                re(r"(?i)hastebin\.com"),
                re(r"(?i)webhook\.site"),
                re(r"(?i)requestbin"),
                re(r"(?i)ngrok\.io"),
                re(r"(?i)burpcollaborator"),
                re(r"(?i)pipedream\.net"),
                re(r"(?i)hookbin\.com"),
            ],
            explain: |file, _matched| {
                format!(
                    "The file \"{file}\" connects to a paste or webhook service. These services \
                     are frequently used by attackers as anonymous drop points for stolen data."
                )
            },
            recommendation:
                "Remove this skill unless you specifically set up this webhook for your own use.",
        },
    ]
}

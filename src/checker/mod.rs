//! MCP client configuration checker.
//!
//! Inspects the config files of known MCP clients (Claude Desktop, Cline,
//! generic gateways) for insecure server entries. Findings from here feed
//! the setup-level aggregator as externally supplied config findings; the
//! scan pipeline itself never reads these files.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::rules::{Finding, Severity};

static SECRET_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:api[_-]?key|secret|token|password)").unwrap());

static INSECURE_FLAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)--no-auth|--disable-auth|--no-ssl|--insecure").unwrap());

static PACKAGE_RUNNER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:npx|uvx|bunx)\b").unwrap());

/// Check the known MCP client config locations under `home_dir`.
pub fn check_config(home_dir: &Path) -> Vec<Finding> {
    let candidates = [
        home_dir.join("Library/Application Support/Claude/claude_desktop_config.json"),
        home_dir.join(".config/claude/claude_desktop_config.json"),
        home_dir.join("AppData/Roaming/Claude/claude_desktop_config.json"),
        home_dir.join(".mcp/config.json"),
        home_dir.join(".mcp.json"),
        home_dir.join(".cline/mcp_settings.json"),
    ];

    let mut findings = Vec::new();
    for path in &candidates {
        if path.exists() {
            findings.extend(check_mcp_config(path));
        }
    }
    findings
}

/// Check one MCP config file. Unreadable files are skipped silently;
/// unparseable ones are themselves a (low-severity) finding.
pub fn check_mcp_config(path: &Path) -> Vec<Finding> {
    let mut findings = Vec::new();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "config unreadable");
            return findings;
        }
    };

    let config: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(_) => {
            findings.push(config_finding(
                "CFG-001",
                Severity::Low,
                "Malformed configuration file".into(),
                "Configuration file is not valid JSON".into(),
                format!(
                    "Your config file at \"{}\" isn't valid JSON. This might cause unexpected \
                     behavior.",
                    path.display()
                ),
                "Fix the JSON syntax in your configuration file.".into(),
                path,
            ));
            return findings;
        }
    };

    let servers = config
        .get("mcpServers")
        .or_else(|| config.get("servers"))
        .and_then(Value::as_object);
    let Some(servers) = servers else {
        return findings;
    };

    for (name, server) in servers {
        if !server.is_object() {
            continue;
        }

        let url = server
            .get("url")
            .or_else(|| server.get("endpoint"))
            .and_then(Value::as_str)
            .unwrap_or("");

        if url.contains("0.0.0.0") {
            findings.push(config_finding(
                "CFG-002",
                Severity::Critical,
                format!("Skill \"{name}\" is exposed to the internet"),
                "Server binds to 0.0.0.0, making it accessible from any network".into(),
                format!(
                    "Your skill \"{name}\" is configured to listen on all network interfaces \
                     (0.0.0.0). This means anyone on your network, or the internet if you don't \
                     have a firewall, can connect to it and use your AI agent."
                ),
                "Change the bind address to \"127.0.0.1\" or \"localhost\" to only allow local \
                 connections."
                    .into(),
                path,
            ));
        }

        if url.starts_with("http://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
            findings.push(config_finding(
                "CFG-003",
                Severity::High,
                format!("Skill \"{name}\" uses unencrypted HTTP"),
                "Server communicates over plain HTTP instead of HTTPS".into(),
                format!(
                    "Your skill \"{name}\" connects over plain HTTP (not HTTPS). This means \
                     your data, including any API keys or sensitive information, is sent \
                     unencrypted and could be intercepted."
                ),
                "Use HTTPS instead of HTTP for remote connections.".into(),
                path,
            ));
        }

        if let Some(env) = server.get("env").and_then(Value::as_object) {
            for (key, value) in env {
                let Some(value) = value.as_str() else {
                    continue;
                };
                if SECRET_KEY_RE.is_match(key)
                    && value.len() > 8
                    && !value.starts_with("${")
                    && !value.starts_with('$')
                {
                    findings.push(config_finding(
                        "CFG-004",
                        Severity::Medium,
                        format!("Hardcoded secret in \"{name}\" configuration"),
                        format!(
                            "Environment variable \"{key}\" appears to contain a hardcoded secret"
                        ),
                        format!(
                            "Your skill \"{name}\" has a secret ({key}) hardcoded directly in \
                             the config file. If this file is shared, committed to git, or \
                             backed up to the cloud, the secret is exposed."
                        ),
                        format!(
                            "Move \"{key}\" to a .env file or use your system's secret \
                             management. Never hardcode secrets in config files."
                        ),
                        path,
                    ));
                }
            }
        }

        if let Some(args) = server.get("args").and_then(Value::as_array) {
            let args_str = args
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(" ");
            if let Some(matched) = INSECURE_FLAG_RE.find(&args_str) {
                findings.push(config_finding(
                    "CFG-005",
                    Severity::High,
                    format!("Skill \"{name}\" has security disabled"),
                    "Server is launched with security features explicitly disabled".into(),
                    format!(
                        "Your skill \"{name}\" is configured with security features turned off \
                         ({}). This makes it vulnerable to unauthorized access.",
                        matched.as_str()
                    ),
                    "Remove the insecure flags and enable proper authentication.".into(),
                    path,
                ));
            }
        }

        if let Some(command) = server.get("command").and_then(Value::as_str) {
            if PACKAGE_RUNNER_RE.is_match(command) {
                let runner = command.split_whitespace().next().unwrap_or(command);
                findings.push(config_finding(
                    "CFG-006",
                    Severity::Medium,
                    format!("Skill \"{name}\" runs via {runner}"),
                    "Server runs packages directly without prior installation".into(),
                    format!(
                        "Your skill \"{name}\" uses {runner} to run a package directly from the \
                         internet without installing it first. This means you're trusting the \
                         package registry to serve the correct code every time; a supply chain \
                         attack could serve malicious code instead."
                    ),
                    "Install the package locally first (`npm install`), then reference the \
                     local binary instead of using npx."
                        .into(),
                    path,
                ));
            }
        }
    }

    findings
}

#[allow(clippy::too_many_arguments)]
fn config_finding(
    rule_id: &str,
    severity: Severity,
    title: String,
    description: String,
    plain_english: String,
    recommendation: String,
    path: &Path,
) -> Finding {
    Finding {
        rule_id: rule_id.into(),
        severity,
        title,
        description,
        plain_english,
        file: path.display().to_string(),
        line: None,
        matched_content: None,
        recommendation,
    }
}

//! The built-in rule catalog, grouped by security category.
//!
//! Grouping is organizational only; the catalog is the concatenation of the
//! category lists and every rule runs the same matching algorithm.

mod code_execution;
mod env_harvesting;
mod filesystem_access;
mod network_exfil;
mod obfuscation;
mod prompt_injection;
mod secrets;

use regex::Regex;

use super::Rule;

pub use code_execution::rules as code_execution_rules;
pub use env_harvesting::rules as env_harvesting_rules;
pub use filesystem_access::rules as filesystem_access_rules;
pub use network_exfil::rules as network_exfil_rules;
pub use obfuscation::rules as obfuscation_rules;
pub use prompt_injection::rules as prompt_injection_rules;
pub use secrets::rules as secrets_rules;

/// Compile a catalog pattern. An invalid pattern is an authoring defect,
/// fatal at catalog construction and covered by the catalog tests.
pub(super) fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

/// Executable source files.
pub(super) fn source_files() -> Regex {
    re(r"(?i)\.(js|ts|mjs|cjs|py|rb|sh|bash)$")
}

/// All built-in rules in catalog order.
pub fn all_rules() -> Vec<Rule> {
    let mut rules = Vec::new();
    rules.extend(code_execution::rules());
    rules.extend(network_exfil::rules());
    rules.extend(filesystem_access::rules());
    rules.extend(obfuscation::rules());
    rules.extend(prompt_injection::rules());
    rules.extend(env_harvesting::rules());
    rules.extend(secrets::rules());
    rules
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level configuration from `.skillscan.toml`. Everything here is a CLI
/// default; the scan pipeline never reads config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Skills directory to scan, overriding auto-detection.
    #[serde(default)]
    pub skills_dir: Option<PathBuf>,
    /// Default output format (detailed, conversational, json).
    #[serde(default)]
    pub format: Option<String>,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_default() {
        let config = Config::load(Path::new("/nonexistent/.skillscan.toml")).unwrap();
        assert!(config.scan.skills_dir.is_none());
        assert!(config.scan.format.is_none());
    }

    #[test]
    fn parses_scan_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".skillscan.toml");
        std::fs::write(
            &path,
            "[scan]\nskills_dir = \"/home/u/.mcp/skills\"\nformat = \"json\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.scan.skills_dir.as_deref(),
            Some(Path::new("/home/u/.mcp/skills"))
        );
        assert_eq!(config.scan.format.as_deref(), Some("json"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".skillscan.toml");
        std::fs::write(&path, "[scan\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}

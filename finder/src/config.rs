//! Configuration for the query builder.
//!
//! DEVSEARCH_ROOT resolution order:
//! 1. Explicit path passed to Config::with_root()
//! 2. DEVSEARCH_ROOT environment variable
//! 3. Default: ~/.local/share/devsearch

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Query builder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory holding config, labels and catalog sources.
    pub root: PathBuf,

    /// Label of the "no specific driver" entry of the driver selector.
    #[serde(default = "default_any_driver_label")]
    pub any_driver_label: String,

    /// Where the caret lands after a fragment is inserted.
    #[serde(default)]
    pub caret: CaretPlacement,

    /// Placeholder values used in generated fragments.
    #[serde(default)]
    pub examples: ExampleValues,
}

/// Caret placement after a fragment insertion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaretPlacement {
    /// Caret right after the inserted fragment.
    #[default]
    AfterFragment,
    /// Placeholder literal selected, so typing replaces it.
    SelectValue,
}

/// Placeholder values substituted into example fragments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExampleValues {
    pub text: String,
    pub pattern: String,
    pub number: i64,
    pub date: NaiveDate,
    /// Day shift of the relative-before example (`"NOW -1d"`).
    pub relative_days: i64,
    pub ip: IpAddr,
    pub subnet: IpAddr,
    pub subnet_prefix: u8,
    /// MAC address in dotted form (`1616.1616.1616`).
    pub mac: String,
    pub mac_prefix: u8,
}

impl Default for ExampleValues {
    fn default() -> Self {
        Self {
            text: "text".to_string(),
            pattern: "pattern".to_string(),
            number: 42,
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            relative_days: -1,
            ip: IpAddr::V4(Ipv4Addr::new(16, 16, 16, 16)),
            subnet: IpAddr::V4(Ipv4Addr::new(16, 16, 0, 0)),
            subnet_prefix: 16,
            mac: "1616.1616.1616".to_string(),
            mac_prefix: 32,
        }
    }
}

fn default_any_driver_label() -> String {
    "[Any]".to_string()
}

impl Config {
    /// Create a new config with the given root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            any_driver_label: default_any_driver_label(),
            caret: CaretPlacement::default(),
            examples: ExampleValues::default(),
        }
    }

    /// Create a config using default root resolution.
    pub fn default_location() -> Result<Self> {
        let root = resolve_root()?;
        Ok(Self::with_root(root))
    }

    /// Load config from DEVSEARCH_ROOT/config.toml, or create default.
    pub fn load() -> Result<Self> {
        let root = resolve_root()?;
        Self::load_from(&root)
    }

    /// Load config from a specific root.
    pub fn load_from(root: &Path) -> Result<Self> {
        let config_path = root.join("config.toml");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let mut config: Config = toml::from_str(&contents)
                .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
            // Ensure root matches the actual location
            config.root = root.to_path_buf();
            Ok(config)
        } else {
            Ok(Self::with_root(root))
        }
    }

    /// Save config to DEVSEARCH_ROOT/config.toml.
    pub fn save(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(self.config_path(), contents)?;
        Ok(())
    }

    // Path helpers

    /// Path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Path to the localized labels table.
    pub fn labels_path(&self) -> PathBuf {
        self.root.join("labels.toml")
    }

    /// Path to the cached catalog sources (domains, diagnostics, drivers, policies).
    pub fn sources_path(&self) -> PathBuf {
        self.root.join("sources.json")
    }
}

/// Resolve DEVSEARCH_ROOT using the standard resolution order.
fn resolve_root() -> Result<PathBuf> {
    // 1. Environment variable
    if let Ok(path) = std::env::var("DEVSEARCH_ROOT") {
        return Ok(PathBuf::from(path));
    }

    // 2. XDG data directory (via directories crate)
    if let Some(proj_dirs) = ProjectDirs::from("", "", "devsearch") {
        return Ok(proj_dirs.data_dir().to_path_buf());
    }

    // 3. Fallback to ~/.local/share/devsearch
    let home = std::env::var("HOME")
        .map_err(|_| Error::Config("Could not determine home directory".to_string()))?;
    Ok(PathBuf::from(home).join(".local/share/devsearch"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_with_root() {
        let config = Config::with_root("/tmp/test-devsearch");
        assert_eq!(config.root, PathBuf::from("/tmp/test-devsearch"));
        assert_eq!(config.any_driver_label, "[Any]");
        assert_eq!(config.caret, CaretPlacement::AfterFragment);
        assert_eq!(config.examples.number, 42);
    }

    #[test]
    fn test_config_paths() {
        let config = Config::with_root("/tmp/test-devsearch");
        assert_eq!(config.labels_path(), PathBuf::from("/tmp/test-devsearch/labels.toml"));
        assert_eq!(config.sources_path(), PathBuf::from("/tmp/test-devsearch/sources.json"));
    }

    #[test]
    fn test_default_examples() {
        let examples = ExampleValues::default();
        assert_eq!(examples.date.to_string(), "2023-01-01");
        assert_eq!(examples.ip.to_string(), "16.16.16.16");
        assert_eq!(examples.subnet.to_string(), "16.16.0.0");
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_path_buf();

        let mut config = Config::with_root(&root);
        config.caret = CaretPlacement::SelectValue;
        config.examples.number = 7;
        config.save().unwrap();

        let loaded = Config::load_from(&root).unwrap();
        assert_eq!(loaded.caret, CaretPlacement::SelectValue);
        assert_eq!(loaded.examples, config.examples);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "root = \"/elsewhere\"\ncaret = \"select-value\"\n\n[examples]\ntext = \"abc\"\n",
        )
        .unwrap();

        let loaded = Config::load_from(tmp.path()).unwrap();
        assert_eq!(loaded.root, tmp.path());
        assert_eq!(loaded.caret, CaretPlacement::SelectValue);
        assert_eq!(loaded.examples.text, "abc");
        assert_eq!(loaded.examples.pattern, "pattern");
        assert_eq!(loaded.any_driver_label, "[Any]");
    }

    #[test]
    fn test_invalid_config_is_error() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("config.toml"), "caret = [").unwrap();
        assert!(matches!(Config::load_from(tmp.path()), Err(Error::Config(_))));
    }
}

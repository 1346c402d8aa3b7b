//! Root directory initialization.

use std::fs;

use crate::{Config, Error, Result};

const LABELS_TEMPLATE: &str = r#"# Localized labels, keyed by their English text.
# locale = "fr"

[labels]
# "contains (no case)" = "contient (casse ignorée)"
"#;

/// Whether a config file already exists under the root.
pub fn is_initialized(config: &Config) -> bool {
    config.config_path().exists()
}

/// Create the root directory with a default `config.toml` and a labels
/// template. An existing installation is left alone unless `force` is set.
pub fn initialize(config: &Config, force: bool) -> Result<()> {
    if is_initialized(config) && !force {
        return Err(Error::AlreadyInitialized(config.root.clone()));
    }

    fs::create_dir_all(&config.root)?;
    config.save()?;

    let labels_path = config.labels_path();
    if !labels_path.exists() {
        fs::write(&labels_path, LABELS_TEMPLATE)?;
    }

    tracing::debug!(root = %config.root.display(), force, "initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::Labels;
    use tempfile::TempDir;

    #[test]
    fn test_initialize() {
        let tmp = TempDir::new().unwrap();
        let config = Config::with_root(tmp.path().join("root"));

        assert!(!is_initialized(&config));
        initialize(&config, false).unwrap();
        assert!(is_initialized(&config));

        let labels = Labels::load(&config.labels_path()).unwrap();
        assert!(labels.is_empty());
    }

    #[test]
    fn test_initialize_twice() {
        let tmp = TempDir::new().unwrap();
        let config = Config::with_root(tmp.path());

        initialize(&config, false).unwrap();
        let err = initialize(&config, false).unwrap_err();
        assert!(matches!(err, Error::AlreadyInitialized(_)));

        initialize(&config, true).unwrap();
    }

    #[test]
    fn test_force_keeps_labels() {
        let tmp = TempDir::new().unwrap();
        let config = Config::with_root(tmp.path());
        initialize(&config, false).unwrap();
        fs::write(config.labels_path(), "[labels]\nis = \"est\"\n").unwrap();

        initialize(&config, true).unwrap();
        let labels = Labels::load(&config.labels_path()).unwrap();
        assert_eq!(labels.len(), 1);
    }
}

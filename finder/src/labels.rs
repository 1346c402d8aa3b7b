//! Localized labels for operators, attribute titles and enum choices.
//!
//! Labels are read from a TOML table keyed by the English text:
//!
//! ```toml
//! locale = "fr"
//!
//! [labels]
//! "contains (no case)" = "contient (sans casse)"
//! "Creation date" = "Date de création"
//! ```
//!
//! Keys without a translation render as themselves.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Anything able to turn an English label key into display text.
pub trait Translate {
    fn translate(&self, key: &str) -> String;
}

/// Label table loaded from `labels.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    locale: Option<String>,
    entries: HashMap<String, String>,
}

impl Labels {
    /// Create an empty table (every key translates to itself).
    pub fn new() -> Self {
        Self::default()
    }

    /// Load labels from a TOML file. A missing file yields the identity table.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse labels from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self> {
        let value: toml::Value = toml::from_str(toml_str)
            .map_err(|e| Error::Config(format!("Failed to parse labels: {}", e)))?;

        let locale = value.get("locale").and_then(|v| v.as_str()).map(str::to_string);

        let mut entries = HashMap::new();
        if let Some(table) = value.get("labels").and_then(|v| v.as_table()) {
            for (key, val) in table {
                let text = val.as_str().ok_or_else(|| {
                    Error::Config(format!("Invalid label for '{}': expected string", key))
                })?;
                entries.insert(key.clone(), text.to_string());
            }
        }

        Ok(Self { locale, entries })
    }

    /// Locale tag declared by the file, if any.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Add or replace a single label.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translate for Labels {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

//! Remote collections the catalog is assembled from.
//!
//! These are fetched by the host and handed over as-is. A `None` collection
//! means the fetch has not completed yet.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::SemanticType;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub name: String,
    pub result_type: SemanticType,
}

/// Attribute declared by a driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverAttribute {
    pub name: String,
    pub title: String,
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
}

/// A device type, i.e. a driver and the attributes it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceType {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub attributes: Vec<DriverAttribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: i64,
    pub name: String,
}

/// Compliance policy with the rules scoped to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// Outcome of a compliance rule check on a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    Conforming,
    NonConforming,
    Disabled,
    Exempted,
    InvalidRule,
    NotApplicable,
}

impl RuleOutcome {
    pub const ALL: [RuleOutcome; 6] = [
        RuleOutcome::Conforming,
        RuleOutcome::NonConforming,
        RuleOutcome::Disabled,
        RuleOutcome::Exempted,
        RuleOutcome::InvalidRule,
        RuleOutcome::NotApplicable,
    ];

    /// Keyword used in the query grammar.
    pub fn keyword(&self) -> &'static str {
        match self {
            RuleOutcome::Conforming => "CONFORMING",
            RuleOutcome::NonConforming => "NONCONFORMING",
            RuleOutcome::Disabled => "DISABLED",
            RuleOutcome::Exempted => "EXEMPTED",
            RuleOutcome::InvalidRule => "INVALIDRULE",
            RuleOutcome::NotApplicable => "NOTAPPLICABLE",
        }
    }

    /// English label, used as translation key.
    pub fn label(&self) -> &'static str {
        match self {
            RuleOutcome::Conforming => "Conforming",
            RuleOutcome::NonConforming => "Non conforming",
            RuleOutcome::Disabled => "Disabled",
            RuleOutcome::Exempted => "Exempted",
            RuleOutcome::InvalidRule => "Invalid rule",
            RuleOutcome::NotApplicable => "Not applicable",
        }
    }
}

/// Everything the host fetched for the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSources {
    pub domains: Option<Vec<Domain>>,
    pub diagnostics: Option<Vec<Diagnostic>>,
    pub device_types: Option<Vec<DeviceType>>,
    pub policies: Option<Vec<Policy>>,
}

impl CatalogSources {
    /// Load sources from a JSON file. A missing file means nothing was fetched.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up a driver by its name.
    pub fn find_driver(&self, name: &str) -> Option<&DeviceType> {
        self.device_types
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|d| d.name == name)
    }

    /// Description of the first known driver, used as `Type` example.
    pub fn sample_driver_description(&self) -> Option<&str> {
        self.device_types
            .as_deref()
            .and_then(|types| types.first())
            .map(|d| d.description.as_str())
    }

    /// Whether every remote collection has arrived.
    pub fn is_complete(&self) -> bool {
        self.domains.is_some()
            && self.diagnostics.is_some()
            && self.device_types.is_some()
            && self.policies.is_some()
    }
}

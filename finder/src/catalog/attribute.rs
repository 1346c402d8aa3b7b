//! Attribute descriptors: the typed left-hand side of a fragment.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type of an attribute. Decides which operators are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SemanticType {
    Text,
    LongText,
    Numeric,
    Id,
    Date,
    IpAddress,
    MacAddress,
    Binary,
    Enum,
    DeviceType,
    /// Any type the engine has no operators for (e.g. `BINARYFILE`).
    #[serde(other)]
    Unknown,
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SemanticType::Text => "TEXT",
            SemanticType::LongText => "LONGTEXT",
            SemanticType::Numeric => "NUMERIC",
            SemanticType::Id => "ID",
            SemanticType::Date => "DATE",
            SemanticType::IpAddress => "IPADDRESS",
            SemanticType::MacAddress => "MACADDRESS",
            SemanticType::Binary => "BINARY",
            SemanticType::Enum => "ENUM",
            SemanticType::DeviceType => "DEVICETYPE",
            SemanticType::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

/// Underlying value of an enum choice. Decides whether the literal is quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    Number(i64),
    Text(String),
}

/// One selectable member of an enum attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub value: ChoiceValue,
}

impl Choice {
    pub fn text(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: ChoiceValue::Text(value.into()),
        }
    }

    pub fn number(label: impl Into<String>, value: i64) -> Self {
        Self {
            label: label.into(),
            value: ChoiceValue::Number(value),
        }
    }
}

/// Catalog an attribute came from. Only used for grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    #[default]
    Generic,
    Driver,
    ComplianceRule,
    Diagnostic,
}

/// A named, typed attribute that can appear inside `[...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    /// Key written between the brackets. Already escaped where it embeds
    /// user-supplied text.
    pub name: String,
    /// Display label.
    pub title: String,
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub scope: Scope,
    /// Placeholder value preferred over the configured examples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_value: Option<String>,
}

impl AttributeDescriptor {
    pub fn new(name: impl Into<String>, title: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            semantic_type,
            choices: Vec::new(),
            scope: Scope::Generic,
            example_value: None,
        }
    }

    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example_value = Some(example.into());
        self
    }
}

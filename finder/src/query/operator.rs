//! Operator resolution: which operators an attribute type offers.
//!
//! The table is fixed and ordered (it is the display order). Enum attributes
//! get one synthetic `IS <choice>` action per declared choice instead.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::catalog::{AttributeDescriptor, Choice, SemanticType};
use crate::labels::Translate;
use crate::Error;

use super::fragment::{Composer, Fragment};

/// Grammar operator codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorCode {
    Is,
    In,
    Contains,
    ContainsNoCase,
    StartsWith,
    EndsWith,
    Matches,
    LessThan,
    GreaterThan,
    Before,
    After,
    BeforeRelative,
    True,
    False,
}

impl OperatorCode {
    pub const ALL: [OperatorCode; 14] = [
        OperatorCode::Is,
        OperatorCode::In,
        OperatorCode::Contains,
        OperatorCode::ContainsNoCase,
        OperatorCode::StartsWith,
        OperatorCode::EndsWith,
        OperatorCode::Matches,
        OperatorCode::LessThan,
        OperatorCode::GreaterThan,
        OperatorCode::Before,
        OperatorCode::After,
        OperatorCode::BeforeRelative,
        OperatorCode::True,
        OperatorCode::False,
    ];

    /// Identifier of the operator.
    pub fn code(&self) -> &'static str {
        match self {
            OperatorCode::Is => "IS",
            OperatorCode::In => "IN",
            OperatorCode::Contains => "CONTAINS",
            OperatorCode::ContainsNoCase => "CONTAINSNOCASE",
            OperatorCode::StartsWith => "STARTSWITH",
            OperatorCode::EndsWith => "ENDSWITH",
            OperatorCode::Matches => "MATCHES",
            OperatorCode::LessThan => "LESSTHAN",
            OperatorCode::GreaterThan => "GREATERTHAN",
            OperatorCode::Before => "BEFORE",
            OperatorCode::After => "AFTER",
            OperatorCode::BeforeRelative => "BEFORERELATIVE",
            OperatorCode::True => "TRUE",
            OperatorCode::False => "FALSE",
        }
    }

    /// Keyword written into the query. Relative-before is spelled `BEFORE`
    /// and the binary operators compare with `IS`.
    pub fn keyword(&self) -> &'static str {
        match self {
            OperatorCode::BeforeRelative => "BEFORE",
            OperatorCode::True | OperatorCode::False => "IS",
            other => other.code(),
        }
    }

    /// English label, used as translation key.
    pub fn label_key(&self) -> &'static str {
        match self {
            OperatorCode::Is => "is",
            OperatorCode::In => "in",
            OperatorCode::Contains => "contains",
            OperatorCode::ContainsNoCase => "contains (no case)",
            OperatorCode::StartsWith => "starts with",
            OperatorCode::EndsWith => "ends with",
            OperatorCode::Matches => "matches",
            OperatorCode::LessThan => "less than",
            OperatorCode::GreaterThan => "greater than",
            OperatorCode::Before => "before",
            OperatorCode::After => "after",
            OperatorCode::BeforeRelative => "before (relative)",
            OperatorCode::True => "true",
            OperatorCode::False => "false",
        }
    }
}

impl fmt::Display for OperatorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for OperatorCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperatorCode::ALL
            .into_iter()
            .find(|op| op.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::NotFound(format!("operator {}", s)))
    }
}

const TEXT_OPERATORS: &[OperatorCode] = &[
    OperatorCode::Is,
    OperatorCode::Contains,
    OperatorCode::ContainsNoCase,
    OperatorCode::StartsWith,
    OperatorCode::EndsWith,
    OperatorCode::Matches,
];

const NUMERIC_OPERATORS: &[OperatorCode] =
    &[OperatorCode::Is, OperatorCode::LessThan, OperatorCode::GreaterThan];

const ID_OPERATORS: &[OperatorCode] = &[OperatorCode::Is];

const DATE_OPERATORS: &[OperatorCode] = &[
    OperatorCode::Is,
    OperatorCode::Before,
    OperatorCode::After,
    OperatorCode::BeforeRelative,
];

const ADDRESS_OPERATORS: &[OperatorCode] = &[OperatorCode::Is, OperatorCode::In];

const BINARY_OPERATORS: &[OperatorCode] = &[OperatorCode::True, OperatorCode::False];

/// How the actions of a semantic type are produced.
#[derive(Clone, Copy)]
pub enum OperatorSpec {
    /// The same operator list for every attribute of the type.
    Fixed(&'static [OperatorCode]),
    /// Actions derived from the attribute instance (enum choices).
    Dynamic(fn(&AttributeDescriptor) -> Vec<Action>),
}

impl fmt::Debug for OperatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorSpec::Fixed(ops) => f.debug_tuple("Fixed").field(ops).finish(),
            OperatorSpec::Dynamic(_) => f.debug_tuple("Dynamic").finish(),
        }
    }
}

/// How the actions of a semantic type are produced.
pub fn operator_spec(semantic_type: SemanticType) -> OperatorSpec {
    match semantic_type {
        SemanticType::Text | SemanticType::LongText | SemanticType::DeviceType => {
            OperatorSpec::Fixed(TEXT_OPERATORS)
        }
        SemanticType::Numeric => OperatorSpec::Fixed(NUMERIC_OPERATORS),
        SemanticType::Id => OperatorSpec::Fixed(ID_OPERATORS),
        SemanticType::Date => OperatorSpec::Fixed(DATE_OPERATORS),
        SemanticType::IpAddress | SemanticType::MacAddress => OperatorSpec::Fixed(ADDRESS_OPERATORS),
        SemanticType::Binary => OperatorSpec::Fixed(BINARY_OPERATORS),
        SemanticType::Enum => OperatorSpec::Dynamic(choice_actions),
        SemanticType::Unknown => OperatorSpec::Fixed(&[]),
    }
}

/// Generic operators of a semantic type. Empty for enums and unknown types.
pub fn operators_for(semantic_type: SemanticType) -> &'static [OperatorCode] {
    match operator_spec(semantic_type) {
        OperatorSpec::Fixed(ops) => ops,
        OperatorSpec::Dynamic(_) => &[],
    }
}

fn choice_actions(attribute: &AttributeDescriptor) -> Vec<Action> {
    attribute.choices.iter().cloned().map(Action::Choice).collect()
}

/// Operator labels for one locale, built once per catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorLabels {
    labels: HashMap<OperatorCode, String>,
}

impl OperatorLabels {
    pub fn localized(tr: &dyn Translate) -> Self {
        let labels = OperatorCode::ALL
            .into_iter()
            .map(|op| (op, tr.translate(op.label_key())))
            .collect();
        Self { labels }
    }

    pub fn label(&self, code: OperatorCode) -> &str {
        self.labels
            .get(&code)
            .map(String::as_str)
            .unwrap_or_else(|| code.label_key())
    }
}

/// An operator offered for an attribute, with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorDescriptor {
    pub code: OperatorCode,
    pub label: String,
}

impl OperatorDescriptor {
    /// Placeholder fragment for this operator on the given attribute.
    pub fn example_fragment(&self, attribute: &AttributeDescriptor, composer: &Composer<'_>) -> Fragment {
        composer.example(attribute, self.code)
    }
}

/// Something the user can activate once an attribute is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Operator(OperatorDescriptor),
    Choice(Choice),
}

impl Action {
    pub fn label(&self) -> &str {
        match self {
            Action::Operator(op) => &op.label,
            Action::Choice(choice) => &choice.label,
        }
    }

    /// Fragment inserted when this action is activated.
    pub fn fragment(&self, attribute: &AttributeDescriptor, composer: &Composer<'_>) -> Fragment {
        match self {
            Action::Operator(op) => op.example_fragment(attribute, composer),
            Action::Choice(choice) => composer.choice(attribute, choice),
        }
    }
}

/// Resolve the actions offered for an attribute.
pub fn actions_for(attribute: &AttributeDescriptor, labels: &OperatorLabels) -> Vec<Action> {
    match operator_spec(attribute.semantic_type) {
        OperatorSpec::Fixed(ops) => ops
            .iter()
            .map(|&code| {
                Action::Operator(OperatorDescriptor {
                    code,
                    label: labels.label(code).to_string(),
                })
            })
            .collect(),
        OperatorSpec::Dynamic(build) => build(attribute),
    }
}

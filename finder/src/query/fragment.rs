//! Fragment composition: `[Attribute] OPERATOR literal`.

use std::ops::Range;

use chrono::{NaiveDate, NaiveDateTime};

use crate::catalog::{AttributeDescriptor, Choice, ChoiceValue, SemanticType};
use crate::config::ExampleValues;

use super::literal::{Literal, MacAddress, RelativeDate};
use super::operator::OperatorCode;

/// A composed clause, ready to be spliced into the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    /// Character span of the value inside `text`, excluding quotes. This is
    /// where the user is expected to type next.
    pub value: Range<usize>,
}

impl Fragment {
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Build `[name] KEYWORD literal`.
///
/// `name` is written as is; attribute names are escaped when the catalog
/// builds them from user-supplied text.
pub fn compose(name: &str, keyword: &str, literal: &Literal) -> Fragment {
    let head = format!("[{}] {} ", name, keyword);
    let rendered = literal.to_string();
    let start = head.chars().count();
    let end = start + rendered.chars().count();
    let value = if literal.is_quoted() {
        start + 1..end - 1
    } else {
        start..end
    };
    Fragment {
        text: head + &rendered,
        value,
    }
}

/// Produces placeholder fragments from the configured example values.
#[derive(Debug, Clone, Copy)]
pub struct Composer<'a> {
    examples: &'a ExampleValues,
}

impl<'a> Composer<'a> {
    pub fn new(examples: &'a ExampleValues) -> Self {
        Self { examples }
    }

    /// Example fragment for an operator on an attribute.
    pub fn example(&self, attribute: &AttributeDescriptor, code: OperatorCode) -> Fragment {
        let literal = self.example_literal(attribute, code);
        compose(&attribute.name, code.keyword(), &literal)
    }

    /// `IS` fragment for an enum choice. String values are quoted, numbers are not.
    pub fn choice(&self, attribute: &AttributeDescriptor, choice: &Choice) -> Fragment {
        let literal = match &choice.value {
            ChoiceValue::Text(value) => Literal::Text(value.clone()),
            ChoiceValue::Number(n) => Literal::Number(*n),
        };
        compose(&attribute.name, OperatorCode::Is.keyword(), &literal)
    }

    /// Placeholder literal for an operator, preferring the attribute's own example.
    pub fn example_literal(&self, attribute: &AttributeDescriptor, code: OperatorCode) -> Literal {
        let ex = self.examples;
        let own = attribute.example_value.as_deref();

        match (attribute.semantic_type, code) {
            (_, OperatorCode::True) => Literal::Boolean(true),
            (_, OperatorCode::False) => Literal::Boolean(false),
            (_, OperatorCode::BeforeRelative) => Literal::Relative(RelativeDate::now(ex.relative_days)),
            (SemanticType::Numeric | SemanticType::Id, _) => {
                Literal::Number(own.and_then(|v| v.trim().parse().ok()).unwrap_or(ex.number))
            }
            (SemanticType::Date, _) => date_literal(own).unwrap_or(Literal::Date(ex.date)),
            (SemanticType::IpAddress, OperatorCode::In) => Literal::Subnet {
                address: ex.subnet,
                prefix: ex.subnet_prefix,
            },
            (SemanticType::IpAddress, _) => {
                Literal::Address(own.and_then(|v| v.parse().ok()).unwrap_or(ex.ip))
            }
            (SemanticType::MacAddress, OperatorCode::In) => Literal::MacPrefix {
                address: self.example_mac(None),
                prefix: ex.mac_prefix,
            },
            (SemanticType::MacAddress, _) => Literal::Mac(self.example_mac(own)),
            (_, OperatorCode::Matches) => Literal::text(own.unwrap_or(&ex.pattern)),
            _ => Literal::text(own.unwrap_or(&ex.text)),
        }
    }

    fn example_mac(&self, own: Option<&str>) -> MacAddress {
        own.and_then(|v| v.parse().ok())
            .or_else(|| self.examples.mac.parse().ok())
            .unwrap_or_else(|| {
                tracing::warn!(mac = %self.examples.mac, "invalid example MAC address, using default");
                MacAddress([0x16; 6])
            })
    }
}

fn date_literal(value: Option<&str>) -> Option<Literal> {
    let value = value?.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(Literal::Date(date));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(Literal::DateTime)
}

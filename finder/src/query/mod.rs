//! Query expression assembly.
//!
//! # Grammar surface
//!
//! ```text
//! fragment     := "[" attrname "]" operator literal
//! operator     := IS | IN | CONTAINS | CONTAINSNOCASE | STARTSWITH | ENDSWITH
//!               | MATCHES | LESSTHAN | GREATERTHAN | BEFORE | AFTER
//! literal      := quotedstring | number | bareip | cidr | mac | date | TRUE | FALSE
//! expression   := fragment | "NOT (" expression ")"
//!               | "(" expression ") AND (" expression ")"
//!               | "(" expression ") OR (" expression ")"
//! ```
//!
//! Nothing here parses existing text; fragments are generated and spliced
//! into whatever the user already typed.

mod buffer;
mod fragment;
mod literal;
mod operator;
mod surface;

pub use buffer::{CaretUpdate, Connective, QueryBuffer, Selection};
pub use fragment::{compose, Composer, Fragment};
pub use literal::{
    escape_key, escape_value, quote, unescape_value, unquote, DateAnchor, Literal, MacAddress,
    RelativeDate,
};
pub use operator::{
    actions_for, operator_spec, operators_for, Action, OperatorCode, OperatorDescriptor,
    OperatorLabels, OperatorSpec,
};
pub use surface::{Editor, HeadlessSurface, TextSurface};

#[cfg(test)]
mod tests;

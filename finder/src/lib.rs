//! Device search query builder.
//!
//! Assembles filter expressions of the form `[Attribute] OPERATOR literal`
//! from a catalog of device attributes, and splices them into a free-text
//! query buffer without ever parsing what the user already typed.

pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod init;
pub mod labels;
pub mod query;

pub use builder::{BuilderOptions, BuilderState, Button, DriverRef, QueryBuilder, QueryBuilderValue};
pub use catalog::{AttributeDescriptor, Catalog, CatalogSources, Embedding, SemanticType};
pub use config::{CaretPlacement, Config, ExampleValues};
pub use error::{Error, Result};
pub use labels::{Labels, Translate};
pub use query::{Action, Fragment, OperatorCode, Selection};

//! Error types for finder operations.
//!
//! Query assembly itself never fails; these errors come from loading
//! configuration, labels and catalog sources, or from host input that names
//! something the catalog does not know.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Unknown driver: {0}")]
    UnknownDriver(String),

    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    #[error("Invalid step: {0}")]
    InvalidStep(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

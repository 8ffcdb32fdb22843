//! Error types for pagetablelib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a dataset or configuring a render.
///
/// Rendering itself never fails: bad cells degrade to escaped text.
#[derive(Error, Debug)]
pub enum PagetableError {
    /// Failed to read a dataset file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Dataset is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON parsed but does not describe a dataset
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// The same column name appears twice in the column list
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// Page size of zero
    #[error("page size must be at least 1")]
    InvalidPageSize,

    /// An option string could not be parsed
    #[error("invalid value '{value}' for {option}")]
    InvalidOption { option: &'static str, value: String },
}

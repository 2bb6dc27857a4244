//! Error types for catalog loading

use thiserror::Error;

/// Raised when the dataset cannot be turned into a usable catalog.
///
/// All variants are fatal: a catalog is either fully loaded or not at all.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required column '{column}' is missing from the dataset header")]
    MissingColumn { column: String },

    #[error("Column '{column}' row {row}: '{value}' is not a finite number")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },
}

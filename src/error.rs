//! Error types shared by the loaders, renderers and the collator.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("File not found: {}", path.display())]
    MissingFile { path: PathBuf },
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },
    #[error("Table '{table}', column '{column}', row {row}: value is not numeric")]
    InvalidValue {
        table: String,
        column: String,
        row: usize,
    },
    #[error("Render error: {0}")]
    Render(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChartError {
    pub fn missing_column(table: &str, column: &str) -> Self {
        ChartError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

/// plotters reports backend failures through a generic `DrawingAreaErrorKind`;
/// they are flattened to text so the error type stays backend independent.
impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ChartError
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ChartError::Render(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to read a metadata source as a whole.
///
/// Individual bad cells never produce this; they are cleaned into defaults.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("unreadable Arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("unsupported type {data_type} in column '{column}'")]
    UnsupportedColumnType { column: String, data_type: String },
}

impl DataLoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DataLoadError::Io {
            path: path.into(),
            source,
        }
    }
}

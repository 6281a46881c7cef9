use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning an input file into warehouse rows.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {} at line {line}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[error("Invalid record in {} at line {line}: {source}", path.display())]
    InvalidRecord {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[error("Timestamp {0} is out of range")]
    InvalidTimestamp(i64),
}

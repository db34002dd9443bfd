//! Error types for the bill document library

use thiserror::Error;

/// Bill export error types
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO error while writing the document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid exporter configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

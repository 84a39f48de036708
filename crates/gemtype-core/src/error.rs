// this_file: crates/gemtype-core/src/error.rs

//! Error types for gemtype

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GemtypeError>;

/// Main error type for gemtype
///
/// A render call fails as a whole: when one of these comes back, no surface
/// and no link boxes were produced.
#[derive(Debug, Error)]
pub enum GemtypeError {
    #[error("given text is not valid UTF-8 (at byte {offset})")]
    InvalidEncoding { offset: usize },

    #[error("out of memory")]
    OutOfMemory,

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GemtypeError {
    /// True for the two failures a render call itself can produce
    pub fn is_render_failure(&self) -> bool {
        matches!(self, Self::InvalidEncoding { .. } | Self::OutOfMemory)
    }
}

impl From<std::collections::TryReserveError> for GemtypeError {
    fn from(_: std::collections::TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}

//! Error types for the lopdf layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps lopdf failures and converts them to [`PdfError`].

use pdfform_core::PdfError;
use thiserror::Error;

/// Error type for lopdf-backed document operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading or writing PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error serializing the document or a content stream.
    #[error("serialize error: {0}")]
    Serialize(String),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] PdfError),
}

impl From<BackendError> for PdfError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => PdfError::ParseError(msg),
            BackendError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                PdfError::FileNotFound(e.to_string())
            }
            BackendError::Io(e) => PdfError::IoError(e.to_string()),
            BackendError::Serialize(msg) => PdfError::SerializeError(msg),
            BackendError::Core(e) => e,
        }
    }
}

//! Error types for pdfform-rs.
//!
//! Provides [`PdfError`], the single fatal error type returned by every
//! public operation. Lenient conditions (unknown checkbox states, unnamed
//! widgets, overlay pages that do not exist) are not errors and never
//! surface here.

use std::fmt;

/// Fatal error types for PDF form processing.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfError {
    /// Error parsing PDF structure or syntax.
    ParseError(String),
    /// I/O error reading or writing PDF data.
    IoError(String),
    /// The requested file does not exist.
    FileNotFound(String),
    /// The input contained no bytes at all.
    EmptyFile,
    /// The document could not be serialized back to bytes.
    SerializeError(String),
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::ParseError(msg) => write!(f, "parse error: {msg}"),
            PdfError::IoError(msg) => write!(f, "I/O error: {msg}"),
            PdfError::FileNotFound(path) => write!(f, "file not found: {path}"),
            PdfError::EmptyFile => write!(f, "cannot read an empty file"),
            PdfError::SerializeError(msg) => write!(f, "serialize error: {msg}"),
            PdfError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<std::io::Error> for PdfError {
    fn from(err: std::io::Error) -> Self {
        PdfError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parse_error() {
        let err = PdfError::ParseError("bad xref".to_string());
        assert_eq!(err.to_string(), "parse error: bad xref");
    }

    #[test]
    fn display_file_not_found() {
        let err = PdfError::FileNotFound("/tmp/missing.pdf".to_string());
        assert_eq!(err.to_string(), "file not found: /tmp/missing.pdf");
    }

    #[test]
    fn display_empty_file() {
        assert_eq!(PdfError::EmptyFile.to_string(), "cannot read an empty file");
    }

    #[test]
    fn display_other_is_message_only() {
        let err = PdfError::Other("custom".to_string());
        assert_eq!(err.to_string(), "custom");
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PdfError = io_err.into();
        assert!(matches!(err, PdfError::IoError(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(PdfError::EmptyFile);
        assert!(err.to_string().contains("empty"));
    }
}

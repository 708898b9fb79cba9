//! Loading and writing whole documents.

use std::path::Path;

use pdfform_core::PdfError;

use crate::document::{FormReader, FormWriter};

/// Load a PDF from disk.
///
/// # Errors
///
/// [`PdfError::FileNotFound`] when `path` does not exist and
/// [`PdfError::EmptyFile`] when it has no content.
pub fn load_pdf(path: impl AsRef<Path>) -> Result<FormReader, PdfError> {
    FormReader::open_file(path)
}

/// Copy a reader's document into a fresh writer.
pub fn pdf_reader_to_writer(reader: &FormReader) -> FormWriter {
    FormWriter::from_reader(reader)
}

/// A document source that can be serialized: a [`FormReader`] or a
/// [`FormWriter`], by value or by reference.
pub trait IntoPdfWriter {
    fn into_pdf_writer(self) -> FormWriter;
}

impl IntoPdfWriter for FormWriter {
    fn into_pdf_writer(self) -> FormWriter {
        self
    }
}

impl IntoPdfWriter for &FormWriter {
    fn into_pdf_writer(self) -> FormWriter {
        self.clone()
    }
}

impl IntoPdfWriter for FormReader {
    fn into_pdf_writer(self) -> FormWriter {
        FormWriter::from(self)
    }
}

impl IntoPdfWriter for &FormReader {
    fn into_pdf_writer(self) -> FormWriter {
        FormWriter::from_reader(self)
    }
}

/// Serialize `pdf` to bytes.
pub fn write_pdf_to_bytes(pdf: impl IntoPdfWriter) -> Result<Vec<u8>, PdfError> {
    pdf.into_pdf_writer().to_bytes()
}

/// Serialize `pdf` to `path`, replacing any existing file.
pub fn write_pdf_to_file(pdf: impl IntoPdfWriter, path: impl AsRef<Path>) -> Result<(), PdfError> {
    pdf.into_pdf_writer().save(path)
}

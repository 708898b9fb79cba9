//! pdfform-core: Backend-independent data types for pdfform-rs.
//!
//! This crate provides the types shared by the lopdf-backed engine and the
//! CLI: the error type, field classification types, the caller's
//! field-name → value mapping, coordinate overlays, fill settings, and the
//! PDF name / text-string encoders. It does not depend on any PDF library.

pub mod encoding;
pub mod error;
pub mod form_data;
pub mod form_field;
pub mod settings;

pub use encoding::{decode_text_string, encode_text_string, name_token, pdf_encode};
pub use error::PdfError;
pub use form_data::{FieldValue, FormData, OverlayData, OverlayText, REMOVE_MARKER};
pub use form_field::{FIELD_FLAG_READ_ONLY, FieldType, FormField, WidgetKind};
pub use settings::{
    FieldAppearance, FieldNaming, FillSettings, OverlayStyle, PageSize, RemovalMode, Rgb,
};

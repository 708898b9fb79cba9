//! pdfform: Fill PDF AcroForm text fields and checkboxes.
//!
//! This is the lopdf-backed engine of pdfform-rs. It re-exports the shared
//! types from pdfform-core and adds the operations that read and edit a
//! parsed document.
//!
//! # Architecture
//!
//! - **walker**: lazy iteration over the widget annotations of every page
//! - **classify**: text field / checkbox decision for a widget
//! - **fill**: [`update_pdf_form_fields_from_dict`], the field updater
//! - **overlay**: [`manual_add_annotations`], drawing text for forms without
//!   usable fields
//! - **extract** and **write**: analysis helpers and whole-document I/O
//!
//! # Example
//!
//! ```no_run
//! use pdfform::{FillSettings, FormData, FormWriter, load_pdf, update_pdf_form_fields_from_dict};
//!
//! let reader = load_pdf("form.pdf")?;
//! let mut writer = FormWriter::from_reader(&reader);
//! let data = FormData::new()
//!     .with("Given Name Text Box", "Ada")
//!     .with("Driving License Check Box", "Yes");
//! update_pdf_form_fields_from_dict(&mut writer, &data, false, &FillSettings::default())?;
//! writer.save("filled.pdf")?;
//! # Ok::<(), pdfform::PdfError>(())
//! ```

mod acroform;
pub mod classify;
pub mod document;
pub mod error;
pub mod extract;
pub mod fill;
mod objects;
pub mod overlay;
pub mod walker;
pub mod write;

pub use classify::{appearance_states, classify, is_checkbox, is_text_field};
pub use document::{FormReader, FormWriter};
pub use error::BackendError;
pub use extract::{
    checkbox_values_of, extract_checkbox_values, extract_checkbox_values_from_file,
    extract_field_names, extract_field_names_from_file, field_names_of,
};
pub use fill::{UpdateSummary, set_read_only, update_pdf_form_fields_from_dict};
pub use overlay::{manual_add_annotations, overlay_data_from_fields};
pub use walker::{AnnotationHandle, AnnotationIter, WidgetAnnotation, resolve_field_name};
pub use write::{IntoPdfWriter, load_pdf, pdf_reader_to_writer, write_pdf_to_bytes, write_pdf_to_file};

pub use pdfform_core;
pub use pdfform_core::{
    FieldNaming, FieldType, FieldValue, FillSettings, FormData, FormField, OverlayData,
    OverlayStyle, OverlayText, PageSize, PdfError, REMOVE_MARKER, RemovalMode, WidgetKind,
    pdf_encode,
};

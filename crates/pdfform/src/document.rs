//! Reader and writer views over a parsed PDF.
//!
//! [`FormReader`] is the read-only document loaded from bytes or a path.
//! [`FormWriter`] owns a mutable copy that the updater and overlay filler
//! edit in place before it is serialized.

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};
use pdfform_core::{FieldNaming, FormData, FormField, PdfError};
use tracing::debug;

use crate::acroform;
use crate::error::BackendError;
use crate::walker::{AnnotationHandle, AnnotationIter, WidgetAnnotation, field_iter, page_annots};

/// A parsed PDF, opened for reading.
#[derive(Debug, Clone)]
pub struct FormReader {
    inner: Document,
    /// Ordered page object ids (indexed by 0-based page number).
    page_ids: Vec<ObjectId>,
}

impl FormReader {
    /// Parse a PDF from memory.
    ///
    /// # Errors
    ///
    /// [`PdfError::EmptyFile`] for zero bytes, [`PdfError::ParseError`] when
    /// lopdf rejects the input.
    pub fn open(bytes: &[u8]) -> Result<Self, PdfError> {
        if bytes.is_empty() {
            return Err(PdfError::EmptyFile);
        }
        let inner = Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;
        Ok(Self::from_document(inner))
    }

    /// Read and parse a PDF file.
    ///
    /// # Errors
    ///
    /// [`PdfError::FileNotFound`] naming the path when it does not exist,
    /// otherwise the errors of [`FormReader::open`].
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, PdfError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PdfError::FileNotFound(path.display().to_string()),
            _ => PdfError::IoError(format!("{}: {e}", path.display())),
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "read PDF file");
        Self::open(&bytes)
    }

    /// Wrap an already parsed lopdf document.
    pub fn from_document(inner: Document) -> Self {
        let page_ids: Vec<ObjectId> = inner.get_pages().values().copied().collect();
        debug!(pages = page_ids.len(), "opened PDF");
        Self { inner, page_ids }
    }

    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &Document {
        &self.inner
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Walk the widget annotations, naming fields by their partial name.
    pub fn annotations(&self) -> AnnotationIter<'_> {
        self.annotations_with(FieldNaming::default())
    }

    pub fn annotations_with(&self, naming: FieldNaming) -> AnnotationIter<'_> {
        AnnotationIter::new(&self.inner, naming)
    }

    /// Every named field of the AcroForm tree, children before parents.
    pub fn get_fields(&self) -> Vec<FormField> {
        acroform::collect_form_fields(&self.inner)
    }

    /// The annotation dictionary behind `handle`.
    pub fn annotation(&self, handle: &AnnotationHandle) -> Option<&Dictionary> {
        annotation_dict(&self.inner, handle)
    }

    /// Fully qualified names of [`FormReader::get_fields`], same order.
    pub fn field_names(&self) -> Vec<String> {
        self.get_fields().into_iter().map(|f| f.name).collect()
    }
}

/// A mutable PDF that fills are applied to.
///
/// Carries a pending "need appearances" request which is written into the
/// AcroForm dictionary when the document is serialized.
#[derive(Debug, Clone)]
pub struct FormWriter {
    inner: Document,
    page_ids: Vec<ObjectId>,
    need_appearances: bool,
}

impl FormWriter {
    /// Clone the reader's document into a new writer.
    pub fn from_reader(reader: &FormReader) -> Self {
        Self::from_document(reader.inner.clone())
    }

    pub fn from_document(inner: Document) -> Self {
        let page_ids = inner.get_pages().values().copied().collect();
        Self {
            inner,
            page_ids,
            need_appearances: false,
        }
    }

    pub fn inner(&self) -> &Document {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut Document {
        &mut self.inner
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Object id of the page at `index`.
    pub fn page_id(&self, index: usize) -> Option<ObjectId> {
        self.page_ids.get(index).copied()
    }

    pub fn annotations(&self) -> AnnotationIter<'_> {
        self.annotations_with(FieldNaming::default())
    }

    pub fn annotations_with(&self, naming: FieldNaming) -> AnnotationIter<'_> {
        AnnotationIter::new(&self.inner, naming)
    }

    /// Widgets whose field name is a key of `data`.
    pub fn field_iter<'a>(
        &'a self,
        data: &'a FormData,
        naming: FieldNaming,
    ) -> impl Iterator<Item = WidgetAnnotation> + 'a {
        field_iter(self.annotations_with(naming), data)
    }

    /// Every named field of the AcroForm tree, children before parents.
    pub fn get_fields(&self) -> Vec<FormField> {
        acroform::collect_form_fields(&self.inner)
    }

    /// The annotation dictionary behind `handle`.
    pub fn annotation(&self, handle: &AnnotationHandle) -> Option<&Dictionary> {
        annotation_dict(&self.inner, handle)
    }

    /// Mutable access to the annotation dictionary behind `handle`.
    pub fn annotation_mut(&mut self, handle: &AnnotationHandle) -> Option<&mut Dictionary> {
        match *handle {
            AnnotationHandle::Indirect(id) => {
                self.inner.get_object_mut(id).ok()?.as_dict_mut().ok()
            }
            AnnotationHandle::Direct { page_id, index } => page_annots_mut(&mut self.inner, page_id)?
                .get_mut(index)?
                .as_dict_mut()
                .ok(),
        }
    }

    /// Request that viewers regenerate field appearances.
    pub fn set_need_appearances(&mut self) {
        self.need_appearances = true;
    }

    /// Whether the request is pending or already present in the document.
    pub fn need_appearances(&self) -> bool {
        self.need_appearances || acroform::need_appearances(&self.inner)
    }

    /// Serialize the document, applying a pending need-appearances request.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, PdfError> {
        if self.need_appearances {
            acroform::set_need_appearances(&mut self.inner)?;
        }
        let mut buf = Vec::new();
        self.inner
            .save_to(&mut buf)
            .map_err(|e| BackendError::Serialize(format!("failed to save PDF: {e}")))?;
        debug!(bytes = buf.len(), "serialized PDF");
        Ok(buf)
    }

    /// Serialize the document to `path`.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), PdfError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), bytes).map_err(BackendError::from)?;
        Ok(())
    }
}

impl From<FormReader> for FormWriter {
    fn from(reader: FormReader) -> Self {
        Self {
            inner: reader.inner,
            page_ids: reader.page_ids,
            need_appearances: false,
        }
    }
}

fn annotation_dict<'a>(doc: &'a Document, handle: &AnnotationHandle) -> Option<&'a Dictionary> {
    match *handle {
        AnnotationHandle::Indirect(id) => doc.get_object(id).ok()?.as_dict().ok(),
        AnnotationHandle::Direct { page_id, index } => {
            page_annots(doc, page_id)?.get(index)?.as_dict().ok()
        }
    }
}

/// Mutable access to a page's `/Annots` array, resolving an indirect array.
pub(crate) fn page_annots_mut(doc: &mut Document, page_id: ObjectId) -> Option<&mut Vec<Object>> {
    let annots_ref = match doc.get_object(page_id).ok()?.as_dict().ok()?.get(b"Annots").ok()? {
        Object::Reference(id) => Some(*id),
        _ => None,
    };
    match annots_ref {
        Some(id) => doc.get_object_mut(id).ok()?.as_array_mut().ok(),
        None => doc
            .get_object_mut(page_id)
            .ok()?
            .as_dict_mut()
            .ok()?
            .get_mut(b"Annots")
            .ok()?
            .as_array_mut()
            .ok(),
    }
}

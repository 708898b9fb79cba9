//! Annotation walker: discovers widget annotations page by page.
//!
//! [`AnnotationIter`] yields one [`WidgetAnnotation`] per `/Widget` entry of
//! each page's `/Annots` array, pages in document order and widgets in
//! array order. Pages are read lazily, one at a time, as the iterator
//! advances.

use std::collections::VecDeque;

use lopdf::{Dictionary, Document, Object, ObjectId};
use pdfform_core::{FieldNaming, FormData};
use tracing::{debug, trace};

use crate::objects::{MAX_TREE_DEPTH, has_name, resolve_object, text_entry};

/// Where a widget annotation dictionary lives in the object graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationHandle {
    /// An indirect object (the usual case for widgets).
    Indirect(ObjectId),
    /// A dictionary stored inline in a page's `/Annots` array.
    Direct {
        /// The page owning the `/Annots` array.
        page_id: ObjectId,
        /// Position within the array.
        index: usize,
    },
}

/// A widget annotation found by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetAnnotation {
    /// Locator for reading or mutating the annotation dictionary.
    pub handle: AnnotationHandle,
    /// The logical field name, if one could be resolved.
    pub field_name: Option<String>,
    /// 0-based page index.
    pub page_index: usize,
    /// Object id of the page the widget sits on.
    pub page_id: ObjectId,
}

/// Lazy iterator over the widget annotations of a document.
///
/// Created by `FormReader::annotations()` / `FormWriter::annotations()`.
/// The iterator is finite and not restartable; create a new one to walk
/// again.
pub struct AnnotationIter<'a> {
    doc: &'a Document,
    page_ids: Vec<ObjectId>,
    naming: FieldNaming,
    next_page: usize,
    pending: VecDeque<WidgetAnnotation>,
}

impl<'a> AnnotationIter<'a> {
    /// Walk every page of `doc`, resolving names with `naming`.
    pub fn new(doc: &'a Document, naming: FieldNaming) -> Self {
        Self {
            doc,
            page_ids: doc.get_pages().values().copied().collect(),
            naming,
            next_page: 0,
            pending: VecDeque::new(),
        }
    }

    fn load_page(&mut self, page_index: usize) {
        let page_id = self.page_ids[page_index];
        debug!(page_index, "scanning page for widgets");

        let Some(annots) = page_annots(self.doc, page_id) else {
            debug!(page_index, "no annotations");
            return;
        };

        for (index, entry) in annots.iter().enumerate() {
            let (handle, dict) = match entry {
                Object::Reference(id) => match self.doc.get_object(*id).and_then(Object::as_dict) {
                    Ok(dict) => (AnnotationHandle::Indirect(*id), dict),
                    Err(_) => continue, // Skip unresolvable references
                },
                Object::Dictionary(dict) => (AnnotationHandle::Direct { page_id, index }, dict),
                _ => continue,
            };

            if !has_name(dict, b"Subtype", b"Widget") {
                trace!(page_index, index, "annotation is not a widget");
                continue;
            }

            let field_name = resolve_field_name(self.doc, dict, self.naming);
            trace!(page_index, index, field_name = ?field_name, "widget");
            self.pending.push_back(WidgetAnnotation {
                handle,
                field_name,
                page_index,
                page_id,
            });
        }
    }
}

impl Iterator for AnnotationIter<'_> {
    type Item = WidgetAnnotation;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(widget) = self.pending.pop_front() {
                return Some(widget);
            }
            if self.next_page >= self.page_ids.len() {
                return None;
            }
            let page_index = self.next_page;
            self.next_page += 1;
            self.load_page(page_index);
        }
    }
}

impl std::iter::FusedIterator for AnnotationIter<'_> {}

/// Restrict a walk to widgets whose field name is a key of `data`.
pub fn field_iter<'a, I>(widgets: I, data: &'a FormData) -> impl Iterator<Item = WidgetAnnotation> + 'a
where
    I: Iterator<Item = WidgetAnnotation> + 'a,
{
    widgets.filter(move |widget| {
        widget
            .field_name
            .as_deref()
            .is_some_and(|name| data.contains(name))
    })
}

/// A page's `/Annots` array, resolving an indirect array.
pub(crate) fn page_annots(doc: &Document, page_id: ObjectId) -> Option<&Vec<Object>> {
    let page = doc.get_object(page_id).ok()?.as_dict().ok()?;
    let annots = page.get(b"Annots").ok()?;
    resolve_object(doc, annots).as_array().ok()
}

/// Resolve the logical field name of a widget dictionary.
///
/// With [`FieldNaming::Partial`] this is the widget's own `/T`, else the
/// `/T` of its direct `/Parent`. With [`FieldNaming::FullyQualified`] the
/// `/T` entries from the root of the field tree down are joined with `.`.
pub fn resolve_field_name(doc: &Document, dict: &Dictionary, naming: FieldNaming) -> Option<String> {
    match naming {
        FieldNaming::Partial => {
            if let Some(name) = text_entry(doc, dict, b"T") {
                return Some(name);
            }
            let parent = parent_dict(doc, dict)?;
            text_entry(doc, parent, b"T")
        }
        FieldNaming::FullyQualified => {
            let mut segments = Vec::new();
            let mut current = dict;
            for _ in 0..MAX_TREE_DEPTH {
                if let Some(name) = text_entry(doc, current, b"T") {
                    segments.push(name);
                }
                match parent_dict(doc, current) {
                    Some(parent) => current = parent,
                    None => break,
                }
            }
            if segments.is_empty() {
                return None;
            }
            segments.reverse();
            Some(segments.join("."))
        }
    }
}

fn parent_dict<'a>(doc: &'a Document, dict: &'a Dictionary) -> Option<&'a Dictionary> {
    let parent = dict.get(b"Parent").ok()?;
    resolve_object(doc, parent).as_dict().ok()
}

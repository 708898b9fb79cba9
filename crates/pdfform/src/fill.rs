//! Field updater: applies a name → value mapping to every matching widget.

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use pdfform_core::{
    FIELD_FLAG_READ_ONLY, FieldValue, FillSettings, FormData, PdfError, RemovalMode, WidgetKind,
    encode_text_string, name_token, pdf_encode,
};
use tracing::{debug, trace};

use crate::acroform;
use crate::classify::{appearance_states, classify};
use crate::document::{FormWriter, page_annots_mut};
use crate::walker::{AnnotationHandle, WidgetAnnotation};

/// State name every checkbox falls back to.
const OFF_STATE: &[u8] = b"Off";

/// What an update did. Counts are per widget, not per field name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Text widgets given a new `/V`.
    pub text_fields: usize,
    /// Checkbox widgets given a new state, including fallbacks.
    pub checkboxes: usize,
    /// Checkbox widgets set to `/Off` because the value was not a legal state.
    pub checkbox_fallbacks: usize,
    /// Widgets hidden or deleted by the removal marker.
    pub removed: usize,
    /// Widgets whose only change was the read-only flag.
    pub read_only_only: usize,
    /// Matched widgets that are neither text fields nor checkboxes.
    pub unsupported: usize,
}

impl UpdateSummary {
    /// Number of widgets that were changed.
    pub fn changed(&self) -> usize {
        self.text_fields + self.checkboxes + self.removed + self.read_only_only
    }
}

/// Fill every widget whose field name is a key of `data`.
///
/// * [`FieldValue::Unset`] only applies the read-only flag, when requested.
/// * [`FieldValue::Remove`] hides the widget by dropping its `/Rect`, or
///   deletes it outright under [`RemovalMode::Delete`].
/// * Text fields get `/V` and the configured `/DA`.
/// * Checkboxes get `/V` and `/AS` set to the matching `/AP /N` state, or
///   `/Off` when the value names no legal state.
///
/// The writer's need-appearances request is set so viewers render the new
/// values.
pub fn update_pdf_form_fields_from_dict(
    writer: &mut FormWriter,
    data: &FormData,
    read_only: bool,
    settings: &FillSettings,
) -> Result<UpdateSummary, PdfError> {
    let matched: Vec<WidgetAnnotation> = writer.field_iter(data, settings.naming).collect();
    debug!(matched = matched.len(), fields = data.len(), "updating form fields");

    let appearance = settings.field_appearance.default_appearance();
    let mut summary = UpdateSummary::default();
    let mut deletions = Vec::new();

    for widget in &matched {
        let Some(name) = widget.field_name.as_deref() else {
            continue;
        };
        let Some(value) = data.get(name) else {
            continue;
        };

        let text = match value {
            FieldValue::Unset => {
                if read_only {
                    if let Some(annot) = writer.annotation_mut(&widget.handle) {
                        set_read_only(annot);
                        summary.read_only_only += 1;
                    }
                }
                continue;
            }
            FieldValue::Remove => {
                match settings.removal {
                    RemovalMode::HideRect => {
                        if let Some(annot) = writer.annotation_mut(&widget.handle) {
                            annot.remove(b"Rect");
                            summary.removed += 1;
                            debug!(field = name, page = widget.page_index, "hid widget");
                        }
                    }
                    RemovalMode::Delete => deletions.push(widget.clone()),
                }
                continue;
            }
            FieldValue::Text(text) => text,
        };

        let Some(annot) = writer.annotation(&widget.handle) else {
            continue;
        };
        match classify(annot) {
            WidgetKind::Text => {
                let Some(annot) = writer.annotation_mut(&widget.handle) else {
                    continue;
                };
                annot.set(
                    "V",
                    Object::String(encode_text_string(text), StringFormat::Literal),
                );
                annot.set("DA", Object::string_literal(appearance.as_str()));
                if read_only {
                    set_read_only(annot);
                }
                summary.text_fields += 1;
                trace!(field = name, "filled text field");
            }
            WidgetKind::Checkbox => {
                let states = appearance_states(writer.inner(), annot);
                let state = match_checkbox_state(&states, text);
                if state.is_none() {
                    debug!(field = name, value = %text, "no matching checkbox state, using /Off");
                    summary.checkbox_fallbacks += 1;
                }
                let state = state.unwrap_or_else(|| OFF_STATE.to_vec());
                let Some(annot) = writer.annotation_mut(&widget.handle) else {
                    continue;
                };
                annot.set("V", Object::Name(state.clone()));
                annot.set("AS", Object::Name(state));
                if read_only {
                    set_read_only(annot);
                }
                summary.checkboxes += 1;
            }
            WidgetKind::Other => {
                trace!(field = name, "widget is neither text field nor checkbox");
                summary.unsupported += 1;
            }
        }
    }

    if !deletions.is_empty() {
        summary.removed += delete_widgets(writer.inner_mut(), deletions);
    }
    if summary.text_fields > 0 {
        let font = &settings.field_appearance;
        acroform::ensure_font_resource(
            writer.inner_mut(),
            &font.font_resource,
            &font.base_font,
        )?;
    }
    writer.set_need_appearances();

    debug!(?summary, "form update finished");
    Ok(summary)
}

/// Set the read-only bit of `/Ff`, keeping every other flag bit.
pub fn set_read_only(annotation: &mut Dictionary) {
    let flags = match annotation.get(b"Ff") {
        Ok(Object::Integer(n)) => *n,
        _ => 0,
    };
    annotation.set("Ff", flags | i64::from(FIELD_FLAG_READ_ONLY));
}

/// The state among `states` whose name token equals the encoded `value`.
fn match_checkbox_state(states: &[Vec<u8>], value: &str) -> Option<Vec<u8>> {
    let wanted = pdf_encode(value)?;
    states
        .iter()
        .find(|state| name_token(state) == wanted)
        .cloned()
}

/// Remove widgets from the page tree and the field tree. Returns how many
/// were removed.
fn delete_widgets(doc: &mut Document, mut widgets: Vec<WidgetAnnotation>) -> usize {
    // Inline entries go first, highest index first, so earlier removals do
    // not shift the indices of later ones.
    widgets.sort_by_key(|w| match w.handle {
        AnnotationHandle::Direct { index, .. } => (0, usize::MAX - index),
        AnnotationHandle::Indirect(_) => (1, 0),
    });

    let mut removed = 0;
    for widget in &widgets {
        match widget.handle {
            AnnotationHandle::Direct { page_id, index } => {
                if let Some(annots) = page_annots_mut(doc, page_id) {
                    if index < annots.len() {
                        annots.remove(index);
                        removed += 1;
                    }
                }
            }
            AnnotationHandle::Indirect(id) => {
                let parent = doc
                    .get_object(id)
                    .and_then(Object::as_dict)
                    .ok()
                    .and_then(|d| d.get(b"Parent").ok())
                    .and_then(|p| p.as_reference().ok());
                if let Some(annots) = page_annots_mut(doc, widget.page_id) {
                    annots.retain(|entry| !is_reference_to(entry, id));
                }
                acroform::remove_from_fields(doc, id);
                if let Some(parent_id) = parent {
                    remove_kid(doc, parent_id, id);
                }
                doc.objects.remove(&id);
                removed += 1;
            }
        }
        debug!(
            field = widget.field_name.as_deref().unwrap_or_default(),
            page = widget.page_index,
            "deleted widget"
        );
    }
    removed
}

fn is_reference_to(entry: &Object, id: ObjectId) -> bool {
    matches!(entry, Object::Reference(r) if *r == id)
}

/// Drop `kid` from the `/Kids` array of `parent_id`.
fn remove_kid(doc: &mut Document, parent_id: ObjectId, kid: ObjectId) {
    let kids_ref = doc
        .get_object(parent_id)
        .and_then(Object::as_dict)
        .ok()
        .and_then(|d| d.get(b"Kids").ok())
        .and_then(|k| match k {
            Object::Reference(id) => Some(Some(*id)),
            Object::Array(_) => Some(None),
            _ => None,
        });
    let kids = match kids_ref {
        Some(Some(id)) => doc.get_object_mut(id).and_then(Object::as_array_mut).ok(),
        Some(None) => doc
            .get_object_mut(parent_id)
            .and_then(Object::as_dict_mut)
            .and_then(|d| d.get_mut(b"Kids"))
            .and_then(Object::as_array_mut)
            .ok(),
        None => None,
    };
    if let Some(kids) = kids {
        kids.retain(|entry| !is_reference_to(entry, kid));
    }
}

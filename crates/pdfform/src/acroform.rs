//! Access to the document-level `/AcroForm` dictionary.
//!
//! Reads the field tree for [`collect_form_fields`] and performs the few
//! document-level edits a fill needs: the `/NeedAppearances` request, the
//! default font resource referenced by `/DA`, and removing deleted fields
//! from `/Fields`.

use std::collections::HashSet;

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use pdfform_core::{FieldType, FormField};

use crate::error::BackendError;
use crate::objects::{
    MAX_TREE_DEPTH, catalog, catalog_id, dict_entry, name_entry, resolve_object, text_entry,
    value_entry,
};

/// The `/AcroForm` dictionary, if the document has one.
pub(crate) fn acroform(doc: &Document) -> Option<&Dictionary> {
    dict_entry(doc, catalog(doc)?, b"AcroForm")?.as_dict().ok()
}

/// Mutable access to the `/AcroForm` dictionary, creating an empty one in
/// the catalog when absent.
pub(crate) fn acroform_mut(doc: &mut Document) -> Result<&mut Dictionary, BackendError> {
    let root_id = catalog_id(doc)
        .ok_or_else(|| BackendError::Parse("document has no /Root catalog".to_string()))?;

    let existing = doc
        .get_object(root_id)
        .and_then(Object::as_dict)
        .map_err(|e| BackendError::Parse(format!("failed to get catalog: {e}")))?
        .get(b"AcroForm")
        .ok()
        .cloned();

    match existing {
        Some(Object::Reference(id)) => doc
            .get_object_mut(id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| BackendError::Parse(format!("failed to resolve /AcroForm: {e}"))),
        Some(Object::Dictionary(_)) | None => {
            let catalog = doc
                .get_object_mut(root_id)
                .and_then(Object::as_dict_mut)
                .map_err(|e| BackendError::Parse(format!("failed to get catalog: {e}")))?;
            if !matches!(catalog.get(b"AcroForm"), Ok(Object::Dictionary(_))) {
                catalog.set("AcroForm", dictionary! { "Fields" => Vec::<Object>::new() });
            }
            catalog
                .get_mut(b"AcroForm")
                .and_then(Object::as_dict_mut)
                .map_err(|e| BackendError::Parse(format!("invalid /AcroForm: {e}")))
        }
        Some(other) => Err(BackendError::Parse(format!(
            "/AcroForm is not a dictionary: {other:?}"
        ))),
    }
}

/// Whether `/AcroForm /NeedAppearances` is `true`.
pub(crate) fn need_appearances(doc: &Document) -> bool {
    acroform(doc)
        .and_then(|form| form.get(b"NeedAppearances").ok())
        .is_some_and(|v| matches!(v, Object::Boolean(true)))
}

/// Ask viewers to regenerate field appearances from `/V` and `/DA`.
pub(crate) fn set_need_appearances(doc: &mut Document) -> Result<(), BackendError> {
    acroform_mut(doc)?.set("NeedAppearances", Object::Boolean(true));
    Ok(())
}

/// Register `base_font` as `/DR /Font /<resource>` unless the form already
/// defines that resource name.
pub(crate) fn ensure_font_resource(
    doc: &mut Document,
    resource: &str,
    base_font: &str,
) -> Result<(), BackendError> {
    let existing = acroform(doc)
        .and_then(|form| dict_entry(doc, form, b"DR"))
        .and_then(|dr| dr.as_dict().ok())
        .and_then(|dr| dict_entry(doc, dr, b"Font"))
        .and_then(|fonts| fonts.as_dict().ok())
        .is_some_and(|fonts| fonts.has(resource.as_bytes()));
    if existing {
        return Ok(());
    }

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    });

    // Resolve indirect /DR and /Font into owned copies we can extend.
    let form = acroform(doc);
    let mut dr = form
        .and_then(|f| dict_entry(doc, f, b"DR"))
        .and_then(|o| o.as_dict().ok())
        .cloned()
        .unwrap_or_default();
    let mut fonts = dict_entry(doc, &dr, b"Font")
        .and_then(|o| o.as_dict().ok())
        .cloned()
        .unwrap_or_default();
    fonts.set(resource, font_id);
    dr.set("Font", fonts);
    acroform_mut(doc)?.set("DR", dr);
    Ok(())
}

/// Remove a reference to `field_id` from `/AcroForm /Fields`.
pub(crate) fn remove_from_fields(doc: &mut Document, field_id: ObjectId) {
    let fields_ref = match acroform(doc).and_then(|form| form.get(b"Fields").ok()) {
        Some(Object::Reference(id)) => Some(*id),
        Some(_) => None,
        None => return,
    };
    let fields = match fields_ref {
        Some(id) => doc.get_object_mut(id).and_then(Object::as_array_mut).ok(),
        None => acroform_mut(doc)
            .ok()
            .and_then(|form| form.get_mut(b"Fields").ok())
            .and_then(|o| o.as_array_mut().ok()),
    };
    if let Some(fields) = fields {
        fields.retain(|entry| !matches!(entry, Object::Reference(id) if *id == field_id));
    }
}

/// Collect every named field of the AcroForm field tree.
///
/// Names are fully qualified (ancestor `/T` entries joined with `.`).
/// Children are listed before their parent, and roots follow `/Fields`
/// order. Nodes without `/T` (pure widgets) are not fields and are skipped.
pub(crate) fn collect_form_fields(doc: &Document) -> Vec<FormField> {
    let Some(form) = acroform(doc) else {
        return Vec::new();
    };
    let Some(roots) = dict_entry(doc, form, b"Fields").and_then(|o| o.as_array().ok()) else {
        return Vec::new();
    };

    let mut fields = Vec::new();
    let mut visited = HashSet::new();
    for root in roots {
        walk_field_tree(doc, root, None, None, 0, &mut visited, &mut fields);
    }
    fields
}

fn walk_field_tree(
    doc: &Document,
    node: &Object,
    parent_name: Option<&str>,
    inherited_ft: Option<FieldType>,
    depth: usize,
    visited: &mut HashSet<ObjectId>,
    fields: &mut Vec<FormField>,
) {
    if depth >= MAX_TREE_DEPTH {
        return;
    }
    if let Object::Reference(id) = node {
        if !visited.insert(*id) {
            return;
        }
    }
    let Ok(dict) = resolve_object(doc, node).as_dict() else {
        return;
    };

    let partial_name = text_entry(doc, dict, b"T");
    let full_name = match (parent_name, &partial_name) {
        (Some(parent), Some(name)) => Some(format!("{parent}.{name}")),
        (Some(parent), None) => Some(parent.to_string()),
        (None, Some(name)) => Some(name.clone()),
        (None, None) => None,
    };

    let field_type = name_entry(dict, b"FT")
        .and_then(|name| FieldType::from_pdf_name(&String::from_utf8_lossy(name)))
        .or(inherited_ft);

    let mut is_group = false;
    if let Some(kids) = dict_entry(doc, dict, b"Kids").and_then(|o| o.as_array().ok()) {
        for kid in kids {
            let kid_is_field = resolve_object(doc, kid)
                .as_dict()
                .is_ok_and(|d| d.has(b"T"));
            if kid_is_field {
                is_group = true;
                walk_field_tree(
                    doc,
                    kid,
                    full_name.as_deref(),
                    field_type,
                    depth + 1,
                    visited,
                    fields,
                );
            }
        }
    }

    // Only nodes that carry their own /T are fields in their own right.
    if let (Some(_), Some(name)) = (partial_name, full_name) {
        let flags = match dict.get(b"Ff") {
            Ok(Object::Integer(n)) => u32::try_from(*n).unwrap_or_default(),
            _ => 0,
        };
        fields.push(FormField {
            name,
            field_type,
            value: value_entry(doc, dict, b"V"),
            flags,
            is_group,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_catalog(catalog_extra: Option<(&str, Object)>) -> Document {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let mut catalog = dictionary! { "Type" => "Catalog", "Pages" => pages_id };
        if let Some((key, value)) = catalog_extra {
            catalog.set(key, value);
        }
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", catalog_id);
        doc
    }

    #[test]
    fn need_appearances_creates_acroform() {
        let mut doc = doc_with_catalog(None);
        assert!(!need_appearances(&doc));
        set_need_appearances(&mut doc).unwrap();
        assert!(need_appearances(&doc));
        assert!(acroform(&doc).unwrap().has(b"Fields"));
    }

    #[test]
    fn need_appearances_on_indirect_acroform() {
        let mut doc = doc_with_catalog(None);
        let form_id = doc.add_object(dictionary! { "Fields" => Vec::<Object>::new() });
        let root = catalog_id(&doc).unwrap();
        doc.get_object_mut(root)
            .and_then(Object::as_dict_mut)
            .unwrap()
            .set("AcroForm", form_id);

        set_need_appearances(&mut doc).unwrap();
        let form = doc.get_object(form_id).and_then(Object::as_dict).unwrap();
        assert!(matches!(form.get(b"NeedAppearances"), Ok(Object::Boolean(true))));
    }

    #[test]
    fn ensure_font_resource_adds_once() {
        let mut doc = doc_with_catalog(None);
        ensure_font_resource(&mut doc, "Helv", "Helvetica").unwrap();
        let before = doc.objects.len();
        ensure_font_resource(&mut doc, "Helv", "Helvetica").unwrap();
        assert_eq!(doc.objects.len(), before);

        let form = acroform(&doc).unwrap();
        let dr = form.get(b"DR").and_then(Object::as_dict).unwrap();
        let fonts = dr.get(b"Font").and_then(Object::as_dict).unwrap();
        assert!(fonts.has(b"Helv"));
    }

    #[test]
    fn remove_from_fields_drops_reference() {
        let mut doc = doc_with_catalog(None);
        let a = doc.add_object(dictionary! { "T" => Object::string_literal("a") });
        let b = doc.add_object(dictionary! { "T" => Object::string_literal("b") });
        acroform_mut(&mut doc)
            .unwrap()
            .set("Fields", vec![Object::Reference(a), Object::Reference(b)]);

        remove_from_fields(&mut doc, a);
        let names: Vec<_> = collect_form_fields(&doc).into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["b"]);
    }

    #[test]
    fn field_tree_is_post_order_with_qualified_names() {
        let mut doc = doc_with_catalog(None);
        let root_id = doc.new_object_id();
        let page_id = doc.new_object_id();
        let name_id = doc.add_object(dictionary! {
            "T" => Object::string_literal("Name[0]"),
            "FT" => "Tx",
            "V" => Object::string_literal("Ada"),
            "Parent" => page_id,
        });
        let check_id = doc.add_object(dictionary! {
            "T" => Object::string_literal("Agree[0]"),
            "FT" => "Btn",
            "V" => "Off",
            "Ff" => 1,
            "Parent" => page_id,
        });
        doc.objects.insert(
            page_id,
            Object::Dictionary(dictionary! {
                "T" => Object::string_literal("Page1[0]"),
                "Kids" => vec![Object::Reference(name_id), Object::Reference(check_id)],
                "Parent" => root_id,
            }),
        );
        doc.objects.insert(
            root_id,
            Object::Dictionary(dictionary! {
                "T" => Object::string_literal("form[0]"),
                "Kids" => vec![Object::Reference(page_id)],
            }),
        );
        acroform_mut(&mut doc)
            .unwrap()
            .set("Fields", vec![Object::Reference(root_id)]);

        let fields = collect_form_fields(&doc);
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "form[0].Page1[0].Name[0]",
                "form[0].Page1[0].Agree[0]",
                "form[0].Page1[0]",
                "form[0]",
            ]
        );
        assert_eq!(fields[0].field_type, Some(FieldType::Text));
        assert_eq!(fields[0].value.as_deref(), Some("Ada"));
        assert!(fields[1].is_read_only());
        assert!(fields[2].is_group);
        assert_eq!(fields[3].field_type, None);
    }

    #[test]
    fn out_of_range_field_flags_read_as_zero() {
        let mut doc = doc_with_catalog(None);
        let negative = doc.add_object(dictionary! {
            "T" => Object::string_literal("negative"),
            "FT" => "Tx",
            "Ff" => -1,
        });
        let huge = doc.add_object(dictionary! {
            "T" => Object::string_literal("huge"),
            "FT" => "Tx",
            "Ff" => 0x1_0000_0001_i64,
        });
        acroform_mut(&mut doc)
            .unwrap()
            .set("Fields", vec![Object::Reference(negative), Object::Reference(huge)]);

        let fields = collect_form_fields(&doc);
        assert_eq!(fields.len(), 2);
        assert!(fields.iter().all(|f| f.flags == 0 && !f.is_read_only()));
    }

    #[test]
    fn widget_kids_are_not_fields() {
        let mut doc = doc_with_catalog(None);
        let parent_id = doc.new_object_id();
        let w1 = doc.add_object(dictionary! { "Subtype" => "Widget", "Parent" => parent_id });
        let w2 = doc.add_object(dictionary! { "Subtype" => "Widget", "Parent" => parent_id });
        doc.objects.insert(
            parent_id,
            Object::Dictionary(dictionary! {
                "T" => Object::string_literal("choice"),
                "FT" => "Btn",
                "Kids" => vec![Object::Reference(w1), Object::Reference(w2)],
            }),
        );
        acroform_mut(&mut doc)
            .unwrap()
            .set("Fields", vec![Object::Reference(parent_id)]);

        let fields = collect_form_fields(&doc);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "choice");
        assert!(!fields[0].is_group);
    }

    #[test]
    fn no_acroform_means_no_fields() {
        let doc = doc_with_catalog(None);
        assert!(collect_form_fields(&doc).is_empty());
    }

    #[test]
    fn inline_acroform_is_read() {
        let doc = doc_with_catalog(Some((
            "AcroForm",
            Object::Dictionary(dictionary! {
                "Fields" => Vec::<Object>::new(),
                "NeedAppearances" => true,
            }),
        )));
        assert!(need_appearances(&doc));
    }
}

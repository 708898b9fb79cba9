//! Field classifier: text field vs checkbox.

use lopdf::{Dictionary, Document};
use pdfform_core::{FieldType, WidgetKind};

use crate::objects::{dict_entry, has_name};

/// `/FT /Tx` on the widget itself.
pub fn is_text_field(annotation: &Dictionary) -> bool {
    has_name(annotation, b"FT", FieldType::Text.as_pdf_name().as_bytes())
}

/// `/FT /Btn`, or any widget carrying an `/AS` appearance state.
///
/// The `/AS` check also catches radio-button members that inherit their
/// field type from a parent.
pub fn is_checkbox(annotation: &Dictionary) -> bool {
    has_name(annotation, b"FT", FieldType::Button.as_pdf_name().as_bytes())
        || annotation.has(b"AS")
}

/// Classify a widget. Text is checked first, so a `/Tx` widget with an
/// `/AS` entry is still a text field.
pub fn classify(annotation: &Dictionary) -> WidgetKind {
    if is_text_field(annotation) {
        WidgetKind::Text
    } else if is_checkbox(annotation) {
        WidgetKind::Checkbox
    } else {
        WidgetKind::Other
    }
}

/// The legal appearance-state names of a checkbox: the keys of `/AP /N`,
/// in dictionary order, as raw name bytes (`b"Off"`, `b"Yes"`).
///
/// Returns an empty list when the widget has no normal appearance
/// dictionary.
pub fn appearance_states(doc: &Document, annotation: &Dictionary) -> Vec<Vec<u8>> {
    let Some(ap) = dict_entry(doc, annotation, b"AP").and_then(|o| o.as_dict().ok()) else {
        return Vec::new();
    };
    match dict_entry(doc, ap, b"N").and_then(|o| o.as_dict().ok()) {
        Some(normal) => normal.iter().map(|(name, _)| name.clone()).collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Object, Stream, dictionary};

    #[test]
    fn text_field_by_ft() {
        let annot = dictionary! { "Subtype" => "Widget", "FT" => "Tx" };
        assert!(is_text_field(&annot));
        assert!(!is_checkbox(&annot));
        assert_eq!(classify(&annot), WidgetKind::Text);
    }

    #[test]
    fn checkbox_by_ft() {
        let annot = dictionary! { "Subtype" => "Widget", "FT" => "Btn" };
        assert!(is_checkbox(&annot));
        assert_eq!(classify(&annot), WidgetKind::Checkbox);
    }

    #[test]
    fn checkbox_by_appearance_state_without_ft() {
        let annot = dictionary! { "Subtype" => "Widget", "AS" => "Off" };
        assert!(is_checkbox(&annot));
        assert!(!is_text_field(&annot));
    }

    #[test]
    fn text_wins_when_both_predicates_hold() {
        let annot = dictionary! { "Subtype" => "Widget", "FT" => "Tx", "AS" => "Off" };
        assert!(is_text_field(&annot));
        assert!(is_checkbox(&annot));
        assert_eq!(classify(&annot), WidgetKind::Text);
    }

    #[test]
    fn choice_and_signature_are_other() {
        let choice = dictionary! { "Subtype" => "Widget", "FT" => "Ch" };
        let sig = dictionary! { "Subtype" => "Widget", "FT" => "Sig" };
        assert_eq!(classify(&choice), WidgetKind::Other);
        assert_eq!(classify(&sig), WidgetKind::Other);
    }

    #[test]
    fn ft_as_string_is_not_a_name() {
        let annot = dictionary! { "FT" => Object::string_literal("Tx") };
        assert!(!is_text_field(&annot));
    }

    #[test]
    fn appearance_states_in_dictionary_order() {
        let mut doc = Document::with_version("1.7");
        let off = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let yes = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let normal_id = doc.add_object(dictionary! { "Off" => off, "Yes" => yes });
        let annot = dictionary! {
            "FT" => "Btn",
            "AP" => dictionary! { "N" => normal_id },
        };
        assert_eq!(
            appearance_states(&doc, &annot),
            vec![b"Off".to_vec(), b"Yes".to_vec()]
        );
    }

    #[test]
    fn appearance_states_missing_ap() {
        let doc = Document::with_version("1.7");
        let annot = dictionary! { "FT" => "Btn" };
        assert!(appearance_states(&doc, &annot).is_empty());
    }
}

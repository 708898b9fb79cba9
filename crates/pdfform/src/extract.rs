//! Analysis helpers used when mapping data onto an unknown form.

use std::path::Path;

use indexmap::IndexMap;
use pdfform_core::{PdfError, name_token};

use crate::classify::{appearance_states, is_checkbox};
use crate::document::FormReader;

/// The field name of every widget, in walk order. Unnamed widgets appear
/// as `None`.
pub fn extract_field_names(bytes: &[u8]) -> Result<Vec<Option<String>>, PdfError> {
    Ok(field_names_of(&FormReader::open(bytes)?))
}

pub fn extract_field_names_from_file(
    path: impl AsRef<Path>,
) -> Result<Vec<Option<String>>, PdfError> {
    Ok(field_names_of(&FormReader::open_file(path)?))
}

/// Checkbox field name → the state names its widgets accept, rendered as
/// name tokens (`"/Off"`, `"/Yes"`).
///
/// Widgets sharing a name (radio groups, repeated checkboxes) have their
/// states appended in walk order. Checkboxes without a resolvable name are
/// skipped.
pub fn extract_checkbox_values(bytes: &[u8]) -> Result<IndexMap<String, Vec<String>>, PdfError> {
    Ok(checkbox_values_of(&FormReader::open(bytes)?))
}

pub fn extract_checkbox_values_from_file(
    path: impl AsRef<Path>,
) -> Result<IndexMap<String, Vec<String>>, PdfError> {
    Ok(checkbox_values_of(&FormReader::open_file(path)?))
}

/// [`extract_field_names`] for an already opened document.
pub fn field_names_of(reader: &FormReader) -> Vec<Option<String>> {
    reader.annotations().map(|w| w.field_name).collect()
}

/// [`extract_checkbox_values`] for an already opened document.
pub fn checkbox_values_of(reader: &FormReader) -> IndexMap<String, Vec<String>> {
    let doc = reader.inner();
    let mut values: IndexMap<String, Vec<String>> = IndexMap::new();

    for widget in reader.annotations() {
        let Some(name) = widget.field_name else {
            continue;
        };
        let Some(annot) = reader.annotation(&widget.handle) else {
            continue;
        };
        if !is_checkbox(annot) {
            continue;
        }
        let states = appearance_states(doc, annot)
            .into_iter()
            .map(|state| name_token(&state));
        values.entry(name).or_default().extend(states);
    }
    values
}

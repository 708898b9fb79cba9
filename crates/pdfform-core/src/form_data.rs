//! Caller input: the field-name → value mapping and coordinate overlays.

use std::collections::{BTreeSet, HashMap};

/// Reserved value meaning "hide or delete this widget" rather than fill it.
pub const REMOVE_MARKER: &str = "__remove_annotation_from_pdf__";

/// The value to apply to every widget carrying a given field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Fill a text field, or select a checkbox state.
    Text(String),
    /// Leave the value alone; only the read-only flag may change.
    Unset,
    /// Hide or delete the widget (see `RemovalMode`).
    Remove,
}

impl FieldValue {
    /// Interpret a raw optional string, mapping [`REMOVE_MARKER`] to
    /// [`FieldValue::Remove`] and `None` to [`FieldValue::Unset`].
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Unset,
            Some(REMOVE_MARKER) => Self::Remove,
            Some(text) => Self::Text(text.to_string()),
        }
    }

    /// The text to write, if this is a fill value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::from_raw(Some(text))
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::from_raw(Some(&text))
    }
}

impl From<Option<&str>> for FieldValue {
    fn from(raw: Option<&str>) -> Self {
        Self::from_raw(raw)
    }
}

/// Field name → value mapping applied by the field updater.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    values: HashMap<String, FieldValue>,
}

impl FormData {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a field name, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = FormData::new();
        for (name, value) in iter {
            data.insert(name, value);
        }
        data
    }
}

/// One piece of text to draw at explicit page coordinates.
///
/// `(x, y)` is in PDF user space (origin bottom-left) and anchors the
/// bottom-left of the last line; earlier lines stack upward.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayText {
    pub x: f64,
    pub y: f64,
    /// 0-based page index.
    #[cfg_attr(feature = "serde", serde(rename = "page"))]
    pub page_index: usize,
    /// `None` entries are kept for bookkeeping but draw nothing.
    pub text: Option<String>,
}

impl OverlayText {
    pub fn new(x: f64, y: f64, page_index: usize, text: Option<&str>) -> Self {
        Self {
            x,
            y,
            page_index,
            text: text.map(str::to_string),
        }
    }

    /// The lines of the text, top line first.
    pub fn lines(&self) -> Vec<&str> {
        match &self.text {
            Some(text) => text.split('\n').collect(),
            None => Vec::new(),
        }
    }
}

/// Ordered collection of [`OverlayText`] entries.
///
/// Entries sharing `(x, y, page_index)` replace each other, so the
/// collection behaves like a coordinate-keyed map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayData {
    entries: Vec<OverlayText>,
}

impl OverlayData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing an existing one at the same coordinates.
    pub fn insert(&mut self, entry: OverlayText) {
        let existing = self.entries.iter_mut().find(|e| {
            e.page_index == entry.page_index && e.x == entry.x && e.y == entry.y
        });
        match existing {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[OverlayText] {
        &self.entries
    }

    /// Distinct page indices referenced by any entry, ascending.
    pub fn pages(&self) -> BTreeSet<usize> {
        self.entries.iter().map(|e| e.page_index).collect()
    }

    /// Entries for one page, in insertion order.
    pub fn on_page(&self, page_index: usize) -> impl Iterator<Item = &OverlayText> {
        self.entries
            .iter()
            .filter(move |e| e.page_index == page_index)
    }
}

impl FromIterator<OverlayText> for OverlayData {
    fn from_iter<I: IntoIterator<Item = OverlayText>>(iter: I) -> Self {
        let mut data = OverlayData::new();
        for entry in iter {
            data.insert(entry);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_from_raw() {
        assert_eq!(FieldValue::from_raw(None), FieldValue::Unset);
        assert_eq!(FieldValue::from_raw(Some(REMOVE_MARKER)), FieldValue::Remove);
        assert_eq!(
            FieldValue::from_raw(Some("hello")),
            FieldValue::Text("hello".to_string())
        );
    }

    #[test]
    fn field_value_empty_string_is_text() {
        assert_eq!(FieldValue::from(""), FieldValue::Text(String::new()));
    }

    #[test]
    fn form_data_collects_and_replaces() {
        let data: FormData = [("a", "1"), ("b", REMOVE_MARKER), ("a", "2")]
            .into_iter()
            .collect();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get("a"), Some(&FieldValue::Text("2".to_string())));
        assert_eq!(data.get("b"), Some(&FieldValue::Remove));
        assert!(!data.contains("c"));
    }

    #[test]
    fn form_data_with_unset() {
        let data = FormData::new().with("name", None::<&str>);
        assert_eq!(data.get("name"), Some(&FieldValue::Unset));
    }

    #[test]
    fn overlay_lines_split_on_newline() {
        let entry = OverlayText::new(10.0, 20.0, 0, Some("one\ntwo"));
        assert_eq!(entry.lines(), vec!["one", "two"]);
        assert!(OverlayText::new(0.0, 0.0, 0, None).lines().is_empty());
    }

    #[test]
    fn overlay_data_replaces_same_coordinates() {
        let mut data = OverlayData::new();
        data.insert(OverlayText::new(10.0, 20.0, 0, Some("first")));
        data.insert(OverlayText::new(10.0, 20.0, 0, Some("second")));
        data.insert(OverlayText::new(10.0, 20.0, 1, Some("other page")));
        assert_eq!(data.len(), 2);
        assert_eq!(data.entries()[0].text.as_deref(), Some("second"));
    }

    #[test]
    fn overlay_data_pages_are_distinct_and_sorted() {
        let data: OverlayData = [
            OverlayText::new(0.0, 0.0, 2, Some("c")),
            OverlayText::new(0.0, 0.0, 0, Some("a")),
            OverlayText::new(5.0, 0.0, 2, None),
        ]
        .into_iter()
        .collect();
        assert_eq!(data.pages().into_iter().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(data.on_page(2).count(), 2);
    }
}

//! Small lookups over lopdf objects shared by the walker, updater, and
//! overlay filler.

use lopdf::{Dictionary, Document, Object, ObjectId};
use pdfform_core::decode_text_string;

/// Maximum `/Parent` hops followed before giving up on a cyclic tree.
pub(crate) const MAX_TREE_DEPTH: usize = 64;

/// Resolve a potentially indirect object reference.
pub(crate) fn resolve_object<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Resolve `obj` and view it as a dictionary.
pub(crate) fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    resolve_object(doc, obj).as_dict().ok()
}

/// Look up `key` in `dict`, resolving one level of indirection.
pub(crate) fn dict_entry<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    dict.get(key).ok().map(|obj| resolve_object(doc, obj))
}

/// The raw bytes of a name entry, e.g. `b"Widget"` for `/Subtype /Widget`.
pub(crate) fn name_entry<'a>(dict: &'a Dictionary, key: &[u8]) -> Option<&'a [u8]> {
    match dict.get(key) {
        Ok(Object::Name(name)) => Some(name.as_slice()),
        _ => None,
    }
}

/// Whether `dict[key]` is the name `expected`.
pub(crate) fn has_name(dict: &Dictionary, key: &[u8], expected: &[u8]) -> bool {
    name_entry(dict, key) == Some(expected)
}

/// Extract a text string entry (such as `/T`), decoding UTF-16BE when marked.
///
/// Names are accepted as well; some producers write `/T` as a name.
pub(crate) fn text_entry(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict_entry(doc, dict, key)? {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// Render a `/V` value as text: strings decoded, names without the slash,
/// arrays of either joined with `", "`.
pub(crate) fn value_entry(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<String> {
    fn scalar(obj: &Object) -> Option<String> {
        match obj {
            Object::String(bytes, _) => Some(decode_text_string(bytes)),
            Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
            _ => None,
        }
    }
    match dict_entry(doc, dict, key)? {
        Object::Array(items) => {
            let values: Vec<String> = items
                .iter()
                .filter_map(|item| scalar(resolve_object(doc, item)))
                .collect();
            (!values.is_empty()).then(|| values.join(", "))
        }
        other => scalar(other),
    }
}

/// Convert a lopdf numeric object (Integer or Real) to f64.
pub(crate) fn object_to_f64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => Some(*f as f64),
        _ => None,
    }
}

/// Parse a `/Rect`-style array into `(x0, y0, x1, y1)` with the corners
/// normalized so that `x0 <= x1` and `y0 <= y1`.
pub(crate) fn rect_from_object(doc: &Document, obj: &Object) -> Option<[f64; 4]> {
    let array = resolve_object(doc, obj).as_array().ok()?;
    if array.len() != 4 {
        return None;
    }
    let mut values = [0.0; 4];
    for (slot, item) in values.iter_mut().zip(array) {
        *slot = object_to_f64(resolve_object(doc, item))?;
    }
    let [ax, ay, bx, by] = values;
    Some([ax.min(bx), ay.min(by), ax.max(bx), ay.max(by)])
}

/// The object id of the document catalog, from the trailer's `/Root`.
pub(crate) fn catalog_id(doc: &Document) -> Option<ObjectId> {
    match doc.trailer.get(b"Root") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    }
}

/// The document catalog dictionary.
pub(crate) fn catalog(doc: &Document) -> Option<&Dictionary> {
    doc.get_object(catalog_id(doc)?).ok()?.as_dict().ok()
}

/// Look up a key in the page dictionary, walking up the page tree
/// (via /Parent) if the key is not found on the page itself.
pub(crate) fn resolve_inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current_id = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_object(current_id).ok()?.as_dict().ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        current_id = dict.get(b"Parent").ok()?.as_reference().ok()?;
    }
    None
}

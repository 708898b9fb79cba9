//! Manual overlay filler: draws literal text at page coordinates.
//!
//! Used for documents without usable form fields. Each page that receives
//! text gets one Form XObject canvas the size of [`PageSize`], painted on
//! top of the page's existing content:
//!
//! ```text
//! /Contents [ (q) <original streams...> (Q q /PdfFormOverlay0 Do Q) ]
//! ```
//!
//! Wrapping the original streams in `q … Q` keeps any graphics state they
//! leave behind from leaking into the canvas.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use pdfform_core::{
    FieldNaming, FormData, OverlayData, OverlayStyle, OverlayText, PageSize, PdfError,
};
use tracing::{debug, trace};

use crate::classify::is_text_field;
use crate::document::FormWriter;
use crate::error::BackendError;
use crate::objects::{rect_from_object, resolve_dict, resolve_inherited, resolve_object};

/// Resource name of the canvas font inside the XObject.
const CANVAS_FONT: &str = "F1";
/// Prefix of the XObject name registered in the page resources.
const CANVAS_NAME_PREFIX: &str = "PdfFormOverlay";

/// Draw every entry of `data` onto the page it names.
///
/// Multi-line text is stacked upwards from `(x, y)`: the last line sits at
/// `y`, the one before it at `y + font_size`, and so on. Entries whose text
/// is `None` draw nothing, and pages with nothing to draw are left
/// untouched. Page indices beyond the document are skipped.
///
/// Returns the same writer with the need-appearances request set, or the
/// writer unchanged when `data` is empty.
pub fn manual_add_annotations(
    mut writer: FormWriter,
    data: &OverlayData,
    page_size: PageSize,
    style: &OverlayStyle,
) -> Result<FormWriter, PdfError> {
    if data.is_empty() {
        return Ok(writer);
    }

    for page_index in data.pages() {
        let Some(page_id) = writer.page_id(page_index) else {
            debug!(page_index, pages = writer.page_count(), "overlay page does not exist, skipping");
            continue;
        };
        let operations = canvas_operations(data.on_page(page_index), style);
        if operations.is_empty() {
            trace!(page_index, "no overlay text on page");
            continue;
        }
        merge_canvas(writer.inner_mut(), page_id, operations, page_size, style)?;
        debug!(page_index, "merged overlay canvas");
    }

    writer.set_need_appearances();
    Ok(writer)
}

/// Turn matched text fields into overlay entries, for flattening a form.
///
/// Each text widget whose field name is a key of `data` loses its `/Rect`
/// (so the widget itself no longer renders) and yields an entry at the
/// rectangle's lower-left corner carrying the mapped text. Widgets mapped
/// to the remove marker or to an unset value yield entries without text.
pub fn overlay_data_from_fields(
    writer: &mut FormWriter,
    data: &FormData,
    naming: FieldNaming,
) -> OverlayData {
    let matched: Vec<_> = writer.field_iter(data, naming).collect();
    let mut overlay = OverlayData::new();

    for widget in matched {
        let Some(name) = widget.field_name.as_deref() else {
            continue;
        };
        let rect = match writer.annotation(&widget.handle) {
            Some(annot) if is_text_field(annot) => annot
                .get(b"Rect")
                .ok()
                .and_then(|r| rect_from_object(writer.inner(), r)),
            _ => continue,
        };
        if let Some(annot) = writer.annotation_mut(&widget.handle) {
            annot.remove(b"Rect");
        }
        let Some([x0, y0, _, _]) = rect else {
            trace!(field = name, "text field has no usable /Rect");
            continue;
        };
        let text = data.get(name).and_then(|v| v.as_text());
        overlay.insert(OverlayText::new(x0, y0, widget.page_index, text));
    }

    debug!(entries = overlay.len(), "built overlay from form fields");
    overlay
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

/// Content operations drawing every entry of one page.
fn canvas_operations<'a>(
    entries: impl Iterator<Item = &'a OverlayText>,
    style: &OverlayStyle,
) -> Vec<Operation> {
    let mut ops = Vec::new();
    for entry in entries {
        for (i, line) in entry.lines().into_iter().rev().enumerate() {
            let y = entry.y + style.font_size * i as f64;
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new(
                "Tf",
                vec![Object::Name(CANVAS_FONT.into()), real(style.font_size)],
            ));
            ops.push(Operation::new("Td", vec![real(entry.x), real(y)]));
            ops.push(Operation::new(
                "Tj",
                vec![Object::String(win_ansi_bytes(line), StringFormat::Literal)],
            ));
            ops.push(Operation::new("ET", vec![]));
        }
    }
    if !ops.is_empty() {
        let color = style.color;
        ops.insert(
            0,
            Operation::new("rg", vec![real(color.r), real(color.g), real(color.b)]),
        );
    }
    ops
}

/// Single-byte text for a standard Type1 font; unmappable characters
/// become `?`.
fn win_ansi_bytes(line: &str) -> Vec<u8> {
    line.chars().map(win_ansi_byte).collect()
}

/// WinAnsiEncoding code for `c`. Latin-1 maps to itself except 0x80-0x9F,
/// which WinAnsi assigns to the punctuation and letters below.
fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        '\u{0080}'..='\u{009F}' => b'?',
        _ => u8::try_from(u32::from(c)).unwrap_or(b'?'),
    }
}

/// Paint `operations` on a page-sized canvas over `page_id`.
fn merge_canvas(
    doc: &mut Document,
    page_id: ObjectId,
    operations: Vec<Operation>,
    page_size: PageSize,
    style: &OverlayStyle,
) -> Result<(), BackendError> {
    let content = Content { operations }
        .encode()
        .map_err(|e| BackendError::Serialize(format!("failed to encode overlay: {e}")))?;

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => style.base_font.as_str(),
        "Encoding" => "WinAnsiEncoding",
    });
    let canvas_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => vec![0.into(), 0.into(), real(page_size.width), real(page_size.height)],
            "Resources" => dictionary! {
                "Font" => dictionary! { CANVAS_FONT => font_id },
            },
        },
        content,
    ));

    let mut resources = resolve_inherited(doc, page_id, b"Resources")
        .and_then(|r| resolve_dict(doc, r))
        .cloned()
        .unwrap_or_default();
    let mut xobjects = resources
        .get(b"XObject")
        .ok()
        .and_then(|x| resolve_dict(doc, x))
        .cloned()
        .unwrap_or_default();
    let name = unique_name(&xobjects);
    xobjects.set(name.as_str(), canvas_id);
    resources.set("XObject", xobjects);

    let mut contents = vec![Object::Reference(
        doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec())),
    )];
    contents.extend(existing_contents(doc, page_id));
    contents.push(Object::Reference(doc.add_object(Stream::new(
        Dictionary::new(),
        format!("Q\nq /{name} Do Q\n").into_bytes(),
    ))));

    let page = doc
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| BackendError::Parse(format!("failed to get page: {e}")))?;
    page.set("Resources", resources);
    page.set("Contents", contents);
    Ok(())
}

/// The page's content stream references, flattening an indirect array.
fn existing_contents(doc: &Document, page_id: ObjectId) -> Vec<Object> {
    let Some(contents) = doc
        .get_object(page_id)
        .and_then(Object::as_dict)
        .ok()
        .and_then(|page| page.get(b"Contents").ok())
    else {
        return Vec::new();
    };
    match (contents, resolve_object(doc, contents)) {
        (_, Object::Array(items)) => items.clone(),
        (Object::Reference(id), _) => vec![Object::Reference(*id)],
        _ => Vec::new(),
    }
}

fn unique_name(xobjects: &Dictionary) -> String {
    (0..)
        .map(|n| format!("{CANVAS_NAME_PREFIX}{n}"))
        .find(|name| !xobjects.has(name.as_bytes()))
        .unwrap_or_else(|| CANVAS_NAME_PREFIX.to_string())
}

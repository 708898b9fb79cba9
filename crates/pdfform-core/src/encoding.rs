//! String encodings used when writing form values.
//!
//! [`pdf_encode`] produces PDF name tokens (`/Name`, with `#XX` escapes in
//! place of URL `%XX` escapes). [`encode_text_string`] and
//! [`decode_text_string`] convert between Rust strings and the byte form of
//! PDF text strings (PDFDocEncoding-compatible ASCII or UTF-16BE with BOM).

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Leading character of a name token.
const NAME_PREFIX: char = '/';

/// Everything except the RFC 3986 unreserved characters.
const NAME_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode a value as a PDF name token.
///
/// One leading `/` is stripped before encoding and exactly one is restored.
/// Bytes outside `A-Z a-z 0-9 - _ . ~` are written as `#XX` (upper-case hex
/// of the UTF-8 bytes); a space becomes `#20`. Returns `None` for an empty
/// value, which callers treat as "nothing to encode".
///
/// ```
/// use pdfform_core::pdf_encode;
///
/// assert_eq!(pdf_encode("Yes").as_deref(), Some("/Yes"));
/// assert_eq!(pdf_encode("/Yes").as_deref(), Some("/Yes"));
/// assert_eq!(pdf_encode("Choice 1").as_deref(), Some("/Choice#201"));
/// assert_eq!(pdf_encode(""), None);
/// ```
pub fn pdf_encode(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let value = value.strip_prefix(NAME_PREFIX).unwrap_or(value);
    let escaped = utf8_percent_encode(value, NAME_ESCAPES).to_string();

    let mut out = String::with_capacity(escaped.len() + 1);
    out.push(NAME_PREFIX);
    out.extend(escaped.chars().map(|ch| if ch == '%' { '#' } else { ch }));
    Some(out)
}

/// Encode a raw name (the bytes lopdf stores, without the leading `/`) as a
/// name token, so state names read from a file compare equal to
/// [`pdf_encode`] output.
///
/// Bytes that are not valid UTF-8 are written as `#XX` one by one, so two
/// distinct raw names never share a token.
pub fn name_token(raw: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(raw) {
        return pdf_encode(text).unwrap_or_else(|| NAME_PREFIX.to_string());
    }
    let raw = raw.strip_prefix(b"/").unwrap_or(raw);
    let mut out = String::with_capacity(raw.len() * 3 + 1);
    out.push(NAME_PREFIX);
    for chunk in raw.utf8_chunks() {
        let escaped = utf8_percent_encode(chunk.valid(), NAME_ESCAPES).to_string();
        out.extend(escaped.chars().map(|ch| if ch == '%' { '#' } else { ch }));
        for byte in chunk.invalid() {
            out.push_str(&format!("#{byte:02X}"));
        }
    }
    out
}

/// Encode a string as the bytes of a PDF text string.
///
/// ASCII text is stored as-is; anything else is UTF-16BE with a byte order
/// mark, which every conforming reader accepts.
pub fn encode_text_string(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        return text.as_bytes().to_vec();
    }
    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&[0xFE, 0xFF]);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

/// Decode the bytes of a PDF text string, handling UTF-16BE BOM and Latin-1.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

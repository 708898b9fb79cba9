//! PDF form field types.
//!
//! Provides [`FieldType`] (the `/FT` tag), [`WidgetKind`] (how the updater
//! treats a widget), and [`FormField`] (one named entry of the AcroForm
//! field tree).

/// Bit 1 of the `/Ff` field flags: the user may not change the value.
pub const FIELD_FLAG_READ_ONLY: u32 = 1;

/// The type of a PDF form field.
///
/// Corresponds to the `/FT` entry in a field dictionary (PDF 1.7 Table 220).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldType {
    /// Text field (`/FT /Tx`).
    Text,
    /// Button field (`/FT /Btn`): checkboxes, radio buttons, push buttons.
    Button,
    /// Choice field (`/FT /Ch`): dropdowns, list boxes.
    Choice,
    /// Signature field (`/FT /Sig`).
    Signature,
}

impl FieldType {
    /// Parse a field type from its PDF name string.
    ///
    /// Returns `None` if the string is not a recognized field type.
    pub fn from_pdf_name(name: &str) -> Option<Self> {
        match name {
            "Tx" => Some(Self::Text),
            "Btn" => Some(Self::Button),
            "Ch" => Some(Self::Choice),
            "Sig" => Some(Self::Signature),
            _ => None,
        }
    }

    /// Return the PDF name string for this field type.
    pub fn as_pdf_name(&self) -> &'static str {
        match self {
            Self::Text => "Tx",
            Self::Button => "Btn",
            Self::Choice => "Ch",
            Self::Signature => "Sig",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "Text"),
            Self::Button => write!(f, "Button"),
            Self::Choice => write!(f, "Choice"),
            Self::Signature => write!(f, "Signature"),
        }
    }
}

/// How the field updater treats a widget annotation.
///
/// Text takes precedence: a widget tagged `/Tx` that also carries an `/AS`
/// entry is [`WidgetKind::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Fillable text box.
    Text,
    /// Checkbox or radio-button member with appearance states.
    Checkbox,
    /// Anything else (choice lists, signatures, push buttons without states).
    Other,
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Checkbox => write!(f, "checkbox"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A named field from the document's AcroForm field tree.
///
/// Intermediate nodes of a hierarchy are reported too, so `field_type` is
/// optional: grouping nodes often carry no `/FT` of their own.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormField {
    /// Fully qualified name: partial `/T` names of all ancestors joined with `.`.
    pub name: String,
    /// Field type from `/FT`, inherited from the nearest ancestor that has one.
    pub field_type: Option<FieldType>,
    /// Current value from `/V`, rendered as text.
    pub value: Option<String>,
    /// Field flags from `/Ff` (bitmask).
    pub flags: u32,
    /// `true` when the node has named children (a grouping node).
    pub is_group: bool,
}

impl FormField {
    /// Whether the read-only bit is set in the field flags.
    pub fn is_read_only(&self) -> bool {
        self.flags & FIELD_FLAG_READ_ONLY != 0
    }
}

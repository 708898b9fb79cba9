//! Fill configuration passed explicitly into the updater and overlay filler.

/// An RGB fill color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.75)
    }
}

/// Appearance written into the `/DA` entry of every filled text field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldAppearance {
    /// Font resource name, looked up in the AcroForm `/DR` dictionary.
    pub font_resource: String,
    /// Base font registered under `font_resource` when `/DR` lacks it.
    pub base_font: String,
    pub font_size: f64,
    pub color: Rgb,
}

impl Default for FieldAppearance {
    fn default() -> Self {
        Self {
            font_resource: "Helv".to_string(),
            base_font: "Helvetica".to_string(),
            font_size: 10.0,
            color: Rgb::default(),
        }
    }
}

impl FieldAppearance {
    /// The default appearance string, e.g. `/Helv 10 Tf 0 0 0.75 rg`.
    pub fn default_appearance(&self) -> String {
        format!(
            "/{} {} Tf {} {} {} rg",
            self.font_resource, self.font_size, self.color.r, self.color.g, self.color.b
        )
    }
}

/// Font and color for text drawn by the overlay filler.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayStyle {
    /// One of the standard 14 Type1 fonts.
    pub base_font: String,
    /// Font size in points; also the distance between stacked lines.
    pub font_size: f64,
    pub color: Rgb,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            base_font: "Helvetica".to_string(),
            font_size: 8.0,
            color: Rgb::default(),
        }
    }
}

/// What the updater does with a widget mapped to the remove marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RemovalMode {
    /// Strip `/Rect` so viewers stop rendering the widget. The annotation
    /// stays in `/Annots` and the field stays in the AcroForm.
    #[default]
    HideRect,
    /// Drop the widget from its page's `/Annots`, from the AcroForm
    /// `/Fields`, and from its parent's `/Kids`.
    Delete,
}

/// How the annotation walker derives a widget's field name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldNaming {
    /// The widget's own `/T`, else its direct parent's `/T`.
    #[default]
    Partial,
    /// All `/T` entries from the root of the field tree down, joined with `.`.
    FullyQualified,
}

/// Size of the canvas the overlay filler draws on, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const LETTER: PageSize = PageSize::new(612.0, 792.0);
    pub const LEGAL: PageSize = PageSize::new(612.0, 1008.0);
    pub const A4: PageSize = PageSize::new(595.28, 841.89);

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Parse `letter`, `legal`, `a4` (any case) or `WIDTHxHEIGHT` in points.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "letter" => Some(Self::LETTER),
            "legal" => Some(Self::LEGAL),
            "a4" => Some(Self::A4),
            other => {
                let (w, h) = other.split_once('x')?;
                let width: f64 = w.trim().parse().ok()?;
                let height: f64 = h.trim().parse().ok()?;
                (width > 0.0 && height > 0.0).then_some(Self::new(width, height))
            }
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

/// All knobs of a fill run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FillSettings {
    pub field_appearance: FieldAppearance,
    pub overlay: OverlayStyle,
    pub removal: RemovalMode,
    pub naming: FieldNaming,
}

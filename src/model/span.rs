//! Text span types.

use serde::{Deserialize, Serialize};

/// Bounding box in page coordinates, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge X
    pub left: f32,
    /// Top edge Y (distance from page top)
    pub top: f32,
    /// Right edge X
    pub right: f32,
    /// Bottom edge Y
    pub bottom: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Horizontal midpoint.
    pub fn midpoint_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }
}

/// Horizontal alignment of a span on its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Centered on the page within tolerance
    Center,
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alignment::Left => write!(f, "left"),
            Alignment::Center => write!(f, "center"),
        }
    }
}

/// One atomic run of text sharing formatting on one line.
///
/// Spans are immutable once collected; downstream pipeline stages consume
/// them as a read-only sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    /// Cleaned text content (trimmed, internal whitespace collapsed)
    pub text: String,

    /// Font size in points
    pub font_size: f32,

    /// Base font name (e.g., "Helvetica-Bold")
    pub font_name: String,

    /// Whether the font appears to be bold
    pub is_bold: bool,

    /// Bounding box in page coordinates
    pub bbox: BBox,

    /// Page index (0-based)
    pub page_index: u32,

    /// Derived horizontal alignment
    pub alignment: Alignment,

    /// Quantized indent bucket relative to the page's minimum left margin
    pub indent_level: u8,
}

impl Span {
    /// Number of decimal digits in the text.
    pub fn digit_count(&self) -> u32 {
        self.text.chars().filter(|c| c.is_ascii_digit()).count() as u32
    }

    /// Number of uppercase letters in the text.
    pub fn uppercase_count(&self) -> u32 {
        self.text.chars().filter(|c| c.is_uppercase()).count() as u32
    }

    /// Whether the text carries any alphabetic content.
    ///
    /// Bare page numbers and decorative rules fail this check and never
    /// become heading candidates.
    pub fn has_alphabetic(&self) -> bool {
        self.text.chars().any(|c| c.is_alphabetic())
    }
}

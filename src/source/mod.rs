//! PDF decoding collaborators.
//!
//! The pipeline never touches a PDF library directly: it consumes spans
//! through the [`SpanSource`] trait, which yields per-page text runs with
//! font and position metadata. The production implementation is
//! [`PdfSpanSource`], backed by lopdf; tests substitute in-memory sources.

mod pdf_source;

pub use pdf_source::PdfSpanSource;

use crate::error::Result;
use crate::model::BBox;

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
}

impl PageGeometry {
    /// US Letter, the fallback when a page carries no MediaBox.
    pub const LETTER: PageGeometry = PageGeometry {
        width: 612.0,
        height: 792.0,
    };
}

/// A raw text run as reported by the PDF decoder, before normalization.
#[derive(Debug, Clone)]
pub struct RawSpan {
    /// Decoded text, not yet cleaned
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Base font name
    pub font_name: String,
    /// Bold flag when the decoder exposes one; font-name heuristics apply
    /// otherwise
    pub bold_flag: Option<bool>,
    /// Bounding box in top-left-origin page coordinates
    pub bbox: BBox,
}

/// Abstract source of per-page spans.
///
/// Page indices are stable 0-based integers and match the `page` field of
/// the final output.
pub trait SpanSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Dimensions of a page.
    fn page_geometry(&self, page_index: u32) -> Result<PageGeometry>;

    /// Spans on a page, in reading order. A page with no text yields an
    /// empty vector, not an error.
    fn page_spans(&self, page_index: u32) -> Result<Vec<RawSpan>>;

    /// Title from document metadata, when present and usable.
    fn document_title(&self) -> Option<String> {
        None
    }
}

/// Simple text decoding fallback when no font encoding is available.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    // UTF-8, then Latin-1 as last resort
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

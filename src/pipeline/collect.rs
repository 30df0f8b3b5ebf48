//! Span collection and normalization.
//!
//! Flattens the decoder's per-page span records into an ordered, cleaned
//! sequence of [`Span`]s, deriving alignment and indent level from page
//! geometry. This is a pure transformation: pages with no text contribute
//! nothing and are not an error.

use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::model::{Alignment, BBox, Span};
use crate::options::ExtractOptions;
use crate::source::{PageGeometry, RawSpan, SpanSource};

/// Indent quantization step in points (quarter inch).
const INDENT_STEP: f32 = 18.0;

/// Deepest indent bucket tracked.
const MAX_INDENT_LEVEL: u8 = 8;

/// Collect and normalize all spans of a document, in reading order.
///
/// Returns the spans together with each page's geometry (indexed by page),
/// which downstream stages need for margin-band detection.
pub fn collect_spans(
    source: &dyn SpanSource,
    options: &ExtractOptions,
) -> Result<(Vec<Span>, Vec<PageGeometry>)> {
    let page_count = source.page_count();
    let mut spans = Vec::new();
    let mut geometries = Vec::with_capacity(page_count as usize);

    for page_index in 0..page_count {
        let geometry = source.page_geometry(page_index)?;
        let raw = source.page_spans(page_index)?;

        let cleaned: Vec<(String, RawSpan)> = raw
            .into_iter()
            .filter_map(|r| {
                let text = clean_text(&r.text);
                if text.is_empty() {
                    None
                } else {
                    Some((text, r))
                }
            })
            .collect();

        // Indent buckets are relative to the page's own left margin
        let min_left = cleaned
            .iter()
            .map(|(_, r)| r.bbox.left)
            .fold(f32::INFINITY, f32::min);

        for (text, raw) in cleaned {
            spans.push(normalize_span(text, raw, page_index, geometry, min_left, options));
        }

        geometries.push(geometry);
    }

    log::debug!("Collected {} spans across {} pages", spans.len(), page_count);
    Ok((spans, geometries))
}

fn normalize_span(
    text: String,
    raw: RawSpan,
    page_index: u32,
    geometry: PageGeometry,
    page_min_left: f32,
    options: &ExtractOptions,
) -> Span {
    let is_bold = raw
        .bold_flag
        .unwrap_or_else(|| is_bold_font_name(&raw.font_name));
    let alignment = derive_alignment(&raw.bbox, geometry.width, options.center_tolerance);
    let indent_level = derive_indent_level(raw.bbox.left, page_min_left);

    Span {
        text,
        font_size: raw.font_size,
        font_name: raw.font_name,
        is_bold,
        bbox: raw.bbox,
        page_index,
        alignment,
        indent_level,
    }
}

/// Trim and collapse internal whitespace runs, normalizing to NFC.
pub fn clean_text(text: &str) -> String {
    let normalized: String = text.nfc().collect();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether a font name suggests a bold face.
pub fn is_bold_font_name(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    lower.contains("bold") || lower.contains("black") || lower.contains("heavy")
}

fn derive_alignment(bbox: &BBox, page_width: f32, tolerance: f32) -> Alignment {
    if page_width <= 0.0 {
        return Alignment::Left;
    }
    let offset = (bbox.midpoint_x() - page_width / 2.0).abs();
    if offset <= page_width * tolerance {
        Alignment::Center
    } else {
        Alignment::Left
    }
}

fn derive_indent_level(left: f32, page_min_left: f32) -> u8 {
    if !page_min_left.is_finite() || left <= page_min_left {
        return 0;
    }
    let bucket = ((left - page_min_left) / INDENT_STEP) as u32;
    bucket.min(MAX_INDENT_LEVEL as u32) as u8
}

//! Document title selection.
//!
//! Runs once per document, before header/footer filtering, so a legitimate
//! title that happens to sit in a margin band cannot be discarded. Metadata
//! titles win when usable; otherwise the title is the largest span on the
//! earliest page carrying heading-sized text, ties broken by topmost
//! position.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::Span;

use super::fonts::DocumentFontProfile;

/// Trailing filename-extension artifacts left by converters
/// (e.g. "Quarterly Report - .docx").
fn filename_suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\s*[\-\u{2013}_ ]*\.[a-z]{3,4}\s*$").unwrap())
}

/// Select the document title.
///
/// Returns an empty string for a document with no text at all.
pub fn select_title(
    spans: &[Span],
    profile: &DocumentFontProfile,
    metadata_title: Option<&str>,
) -> String {
    if let Some(meta) = metadata_title {
        if is_usable_metadata_title(meta) {
            log::debug!("Title from metadata: {}", meta);
            return meta.trim().to_string();
        }
    }

    let Some(page) = title_page(spans, profile) else {
        return String::new();
    };

    let candidates = spans.iter().filter(|s| s.page_index == page);

    // Largest font on the title page; topmost wins ties
    let best = candidates.max_by(|a, b| {
        size_key(a.font_size)
            .cmp(&size_key(b.font_size))
            .then_with(|| {
                b.bbox
                    .top
                    .partial_cmp(&a.bbox.top)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    match best {
        Some(span) => strip_filename_suffix(&span.text),
        None => String::new(),
    }
}

/// Earliest page containing any heading-sized text; falls back to the
/// earliest page with any text when the document's font is uniform.
fn title_page(spans: &[Span], profile: &DocumentFontProfile) -> Option<u32> {
    if profile.has_heading_sizes() {
        if let Some(page) = spans
            .iter()
            .filter(|s| profile.is_heading_size(s.font_size))
            .map(|s| s.page_index)
            .min()
        {
            return Some(page);
        }
    }
    spans.iter().map(|s| s.page_index).min()
}

/// Metadata titles are usable unless empty or a word-processor artifact
/// ("Microsoft Word - draft.doc").
fn is_usable_metadata_title(title: &str) -> bool {
    let trimmed = title.trim();
    !trimmed.is_empty() && !trimmed.to_lowercase().starts_with("microsoft word")
}

pub(super) fn strip_filename_suffix(text: &str) -> String {
    filename_suffix_regex().replace(text, "").trim().to_string()
}

fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

//! Repeated header/footer suppression.
//!
//! Running headers, footers, and page numbers sit inside fixed margin bands
//! and repeat verbatim across pages. Left in place they pollute size-based
//! heading signals, so lines matching a detected repeating string are
//! removed from candidacy before feature extraction. Title selection runs
//! before this filter and is never affected by it.

use std::collections::{HashMap, HashSet};

use crate::model::Span;
use crate::options::ExtractOptions;
use crate::source::PageGeometry;

/// Set of margin strings that repeat across enough pages to count as
/// running headers or footers.
#[derive(Debug, Clone, Default)]
pub struct MarginFilter {
    repeated: HashSet<String>,
}

impl MarginFilter {
    /// Detect repeating margin strings across the document.
    ///
    /// A string qualifies when its spans fall within the top or bottom band
    /// of the page and it occurs on at least `repeat_ratio` of all pages.
    /// Repetition needs at least two pages: a lone margin string is not a
    /// running header, whatever the ratio says.
    pub fn detect(
        spans: &[Span],
        geometries: &[PageGeometry],
        options: &ExtractOptions,
    ) -> Self {
        let page_count = geometries.len();
        if page_count == 0 {
            return Self::default();
        }

        // Pages each margin string occurs on (counted once per page)
        let mut occurrences: HashMap<&str, HashSet<u32>> = HashMap::new();

        for span in spans {
            let Some(geometry) = geometries.get(span.page_index as usize) else {
                continue;
            };
            let in_top = span.bbox.top < geometry.height * options.top_band;
            let in_bottom = span.bbox.bottom > geometry.height * (1.0 - options.bottom_band);
            if in_top || in_bottom {
                occurrences
                    .entry(span.text.as_str())
                    .or_default()
                    .insert(span.page_index);
            }
        }

        let repeated: HashSet<String> = occurrences
            .into_iter()
            .filter(|(_, pages)| {
                pages.len() >= 2
                    && pages.len() as f32 / page_count as f32 >= options.repeat_ratio
            })
            .map(|(text, _)| text.to_string())
            .collect();

        if !repeated.is_empty() {
            log::debug!("Detected {} repeating margin strings", repeated.len());
        }

        Self { repeated }
    }

    /// Whether a text string was identified as a running header/footer.
    pub fn is_repeated(&self, text: &str) -> bool {
        self.repeated.contains(text)
    }

    /// Remove all spans matching a repeating margin string.
    ///
    /// Idempotent: applying the filter to an already-filtered sequence
    /// removes nothing further.
    pub fn apply(&self, spans: Vec<Span>) -> Vec<Span> {
        spans
            .into_iter()
            .filter(|s| !self.is_repeated(&s.text))
            .collect()
    }

    /// Number of distinct repeating strings detected.
    pub fn repeated_count(&self) -> usize {
        self.repeated.len()
    }
}

//! Document-scoped font statistics.
//!
//! Infers the body text size from a frequency histogram of font sizes and
//! ranks the larger sizes into heading levels. Computed once per document
//! and passed downstream as immutable context.

use std::collections::BTreeMap;

use crate::model::{HeadingLevel, Span};

/// Font sizes are keyed at 0.1pt precision so that near-identical sizes
/// produced by scaled text matrices land in the same bucket.
fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

fn key_size(key: i32) -> f32 {
    key as f32 / 10.0
}

/// Font statistics for one document.
#[derive(Debug, Clone, Default)]
pub struct DocumentFontProfile {
    /// Occurrence count per size key
    size_frequency: BTreeMap<i32, usize>,
    /// Most frequent font size (the inferred body text size)
    pub body_size: f32,
    /// Distinct sizes strictly greater than body, sorted descending
    pub heading_sizes: Vec<f32>,
}

impl DocumentFontProfile {
    /// Build the profile from the full span sequence.
    ///
    /// `body_size` is the highest-frequency size; when two sizes are equally
    /// frequent the smaller one wins, since body text is typically the
    /// smaller of the pair.
    pub fn from_spans(spans: &[Span]) -> Self {
        let mut size_frequency: BTreeMap<i32, usize> = BTreeMap::new();
        for span in spans {
            *size_frequency.entry(size_key(span.font_size)).or_insert(0) += 1;
        }

        if size_frequency.is_empty() {
            return Self::default();
        }

        // Ascending key iteration + strict comparison keeps the smallest
        // size among equally frequent ones.
        let mut body_key = 0;
        let mut best_count = 0;
        for (&key, &count) in &size_frequency {
            if count > best_count {
                best_count = count;
                body_key = key;
            }
        }
        let body_size = key_size(body_key);

        let mut heading_sizes: Vec<f32> = size_frequency
            .keys()
            .filter(|&&k| k > body_key)
            .map(|&k| key_size(k))
            .collect();
        heading_sizes.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

        log::debug!(
            "Font profile: body {}pt, {} heading sizes",
            body_size,
            heading_sizes.len()
        );

        Self {
            size_frequency,
            body_size,
            heading_sizes,
        }
    }

    /// Occurrence count for a font size.
    pub fn frequency(&self, size: f32) -> usize {
        self.size_frequency
            .get(&size_key(size))
            .copied()
            .unwrap_or(0)
    }

    /// Whether a font size ranks as a heading size (strictly above body).
    pub fn is_heading_size(&self, size: f32) -> bool {
        !self.heading_sizes.is_empty() && size_key(size) > size_key(self.body_size)
    }

    /// Heading level for a font size, or `None` for body-sized text.
    ///
    /// The k-th largest heading size maps to level k; ranks deeper than the
    /// supported depth clip to [`HeadingLevel::H3`].
    pub fn level_for(&self, size: f32) -> Option<HeadingLevel> {
        let key = size_key(size);
        self.heading_sizes
            .iter()
            .position(|&s| size_key(s) == key)
            .map(HeadingLevel::from_rank)
    }

    /// Whether any heading-sized text exists in the document.
    pub fn has_heading_sizes(&self) -> bool {
        !self.heading_sizes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alignment, BBox, Span};

    fn span_with_size(size: f32) -> Span {
        Span {
            text: "x".to_string(),
            font_size: size,
            font_name: "Helvetica".to_string(),
            is_bold: false,
            bbox: BBox::default(),
            page_index: 0,
            alignment: Alignment::Left,
            indent_level: 0,
        }
    }

    fn profile_of(sizes: &[f32]) -> DocumentFontProfile {
        let spans: Vec<Span> = sizes.iter().map(|&s| span_with_size(s)).collect();
        DocumentFontProfile::from_spans(&spans)
    }

    #[test]
    fn test_body_size_most_frequent() {
        let profile = profile_of(&[10.0, 10.0, 10.0, 14.0, 18.0]);
        assert_eq!(profile.body_size, 10.0);
        assert_eq!(profile.heading_sizes, vec![18.0, 14.0]);
    }

    #[test]
    fn test_tie_break_prefers_smaller() {
        let profile = profile_of(&[10.0, 10.0, 12.0, 12.0]);
        assert_eq!(profile.body_size, 10.0);
        assert_eq!(profile.heading_sizes, vec![12.0]);
    }

    #[test]
    fn test_heading_sizes_strictly_descending() {
        let profile = profile_of(&[10.0, 10.0, 12.0, 14.0, 18.0, 18.0]);
        // 10 and 18 are equally frequent; the smaller size becomes body
        assert_eq!(profile.body_size, 10.0);
        let sizes = &profile.heading_sizes;
        assert!(sizes.windows(2).all(|w| w[0] > w[1]));
        assert!(!sizes.contains(&profile.body_size));
    }

    #[test]
    fn test_level_mapping_monotonic() {
        let profile = profile_of(&[10.0, 10.0, 12.0, 14.0, 16.0, 18.0]);
        assert_eq!(profile.level_for(18.0), Some(HeadingLevel::H1));
        assert_eq!(profile.level_for(16.0), Some(HeadingLevel::H2));
        assert_eq!(profile.level_for(14.0), Some(HeadingLevel::H3));
        // Fourth-largest clips to H3 instead of being dropped
        assert_eq!(profile.level_for(12.0), Some(HeadingLevel::H3));
        assert_eq!(profile.level_for(10.0), None);
    }

    #[test]
    fn test_uniform_font_document() {
        let profile = profile_of(&[11.0, 11.0, 11.0]);
        assert_eq!(profile.body_size, 11.0);
        assert!(profile.heading_sizes.is_empty());
        assert!(!profile.is_heading_size(11.0));
        assert!(!profile.has_heading_sizes());
    }

    #[test]
    fn test_empty_document() {
        let profile = DocumentFontProfile::from_spans(&[]);
        assert_eq!(profile.body_size, 0.0);
        assert!(profile.heading_sizes.is_empty());
    }

    #[test]
    fn test_size_key_precision() {
        let profile = profile_of(&[10.02, 10.04, 10.01, 14.0]);
        // All three ~10.0 sizes share one bucket
        assert_eq!(profile.frequency(10.0), 3);
        assert_eq!(profile.body_size, 10.0);
    }
}

//! Per-line feature extraction.
//!
//! Builds the fixed feature vector consumed by both classifier paths. The
//! schema is ordered and versioned through [`FeatureVector::SCHEMA`]; a
//! model artifact trained against a different schema must be rejected at
//! load time, never skipped per line.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Alignment, Span};

/// Leading numbering pattern: one or more dot-separated integers, optionally
/// followed by a separator ("1", "1.2", "3) Scope", "2.1.4 Results").
fn numbering_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+(\.\d+)*[.)\-]?(\s+|$)").unwrap())
}

/// Fixed feature vector for one candidate line.
///
/// Built from a [`Span`], consumed immediately by the classifier, not
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    /// Font size in points
    pub font_size: f32,
    /// Character count of the cleaned text
    pub text_length: u32,
    /// Number of decimal digits
    pub digit_count: u32,
    /// Number of uppercase letters
    pub uppercase_count: u32,
    /// Quantized indent bucket
    pub indent_level: u8,
    /// Whether the span is bold
    pub is_bold: bool,
    /// Leading numbering pattern present
    pub is_numbered: bool,
    /// Last non-whitespace character is ':'
    pub ends_with_colon: bool,
    /// First alphabetic character is uppercase
    pub starts_with_capital: bool,
    /// Base font name (categorical)
    pub font_name: String,
    /// Horizontal alignment (categorical)
    pub alignment: Alignment,
}

impl FeatureVector {
    /// Ordered feature schema. Model artifacts must declare exactly this
    /// list; anything else is a fatal configuration error.
    pub const SCHEMA: [&'static str; 11] = [
        "font_size",
        "text_length",
        "digit_count",
        "uppercase_count",
        "indent_level",
        "is_bold",
        "is_numbered",
        "ends_with_colon",
        "starts_with_capital",
        "font_name",
        "alignment",
    ];

    /// Number of non-categorical features (the leading block of
    /// [`FeatureVector::SCHEMA`]).
    pub const NUMERIC_LEN: usize = 9;

    /// Build the feature vector for a span. Pure and deterministic.
    pub fn from_span(span: &Span) -> Self {
        Self {
            font_size: span.font_size,
            text_length: span.text.chars().count() as u32,
            digit_count: span.digit_count(),
            uppercase_count: span.uppercase_count(),
            indent_level: span.indent_level,
            is_bold: span.is_bold,
            is_numbered: is_numbered(&span.text),
            ends_with_colon: ends_with_colon(&span.text),
            starts_with_capital: starts_with_capital(&span.text),
            font_name: span.font_name.clone(),
            alignment: span.alignment,
        }
    }

    /// The non-categorical features in schema order, as f32.
    pub fn numeric_values(&self) -> [f32; Self::NUMERIC_LEN] {
        [
            self.font_size,
            self.text_length as f32,
            self.digit_count as f32,
            self.uppercase_count as f32,
            self.indent_level as f32,
            self.is_bold as u8 as f32,
            self.is_numbered as u8 as f32,
            self.ends_with_colon as u8 as f32,
            self.starts_with_capital as u8 as f32,
        ]
    }
}

/// Text matches a leading numbering pattern.
pub fn is_numbered(text: &str) -> bool {
    numbering_regex().is_match(text)
}

/// Last non-whitespace character is ':'.
pub fn ends_with_colon(text: &str) -> bool {
    text.trim_end().ends_with(':')
}

/// First alphabetic character is uppercase.
pub fn starts_with_capital(text: &str) -> bool {
    text.chars()
        .find(|c| c.is_alphabetic())
        .map(|c| c.is_uppercase())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn span(text: &str) -> Span {
        Span {
            text: text.to_string(),
            font_size: 14.0,
            font_name: "Helvetica-Bold".to_string(),
            is_bold: true,
            bbox: BBox::new(72.0, 90.0, 300.0, 104.0),
            page_index: 2,
            alignment: Alignment::Center,
            indent_level: 1,
        }
    }

    #[test]
    fn test_numbering_patterns() {
        assert!(is_numbered("1 Introduction"));
        assert!(is_numbered("1. Introduction"));
        assert!(is_numbered("1.2 Background"));
        assert!(is_numbered("1.2.3 Details"));
        assert!(is_numbered("3) Scope"));
        assert!(is_numbered("4"));
        assert!(!is_numbered("Introduction 1"));
        assert!(!is_numbered("v1.2 release notes"));
        assert!(!is_numbered("1,000 units"));
    }

    #[test]
    fn test_colon_and_capital() {
        assert!(ends_with_colon("Overview: "));
        assert!(!ends_with_colon("Overview"));
        assert!(starts_with_capital("2.1 Results"));
        assert!(!starts_with_capital("2.1 results"));
        assert!(!starts_with_capital("1234"));
    }

    #[test]
    fn test_feature_vector_from_span() {
        let fv = FeatureVector::from_span(&span("2.1 Key Findings:"));
        assert_eq!(fv.font_size, 14.0);
        assert_eq!(fv.text_length, 17);
        assert_eq!(fv.digit_count, 2);
        assert_eq!(fv.uppercase_count, 2);
        assert_eq!(fv.indent_level, 1);
        assert!(fv.is_bold);
        assert!(fv.is_numbered);
        assert!(fv.ends_with_colon);
        assert!(fv.starts_with_capital);
        assert_eq!(fv.alignment, Alignment::Center);
    }

    #[test]
    fn test_numeric_values_match_schema_order() {
        let fv = FeatureVector::from_span(&span("Heading"));
        let values = fv.numeric_values();
        assert_eq!(values.len(), FeatureVector::NUMERIC_LEN);
        assert_eq!(values[0], 14.0); // font_size
        assert_eq!(values[5], 1.0); // is_bold
        assert_eq!(values[6], 0.0); // is_numbered
    }

    #[test]
    fn test_schema_shape() {
        assert_eq!(FeatureVector::SCHEMA.len(), 11);
        assert_eq!(FeatureVector::SCHEMA[FeatureVector::NUMERIC_LEN], "font_name");
        assert_eq!(FeatureVector::SCHEMA[10], "alignment");
    }
}

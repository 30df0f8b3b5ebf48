//! Outline result types.

use serde::{Deserialize, Serialize};

/// Heading level derived from a font size's rank among above-body sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Largest heading size
    H1,
    /// Second largest
    H2,
    /// Third largest (also absorbs any deeper sizes)
    H3,
}

impl HeadingLevel {
    /// Maximum supported heading depth.
    pub const MAX_DEPTH: usize = 3;

    /// Level for the k-th largest heading size (0-based rank).
    ///
    /// Ranks beyond the supported depth clip to [`HeadingLevel::H3`] rather
    /// than being dropped.
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            0 => HeadingLevel::H1,
            1 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// Numeric depth (1 for H1, 2 for H2, 3 for H3).
    pub fn depth(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Label string as emitted in the output JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified heading in document reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingCandidate {
    /// Heading level
    pub level: HeadingLevel,
    /// Cleaned heading text
    pub text: String,
    /// Page index (0-based)
    pub page: u32,
}

impl HeadingCandidate {
    /// Create a new heading candidate.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Terminal artifact of the pipeline: a document title plus its ordered
/// heading outline.
///
/// Serializes to the wire contract
/// `{"title": string, "outline": [{"level","text","page"}, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Document title ("" when no title could be selected)
    pub title: String,
    /// Headings in reading order (page ascending, then vertical position)
    pub outline: Vec<HeadingCandidate>,
}

impl OutlineResult {
    /// An empty result for documents with no extractable text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the result carries neither title nor headings.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }
}

/// Explicit failure artifact for a document that could not be processed.
///
/// Batch processing never emits a partial outline: a document yields either
/// a full [`OutlineResult`] or one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Human-readable error description
    pub error: String,
}

impl FailureRecord {
    /// Create a failure record from an error.
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_rank_clips() {
        assert_eq!(HeadingLevel::from_rank(0), HeadingLevel::H1);
        assert_eq!(HeadingLevel::from_rank(1), HeadingLevel::H2);
        assert_eq!(HeadingLevel::from_rank(2), HeadingLevel::H3);
        assert_eq!(HeadingLevel::from_rank(7), HeadingLevel::H3);
    }

    #[test]
    fn test_level_ordering() {
        assert!(HeadingLevel::H1 < HeadingLevel::H2);
        assert!(HeadingLevel::H2 < HeadingLevel::H3);
        assert_eq!(HeadingLevel::H2.depth(), 2);
    }

    #[test]
    fn test_outline_serialization() {
        let result = OutlineResult {
            title: "Annual Report".to_string(),
            outline: vec![HeadingCandidate::new(HeadingLevel::H1, "Introduction", 0)],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["title"], "Annual Report");
        assert_eq!(json["outline"][0]["level"], "H1");
        assert_eq!(json["outline"][0]["text"], "Introduction");
        assert_eq!(json["outline"][0]["page"], 0);
    }

    #[test]
    fn test_empty_result_shape() {
        let json = serde_json::to_string(&OutlineResult::empty()).unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }

    #[test]
    fn test_failure_record() {
        let record = FailureRecord::new("Document is encrypted");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["error"], "Document is encrypted");
    }
}

//! Outline assembly.
//!
//! Orders classified headings into reading order, drops exact duplicates
//! caused by overlapping span splits, and excludes the title. Level
//! assignment is purely size-derived and is never corrected by nesting
//! heuristics: a document with inconsistent font usage produces a
//! structurally valid but semantically imperfect outline.

use std::collections::HashSet;

use crate::model::{HeadingCandidate, HeadingLevel, OutlineResult};

use super::title::strip_filename_suffix;

/// A classified heading with the vertical position needed for ordering.
#[derive(Debug, Clone)]
pub struct PlacedHeading {
    /// Heading level
    pub level: HeadingLevel,
    /// Cleaned text
    pub text: String,
    /// Page index (0-based)
    pub page: u32,
    /// Top edge in page coordinates
    pub top: f32,
}

/// Assemble the final outline from the title and classified headings.
pub fn assemble(
    title: &str,
    mut headings: Vec<PlacedHeading>,
    suppress_form_outlines: bool,
) -> OutlineResult {
    headings.sort_by(|a, b| {
        a.page.cmp(&b.page).then_with(|| {
            a.top
                .partial_cmp(&b.top)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    let mut seen: HashSet<(String, u32, HeadingLevel)> = HashSet::new();
    let mut outline: Vec<HeadingCandidate> = Vec::new();

    for placed in headings {
        // The title never appears in the outline. Title selection strips
        // filename-extension artifacts, so the comparison must too.
        if !title.is_empty()
            && (placed.text == title || strip_filename_suffix(&placed.text) == title)
        {
            continue;
        }
        if seen.insert((placed.text.clone(), placed.page, placed.level)) {
            outline.push(HeadingCandidate::new(placed.level, placed.text, placed.page));
        }
    }

    if suppress_form_outlines && looks_like_form_labels(&outline) {
        log::debug!(
            "Outline of {} entries matches a form/table label pattern, suppressing",
            outline.len()
        );
        outline.clear();
    }

    OutlineResult {
        title: title.to_string(),
        outline,
    }
}

/// Heuristic for form/table documents: many entries dominated by very short
/// or heavily duplicated labels are field names, not headings.
fn looks_like_form_labels(outline: &[HeadingCandidate]) -> bool {
    if outline.len() <= 8 {
        return false;
    }

    let short_labels = outline
        .iter()
        .filter(|h| h.text.split_whitespace().count() <= 5)
        .count();
    let unique_texts: HashSet<String> = outline
        .iter()
        .map(|h| h.text.trim().to_lowercase())
        .collect();

    let short_ratio = short_labels as f32 / outline.len() as f32;
    let unique_ratio = unique_texts.len() as f32 / outline.len() as f32;

    short_ratio > 0.7 || unique_ratio < 0.7
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(level: HeadingLevel, text: &str, page: u32, top: f32) -> PlacedHeading {
        PlacedHeading {
            level,
            text: text.to_string(),
            page,
            top,
        }
    }

    #[test]
    fn test_reading_order() {
        let headings = vec![
            placed(HeadingLevel::H2, "Later Section", 1, 100.0),
            placed(HeadingLevel::H1, "Lower On Page", 0, 500.0),
            placed(HeadingLevel::H1, "Top Of Page", 0, 80.0),
        ];
        let result = assemble("", headings, true);
        let texts: Vec<&str> = result.outline.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["Top Of Page", "Lower On Page", "Later Section"]);
    }

    #[test]
    fn test_exact_duplicates_removed() {
        let headings = vec![
            placed(HeadingLevel::H1, "Overview of the System", 0, 100.0),
            placed(HeadingLevel::H1, "Overview of the System", 0, 100.5),
            placed(HeadingLevel::H2, "Overview of the System", 1, 50.0),
        ];
        let result = assemble("", headings, true);
        // Same (text, page, level) collapses; different page/level survives
        assert_eq!(result.outline.len(), 2);
    }

    #[test]
    fn test_title_excluded() {
        let headings = vec![
            placed(HeadingLevel::H1, "Annual Report Twenty-Four", 0, 50.0),
            placed(HeadingLevel::H1, "First Chapter Begins Here", 0, 200.0),
        ];
        let result = assemble("Annual Report Twenty-Four", headings, true);
        assert_eq!(result.title, "Annual Report Twenty-Four");
        assert_eq!(result.outline.len(), 1);
        assert_eq!(result.outline[0].text, "First Chapter Begins Here");
    }

    fn form_labels() -> Vec<PlacedHeading> {
        [
            "Name", "Date", "Address", "City", "State", "Zip Code", "Phone", "Email",
            "Signature", "Date Signed", "Witness", "Notes",
        ]
        .iter()
        .enumerate()
        .map(|(i, t)| placed(HeadingLevel::H3, t, 0, i as f32 * 20.0))
        .collect()
    }

    #[test]
    fn test_title_with_stripped_suffix_still_excluded() {
        // The title span carried a converter artifact; the selected title is
        // the stripped form, and the raw span must not re-enter the outline
        let headings = vec![
            placed(HeadingLevel::H1, "Project Plan - .docx", 0, 50.0),
            placed(HeadingLevel::H1, "Milestones and Deliverables", 0, 200.0),
        ];
        let result = assemble("Project Plan", headings, true);
        assert_eq!(result.outline.len(), 1);
        assert_eq!(result.outline[0].text, "Milestones and Deliverables");
    }

    #[test]
    fn test_form_label_suppression() {
        let result = assemble("", form_labels(), true);
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_form_suppression_can_be_disabled() {
        let result = assemble("", form_labels(), false);
        assert_eq!(result.outline.len(), 12);
    }

    #[test]
    fn test_real_outline_not_suppressed() {
        let texts = [
            "Introduction to the Problem Domain and Prior Work",
            "A Survey of Existing Approaches in the Literature",
            "Methodology and Experimental Design Considerations",
            "Data Collection Procedures and Quality Controls",
            "Statistical Analysis of the Primary Outcomes",
            "Discussion of Findings and Their Implications",
            "Threats to Validity and Study Limitations",
            "Related Work and Comparison with Alternatives",
            "Conclusions and Directions for Future Research",
            "Acknowledgements and Funding Disclosures",
        ];
        let headings: Vec<PlacedHeading> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| placed(HeadingLevel::H1, t, i as u32, 50.0))
            .collect();
        let result = assemble("", headings, true);
        assert_eq!(result.outline.len(), 10);
    }
}

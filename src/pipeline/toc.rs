//! Table-of-contents page suppression.
//!
//! TOC entries mirror real headings in size and numbering, so left alone
//! they duplicate the whole outline. Pages are flagged by a keyword line
//! ("Contents", "Table of Contents", "Index") or by dotted-leader density,
//! and their lines are removed from candidacy. The keyword line itself
//! stays a candidate: "Table of Contents" is a legitimate heading.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::model::Span;

/// Minimum fraction of a page's lines carrying dotted leaders.
const LEADER_RATIO: f32 = 0.3;

/// Leader density is only meaningful on pages with more lines than this.
const MIN_PAGE_LINES: usize = 5;

fn keyword_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^((table\s+of\s+)?contents?|index)\b").unwrap())
}

fn leader_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.{5,}").unwrap())
}

/// Set of pages identified as table-of-contents pages.
#[derive(Debug, Clone, Default)]
pub struct TocFilter {
    pages: HashSet<u32>,
}

impl TocFilter {
    /// Detect TOC pages across the document.
    ///
    /// A page qualifies when any of its lines starts with a TOC keyword, or
    /// when enough of its lines carry dotted leaders ("Introduction .... 3").
    pub fn detect(spans: &[Span]) -> Self {
        let mut per_page: HashMap<u32, (usize, usize, bool)> = HashMap::new();
        for span in spans {
            let entry = per_page.entry(span.page_index).or_default();
            entry.0 += 1;
            if leader_regex().is_match(&span.text) {
                entry.1 += 1;
            }
            if keyword_regex().is_match(&span.text) {
                entry.2 = true;
            }
        }

        let pages: HashSet<u32> = per_page
            .into_iter()
            .filter(|(_, (lines, leaders, keyword))| {
                *keyword
                    || (*lines > MIN_PAGE_LINES
                        && *leaders as f32 / *lines as f32 > LEADER_RATIO)
            })
            .map(|(page, _)| page)
            .collect();

        if !pages.is_empty() {
            log::debug!("Detected {} table-of-contents pages", pages.len());
        }

        Self { pages }
    }

    /// Whether a page was flagged as a table of contents.
    pub fn is_toc_page(&self, page_index: u32) -> bool {
        self.pages.contains(&page_index)
    }

    /// Whether a span sits on a TOC page and is not the TOC header itself.
    pub fn suppresses(&self, span: &Span) -> bool {
        self.is_toc_page(span.page_index) && !keyword_regex().is_match(&span.text)
    }
}

//! End-to-end pipeline tests against an in-memory span source.

use std::io::Write;

use skimpdf::error::Result;
use skimpdf::{
    extract_from_source, to_json, BBox, ExtractOptions, HeadingLevel, JsonFormat, OutlinePipeline,
    PageGeometry, RawSpan, SpanSource,
};

/// In-memory span source for synthetic documents.
struct VecSource {
    pages: Vec<Vec<RawSpan>>,
    title: Option<String>,
}

impl VecSource {
    fn new(pages: Vec<Vec<RawSpan>>) -> Self {
        Self { pages, title: None }
    }

    fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

impl SpanSource for VecSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_geometry(&self, _page_index: u32) -> Result<PageGeometry> {
        Ok(PageGeometry::LETTER)
    }

    fn page_spans(&self, page_index: u32) -> Result<Vec<RawSpan>> {
        Ok(self.pages[page_index as usize].clone())
    }

    fn document_title(&self) -> Option<String> {
        self.title.clone()
    }
}

fn raw(text: &str, size: f32, font: &str, left: f32, top: f32) -> RawSpan {
    RawSpan {
        text: text.to_string(),
        font_size: size,
        font_name: font.to_string(),
        bold_flag: None,
        bbox: BBox::new(left, top, left + text.len() as f32 * size * 0.5, top + size),
    }
}

fn body(text: &str, top: f32) -> RawSpan {
    raw(text, 10.0, "Times-Roman", 72.0, top)
}

#[test]
fn zero_span_document_yields_empty_result() {
    let source = VecSource::new(vec![vec![], vec![]]);
    let result = extract_from_source(&source, ExtractOptions::default()).unwrap();

    assert!(result.is_empty());
    let json = to_json(&result, JsonFormat::Compact).unwrap();
    assert_eq!(json, r#"{"title":"","outline":[]}"#);
}

#[test]
fn uniform_font_document_yields_empty_outline() {
    let source = VecSource::new(vec![vec![
        body("Everything here uses one size", 100.0),
        body("1. Even Numbered Bold Looking Lines", 130.0),
        body("Nothing can outrank the body", 160.0),
    ]]);
    let result = extract_from_source(&source, ExtractOptions::default()).unwrap();

    assert!(result.outline.is_empty());
    // Title may still be chosen by position
    assert!(!result.title.is_empty());
}

#[test]
fn body_size_lines_never_promoted() {
    // Bold, numbered, and colon-terminated, but at body size
    let mut page = vec![
        raw("1. Definitions:", 10.0, "Helvetica-Bold", 72.0, 100.0),
        raw("Document Heading", 16.0, "Helvetica", 72.0, 60.0),
    ];
    for i in 0..5 {
        page.push(body("filler paragraph text", 200.0 + i as f32 * 14.0));
    }
    let source = VecSource::new(vec![page]);
    let result = extract_from_source(&source, ExtractOptions::default()).unwrap();

    assert!(result
        .outline
        .iter()
        .all(|h| h.text != "1. Definitions:"));
}

#[test]
fn title_is_excluded_from_outline() {
    let source = VecSource::new(vec![
        vec![
            raw("1. Introduction", 18.0, "Helvetica-Bold", 220.0, 80.0),
            body("intro body text one", 200.0),
            body("intro body text two", 220.0),
        ],
        vec![
            raw("1.1 Background", 14.0, "Helvetica", 72.0, 90.0),
            body("background body text", 200.0),
        ],
    ]);
    let result = extract_from_source(&source, ExtractOptions::default()).unwrap();

    // The 18pt line is the largest span on the earliest heading-sized page,
    // so it becomes the title and only the H2 remains
    assert_eq!(result.title, "1. Introduction");
    assert_eq!(result.outline.len(), 1);
    assert_eq!(result.outline[0].text, "1.1 Background");
    assert_eq!(result.outline[0].level, HeadingLevel::H2);
    assert_eq!(result.outline[0].page, 1);
}

#[test]
fn two_page_synthetic_round_trip() {
    // Body size 10, an 18pt bold centered "1. Introduction" on page 0, a
    // 14pt "1.1 Background" on page 1, repeated footer text in the bottom
    // margin of both pages. Metadata carries the document title.
    let page0 = vec![
        raw("1.  Introduction ", 18.0, "Helvetica-Bold", 230.0, 80.0),
        body("first page paragraph one", 200.0),
        body("first page paragraph two", 220.0),
        body("first page paragraph three", 240.0),
        raw("Page 1", 9.0, "Times-Roman", 290.0, 770.0),
        raw("ACME INTERNAL", 18.0, "Helvetica-Bold", 240.0, 755.0),
    ];
    let page1 = vec![
        raw("1.1   Background", 14.0, "Helvetica", 72.0, 90.0),
        body("second page paragraph one", 200.0),
        body("second page paragraph two", 220.0),
        raw("Page 2", 9.0, "Times-Roman", 290.0, 770.0),
        raw("ACME INTERNAL", 18.0, "Helvetica-Bold", 240.0, 755.0),
    ];
    let source =
        VecSource::new(vec![page0, page1]).with_title("Synthetic Test Document");

    let result = extract_from_source(&source, ExtractOptions::default()).unwrap();

    assert_eq!(result.title, "Synthetic Test Document");

    // Whitespace in the raw spans has been cleaned
    let entries: Vec<(&str, &str, u32)> = result
        .outline
        .iter()
        .map(|h| (h.level.as_str(), h.text.as_str(), h.page))
        .collect();
    assert_eq!(
        entries,
        vec![("H1", "1. Introduction", 0), ("H2", "1.1 Background", 1)]
    );

    // Neither the page numbers nor the repeated margin banner survive
    assert!(result.outline.iter().all(|h| !h.text.starts_with("Page")));
    assert!(result.outline.iter().all(|h| h.text != "ACME INTERNAL"));
}

#[test]
fn repeated_margin_text_filtered_even_at_heading_size() {
    // Heading-sized and bold, but repeating in the top band of every page,
    // so it is a running header rather than a heading
    let header = |_: u32| raw("Quarterly Review 2024", 16.0, "Helvetica-Bold", 72.0, 20.0);
    let source = VecSource::new(vec![
        vec![
            header(0),
            raw("Revenue Summary", 16.0, "Helvetica-Bold", 72.0, 120.0),
            body("numbers and prose", 200.0),
            body("more prose", 220.0),
        ],
        vec![header(1), body("continued prose", 200.0), body("and more", 220.0)],
    ]);

    let result = extract_from_source(&source, ExtractOptions::default()).unwrap();
    assert!(result
        .outline
        .iter()
        .all(|h| h.text != "Quarterly Review 2024"));
}

#[test]
fn toc_entries_do_not_leak_into_outline() {
    // Contents page: a heading-sized header plus dotted-leader entries that
    // mirror the real headings in size and numbering
    let page0 = vec![
        raw("Table of Contents", 16.0, "Helvetica-Bold", 200.0, 80.0),
        raw("1. Introduction ........ 2", 14.0, "Helvetica", 72.0, 140.0),
        raw("2. Revenue Analysis ........ 5", 14.0, "Helvetica", 72.0, 170.0),
    ];
    let page1 = vec![
        raw("1. Introduction", 16.0, "Helvetica-Bold", 72.0, 120.0),
        body("opening paragraph", 200.0),
        body("more prose", 220.0),
        body("and more prose", 240.0),
    ];
    let source = VecSource::new(vec![page0, page1]).with_title("Quarterly Review");

    let result = extract_from_source(&source, ExtractOptions::default()).unwrap();

    // The contents header is a legitimate heading; its entries are not
    let texts: Vec<&str> = result.outline.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(texts, vec!["Table of Contents", "1. Introduction"]);
    assert_eq!(result.outline[1].page, 1);
}

#[test]
fn model_path_drives_classification() {
    // A one-feature model: font_size alone separates H1 from body
    let artifact = format!(
        r#"{{
            "schema_version": 1,
            "features": {},
            "font_names": ["Helvetica", "Helvetica-Bold"],
            "alignments": ["left", "center"],
            "classes": ["H1", "body"],
            "weights": [
                [1.0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
            ],
            "bias": [-15.0, 0.0]
        }}"#,
        serde_json::to_string(&skimpdf::FeatureVector::SCHEMA).unwrap()
    );
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(artifact.as_bytes()).unwrap();

    let source = VecSource::new(vec![vec![
        raw("The Document Title", 24.0, "Helvetica-Bold", 180.0, 60.0),
        raw("Chapter One", 18.0, "Helvetica-Bold", 72.0, 150.0),
        body("prose line one", 300.0),
        body("prose line two", 320.0),
        body("prose line three", 340.0),
    ]]);

    let options = ExtractOptions::new().with_model(file.path());
    let pipeline = OutlinePipeline::new(options).unwrap();
    let result = pipeline.extract(&source).unwrap();

    assert_eq!(result.title, "The Document Title");
    assert_eq!(result.outline.len(), 1);
    assert_eq!(result.outline[0].level, HeadingLevel::H1);
    assert_eq!(result.outline[0].text, "Chapter One");
}

#[test]
fn schema_mismatch_is_fatal_at_load() {
    let artifact = r#"{
        "schema_version": 1,
        "features": ["font_size", "something_else"],
        "font_names": [],
        "alignments": [],
        "classes": ["body"],
        "weights": [[0.0]],
        "bias": [0.0]
    }"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(artifact.as_bytes()).unwrap();

    let options = ExtractOptions::new().with_model(file.path());
    let err = OutlinePipeline::new(options).unwrap_err();
    assert!(err.is_schema_error());
}

#[test]
fn pipeline_is_reusable_across_documents() {
    // No state leaks between documents: a headingless document processed
    // after a heading-rich one stays headingless
    let pipeline = OutlinePipeline::new(ExtractOptions::default()).unwrap();

    let rich = VecSource::new(vec![vec![
        raw("Big Heading Line", 20.0, "Helvetica-Bold", 72.0, 80.0),
        body("text", 200.0),
        body("text again", 220.0),
    ]]);
    let flat = VecSource::new(vec![vec![body("only body", 100.0), body("still body", 120.0)]]);

    let first = pipeline.extract(&rich).unwrap();
    assert_eq!(first.outline.len(), 0); // 20pt line became the title
    assert_eq!(first.title, "Big Heading Line");

    let second = pipeline.extract(&flat).unwrap();
    assert!(second.outline.is_empty());
}

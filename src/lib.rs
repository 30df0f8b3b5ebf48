//! # skimpdf
//!
//! Heading detection and outline extraction for PDF documents.
//!
//! Many PDFs carry no embedded bookmarks. This library reconstructs a
//! navigable outline (title + H1/H2/H3 headings with page numbers) from raw
//! text geometry: font-size statistics infer the body text size, repeated
//! header/footer strings are suppressed, and each surviving line is
//! classified by rules or by a pre-trained artifact sharing the same
//! feature schema.
//!
//! ## Quick Start
//!
//! ```no_run
//! use skimpdf::extract_file;
//!
//! fn main() -> skimpdf::Result<()> {
//!     let result = extract_file("document.pdf")?;
//!     println!("{}", result.title);
//!     for heading in &result.outline {
//!         println!("{} {} (p. {})", heading.level, heading.text, heading.page);
//!     }
//!     Ok(())
//! }
//! ```

pub mod detect;
pub mod error;
pub mod model;
pub mod options;
pub mod pipeline;
pub mod source;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use model::{
    Alignment, BBox, FailureRecord, HeadingCandidate, HeadingLevel, OutlineResult, Span,
};
pub use options::ExtractOptions;
pub use pipeline::{
    Classify, DocumentFontProfile, FeatureVector, Label, LinearModel, MarginFilter,
    ModelClassifier, OutlinePipeline, RuleClassifier, TocFilter,
};
pub use source::{PageGeometry, PdfSpanSource, RawSpan, SpanSource};

use std::path::Path;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Extract the outline of a PDF file with default options.
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    extract_file_with_options(path, ExtractOptions::default())
}

/// Extract the outline of a PDF file with custom options.
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<OutlineResult> {
    let source = PdfSpanSource::open(path)?;
    let pipeline = OutlinePipeline::new(options)?;
    pipeline.extract(&source)
}

/// Extract the outline of a PDF given as bytes.
pub fn extract_bytes(data: &[u8]) -> Result<OutlineResult> {
    extract_bytes_with_options(data, ExtractOptions::default())
}

/// Extract the outline of a PDF given as bytes, with custom options.
pub fn extract_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<OutlineResult> {
    let source = PdfSpanSource::from_bytes(data)?;
    let pipeline = OutlinePipeline::new(options)?;
    pipeline.extract(&source)
}

/// Extract an outline from any span source.
///
/// This is the seam tests and alternative decoders plug into.
pub fn extract_from_source(
    source: &dyn SpanSource,
    options: ExtractOptions,
) -> Result<OutlineResult> {
    let pipeline = OutlinePipeline::new(options)?;
    pipeline.extract(source)
}

/// Serialize an outline result to JSON.
pub fn to_json(result: &OutlineResult, format: JsonFormat) -> Result<String> {
    let rendered = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result),
        JsonFormat::Compact => serde_json::to_string(result),
    };
    rendered.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

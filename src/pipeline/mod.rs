//! The heading-detection pipeline.
//!
//! Data flows strictly one way: spans → font statistics → margin filtering
//! → feature vectors → labels → assembled outline. Each stage is pure given
//! its inputs, and all document-scoped state (the font profile, the
//! repeated-margin set) is passed as immutable context.

mod assemble;
mod classify;
mod collect;
mod features;
mod fonts;
mod margins;
mod title;
mod toc;

pub use assemble::{assemble, PlacedHeading};
pub use classify::{Classify, Label, LinearModel, ModelClassifier, RuleClassifier};
pub use collect::{clean_text, collect_spans, is_bold_font_name};
pub use features::{ends_with_colon, is_numbered, starts_with_capital, FeatureVector};
pub use fonts::DocumentFontProfile;
pub use margins::MarginFilter;
pub use title::select_title;
pub use toc::TocFilter;

use crate::error::Result;
use crate::model::{OutlineResult, Span};
use crate::options::ExtractOptions;
use crate::source::SpanSource;

/// One configured pipeline, reusable across documents.
///
/// The model artifact, when configured, is loaded once at construction; all
/// per-document state lives inside [`OutlinePipeline::extract`].
#[derive(Debug)]
pub struct OutlinePipeline {
    options: ExtractOptions,
    model: Option<LinearModel>,
}

impl OutlinePipeline {
    /// Create a pipeline, loading the model artifact if one is configured.
    pub fn new(options: ExtractOptions) -> Result<Self> {
        let model = match &options.model_path {
            Some(path) => {
                log::info!("Loading classifier artifact from {}", path.display());
                Some(LinearModel::from_path(path)?)
            }
            None => None,
        };
        Ok(Self { options, model })
    }

    /// Create a pipeline around an already-loaded model artifact.
    pub fn with_model(options: ExtractOptions, model: LinearModel) -> Self {
        Self {
            options,
            model: Some(model),
        }
    }

    /// Extract the outline of one document.
    ///
    /// A document with no extractable text yields an empty result, not an
    /// error.
    pub fn extract(&self, source: &dyn SpanSource) -> Result<OutlineResult> {
        let (spans, geometries) = collect_spans(source, &self.options)?;
        if spans.is_empty() {
            log::info!("Document has no extractable text");
            return Ok(OutlineResult::empty());
        }

        let profile = DocumentFontProfile::from_spans(&spans);

        // Title selection runs before margin filtering on purpose: a title
        // that visually resembles a margin string must survive.
        let metadata_title = source.document_title();
        let title = select_title(&spans, &profile, metadata_title.as_deref());

        let toc = TocFilter::detect(&spans);
        let filter = MarginFilter::detect(&spans, &geometries, &self.options);
        let spans = filter.apply(spans);

        let rule_classifier = RuleClassifier::new(&profile);
        let model_classifier = self
            .model
            .as_ref()
            .map(|m| ModelClassifier::new(m, &profile));
        let classifier: &dyn Classify = match &model_classifier {
            Some(m) => m,
            None => &rule_classifier,
        };
        log::debug!("Classifying {} lines via {} path", spans.len(), classifier.name());

        let mut placed = Vec::new();
        for span in &spans {
            if !self.is_candidate(span) {
                continue;
            }
            // TOC entries mirror real headings; only the TOC header survives
            if toc.suppresses(span) {
                continue;
            }
            // Size gate: candidates must use a heading size, whatever the
            // classifier would say about other cues
            if !profile.is_heading_size(span.font_size) {
                continue;
            }

            let features = FeatureVector::from_span(span);
            if let Label::Heading(level) = classifier.classify(&features) {
                placed.push(PlacedHeading {
                    level,
                    text: span.text.clone(),
                    page: span.page_index,
                    top: span.bbox.top,
                });
            }
        }

        Ok(assemble(&title, placed, self.options.suppress_form_outlines))
    }

    /// Content gates applied before feature extraction: candidates need
    /// alphabetic content and a plausible heading length.
    fn is_candidate(&self, span: &Span) -> bool {
        if !span.has_alphabetic() {
            return false;
        }
        let len = span.text.chars().count();
        len >= self.options.min_heading_chars && len <= self.options.max_heading_chars
    }
}

//! Heading classification.
//!
//! Two interchangeable strategies share one contract: a feature vector maps
//! to a heading level or body. The rule-based path is the fallback when no
//! trained artifact is available and defines the semantics the model path
//! approximates. Either way, the size gate is absolute: text at or below
//! body size is never a heading, whatever its other cues.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::HeadingLevel;

use super::features::FeatureVector;
use super::fonts::DocumentFontProfile;

/// Classification outcome for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// A heading at the given level
    Heading(HeadingLevel),
    /// Regular body text
    Body,
}

/// Classifier contract: one label per feature vector.
pub trait Classify {
    /// Classify a single line.
    fn classify(&self, features: &FeatureVector) -> Label;

    /// Strategy name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Rule-based classifier.
///
/// A line is a heading iff its font size is strictly above body size and at
/// least one lexical/typographic cue holds. The level comes purely from the
/// size's rank in the document font profile.
pub struct RuleClassifier<'a> {
    profile: &'a DocumentFontProfile,
}

impl<'a> RuleClassifier<'a> {
    /// Create a rule classifier over a document's font profile.
    pub fn new(profile: &'a DocumentFontProfile) -> Self {
        Self { profile }
    }
}

impl Classify for RuleClassifier<'_> {
    fn classify(&self, features: &FeatureVector) -> Label {
        if !self.profile.is_heading_size(features.font_size) {
            return Label::Body;
        }

        let has_cue = features.is_bold
            || features.is_numbered
            || features.starts_with_capital
            || features.ends_with_colon;
        if !has_cue {
            return Label::Body;
        }

        match self.profile.level_for(features.font_size) {
            Some(level) => Label::Heading(level),
            None => Label::Body,
        }
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

/// Supported artifact schema version.
const ARTIFACT_VERSION: u32 = 1;

/// Pre-trained linear classifier artifact.
///
/// A frozen JSON artifact produced by offline training. It declares the
/// feature schema it was trained against plus the one-hot vocabularies for
/// the categorical features; both are validated at load time. Unknown
/// categories at prediction time encode to all-zero blocks, matching the
/// training-side encoder behavior.
#[derive(Debug, Clone)]
pub struct LinearModel {
    font_names: Vec<String>,
    alignments: Vec<String>,
    classes: Vec<Label>,
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

#[derive(Deserialize)]
struct ArtifactFile {
    schema_version: u32,
    features: Vec<String>,
    font_names: Vec<String>,
    alignments: Vec<String>,
    classes: Vec<String>,
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

impl LinearModel {
    /// Load and validate a model artifact from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_slice(&data)
    }

    /// Load and validate a model artifact from bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let artifact: ArtifactFile =
            serde_json::from_slice(data).map_err(|e| Error::ModelLoad(e.to_string()))?;

        if artifact.schema_version != ARTIFACT_VERSION {
            return Err(Error::FeatureSchema(format!(
                "artifact schema version {} (expected {})",
                artifact.schema_version, ARTIFACT_VERSION
            )));
        }

        if artifact.features != FeatureVector::SCHEMA {
            return Err(Error::FeatureSchema(format!(
                "artifact feature list {:?} does not match {:?}",
                artifact.features,
                FeatureVector::SCHEMA
            )));
        }

        let classes = artifact
            .classes
            .iter()
            .map(|c| match c.as_str() {
                "H1" => Ok(Label::Heading(HeadingLevel::H1)),
                "H2" => Ok(Label::Heading(HeadingLevel::H2)),
                "H3" => Ok(Label::Heading(HeadingLevel::H3)),
                "body" => Ok(Label::Body),
                other => Err(Error::ModelLoad(format!("unknown class label: {}", other))),
            })
            .collect::<Result<Vec<Label>>>()?;

        let encoded_len =
            FeatureVector::NUMERIC_LEN + artifact.font_names.len() + artifact.alignments.len();

        if artifact.weights.len() != classes.len() || artifact.bias.len() != classes.len() {
            return Err(Error::ModelLoad(format!(
                "expected {} weight rows and biases, got {} and {}",
                classes.len(),
                artifact.weights.len(),
                artifact.bias.len()
            )));
        }
        if let Some(row) = artifact.weights.iter().find(|r| r.len() != encoded_len) {
            return Err(Error::FeatureSchema(format!(
                "weight row of length {} (encoded features are {})",
                row.len(),
                encoded_len
            )));
        }

        Ok(Self {
            font_names: artifact.font_names,
            alignments: artifact.alignments,
            classes,
            weights: artifact.weights,
            bias: artifact.bias,
        })
    }

    /// Encode a feature vector against this artifact's vocabularies.
    fn encode(&self, features: &FeatureVector) -> Vec<f32> {
        let mut encoded = Vec::with_capacity(
            FeatureVector::NUMERIC_LEN + self.font_names.len() + self.alignments.len(),
        );
        encoded.extend_from_slice(&features.numeric_values());

        for name in &self.font_names {
            encoded.push((name == &features.font_name) as u8 as f32);
        }
        let alignment = features.alignment.to_string();
        for name in &self.alignments {
            encoded.push((name == &alignment) as u8 as f32);
        }
        encoded
    }

    /// Predict a label by argmax over per-class linear scores.
    pub fn predict(&self, features: &FeatureVector) -> Label {
        let encoded = self.encode(features);

        let mut best = Label::Body;
        let mut best_score = f32::NEG_INFINITY;
        for (i, row) in self.weights.iter().enumerate() {
            let score: f32 = row
                .iter()
                .zip(&encoded)
                .map(|(w, x)| w * x)
                .sum::<f32>()
                + self.bias[i];
            if score > best_score {
                best_score = score;
                best = self.classes[i];
            }
        }
        best
    }
}

/// Model-backed classifier.
///
/// Wraps a frozen [`LinearModel`] behind the common contract. The size gate
/// still applies: body-sized lines are labeled body without consulting the
/// model, so a model cannot promote text the font profile rules out.
pub struct ModelClassifier<'a> {
    model: &'a LinearModel,
    profile: &'a DocumentFontProfile,
}

impl<'a> ModelClassifier<'a> {
    /// Create a model classifier for one document.
    pub fn new(model: &'a LinearModel, profile: &'a DocumentFontProfile) -> Self {
        Self { model, profile }
    }
}

impl Classify for ModelClassifier<'_> {
    fn classify(&self, features: &FeatureVector) -> Label {
        if !self.profile.is_heading_size(features.font_size) {
            return Label::Body;
        }
        self.model.predict(features)
    }

    fn name(&self) -> &'static str {
        "model"
    }
}

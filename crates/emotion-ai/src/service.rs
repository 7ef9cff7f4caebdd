//! Text in, emotion out.

use std::sync::Arc;

use emotion_core::{EmotionLabel, LabelDistribution};
use tracing::debug;

use crate::{ClassifierError, TextClassifier};

/// Everything the home page shows for one submitted text.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: EmotionLabel,
    pub glyph: &'static str,
    /// Highest class probability.
    pub confidence: f64,
    pub distribution: LabelDistribution,
}

/// Runs inference against a classifier loaded once at startup.
///
/// Cloning is cheap; clones share the same artifact.
#[derive(Clone)]
pub struct PredictionService {
    classifier: Arc<dyn TextClassifier>,
}

impl PredictionService {
    pub fn new(classifier: Arc<dyn TextClassifier>) -> Self {
        Self { classifier }
    }

    /// Label names in the artifact's class order.
    pub fn classes(&self) -> &[String] {
        self.classifier.classes()
    }

    /// The most likely label for `text`. Empty text is valid input.
    pub fn predict(&self, text: &str) -> Result<String, ClassifierError> {
        self.classifier.predict(text)
    }

    /// Probability per label, in the artifact's class order.
    pub fn predict_distribution(&self, text: &str) -> Result<LabelDistribution, ClassifierError> {
        let proba = self.classifier.predict_proba(text)?;
        let classes = self.classifier.classes();
        if proba.len() != classes.len() {
            return Err(ClassifierError::InvalidArtifact(format!(
                "{} probabilities for {} classes",
                proba.len(),
                classes.len()
            )));
        }
        Ok(LabelDistribution::from_parts(classes, &proba))
    }

    /// Label, glyph, confidence, and distribution from a single inference.
    pub fn classify(&self, text: &str) -> Result<Prediction, ClassifierError> {
        let distribution = self.predict_distribution(text)?;
        let (top, confidence) = distribution
            .top()
            .ok_or_else(|| ClassifierError::InvalidArtifact("classifier has no classes".into()))?;
        let label: EmotionLabel = top
            .parse()
            .map_err(|_| ClassifierError::UnknownLabel(top.to_string()))?;
        debug!(%label, confidence, "classified text");
        Ok(Prediction {
            label,
            glyph: label.glyph(),
            confidence,
            distribution,
        })
    }
}

//! Bag-of-words linear classifier loaded from a single JSON artifact.
//!
//! The artifact is a trained count-vectorizer + multinomial logistic
//! regression pipeline exported as plain data:
//!
//! ```json
//! {
//!   "name": "emotion_classifier_pipe_lr",
//!   "classes": ["anger", "joy"],
//!   "vocabulary": {"furious": 0, "delighted": 1},
//!   "coef": [[2.1, -0.4], [-0.3, 1.8]],
//!   "intercept": [0.0, 0.1]
//! }
//! ```
//!
//! `coef` has one row per class and one column per vocabulary entry.
//! Probabilities are the softmax of `coef · counts + intercept`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{ClassifierError, TextClassifier};

fn default_lowercase() -> bool {
    true
}

fn default_min_token_len() -> usize {
    2
}

/// A validated linear text-classification pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearPipeline {
    #[serde(default)]
    name: Option<String>,
    classes: Vec<String>,
    #[serde(default = "default_lowercase")]
    lowercase: bool,
    #[serde(default = "default_min_token_len")]
    min_token_len: usize,
    vocabulary: HashMap<String, usize>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

impl LinearPipeline {
    /// Load and validate an artifact file.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        if !path.exists() {
            return Err(ClassifierError::ArtifactNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let pipeline = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            name = pipeline.name.as_deref().unwrap_or("unnamed"),
            classes = pipeline.classes.len(),
            features = pipeline.n_features(),
            "loaded classifier artifact"
        );
        Ok(pipeline)
    }

    /// Parse and validate an artifact from its JSON text.
    pub fn from_json(raw: &str) -> Result<Self, ClassifierError> {
        let pipeline: Self = serde_json::from_str(raw)?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Width of the feature space.
    pub fn n_features(&self) -> usize {
        self.coef.first().map(Vec::len).unwrap_or(0)
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        let invalid = |msg: String| -> Result<(), ClassifierError> {
            Err(ClassifierError::InvalidArtifact(msg))
        };

        if self.classes.is_empty() {
            return invalid("no classes".into());
        }
        let mut seen = HashSet::new();
        for class in &self.classes {
            if !seen.insert(class.as_str()) {
                return invalid(format!("duplicate class '{class}'"));
            }
        }
        if self.coef.len() != self.classes.len() {
            return invalid(format!(
                "coef has {} rows for {} classes",
                self.coef.len(),
                self.classes.len()
            ));
        }
        if self.intercept.len() != self.classes.len() {
            return invalid(format!(
                "intercept has {} entries for {} classes",
                self.intercept.len(),
                self.classes.len()
            ));
        }
        let width = self.n_features();
        if let Some(row) = self.coef.iter().position(|r| r.len() != width) {
            return invalid(format!(
                "coef row {row} has {} columns, expected {width}",
                self.coef[row].len()
            ));
        }
        if let Some((token, idx)) = self.vocabulary.iter().find(|(_, i)| **i >= width) {
            return invalid(format!(
                "vocabulary entry '{token}' maps to column {idx}, only {width} features"
            ));
        }
        Ok(())
    }

    /// Term counts over the vocabulary, keyed by feature column.
    fn vectorize(&self, text: &str) -> HashMap<usize, f64> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in text
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|t| t.chars().count() >= self.min_token_len)
        {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        counts
    }
}

impl TextClassifier for LinearPipeline {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_proba(&self, text: &str) -> Result<Vec<f64>, ClassifierError> {
        let features = self.vectorize(text);
        let scores: Vec<f64> = self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| {
                bias + features
                    .iter()
                    .map(|(&idx, &count)| row[idx] * count)
                    .sum::<f64>()
            })
            .collect();
        debug!(tokens = features.len(), "scored text");
        Ok(softmax(&scores))
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn small_pipeline() -> LinearPipeline {
        let raw = json!({
            "name": "test",
            "classes": ["anger", "happy", "neutral"],
            "vocabulary": {"furious": 0, "happy": 1, "glad": 2},
            "coef": [
                [3.0, -1.0, -1.0],
                [-1.0, 3.0, 2.0],
                [0.0, 0.0, 0.0]
            ],
            "intercept": [0.0, 0.0, 0.5]
        });
        LinearPipeline::from_json(&raw.to_string()).unwrap()
    }

    fn shipped_artifact() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("models")
            .join("emotion_classifier.json")
    }

    #[test]
    fn probabilities_sum_to_one() {
        let clf = small_pipeline();
        for text in ["I am furious", "so happy and glad", "nothing matches", ""] {
            let proba = clf.predict_proba(text).unwrap();
            assert_eq!(proba.len(), 3);
            let total: f64 = proba.iter().sum();
            assert!((total - 1.0).abs() < 1e-6, "{text:?} sums to {total}");
        }
    }

    #[test]
    fn predict_matches_argmax() {
        let clf = small_pipeline();
        assert_eq!(clf.predict("I am FURIOUS!").unwrap(), "anger");
        assert_eq!(clf.predict("happy happy, glad").unwrap(), "happy");
    }

    #[test]
    fn empty_text_falls_back_to_intercept() {
        let clf = small_pipeline();
        assert_eq!(clf.predict("").unwrap(), "neutral");
    }

    #[test]
    fn short_tokens_are_ignored() {
        let raw = json!({
            "classes": ["a", "b"],
            "vocabulary": {"i": 0},
            "coef": [[5.0], [0.0]],
            "intercept": [0.0, 1.0]
        });
        let clf = LinearPipeline::from_json(&raw.to_string()).unwrap();
        assert_eq!(clf.predict("i i i").unwrap(), "b");
    }

    #[test]
    fn case_sensitive_when_lowercase_disabled() {
        let raw = json!({
            "classes": ["anger", "neutral"],
            "lowercase": false,
            "vocabulary": {"furious": 0},
            "coef": [[4.0], [0.0]],
            "intercept": [0.0, 0.0]
        });
        let clf = LinearPipeline::from_json(&raw.to_string()).unwrap();
        assert_eq!(clf.predict("furious").unwrap(), "anger");
        // Tie at 0.5/0.5 resolves to the first class.
        assert_eq!(clf.predict("FURIOUS").unwrap(), "anger");
        let proba = clf.predict_proba("FURIOUS").unwrap();
        assert!((proba[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rejects_mismatched_intercept() {
        let raw = json!({
            "classes": ["a", "b"],
            "vocabulary": {},
            "coef": [[], []],
            "intercept": [0.0]
        });
        let result = LinearPipeline::from_json(&raw.to_string());
        assert!(matches!(result, Err(ClassifierError::InvalidArtifact(_))));
    }

    #[test]
    fn rejects_ragged_coef() {
        let raw = json!({
            "classes": ["a", "b"],
            "vocabulary": {"x": 0},
            "coef": [[1.0, 2.0], [1.0]],
            "intercept": [0.0, 0.0]
        });
        let result = LinearPipeline::from_json(&raw.to_string());
        assert!(matches!(result, Err(ClassifierError::InvalidArtifact(_))));
    }

    #[test]
    fn rejects_vocabulary_out_of_range() {
        let raw = json!({
            "classes": ["a"],
            "vocabulary": {"x": 3},
            "coef": [[1.0]],
            "intercept": [0.0]
        });
        let result = LinearPipeline::from_json(&raw.to_string());
        assert!(matches!(result, Err(ClassifierError::InvalidArtifact(_))));
    }

    #[test]
    fn rejects_duplicate_and_empty_classes() {
        let dup = json!({
            "classes": ["a", "a"],
            "vocabulary": {},
            "coef": [[], []],
            "intercept": [0.0, 0.0]
        });
        assert!(matches!(
            LinearPipeline::from_json(&dup.to_string()),
            Err(ClassifierError::InvalidArtifact(_))
        ));

        let empty = json!({
            "classes": [],
            "vocabulary": {},
            "coef": [],
            "intercept": []
        });
        assert!(matches!(
            LinearPipeline::from_json(&empty.to_string()),
            Err(ClassifierError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = LinearPipeline::from_json("{ not json");
        assert!(matches!(result, Err(ClassifierError::Parse(_))));
    }

    #[test]
    fn load_missing_file_errors() {
        let result = LinearPipeline::load(Path::new("/nonexistent/model.json"));
        assert!(matches!(result, Err(ClassifierError::ArtifactNotFound(_))));
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("model.json");
        let pipeline = small_pipeline();
        std::fs::write(&path, serde_json::to_string(&pipeline).unwrap()).unwrap();

        let loaded = LinearPipeline::load(&path).unwrap();
        assert_eq!(loaded.name(), Some("test"));
        assert_eq!(loaded.classes(), pipeline.classes());
        assert_eq!(loaded.n_features(), 3);
    }

    #[test]
    fn shipped_artifact_covers_all_emotions() {
        let clf = LinearPipeline::load(&shipped_artifact()).unwrap();
        let classes: Vec<&str> = clf.classes().iter().map(String::as_str).collect();
        let expected: Vec<&str> = emotion_core::EmotionLabel::ALL
            .iter()
            .map(|l| l.as_str())
            .collect();
        assert_eq!(classes, expected);
    }

    #[test]
    fn shipped_artifact_predicts_happy() {
        let clf = LinearPipeline::load(&shipped_artifact()).unwrap();
        let proba = clf.predict_proba("I am so happy today").unwrap();
        let total: f64 = proba.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
        assert_eq!(clf.predict("I am so happy today").unwrap(), "happy");
    }
}

//! Per-class probabilities for one classified text.

use serde::{Deserialize, Serialize};

/// Probability per label, in the classifier's fixed class order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDistribution {
    entries: Vec<(String, f64)>,
}

impl LabelDistribution {
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    /// Pair `classes` with `probabilities` positionally.
    pub fn from_parts(classes: &[String], probabilities: &[f64]) -> Self {
        Self {
            entries: classes
                .iter()
                .cloned()
                .zip(probabilities.iter().copied())
                .collect(),
        }
    }

    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| *p)
    }

    /// The first label holding the maximum probability.
    pub fn top(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (label, p) in &self.entries {
            match best {
                Some((_, bp)) if *p <= bp => {}
                _ => best = Some((label.as_str(), *p)),
            }
        }
        best
    }

    /// Maximum probability, 0.0 when empty.
    pub fn confidence(&self) -> f64 {
        self.top().map(|(_, p)| p).unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }
}

//! The contract every loaded classifier artifact satisfies.

use crate::ClassifierError;

/// A pre-trained text classifier.
///
/// Implementations are immutable once loaded and are shared across
/// sessions behind an `Arc`, so they must be `Send + Sync`.
pub trait TextClassifier: Send + Sync {
    /// Label names, in the fixed order `predict_proba` reports them.
    fn classes(&self) -> &[String];

    /// One probability per entry of [`classes`](Self::classes), summing to 1.
    fn predict_proba(&self, text: &str) -> Result<Vec<f64>, ClassifierError>;

    /// The most likely label. Ties go to the earliest class.
    fn predict(&self, text: &str) -> Result<String, ClassifierError> {
        let proba = self.predict_proba(text)?;
        let idx = argmax(&proba).ok_or_else(|| {
            ClassifierError::InvalidArtifact("classifier has no classes".into())
        })?;
        self.classes()
            .get(idx)
            .cloned()
            .ok_or_else(|| ClassifierError::InvalidArtifact(format!("no class at index {idx}")))
    }
}

/// Index of the first maximum.
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        classes: Vec<String>,
        proba: Vec<f64>,
    }

    impl TextClassifier for Fixed {
        fn classes(&self) -> &[String] {
            &self.classes
        }

        fn predict_proba(&self, _text: &str) -> Result<Vec<f64>, ClassifierError> {
            Ok(self.proba.clone())
        }
    }

    #[test]
    fn argmax_first_of_ties() {
        assert_eq!(argmax(&[0.1, 0.45, 0.45]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn default_predict_uses_highest_probability() {
        let clf = Fixed {
            classes: vec!["anger".into(), "joy".into(), "fear".into()],
            proba: vec![0.2, 0.5, 0.3],
        };
        assert_eq!(clf.predict("anything").unwrap(), "joy");
    }

    #[test]
    fn default_predict_without_classes_errors() {
        let clf = Fixed {
            classes: vec![],
            proba: vec![],
        };
        assert!(matches!(
            clf.predict("x"),
            Err(ClassifierError::InvalidArtifact(_))
        ));
    }
}

//! Inference layer: the serialized text-classification artifact and the
//! prediction service built on it.

mod artifact;
mod classifier;
mod error;
mod service;

pub use artifact::LinearPipeline;
pub use classifier::TextClassifier;
pub use error::ClassifierError;
pub use service::{Prediction, PredictionService};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("model artifact not found: {0}")]
    ArtifactNotFound(PathBuf),

    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("model predicted label '{0}' which has no display glyph")]
    UnknownLabel(String),
}

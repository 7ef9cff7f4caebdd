use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no glyph for emotion label '{0}'")]
    UnknownEmotion(String),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

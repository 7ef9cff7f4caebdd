//! The closed set of emotion labels and their display glyphs.
//!
//! Label names match the class strings written into the classifier
//! artifact. `Sad` and `Sadness` are distinct classes in the trained label
//! set and stay distinct here, even though they render with the same glyph.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// An emotion the classifier can predict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Anger,
    Disgust,
    Fear,
    Happy,
    Joy,
    Neutral,
    Sad,
    Sadness,
    Shame,
    Surprise,
}

impl EmotionLabel {
    /// Every label, in artifact class order.
    pub const ALL: [EmotionLabel; 10] = [
        Self::Anger,
        Self::Disgust,
        Self::Fear,
        Self::Happy,
        Self::Joy,
        Self::Neutral,
        Self::Sad,
        Self::Sadness,
        Self::Shame,
        Self::Surprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anger => "anger",
            Self::Disgust => "disgust",
            Self::Fear => "fear",
            Self::Happy => "happy",
            Self::Joy => "joy",
            Self::Neutral => "neutral",
            Self::Sad => "sad",
            Self::Sadness => "sadness",
            Self::Shame => "shame",
            Self::Surprise => "surprise",
        }
    }

    /// Emoji shown next to a prediction.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Anger => "😠",
            Self::Disgust => "🤮",
            Self::Fear => "😨😱",
            Self::Happy => "🤗",
            Self::Joy => "😂",
            Self::Neutral => "😐",
            Self::Sad | Self::Sadness => "😔",
            Self::Shame => "😳",
            Self::Surprise => "😮",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| CoreError::UnknownEmotion(s.to_string()))
    }
}

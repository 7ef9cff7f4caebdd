//! Pure view construction: `ViewState` in, `Screen` out.

use arrow::array::{Array, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use emotion_ai::Prediction;
use emotion_core::{frames, page_counts};

use crate::app::{Page, Submission, ViewState};

pub const APP_TITLE: &str = "Emotion Classifier App";

const ABOUT_TEXT: &str = "Type a sentence on the Home page and a pre-trained text classifier \
guesses the emotion behind it. The Monitor page lists every page visit and submitted text.";

/// Bars keyed by label, in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<(String, f64)>,
}

impl BarChart {
    /// Build a chart from a string key column and a numeric value column.
    pub fn from_batch(batch: &RecordBatch, x: &str, y: &str) -> Result<Self, ArrowError> {
        let keys = batch
            .column_by_name(x)
            .ok_or_else(|| ArrowError::SchemaError(format!("missing '{x}' column")))?;
        let keys = keys
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| ArrowError::SchemaError(format!("'{x}' is not Utf8")))?;

        let values = batch
            .column_by_name(y)
            .ok_or_else(|| ArrowError::SchemaError(format!("missing '{y}' column")))?;
        let values = cast(values, &DataType::Float64)?;
        let values = values
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| ArrowError::SchemaError(format!("'{y}' is not numeric")))?;

        let bars = (0..batch.num_rows())
            .filter(|&i| !keys.is_null(i) && !values.is_null(i))
            .map(|i| (keys.value(i).to_string(), values.value(i)))
            .collect();

        Ok(Self {
            x_label: x.to_string(),
            y_label: y.to_string(),
            bars,
        })
    }
}

/// One visual element of a screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Menu { selected: Page },
    Subheader(String),
    /// Collapsible section header.
    Section(String),
    Success(String),
    Text(String),
    Error(String),
    Table(RecordBatch),
    Chart(BarChart),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Screen {
    pub blocks: Vec<Block>,
}

impl Screen {
    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

/// Build the screen for one view snapshot.
pub fn render(state: &ViewState) -> Screen {
    let mut screen = Screen::default();
    screen.push(Block::Title(APP_TITLE.into()));

    match state {
        ViewState::Home { submission } => {
            screen.push(Block::Menu {
                selected: Page::Home,
            });
            screen.push(Block::Subheader("Home-Emotion In Text".into()));
            if let Some(submission) = submission {
                render_submission(&mut screen, submission);
            }
        }
        ViewState::Monitor { events } => {
            screen.push(Block::Menu {
                selected: Page::Monitor,
            });
            screen.push(Block::Subheader("Monitor App".into()));
            screen.push(Block::Section("Page Metrics".into()));
            let tables = frames::visits_batch(events).and_then(|visits| {
                Ok((visits, frames::page_counts_batch(&page_counts(events))?))
            });
            match tables {
                Ok((visits, counts)) => {
                    screen.push(Block::Table(visits));
                    push_chart(&mut screen, &counts, "Pagename", "Counts");
                }
                Err(err) => screen.push(Block::Error(err.to_string())),
            }
        }
        ViewState::About => {
            screen.push(Block::Menu {
                selected: Page::About,
            });
            screen.push(Block::Subheader("About".into()));
            screen.push(Block::Text(ABOUT_TEXT.into()));
        }
        ViewState::Failed { page } => {
            screen.push(Block::Menu { selected: *page });
            screen.push(Block::Error(
                "Something went wrong loading this page. Please try again.".into(),
            ));
        }
    }

    screen
}

fn render_submission(screen: &mut Screen, submission: &Submission) {
    screen.push(Block::Success("Original Text".into()));
    screen.push(Block::Text(submission.text.clone()));

    match &submission.outcome {
        Ok(prediction) => render_prediction(screen, prediction),
        Err(message) => screen.push(Block::Error(format!("Prediction failed: {message}"))),
    }
}

fn render_prediction(screen: &mut Screen, prediction: &Prediction) {
    screen.push(Block::Success("Prediction".into()));
    screen.push(Block::Text(format!(
        "{}: {}",
        prediction.label, prediction.glyph
    )));
    screen.push(Block::Text(format!(
        "Confidence: {}",
        percent(prediction.confidence)
    )));

    screen.push(Block::Success("Prediction Probability".into()));
    match frames::distribution_batch(&prediction.distribution) {
        Ok(batch) => push_chart(screen, &batch, "emotions", "probability"),
        Err(err) => screen.push(Block::Error(err.to_string())),
    }
}

fn push_chart(screen: &mut Screen, batch: &RecordBatch, x: &str, y: &str) {
    match BarChart::from_batch(batch, x, y) {
        Ok(chart) => screen.push(Block::Chart(chart)),
        Err(err) => screen.push(Block::Error(err.to_string())),
    }
}

/// A fraction as a percentage with two decimals.
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

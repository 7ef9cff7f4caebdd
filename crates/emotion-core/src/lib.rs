mod distribution;
mod error;
pub mod label;
pub mod schema;
pub mod visit;

pub use distribution::LabelDistribution;
pub use error::CoreError;
pub use label::EmotionLabel;
pub use schema::frames;
pub use visit::{PageCount, VisitEvent, now_timestamp, page_counts};

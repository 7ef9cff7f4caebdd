//! Visit events and the per-page aggregation shown on the monitor page.
//!
//! A visit event is either a page navigation ("Home", "Monitor") or a raw
//! text submission. Both kinds share one field and one log.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One row of the visit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitEvent {
    pub page_or_text: String,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}

impl VisitEvent {
    pub fn new(page_or_text: impl Into<String>, timestamp: f64) -> Self {
        Self {
            page_or_text: page_or_text.into(),
            timestamp,
        }
    }
}

/// Number of visit events sharing one `page_or_text` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCount {
    pub page: String,
    pub count: usize,
}

/// Current wall-clock time as fractional epoch seconds.
///
/// Truncated to whole microseconds, the resolution the visit log persists.
pub fn now_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Count events per distinct `page_or_text`.
///
/// Sorted by count descending; equal counts keep first-seen order.
pub fn page_counts(events: &[VisitEvent]) -> Vec<PageCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<PageCount> = Vec::new();

    for event in events {
        match index.get(event.page_or_text.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(event.page_or_text.as_str(), counts.len());
                counts.push(PageCount {
                    page: event.page_or_text.clone(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among ties.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

//! Application flow: one session, one interaction at a time.
//!
//! Every interaction re-runs the selected page from the top, the way a
//! reactive UI re-executes its script. [`Session::step`] performs the side
//! effects (visit logging, inference, log reads) and returns a
//! [`ViewState`] snapshot; [`crate::render::render`] turns that snapshot into
//! a screen without touching any state.

use std::fmt;

use emotion_ai::{Prediction, PredictionService};
use emotion_core::{VisitEvent, now_timestamp};
use emotion_store::{StoreError, VisitLog};
use tracing::{debug, error, warn};

/// The three pages of the sidebar menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Page {
    Home,
    Monitor,
    About,
}

impl Page {
    pub const MENU: [Page; 3] = [Page::Home, Page::Monitor, Page::About];

    /// Display name, also the value logged for a page visit.
    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Monitor => "Monitor",
            Page::About => "About",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One user interaction: the current menu choice plus an optional form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub page: Page,
    /// Text submitted through the home form. Ignored on other pages.
    pub submitted: Option<String>,
}

impl Interaction {
    pub fn visit(page: Page) -> Self {
        Self {
            page,
            submitted: None,
        }
    }

    pub fn submit(text: impl Into<String>) -> Self {
        Self {
            page: Page::Home,
            submitted: Some(text.into()),
        }
    }
}

/// A submitted text and what the classifier made of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub text: String,
    /// Inference failures are shown inline, so they travel as a message.
    pub outcome: Result<Prediction, String>,
}

/// Everything `render` needs for one screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Home { submission: Option<Submission> },
    Monitor { events: Vec<VisitEvent> },
    About,
    /// The visit log could not be read or written.
    Failed { page: Page },
}

/// Per-session execution context.
///
/// Owns its own connection to the visit log, opened on first use and
/// closed when the session is dropped.
pub struct Session<'a> {
    root: &'a VisitLog,
    conn: Option<VisitLog>,
    predictor: PredictionService,
}

impl<'a> Session<'a> {
    pub fn new(root: &'a VisitLog, predictor: PredictionService) -> Self {
        Self {
            root,
            conn: None,
            predictor,
        }
    }

    fn connection(&mut self) -> Result<&VisitLog, StoreError> {
        match self.conn {
            Some(ref conn) => Ok(conn),
            None => {
                debug!("opening session connection");
                let conn = self.root.try_clone()?;
                Ok(self.conn.insert(conn))
            }
        }
    }

    /// Run the selected page once and snapshot the result.
    pub fn step(&mut self, interaction: &Interaction) -> ViewState {
        let page = interaction.page;
        let result = match page {
            Page::Home => self.home(interaction.submitted.as_deref()),
            Page::Monitor => self.monitor(),
            Page::About => Ok(ViewState::About),
        };
        result.unwrap_or_else(|err| {
            error!(page = page.name(), error = %err, "visit log unavailable");
            ViewState::Failed { page }
        })
    }

    fn home(&mut self, submitted: Option<&str>) -> Result<ViewState, StoreError> {
        self.connection()?
            .record(Page::Home.name(), now_timestamp())?;

        let Some(text) = submitted else {
            return Ok(ViewState::Home { submission: None });
        };

        let outcome = self.predictor.classify(text).map_err(|err| {
            warn!(error = %err, "prediction failed");
            err.to_string()
        });
        // The raw text shares the log with page names.
        self.connection()?.record(text, now_timestamp())?;

        Ok(ViewState::Home {
            submission: Some(Submission {
                text: text.to_string(),
                outcome,
            }),
        })
    }

    fn monitor(&mut self) -> Result<ViewState, StoreError> {
        let conn = self.connection()?;
        let events = conn.read_all()?;
        // Logged after the snapshot so the view shows the log as it was on entry.
        conn.record(Page::Monitor.name(), now_timestamp())?;
        Ok(ViewState::Monitor { events })
    }
}

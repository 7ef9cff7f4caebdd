mod app;
mod display;
mod render;
mod repl;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use emotion_ai::{LinearPipeline, PredictionService};
use emotion_store::VisitLog;
use tracing::{Level, info};

use app::{Page, Session};

#[derive(Parser)]
#[command(name = "emotion-app", version, about = "Guess the emotion behind a sentence")]
struct Cli {
    /// Visit log database file.
    #[arg(long, env = "EMOTION_DB", default_value = "data.db")]
    db: PathBuf,

    /// Classifier artifact (JSON).
    #[arg(long, env = "EMOTION_MODEL", default_value = "models/emotion_classifier.json")]
    model: PathBuf,

    /// Page shown first.
    #[arg(long, value_enum, default_value_t = Page::Home)]
    page: Page,

    /// Debug-level logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    info!("emotion-app v{}", env!("CARGO_PKG_VERSION"));

    let store = VisitLog::open(&cli.db)
        .with_context(|| format!("failed to open visit log at {}", cli.db.display()))?;
    store
        .ensure_schema()
        .context("failed to create visit log table")?;

    let pipeline = LinearPipeline::load(&cli.model)
        .with_context(|| format!("failed to load classifier from {}", cli.model.display()))?;
    let predictor = PredictionService::new(Arc::new(pipeline));

    let mut session = Session::new(&store, predictor);
    repl::run(&mut session, cli.page, io::stdin().lock(), io::stdout().lock())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();
}

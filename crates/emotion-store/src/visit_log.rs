//! DuckDB storage for the page-visit log.

use std::path::Path;

use duckdb::types::{TimeUnit, Value};
use duckdb::{Connection, params};
use emotion_core::VisitEvent;
use tracing::{debug, info};

use crate::StoreError;

/// Name of the single table the log lives in.
pub const VISIT_TABLE: &str = "pageTrackTable";

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS pageTrackTable(pagename TEXT, timeOfvisit TIMESTAMP)";

/// Append-only visit log backed by one DuckDB database file.
///
/// Every row is either a page navigation or a raw text submission; both go
/// into `pagename`. Rows are only ever appended and are read back in
/// insertion order.
///
/// A `VisitLog` wraps one connection. Use [`try_clone`](Self::try_clone) to
/// give each session or thread its own connection to the same database
/// instead of sharing a handle.
pub struct VisitLog {
    conn: Connection,
}

impl VisitLog {
    /// Open an in-memory log. Contents vanish when the last clone drops.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Open or create a persistent log at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened visit log");
        Ok(Self { conn })
    }

    /// A new connection to the same database.
    pub fn try_clone(&self) -> Result<Self, StoreError> {
        Ok(Self {
            conn: self.conn.try_clone()?,
        })
    }

    /// Create the visit table if it does not exist yet. Existing rows are untouched.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(CREATE_TABLE)?;
        debug!(table = VISIT_TABLE, "visit table ready");
        Ok(())
    }

    /// Append one event. Autocommits, so the row is durable on return.
    pub fn record(&self, page_or_text: &str, timestamp: f64) -> Result<(), StoreError> {
        let micros = to_micros(timestamp)?;
        self.conn.execute(
            "INSERT INTO pageTrackTable(pagename, timeOfvisit) VALUES (?, ?)",
            params![page_or_text, Value::Timestamp(TimeUnit::Microsecond, micros)],
        )?;
        debug!(timestamp, "recorded visit");
        Ok(())
    }

    /// Every event, oldest first.
    pub fn read_all(&self) -> Result<Vec<VisitEvent>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT pagename, timeOfvisit FROM pageTrackTable ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, Option<String>>(0)?, row.get::<_, Value>(1)?))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (page, time) = row?;
            events.push(VisitEvent {
                page_or_text: page.unwrap_or_default(),
                timestamp: to_seconds(time)?,
            });
        }
        Ok(events)
    }

    /// Number of rows in the visit table.
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT count(*)::BIGINT FROM pageTrackTable",
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

fn to_micros(timestamp: f64) -> Result<i64, StoreError> {
    let micros = (timestamp * 1_000_000.0).round();
    if !micros.is_finite() || micros < i64::MIN as f64 || micros > i64::MAX as f64 {
        return Err(StoreError::TimestampOutOfRange(timestamp));
    }
    Ok(micros as i64)
}

fn to_seconds(value: Value) -> Result<f64, StoreError> {
    match value {
        Value::Timestamp(unit, raw) => Ok(match unit {
            TimeUnit::Second => raw as f64,
            TimeUnit::Millisecond => raw as f64 / 1_000.0,
            TimeUnit::Microsecond => raw as f64 / 1_000_000.0,
            TimeUnit::Nanosecond => raw as f64 / 1_000_000_000.0,
        }),
        other => Err(StoreError::UnexpectedValue {
            column: "timeOfvisit",
            value: format!("{other:?}"),
        }),
    }
}

//! Storage layer: the append-only visit log in an embedded DuckDB file.

mod error;
pub use error::StoreError;

mod visit_log;
pub use visit_log::{VISIT_TABLE, VisitLog};

//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::error::NorthwindDbError;
pub use crate::executor::{QueryExecutor, Statement};
pub use crate::prepare::{
    CountTarget, PreparedBatch, prepare_statements, prepare_statements_unchecked,
};
pub use crate::query_log::{LogKind, LoggedQuery, QueryLogEntry, create_sql_log};
pub use crate::results::{CustomDbRow, ResultMeta, ResultSet};
pub use crate::sqlite::{SqliteExecutor, SqliteOptions, SqliteOptionsBuilder};
pub use crate::stats::{
    Counter, QueryCounters, RequestStats, SessionStatsRegistry, StatsAggregate, StatsDelta,
    StatsSessionId,
};
pub use crate::types::RowValues;

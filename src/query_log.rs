use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::results::ResultSet;

/// One executed statement as shown in the activity log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedQuery {
    pub query: String,
    pub served_by: String,
    /// Statement duration in milliseconds, as reported by the executor.
    pub duration: f64,
}

/// Kind tag of a log entry. Only SQL requests are logged today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Sql,
}

impl LogKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LogKind::Sql => "sql",
        }
    }
}

/// Everything one page request ran, with timing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryLogEntry {
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub timestamp: DateTime<Utc>,
    pub overall_time_ms: u64,
    pub queries: Vec<LoggedQuery>,
}

/// Pair each SQL text with the served-by label and duration of its result set.
///
/// Texts and result sets are matched by position; any surplus on either side
/// is ignored.
#[must_use]
pub fn create_sql_log<S: AsRef<str>>(
    sql: &[S],
    results: &[ResultSet],
    overall_time_ms: u64,
) -> QueryLogEntry {
    let queries = sql
        .iter()
        .zip(results)
        .map(|(text, result)| LoggedQuery {
            query: text.as_ref().to_owned(),
            served_by: result.meta.served_by.clone(),
            duration: result.meta.duration_ms,
        })
        .collect();

    QueryLogEntry {
        kind: LogKind::Sql,
        timestamp: Utc::now(),
        overall_time_ms,
        queries,
    }
}

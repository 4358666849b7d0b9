use async_trait::async_trait;

use crate::error::NorthwindDbError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// A compiled statement: SQL text plus its bind parameters.
///
/// Compiling never touches the database; execution happens through a
/// [`QueryExecutor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<RowValues>,
}

impl Statement {
    #[must_use]
    pub fn new(sql: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn params(&self) -> &[RowValues] {
        &self.params
    }
}

/// Capability to compile and run statements against a database.
///
/// Every returned [`ResultSet`] carries the served-by label and the
/// per-statement duration in its `meta`.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Bind `params` to `sql`, producing a statement handle.
    fn compile(&self, sql: &str, params: &[RowValues]) -> Statement {
        Statement::new(sql, params.to_vec())
    }

    /// Run one statement.
    ///
    /// # Errors
    /// Returns `NorthwindDbError` if the statement cannot be executed.
    async fn execute_single(&self, stmt: &Statement) -> Result<ResultSet, NorthwindDbError>;

    /// Run several independent statements in one round trip, returning one
    /// result set per statement in input order.
    ///
    /// # Errors
    /// Returns the first `NorthwindDbError` encountered; no partial results are returned.
    async fn execute_batch(&self, stmts: &[Statement]) -> Result<Vec<ResultSet>, NorthwindDbError>;
}

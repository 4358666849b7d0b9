use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use super::config::{SqliteManager, SqliteOptions, SqliteOptionsBuilder, SqlitePool};
use super::connection::run_blocking;
use super::params::Params;
use super::query::build_result_set;
use crate::error::NorthwindDbError;
use crate::executor::{QueryExecutor, Statement};
use crate::results::ResultSet;

/// [`QueryExecutor`] backed by a bb8 pool of rusqlite connections.
///
/// Each call checks out one connection and runs all of its statements in a
/// single blocking hop. Statements in a batch are not wrapped in a transaction.
#[derive(Clone)]
pub struct SqliteExecutor {
    pool: SqlitePool,
    served_by: Arc<str>,
}

impl SqliteExecutor {
    #[must_use]
    pub fn builder(db_path: String) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path)
    }

    /// Create the pool and check that a connection can be opened.
    ///
    /// # Errors
    /// Returns `NorthwindDbError::ConnectionError` if pool creation or the first checkout fails.
    pub async fn open(opts: SqliteOptions) -> Result<Self, NorthwindDbError> {
        let pool = SqliteManager::new(opts.db_path.clone(), opts.busy_timeout)
            .build_pool(opts.pool_size)
            .await
            .map_err(|e| {
                NorthwindDbError::ConnectionError(format!("Failed to create SQLite pool: {e}"))
            })?;
        let executor = Self {
            pool,
            served_by: Arc::from(opts.served_by.as_str()),
        };
        drop(executor.pool.get().await?);
        tracing::info!(
            db_path = %opts.db_path,
            pool_size = opts.pool_size,
            served_by = %opts.served_by,
            "sqlite pool ready"
        );
        Ok(executor)
    }

    /// Label attached to every result set this executor produces.
    #[must_use]
    pub fn served_by(&self) -> &str {
        &self.served_by
    }

    /// Run a multi-statement script (DDL, seed data) without parameters.
    ///
    /// # Errors
    /// Returns `NorthwindDbError` if any statement of the script fails.
    pub async fn execute_script(&self, sql: &str) -> Result<(), NorthwindDbError> {
        let pooled = self.pool.get_owned().await?;
        let handle = Arc::clone(&*pooled);
        let sql_owned = sql.to_owned();
        run_blocking(handle, move |conn| {
            conn.execute_batch(&sql_owned)
                .map_err(NorthwindDbError::SqliteError)
        })
        .await
    }
}

impl fmt::Debug for SqliteExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteExecutor")
            .field("served_by", &self.served_by)
            .field("pool", &self.pool.state())
            .finish()
    }
}

#[async_trait]
impl QueryExecutor for SqliteExecutor {
    async fn execute_single(&self, stmt: &Statement) -> Result<ResultSet, NorthwindDbError> {
        let mut results = self.execute_batch(std::slice::from_ref(stmt)).await?;
        results.pop().ok_or_else(|| {
            NorthwindDbError::ExecutionError("statement produced no result set".into())
        })
    }

    async fn execute_batch(&self, stmts: &[Statement]) -> Result<Vec<ResultSet>, NorthwindDbError> {
        if stmts.is_empty() {
            return Ok(Vec::new());
        }
        let pooled = self.pool.get_owned().await?;
        let handle = Arc::clone(&*pooled);
        let stmts = stmts.to_vec();
        let served_by = Arc::clone(&self.served_by);

        let results = run_blocking(handle, move |conn| {
            let mut out = Vec::with_capacity(stmts.len());
            for stmt in &stmts {
                let started = Instant::now();
                let mut prepared = conn.prepare_cached(stmt.sql())?;
                let params = Params::convert(stmt.params());
                let result_set = build_result_set(&mut prepared, params.as_values())?;
                let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
                tracing::debug!(
                    sql = stmt.sql(),
                    rows = result_set.len(),
                    duration_ms,
                    "statement executed"
                );
                out.push(result_set.with_meta(served_by.as_ref(), duration_ms));
            }
            Ok(out)
        })
        .await;

        drop(pooled);
        results
    }
}

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bb8::{ManageConnection, Pool};
use tokio::sync::Mutex;

use super::connection::run_blocking;
use super::executor::SqliteExecutor;
use crate::error::NorthwindDbError;

/// Shared handle to a rusqlite connection guarded by a mutex for async access.
pub type SharedSqliteConnection = Arc<Mutex<rusqlite::Connection>>;

/// bb8 pool of worker-guarded `SQLite` connections.
pub type SqlitePool = Pool<SqliteManager>;

pub const DEFAULT_SERVED_BY: &str = "primary";

/// Options for configuring a `SQLite` pool.
#[derive(Debug, Clone)]
pub struct SqliteOptions {
    pub db_path: String,
    pub pool_size: u32,
    pub busy_timeout: Duration,
    pub served_by: String,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            db_path,
            pool_size: 4,
            busy_timeout: Duration::from_secs(5),
            served_by: DEFAULT_SERVED_BY.to_string(),
        }
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn pool_size(mut self, pool_size: u32) -> Self {
        self.opts.pool_size = pool_size.max(1);
        self
    }

    #[must_use]
    pub fn busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.opts.busy_timeout = busy_timeout;
        self
    }

    /// Label reported as the served-by origin of every statement.
    #[must_use]
    pub fn served_by(mut self, served_by: impl Into<String>) -> Self {
        self.opts.served_by = served_by.into();
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Build the pool and wrap it in a [`SqliteExecutor`].
    ///
    /// # Errors
    ///
    /// Returns `NorthwindDbError` if pool creation or the initial connection fails.
    pub async fn build(self) -> Result<SqliteExecutor, NorthwindDbError> {
        SqliteExecutor::open(self.finish()).await
    }
}

/// bb8 manager opening rusqlite connections on a blocking thread.
#[derive(Debug, Clone)]
pub struct SqliteManager {
    db_path: String,
    busy_timeout: Duration,
}

impl SqliteManager {
    #[must_use]
    pub fn new(db_path: String, busy_timeout: Duration) -> Self {
        Self {
            db_path,
            busy_timeout,
        }
    }

    /// Build a pool from this manager.
    ///
    /// # Errors
    /// Returns `NorthwindDbError` if creating the pool fails.
    pub async fn build_pool(self, max_size: u32) -> Result<SqlitePool, NorthwindDbError> {
        Pool::builder()
            .max_size(max_size)
            .build(self)
            .await
    }
}

impl ManageConnection for SqliteManager {
    type Connection = SharedSqliteConnection;
    type Error = NorthwindDbError;

    #[allow(clippy::manual_async_fn)]
    fn connect(&self) -> impl Future<Output = Result<Self::Connection, Self::Error>> + Send {
        let db_path = self.db_path.clone();
        let busy_timeout = self.busy_timeout;
        async move {
            tokio::task::spawn_blocking(move || {
                let conn = rusqlite::Connection::open(&db_path)?;
                conn.busy_timeout(busy_timeout)?;
                let _mode: String = conn.pragma_update_and_check(
                    None,
                    "journal_mode",
                    "WAL",
                    |row| row.get(0),
                )?;
                tracing::debug!(db_path = %db_path, "opened sqlite connection");
                Ok::<SharedSqliteConnection, NorthwindDbError>(Arc::new(Mutex::new(conn)))
            })
            .await
            .map_err(|e| {
                NorthwindDbError::ConnectionError(format!("sqlite connect join error: {e}"))
            })?
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn is_valid(
        &self,
        conn: &mut Self::Connection,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        let handle = Arc::clone(conn);
        async move {
            run_blocking(handle, |guard| {
                guard
                    .query_row("SELECT 1", [], |_| Ok(()))
                    .map_err(NorthwindDbError::SqliteError)
            })
            .await
        }
    }

    fn has_broken(&self, _conn: &mut Self::Connection) -> bool {
        false
    }
}

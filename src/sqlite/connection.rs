use super::config::SharedSqliteConnection;
use crate::error::NorthwindDbError;

/// Run synchronous rusqlite work for `conn` on tokio's blocking pool.
pub(crate) async fn run_blocking<F, R>(
    conn: SharedSqliteConnection,
    func: F,
) -> Result<R, NorthwindDbError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, NorthwindDbError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = conn.blocking_lock();
        func(&mut guard)
    })
    .await
    .map_err(|e| NorthwindDbError::ExecutionError(format!("sqlite spawn_blocking join error: {e}")))?
}

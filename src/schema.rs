//! Bundled Northwind schema and demo rows.

use crate::error::NorthwindDbError;
use crate::executor::{QueryExecutor, Statement};
use crate::sqlite::SqliteExecutor;

/// `CREATE TABLE IF NOT EXISTS` for every table the pages read.
pub const SCHEMA_SQL: &str = include_str!("../sql/schema.sql");

/// A small excerpt of the Northwind data set.
pub const DEMO_SEED_SQL: &str = include_str!("../sql/demo_seed.sql");

/// Create any missing tables.
///
/// # Errors
/// Returns `NorthwindDbError` if the DDL fails.
pub async fn ensure_schema(executor: &SqliteExecutor) -> Result<(), NorthwindDbError> {
    executor.execute_script(SCHEMA_SQL).await
}

/// Create the schema and load the demo rows when the `Product` table is empty.
///
/// Returns whether rows were loaded.
///
/// # Errors
/// Returns `NorthwindDbError` if the schema or seed script fails.
pub async fn seed_if_empty(executor: &SqliteExecutor) -> Result<bool, NorthwindDbError> {
    ensure_schema(executor).await?;

    let probe = Statement::new("SELECT COUNT(*) AS total FROM Product", Vec::new());
    let existing = executor
        .execute_single(&probe)
        .await?
        .first()
        .and_then(|row| row.get("total"))
        .and_then(|value| value.as_int().copied())
        .unwrap_or(0);
    if existing > 0 {
        tracing::info!(products = existing, "database already populated, skipping demo seed");
        return Ok(false);
    }

    executor.execute_script(DEMO_SEED_SQL).await?;
    tracing::info!("loaded demo Northwind rows");
    Ok(true)
}

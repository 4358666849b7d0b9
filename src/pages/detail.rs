use super::{Entity, Loaded, PageError, queries, request_stats, run_timed};
use crate::error::NorthwindDbError;
use crate::executor::QueryExecutor;
use crate::prepare::{CountTarget, prepare_statements};
use crate::results::{CustomDbRow, ResultSet};
use crate::stats::Counter;
use crate::types::RowValues;

/// An order header with its line items.
#[derive(Debug, Clone)]
pub struct OrderDetail {
    pub header: Option<CustomDbRow>,
    pub lines: ResultSet,
}

/// Load one product, customer, supplier or employee by id.
///
/// `data` is `None` when no row matched; the query is still reported in the
/// stats.
///
/// # Errors
/// Returns `PageError::Database` on execution failure, or for [`Entity::Order`],
/// which is loaded by [`load_order`].
pub async fn load_detail<E>(
    executor: &E,
    entity: Entity,
    id: RowValues,
) -> Result<Loaded<Option<CustomDbRow>>, PageError>
where
    E: QueryExecutor + ?Sized,
{
    let sql = entity.detail_sql().ok_or_else(|| {
        NorthwindDbError::Other(format!("{} has no single-statement detail", entity.name()))
    })?;

    let batch = prepare_statements(executor, CountTarget::None, &[sql], &[vec![id]])?;
    let (results, overall_time_ms) = run_timed(executor, &batch).await?;
    let stats = request_stats(&batch, &results, overall_time_ms, entity.detail_counter());

    let row = results
        .into_iter()
        .next()
        .and_then(|rs| rs.results.into_iter().next());
    tracing::debug!(
        entity = entity.name(),
        found = row.is_some(),
        overall_time_ms,
        "detail loaded"
    );

    Ok(Loaded { data: row, stats })
}

/// Load an order header and its lines in one batch.
///
/// # Errors
/// Returns `PageError::Database` if the batch fails.
pub async fn load_order<E>(executor: &E, id: i64) -> Result<Loaded<OrderDetail>, PageError>
where
    E: QueryExecutor + ?Sized,
{
    let batch = prepare_statements(
        executor,
        CountTarget::None,
        &[queries::ORDER_HEADER, queries::ORDER_LINES],
        &[vec![RowValues::Int(id)], vec![RowValues::Int(id)]],
    )?;
    let (results, overall_time_ms) = run_timed(executor, &batch).await?;
    let stats = request_stats(&batch, &results, overall_time_ms, Counter::Select);

    let mut results = results.into_iter();
    let header = results.next().and_then(|rs| rs.results.into_iter().next());
    let lines = results.next().unwrap_or_default();
    tracing::debug!(
        order = id,
        found = header.is_some(),
        lines = lines.len(),
        overall_time_ms,
        "order loaded"
    );

    Ok(Loaded {
        data: OrderDetail { header, lines },
        stats,
    })
}

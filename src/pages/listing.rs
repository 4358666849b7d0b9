use super::{Entity, Loaded, PageError, request_stats, run_timed};
use crate::executor::QueryExecutor;
use crate::prepare::{CountTarget, prepare_statements};
use crate::results::ResultSet;
use crate::stats::Counter;
use crate::types::RowValues;

/// One page of a paginated table.
#[derive(Debug, Clone)]
pub struct ListPage {
    pub entity: Entity,
    pub page: u32,
    pub pages: u64,
    pub items: u32,
    pub total: u64,
    pub rows: ResultSet,
}

/// Load page `page` of `entity`, `items` rows at a time, together with the
/// table's row count.
///
/// # Errors
/// Returns `PageError::Database` if the statements cannot be prepared or executed.
pub async fn load_listing<E>(
    executor: &E,
    entity: Entity,
    page: u32,
    items: u32,
) -> Result<Loaded<ListPage>, PageError>
where
    E: QueryExecutor + ?Sized,
{
    let page = page.max(1);
    let items = items.max(1);
    let offset = i64::from(page - 1) * i64::from(items);

    let batch = prepare_statements(
        executor,
        CountTarget::Table(entity.count_table()),
        &[entity.listing_sql()],
        &[vec![RowValues::from(items), RowValues::Int(offset)]],
    )?;
    let (results, overall_time_ms) = run_timed(executor, &batch).await?;
    let stats = request_stats(&batch, &results, overall_time_ms, Counter::Select);

    let mut results = results.into_iter();
    let total = results
        .next()
        .as_ref()
        .and_then(ResultSet::first)
        .and_then(|row| row.get("total"))
        .and_then(RowValues::as_int)
        .map_or(0, |n| u64::try_from(*n).unwrap_or(0));
    let rows = results.next().unwrap_or_default();

    tracing::debug!(
        entity = entity.name(),
        page,
        total,
        rows = rows.len(),
        overall_time_ms,
        "listing loaded"
    );

    Ok(Loaded {
        data: ListPage {
            entity,
            page,
            pages: total.div_ceil(u64::from(items)),
            items,
            total,
            rows,
        },
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::fake::{Call, FakeExecutor, rows, total};

    fn product_rows(n: i64) -> ResultSet {
        rows(
            &["Id", "ProductName"],
            (1..=n)
                .map(|i| vec![RowValues::Int(i), RowValues::Text(format!("P{i}"))])
                .collect(),
            "colo-B",
            12.0,
        )
    }

    #[tokio::test]
    async fn counts_then_lists_in_one_batch() {
        let executor = FakeExecutor::answering(vec![total(77), product_rows(20)]);

        let loaded = load_listing(&executor, Entity::Product, 2, 20).await.unwrap();

        let seen = executor.statements();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|(call, _)| *call == Call::Batch));
        assert_eq!(seen[0].1.sql(), "SELECT COUNT(*) AS total FROM Product");
        assert_eq!(seen[1].1.params(), &[RowValues::Int(20), RowValues::Int(20)]);

        let page = loaded.data;
        assert_eq!(page.page, 2);
        assert_eq!(page.total, 77);
        assert_eq!(page.pages, 4);
        assert_eq!(page.items, 20);
        assert_eq!(page.rows.len(), 20);

        let stats = loaded.stats;
        assert_eq!(stats.counters.queries, 2);
        assert_eq!(stats.counters.select, 2);
        assert_eq!(stats.counters.results, 21);
        let log = stats.log.unwrap();
        assert_eq!(log.queries.len(), 2);
        assert_eq!(log.queries[0].served_by, "colo-A");
        assert_eq!(log.queries[1].served_by, "colo-B");
    }

    #[tokio::test]
    async fn orders_count_the_quoted_table() {
        let executor = FakeExecutor::answering(vec![total(0), product_rows(0)]);

        let loaded = load_listing(&executor, Entity::Order, 1, 20).await.unwrap();

        assert_eq!(
            executor.statements()[0].1.sql(),
            "SELECT COUNT(*) AS total FROM \"Order\""
        );
        assert_eq!(loaded.data.total, 0);
        assert_eq!(loaded.data.pages, 0);
        assert_eq!(loaded.stats.counters.results, 1);
    }

    #[tokio::test]
    async fn executor_failure_is_a_page_error() {
        let executor = FakeExecutor::answering(vec![]);
        let err = load_listing(&executor, Entity::Customer, 1, 20).await.unwrap_err();
        assert!(matches!(err, PageError::Database(_)));
    }
}

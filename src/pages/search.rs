use std::fmt;

use super::{Loaded, PageError, queries, request_stats, run_timed};
use crate::executor::QueryExecutor;
use crate::prepare::{CountTarget, prepare_statements};
use crate::results::ResultSet;
use crate::stats::Counter;
use crate::types::RowValues;

/// Table searched by the search page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchTable {
    Products,
    #[default]
    Customers,
}

impl SearchTable {
    /// `products` selects products; anything else searches customers.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("products") => SearchTable::Products,
            _ => SearchTable::Customers,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SearchTable::Products => "products",
            SearchTable::Customers => "customers",
        }
    }

    fn sql(self) -> &'static str {
        match self {
            SearchTable::Products => queries::PRODUCT_SEARCH,
            SearchTable::Customers => queries::CUSTOMER_SEARCH,
        }
    }
}

impl fmt::Display for SearchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substring search over `table`, returning at most `items` rows.
///
/// The keyword is bound as a `LIKE` pattern, never spliced into the SQL.
///
/// # Errors
/// Returns `PageError::Database` if the query fails.
pub async fn load_search<E>(
    executor: &E,
    keyword: &str,
    table: SearchTable,
    items: u32,
) -> Result<Loaded<ResultSet>, PageError>
where
    E: QueryExecutor + ?Sized,
{
    let batch = prepare_statements(
        executor,
        CountTarget::None,
        &[table.sql()],
        &[vec![
            RowValues::from(items.max(1)),
            RowValues::Text(format!("%{keyword}%")),
        ]],
    )?;
    let (results, overall_time_ms) = run_timed(executor, &batch).await?;
    let stats = request_stats(&batch, &results, overall_time_ms, Counter::SelectWhere);

    let found = results.into_iter().next().unwrap_or_default();
    tracing::debug!(
        table = table.as_str(),
        keyword,
        rows = found.len(),
        overall_time_ms,
        "search loaded"
    );

    Ok(Loaded { data: found, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::fake::{FakeExecutor, rows};

    #[test]
    fn unknown_table_searches_customers() {
        assert_eq!(SearchTable::parse(Some("products")), SearchTable::Products);
        assert_eq!(SearchTable::parse(Some("orders")), SearchTable::Customers);
        assert_eq!(SearchTable::parse(None), SearchTable::Customers);
    }

    #[tokio::test]
    async fn keyword_is_bound_as_like_pattern() {
        let executor = FakeExecutor::answering(vec![rows(
            &["Id", "ProductName"],
            vec![vec![RowValues::Int(11), "Queso Cabrales".into()]],
            "primary",
            0.4,
        )]);

        let loaded = load_search(&executor, "queso", SearchTable::Products, 20)
            .await
            .unwrap();

        let seen = executor.statements();
        assert_eq!(seen[0].1.sql(), queries::PRODUCT_SEARCH);
        assert_eq!(
            seen[0].1.params(),
            &[RowValues::Int(20), RowValues::Text("%queso%".into())]
        );
        assert_eq!(loaded.data.len(), 1);
        assert_eq!(loaded.stats.counters.queries, 1);
        assert_eq!(loaded.stats.counters.select_where, 1);
        assert_eq!(loaded.stats.counters.select_fts, 0);
        assert_eq!(loaded.stats.counters.select, 0);
        assert_eq!(loaded.stats.counters.results, 1);
    }
}

//! Page loaders: each one assembles its statements, runs them through a
//! [`QueryExecutor`], and reports the rows together with the request's
//! [`RequestStats`].

mod detail;
#[cfg(test)]
pub(crate) mod fake;
mod listing;
pub mod queries;
mod search;

use std::time::Instant;

use thiserror::Error;

use crate::error::NorthwindDbError;
use crate::executor::QueryExecutor;
use crate::prepare::PreparedBatch;
use crate::query_log::create_sql_log;
use crate::results::ResultSet;
use crate::stats::{Counter, QueryCounters, RequestStats};

pub use detail::{OrderDetail, load_detail, load_order};
pub use listing::{ListPage, load_listing};
pub use search::{SearchTable, load_search};

/// Rows shown per listing or search page unless configured otherwise.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 20;

/// Error surfaced by a page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Database(#[from] NorthwindDbError),

    #[error("No such {0}")]
    NotFound(&'static str),
}

/// A loader's output plus the statistics of the statements it ran.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub data: T,
    pub stats: RequestStats,
}

/// Browseable Northwind entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Product,
    Customer,
    Supplier,
    Employee,
    Order,
}

impl Entity {
    /// Lowercase singular name, as used in detail URLs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Entity::Product => "product",
            Entity::Customer => "customer",
            Entity::Supplier => "supplier",
            Entity::Employee => "employee",
            Entity::Order => "order",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Entity::Product => "Products",
            Entity::Customer => "Customers",
            Entity::Supplier => "Suppliers",
            Entity::Employee => "Employees",
            Entity::Order => "Orders",
        }
    }

    /// Table counted for the listing's page total, quoted where the name is a keyword.
    #[must_use]
    pub fn count_table(self) -> &'static str {
        match self {
            Entity::Product => "Product",
            Entity::Customer => "Customer",
            Entity::Supplier => "Supplier",
            Entity::Employee => "Employee",
            Entity::Order => "\"Order\"",
        }
    }

    #[must_use]
    pub fn listing_sql(self) -> &'static str {
        match self {
            Entity::Product => queries::PRODUCT_LISTING,
            Entity::Customer => queries::CUSTOMER_LISTING,
            Entity::Supplier => queries::SUPPLIER_LISTING,
            Entity::Employee => queries::EMPLOYEE_LISTING,
            Entity::Order => queries::ORDER_LISTING,
        }
    }

    /// Single-statement detail query. Orders use [`load_order`] instead.
    #[must_use]
    pub fn detail_sql(self) -> Option<&'static str> {
        match self {
            Entity::Product => Some(queries::PRODUCT_DETAIL),
            Entity::Customer => Some(queries::CUSTOMER_DETAIL),
            Entity::Supplier => Some(queries::SUPPLIER_DETAIL),
            Entity::Employee => Some(queries::EMPLOYEE_DETAIL),
            Entity::Order => None,
        }
    }

    /// Kind counter bumped by the detail query.
    #[must_use]
    pub fn detail_counter(self) -> Counter {
        match self {
            Entity::Employee => Counter::SelectLeftJoin,
            _ => Counter::Select,
        }
    }

    /// Customer ids are text, every other id is an integer.
    #[must_use]
    pub fn has_text_id(self) -> bool {
        matches!(self, Entity::Customer)
    }
}

/// Page number from the `page` query parameter; anything unusable is page 1.
#[must_use]
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Run a prepared batch, timing the whole round trip.
///
/// A lone statement goes through `execute_single`, anything more through
/// `execute_batch`.
pub(crate) async fn run_timed<E>(
    executor: &E,
    batch: &PreparedBatch,
) -> Result<(Vec<ResultSet>, u64), NorthwindDbError>
where
    E: QueryExecutor + ?Sized,
{
    let started = Instant::now();
    let results = match batch.statements.as_slice() {
        [single] => vec![executor.execute_single(single).await?],
        statements => executor.execute_batch(statements).await?,
    };
    let overall_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    Ok((results, overall_time_ms))
}

/// Counters plus the log entry for a finished batch.
pub(crate) fn request_stats(
    batch: &PreparedBatch,
    results: &[ResultSet],
    overall_time_ms: u64,
    kind: Counter,
) -> RequestStats {
    let statements = batch.len() as u64;
    let rows: u64 = results.iter().map(|rs| rs.len() as u64).sum();
    let counters = QueryCounters::default()
        .with(Counter::Queries, statements)
        .with(Counter::Results, rows)
        .with(kind, statements);
    RequestStats::new(counters, create_sql_log(&batch.sql, results, overall_time_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_parameter_falls_back_to_first_page() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
        assert_eq!(parse_page(Some("4")), 4);
        assert_eq!(parse_page(Some(" 2 ")), 2);
    }

    #[test]
    fn order_table_is_quoted_for_counting() {
        assert_eq!(Entity::Order.count_table(), "\"Order\"");
        assert_eq!(Entity::Order.detail_sql(), None);
        assert_eq!(Entity::Employee.detail_counter(), Counter::SelectLeftJoin);
        assert_eq!(Entity::Supplier.detail_counter(), Counter::Select);
    }
}

//! Minimal HTML rendering for the demo pages.

use crate::query_log::QueryLogEntry;
use crate::results::{CustomDbRow, ResultSet};
use crate::stats::StatsAggregate;

/// Escape text for use in element content and double-quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap `body` in the shared page chrome.
#[must_use]
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title} | Northwind Traders</title></head>\n<body>\n<nav><a href=\"/\">Home</a> | <a href=\"/dash\">Dashboard</a> | <a href=\"/suppliers\">Suppliers</a> | <a href=\"/products\">Products</a> | <a href=\"/orders\">Orders</a> | <a href=\"/employees\">Employees</a> | <a href=\"/customers\">Customers</a> | <a href=\"/search\">Search</a></nav>\n<main>\n<h1>{title}</h1>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

/// Detail page prefix for columns holding another entity's id.
fn link_target(column: &str) -> Option<&'static str> {
    match column {
        "SupplierId" => Some("/supplier/"),
        "CustomerId" => Some("/customer/"),
        "EmployeeId" | "ReportsTo" | "ReportId" => Some("/employee/"),
        "ProductId" => Some("/product/"),
        _ => None,
    }
}

fn cell(row: &CustomDbRow, column: &str, id_prefix: Option<&str>) -> String {
    let value = row.text(column);
    if value.is_empty() {
        return String::new();
    }
    let prefix = if column == "Id" { id_prefix } else { link_target(column) };
    match prefix {
        Some(prefix) => format!(
            "<a href=\"{prefix}{}\">{}</a>",
            escape(&value),
            escape(&value)
        ),
        None => escape(&value),
    }
}

/// Render every column of `rows`; the `Id` column links to `id_prefix` when given.
#[must_use]
pub fn table(rows: &ResultSet, id_prefix: Option<&str>) -> String {
    let Some(columns) = rows.get_column_names() else {
        return "<p>No results</p>".to_string();
    };
    if rows.is_empty() {
        return "<p>No results</p>".to_string();
    }

    let mut out = String::from("<table>\n<thead><tr>");
    for column in columns.iter() {
        out.push_str(&format!("<th>{}</th>", escape(column)));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in &rows.results {
        out.push_str("<tr>");
        for column in columns.iter() {
            out.push_str(&format!("<td>{}</td>", cell(row, column, id_prefix)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>");
    out
}

/// Name/value list of one row.
#[must_use]
pub fn detail_card(row: &CustomDbRow, id_prefix: Option<&str>) -> String {
    let mut out = String::from("<dl>\n");
    for column in row.column_names.iter() {
        out.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>\n",
            escape(column),
            cell(row, column, id_prefix)
        ));
    }
    out.push_str("</dl>");
    out
}

/// Previous/next links for a paginated listing at `base`.
#[must_use]
pub fn paginate(base: &str, page: u32, pages: u64) -> String {
    let mut out = String::from("<p class=\"paginate\">");
    if page > 1 {
        out.push_str(&format!("<a href=\"{base}?page={}\">Previous page</a> ", page - 1));
    }
    out.push_str(&format!("Page {page} of {pages}"));
    if u64::from(page) < pages {
        out.push_str(&format!(" <a href=\"{base}?page={}\">Next page</a>", page + 1));
    }
    out.push_str("</p>");
    out
}

fn log_entry(entry: &QueryLogEntry) -> String {
    let mut out = format!(
        "<li><p>{} request at {}, {}ms overall</p>\n<ul>\n",
        entry.kind.as_str(),
        entry.timestamp.to_rfc3339(),
        entry.overall_time_ms
    );
    for query in &entry.queries {
        out.push_str(&format!(
            "<li>served by {}, {:.3}ms: <code>{}</code></li>\n",
            escape(&query.served_by),
            query.duration,
            escape(&query.query)
        ));
    }
    out.push_str("</ul></li>");
    out
}

/// Serving node, then the counters and activity log of one session.
#[must_use]
pub fn dashboard(stats: &StatsAggregate, served_by: &str) -> String {
    let c = &stats.counters;
    let mut out = format!(
        "<h2>Worker</h2>\n<p>Served by: {}</p>\n<h2>Stats</h2>\n<dl>\n",
        escape(served_by)
    );
    for (label, value) in [
        ("Query count", c.queries),
        ("Results count", c.results),
        ("# SELECT", c.select),
        ("# SELECT WHERE", c.select_where),
        ("# SELECT LEFT JOIN", c.select_leftjoin),
        ("# SELECT FTS", c.select_fts),
        ("# INSERT", c.insert),
        ("# UPDATE", c.update),
        ("# DELETE", c.delete),
    ] {
        out.push_str(&format!("<dt>{label}</dt><dd>{value}</dd>\n"));
    }
    out.push_str("</dl>\n<h2>Activity log</h2>\n");
    if stats.log.is_empty() {
        out.push_str("<p>Explore the app and see metrics here.</p>");
        return out;
    }
    out.push_str("<ol>\n");
    for entry in &stats.log {
        out.push_str(&log_entry(entry));
        out.push('\n');
    }
    out.push_str("</ol>");
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::query_log::create_sql_log;
    use crate::stats::{Counter, QueryCounters, RequestStats};
    use crate::types::RowValues;

    fn customers() -> ResultSet {
        let mut rs = ResultSet::with_capacity(1);
        rs.set_column_names(Arc::new(vec!["Id".into(), "CompanyName".into()]));
        rs.add_row_values(vec![RowValues::Text("ALFKI".into()), "Tom & <Jerry>".into()]);
        rs
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<a href=\"x\">'&'</a>"), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn table_links_ids_and_escapes_values() {
        let html = table(&customers(), Some("/customer/"));
        assert!(html.contains("<a href=\"/customer/ALFKI\">ALFKI</a>"));
        assert!(html.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(html.contains("<th>CompanyName</th>"));
    }

    #[test]
    fn empty_table_says_so() {
        assert_eq!(table(&ResultSet::default(), None), "<p>No results</p>");
    }

    #[test]
    fn pagination_links() {
        let first = paginate("/products", 1, 4);
        assert!(!first.contains("Previous"));
        assert!(first.contains("href=\"/products?page=2\""));

        let last = paginate("/products", 4, 4);
        assert!(last.contains("href=\"/products?page=3\""));
        assert!(!last.contains("Next"));
    }

    #[test]
    fn dashboard_lists_counters_and_log() {
        let mut stats = StatsAggregate::default();
        let log = create_sql_log(
            &["SELECT 1 < 2"],
            &[ResultSet::default().with_meta("colo-A", 5.0)],
            6,
        );
        stats.apply_request(RequestStats::new(
            QueryCounters::default().with(Counter::Queries, 1),
            log,
        ));

        let html = dashboard(&stats, "colo-A");
        assert!(html.contains("<p>Served by: colo-A</p>"));
        assert!(html.contains("<dt>Query count</dt><dd>1</dd>"));
        assert!(html.contains("served by colo-A"));
        assert!(html.contains("SELECT 1 &lt; 2"));
        assert!(html.contains("6ms overall"));
    }
}

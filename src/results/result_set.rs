use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use super::row::{CustomDbRow, index_columns};
use crate::types::RowValues;

/// Service metadata attached to every executed statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultMeta {
    /// Label of the node that served the statement.
    pub served_by: String,
    /// Time spent executing the statement, in milliseconds.
    pub duration_ms: f64,
}

/// A result set from a database query
///
/// Holds the rows returned by one statement plus the [`ResultMeta`] the
/// executor recorded while running it.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<CustomDbRow>,
    /// Served-by label and duration of the statement
    pub meta: ResultMeta,
    column_names: Option<Arc<Vec<String>>>,
    column_index: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create a new result set with a known capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            ..ResultSet::default()
        }
    }

    /// Set the column names for this result set (to be shared by all rows)
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index = Some(Arc::new(index_columns(&column_names)));
        self.column_names = Some(column_names);
    }

    /// Get the column names for this result set
    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Add a row to the result set
    ///
    /// Rows are ignored until column names have been set.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        if let (Some(column_names), Some(cache)) = (&self.column_names, &self.column_index) {
            self.results.push(CustomDbRow {
                column_names: Arc::clone(column_names),
                rows: row_values,
                column_index_cache: Arc::clone(cache),
            });
        }
    }

    /// Number of rows in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// First row, if any.
    #[must_use]
    pub fn first(&self) -> Option<&CustomDbRow> {
        self.results.first()
    }

    /// Attach executor metadata, consuming the set.
    #[must_use]
    pub fn with_meta(mut self, served_by: impl Into<String>, duration_ms: f64) -> Self {
        self.meta = ResultMeta {
            served_by: served_by.into(),
            duration_ms,
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_share_column_lookup() {
        let mut rs = ResultSet::with_capacity(2);
        rs.set_column_names(Arc::new(vec!["Id".into(), "ProductName".into()]));
        rs.add_row_values(vec![RowValues::Int(1), RowValues::Text("Chai".into())]);
        rs.add_row_values(vec![RowValues::Int(2), RowValues::Text("Chang".into())]);

        assert_eq!(rs.len(), 2);
        assert_eq!(rs.results[1].get("ProductName").unwrap().as_text(), Some("Chang"));
        assert_eq!(rs.results[0].get_column_index("Id"), Some(0));
        assert!(rs.results[0].get("Missing").is_none());
        assert_eq!(rs.results[0].text("Missing"), "");
    }

    #[test]
    fn rows_without_columns_are_dropped() {
        let mut rs = ResultSet::default();
        rs.add_row_values(vec![RowValues::Int(1)]);
        assert!(rs.is_empty());
    }

    #[test]
    fn with_meta_sets_service_fields() {
        let rs = ResultSet::default().with_meta("colo-A", 5.0);
        assert_eq!(rs.meta.served_by, "colo-A");
        assert!((rs.meta.duration_ms - 5.0).abs() < f64::EPSILON);
    }
}

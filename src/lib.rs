//! Northwind demo pages over SQLite.
//!
//! The reusable core is small: [`prepare`] assembles the statements a page
//! runs, [`query_log`] turns their result metadata into an activity-log
//! entry, and [`stats`] folds per-request counters into a session's totals.
//! [`pages`] and [`web`] build the demo application on top of them.

pub mod config;
pub mod error;
pub mod executor;
pub mod pages;
pub mod placeholders;
pub mod prelude;
pub mod prepare;
pub mod query_log;
pub mod results;
pub mod schema;
pub mod sqlite;
pub mod stats;
pub mod types;
pub mod web;

pub use error::NorthwindDbError;
pub use executor::{QueryExecutor, Statement};
pub use results::{CustomDbRow, ResultMeta, ResultSet};
pub use types::RowValues;

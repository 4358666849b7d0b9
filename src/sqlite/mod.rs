// SQLite module - the executor the application ships with
//
// - config: connection options and the bb8 connection manager
// - connection: blocking-thread hop for rusqlite work
// - params: conversion of `RowValues` into SQLite values
// - query: result extraction and building
// - executor: `QueryExecutor` implementation over the pool

pub mod config;
mod connection;
pub mod executor;
pub mod params;
pub mod query;

pub use config::{SqliteManager, SqliteOptions, SqliteOptionsBuilder, SqlitePool};
pub use executor::SqliteExecutor;
pub use params::Params;
pub use query::build_result_set;

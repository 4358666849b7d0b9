use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;
use crate::executor::QueryExecutor;
use crate::pages::{DEFAULT_ITEMS_PER_PAGE, PageError};
use crate::sqlite::config::DEFAULT_SERVED_BY;
use crate::stats::{DEFAULT_LOG_CAPACITY, DEFAULT_MAX_SESSIONS, SessionStatsRegistry};

use super::error::LoaderFailure;

/// Shared state handed to every handler.
pub struct AppState {
    pub start_time: Instant,
    pub executor: Arc<dyn QueryExecutor>,
    pub stats: SessionStatsRegistry,
    pub items_per_page: u32,
    /// Label of the node answering queries, shown on the dashboard.
    pub served_by: String,
    /// Show database error text on error pages.
    pub expose_errors: bool,
}

impl AppState {
    /// State with default paging, log capacity and session limit.
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            executor,
            stats: SessionStatsRegistry::new(DEFAULT_LOG_CAPACITY, DEFAULT_MAX_SESSIONS),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            served_by: DEFAULT_SERVED_BY.to_string(),
            expose_errors: false,
        })
    }

    pub fn from_config(executor: Arc<dyn QueryExecutor>, config: &AppConfig) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            executor,
            stats: SessionStatsRegistry::new(config.log_capacity, config.max_sessions),
            items_per_page: config.items_per_page,
            served_by: config.served_by.clone(),
            expose_errors: config.expose_errors,
        })
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub(crate) fn failure(&self, err: &PageError) -> LoaderFailure {
        LoaderFailure::from_page_error(err, self.expose_errors)
    }
}

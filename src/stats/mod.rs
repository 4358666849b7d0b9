//! Per-session query statistics: counters plus a bounded activity log.
//!
//! Page loaders produce a [`RequestStats`]; the web layer folds it into the
//! session's [`StatsAggregate`] exactly once through [`StatsDelta`]s.

mod registry;

use std::collections::VecDeque;
use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::query_log::QueryLogEntry;

pub use registry::{DEFAULT_MAX_SESSIONS, SessionStatsRegistry, StatsSessionId};

/// Default number of log entries kept per session.
pub const DEFAULT_LOG_CAPACITY: usize = 100;

/// One of the counters tracked per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Queries,
    Results,
    Select,
    SelectWhere,
    SelectLeftJoin,
    SelectFts,
    Update,
    Delete,
    Insert,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueryCounters {
    pub queries: u64,
    pub results: u64,
    pub select: u64,
    pub select_where: u64,
    pub select_leftjoin: u64,
    pub select_fts: u64,
    pub update: u64,
    pub delete: u64,
    pub insert: u64,
}

impl QueryCounters {
    #[must_use]
    pub fn get(&self, counter: Counter) -> u64 {
        match counter {
            Counter::Queries => self.queries,
            Counter::Results => self.results,
            Counter::Select => self.select,
            Counter::SelectWhere => self.select_where,
            Counter::SelectLeftJoin => self.select_leftjoin,
            Counter::SelectFts => self.select_fts,
            Counter::Update => self.update,
            Counter::Delete => self.delete,
            Counter::Insert => self.insert,
        }
    }

    fn slot(&mut self, counter: Counter) -> &mut u64 {
        match counter {
            Counter::Queries => &mut self.queries,
            Counter::Results => &mut self.results,
            Counter::Select => &mut self.select,
            Counter::SelectWhere => &mut self.select_where,
            Counter::SelectLeftJoin => &mut self.select_leftjoin,
            Counter::SelectFts => &mut self.select_fts,
            Counter::Update => &mut self.update,
            Counter::Delete => &mut self.delete,
            Counter::Insert => &mut self.insert,
        }
    }

    /// Add `by` to a single counter.
    pub fn bump(&mut self, counter: Counter, by: u64) {
        let slot = self.slot(counter);
        *slot = slot.saturating_add(by);
    }

    /// Builder-style [`bump`](Self::bump).
    #[must_use]
    pub fn with(mut self, counter: Counter, by: u64) -> Self {
        self.bump(counter, by);
        self
    }
}

impl AddAssign for QueryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.queries = self.queries.saturating_add(rhs.queries);
        self.results = self.results.saturating_add(rhs.results);
        self.select = self.select.saturating_add(rhs.select);
        self.select_where = self.select_where.saturating_add(rhs.select_where);
        self.select_leftjoin = self.select_leftjoin.saturating_add(rhs.select_leftjoin);
        self.select_fts = self.select_fts.saturating_add(rhs.select_fts);
        self.update = self.update.saturating_add(rhs.update);
        self.delete = self.delete.saturating_add(rhs.delete);
        self.insert = self.insert.saturating_add(rhs.insert);
    }
}

impl Add for QueryCounters {
    type Output = QueryCounters;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

/// A single change to a [`StatsAggregate`].
#[derive(Debug, Clone, PartialEq)]
pub enum StatsDelta {
    /// Field-wise addition of counters.
    Counters(QueryCounters),
    /// Add to one counter.
    Count(Counter, u64),
    /// Put a new entry at the top of the activity log.
    LogAppend(QueryLogEntry),
}

/// Statistics a page loader reports for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestStats {
    pub counters: QueryCounters,
    pub log: Option<QueryLogEntry>,
}

impl RequestStats {
    #[must_use]
    pub fn new(counters: QueryCounters, log: QueryLogEntry) -> Self {
        Self {
            counters,
            log: Some(log),
        }
    }

    #[must_use]
    pub fn into_deltas(self) -> Vec<StatsDelta> {
        let mut deltas = vec![StatsDelta::Counters(self.counters)];
        if let Some(log) = self.log {
            deltas.push(StatsDelta::LogAppend(log));
        }
        deltas
    }
}

/// Running counters and most-recent-first activity log of one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsAggregate {
    #[serde(flatten)]
    pub counters: QueryCounters,
    pub log: VecDeque<QueryLogEntry>,
    #[serde(skip)]
    log_capacity: usize,
}

impl Default for StatsAggregate {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

impl StatsAggregate {
    /// Empty aggregate keeping at most `log_capacity` log entries.
    #[must_use]
    pub fn new(log_capacity: usize) -> Self {
        Self {
            counters: QueryCounters::default(),
            log: VecDeque::with_capacity(log_capacity.min(DEFAULT_LOG_CAPACITY)),
            log_capacity,
        }
    }

    #[must_use]
    pub fn log_capacity(&self) -> usize {
        self.log_capacity
    }

    pub fn apply(&mut self, delta: StatsDelta) {
        match delta {
            StatsDelta::Counters(counters) => self.counters += counters,
            StatsDelta::Count(counter, by) => self.counters.bump(counter, by),
            StatsDelta::LogAppend(entry) => {
                if self.log_capacity == 0 {
                    return;
                }
                self.log.push_front(entry);
                self.log.truncate(self.log_capacity);
            }
        }
    }

    pub fn apply_request(&mut self, stats: RequestStats) {
        for delta in stats.into_deltas() {
            self.apply(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_log::create_sql_log;
    use crate::results::ResultSet;

    fn entry(sql: &str) -> QueryLogEntry {
        create_sql_log(&[sql], &[ResultSet::default().with_meta("primary", 1.0)], 1)
    }

    fn sample(queries: u64, results: u64, select: u64) -> QueryCounters {
        QueryCounters::default()
            .with(Counter::Queries, queries)
            .with(Counter::Results, results)
            .with(Counter::Select, select)
    }

    #[test]
    fn counter_deltas_are_additive() {
        let d1 = sample(2, 21, 2).with(Counter::SelectWhere, 1);
        let d2 = sample(1, 1, 0).with(Counter::SelectLeftJoin, 1);

        let mut stepwise = StatsAggregate::default();
        stepwise.apply(StatsDelta::Counters(d1));
        stepwise.apply(StatsDelta::Counters(d2));

        let mut merged = StatsAggregate::default();
        merged.apply(StatsDelta::Counters(d1 + d2));

        assert_eq!(stepwise, merged);
        assert_eq!(merged.counters.queries, 3);
        assert_eq!(merged.counters.results, 22);
        assert_eq!(merged.counters.select_where, 1);
        assert_eq!(merged.counters.select_leftjoin, 1);
        assert_eq!(merged.counters.update, 0);
    }

    #[test]
    fn single_counter_delta() {
        let mut agg = StatsAggregate::default();
        agg.apply(StatsDelta::Count(Counter::SelectFts, 2));
        assert_eq!(agg.counters.get(Counter::SelectFts), 2);
    }

    #[test]
    fn log_append_puts_newest_first() {
        let mut agg = StatsAggregate::default();
        agg.apply(StatsDelta::LogAppend(entry("SELECT 1")));
        agg.apply(StatsDelta::LogAppend(entry("SELECT 2")));

        assert_eq!(agg.log.len(), 2);
        assert_eq!(agg.log[0].queries[0].query, "SELECT 2");
        assert_eq!(agg.log[1].queries[0].query, "SELECT 1");
    }

    #[test]
    fn log_is_bounded() {
        let mut agg = StatsAggregate::new(2);
        for i in 0..5 {
            agg.apply(StatsDelta::LogAppend(entry(&format!("SELECT {i}"))));
        }
        assert_eq!(agg.log.len(), 2);
        assert_eq!(agg.log[0].queries[0].query, "SELECT 4");
        assert_eq!(agg.log[1].queries[0].query, "SELECT 3");
    }

    #[test]
    fn zero_capacity_disables_log() {
        let mut agg = StatsAggregate::new(0);
        agg.apply_request(RequestStats::new(sample(1, 1, 1), entry("SELECT 1")));
        assert!(agg.log.is_empty());
        assert_eq!(agg.counters.queries, 1);
    }

    #[test]
    fn request_without_log_only_counts() {
        let mut agg = StatsAggregate::default();
        agg.apply_request(RequestStats {
            counters: sample(1, 0, 1),
            log: None,
        });
        assert!(agg.log.is_empty());
        assert_eq!(agg.counters.select, 1);
    }

    #[test]
    fn counters_saturate() {
        let mut c = QueryCounters::default().with(Counter::Results, u64::MAX);
        c += QueryCounters::default().with(Counter::Results, 5);
        assert_eq!(c.results, u64::MAX);
    }

    #[test]
    fn aggregate_serializes_flat() {
        let mut agg = StatsAggregate::default();
        agg.apply_request(RequestStats::new(sample(2, 3, 2), entry("SELECT 1")));
        let json = serde_json::to_value(&agg).unwrap();
        assert_eq!(json["queries"], 2);
        assert_eq!(json["select_leftjoin"], 0);
        assert_eq!(json["log"].as_array().unwrap().len(), 1);
        assert!(json.get("log_capacity").is_none());
    }
}

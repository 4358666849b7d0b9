use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use super::{DEFAULT_LOG_CAPACITY, RequestStats, StatsAggregate};

/// Default number of sessions tracked before the least recently used one is dropped.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Opaque key of one browser session's statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatsSessionId(Uuid);

impl StatsSessionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StatsSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StatsSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for StatsSessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug)]
struct Slot {
    stats: StatsAggregate,
    last_seen: u64,
}

#[derive(Debug, Default)]
struct Inner {
    sessions: HashMap<StatsSessionId, Slot>,
    tick: u64,
}

/// Statistics for every live session, shared by all request handlers.
///
/// Each update holds the lock for the whole read-modify-write, so concurrent
/// requests of one session never lose counts.
#[derive(Debug)]
pub struct SessionStatsRegistry {
    inner: Mutex<Inner>,
    log_capacity: usize,
    max_sessions: usize,
}

impl Default for SessionStatsRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStatsRegistry {
    /// `max_sessions` is raised to at least one.
    #[must_use]
    pub fn new(log_capacity: usize, max_sessions: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            log_capacity,
            max_sessions: max_sessions.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fold one request's statistics into the session.
    pub fn apply(&self, session: StatsSessionId, stats: RequestStats) {
        let mut inner = self.lock();
        inner.tick += 1;
        let tick = inner.tick;

        if !inner.sessions.contains_key(&session) && inner.sessions.len() >= self.max_sessions {
            evict_oldest(&mut inner.sessions);
        }

        let slot = inner.sessions.entry(session).or_insert_with(|| Slot {
            stats: StatsAggregate::new(self.log_capacity),
            last_seen: tick,
        });
        slot.last_seen = tick;
        slot.stats.apply_request(stats);
    }

    /// Current statistics of a session; unknown sessions read as empty.
    #[must_use]
    pub fn snapshot(&self, session: StatsSessionId) -> StatsAggregate {
        self.lock()
            .sessions
            .get(&session)
            .map_or_else(|| StatsAggregate::new(self.log_capacity), |slot| slot.stats.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn evict_oldest(sessions: &mut HashMap<StatsSessionId, Slot>) {
    let oldest = sessions
        .iter()
        .min_by_key(|(_, slot)| slot.last_seen)
        .map(|(id, _)| *id);
    if let Some(id) = oldest {
        sessions.remove(&id);
        tracing::debug!(session = %id, "evicted least recently used stats session");
    }
}

//! Time-bounded cache of standard-legal set ids.
//!
//! The cache is either empty, fresh, or stale. Stale behaves exactly like
//! empty: the next read has to refresh. A refresh replaces the whole list.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    set_ids: Vec<String>,
    captured_at: DateTime<Utc>,
}

/// Set ids plus the moment they were captured.
#[derive(Debug, Clone)]
pub struct LegalSetCache {
    snapshot: Option<Snapshot>,
    freshness_window: Duration,
}

impl LegalSetCache {
    pub fn new(freshness_window: Duration) -> Self {
        Self {
            snapshot: None,
            freshness_window,
        }
    }

    pub fn freshness_window(&self) -> Duration {
        self.freshness_window
    }

    /// The cached ids if they were captured less than the freshness window
    /// before `now`.
    pub fn get(&self, now: DateTime<Utc>) -> Option<&[String]> {
        self.snapshot
            .as_ref()
            .filter(|s| now - s.captured_at < self.freshness_window)
            .map(|s| s.set_ids.as_slice())
    }

    /// The cached ids regardless of age.
    pub fn peek(&self) -> Option<&[String]> {
        self.snapshot.as_ref().map(|s| s.set_ids.as_slice())
    }

    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot.as_ref().map(|s| s.captured_at)
    }

    /// Replace the cached list wholesale.
    pub fn store(&mut self, set_ids: Vec<String>, now: DateTime<Utc>) {
        self.snapshot = Some(Snapshot {
            set_ids,
            captured_at: now,
        });
    }

    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }
}

impl Default for LegalSetCache {
    fn default() -> Self {
        Self::new(crate::config::default_freshness_window())
    }
}

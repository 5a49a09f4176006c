use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::resolver::{MatchResult, MatchType};

/// How long a resolution stays valid for a session
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Default period of the background sweep
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Default number of sessions kept before least-recently-used eviction
pub const DEFAULT_CAPACITY: usize = 1024;

/// Externally assigned session identifier (e.g. a browser tab id)
pub type SessionKey = u64;

/// Time source for entry ages
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        match self.now.lock() {
            Ok(now) => *now,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// A cached resolution for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub result: MatchResult,
    pub timestamp: Instant,
}

impl CacheEntry {
    pub fn file_id(&self) -> Option<&str> {
        self.result.file_id()
    }

    pub fn match_type(&self) -> MatchType {
        self.result.match_type()
    }

    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.timestamp) > CACHE_TTL
    }
}

/// Per-session cache of resolution results with passive expiry
pub struct SessionCache {
    /// LRU cache mapping session keys to their latest resolution
    entries: Arc<Mutex<LruCache<SessionKey, CacheEntry>>>,
    clock: Arc<dyn Clock>,
}

impl SessionCache {
    /// Create a new session cache with a maximum number of entries
    pub fn new(capacity: usize) -> Self {
        Self::with_clock(capacity, Arc::new(SystemClock))
    }

    pub fn with_clock(capacity: usize, clock: Arc<dyn Clock>) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        SessionCache {
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
            clock,
        }
    }

    /// Store a result for a session, replacing any previous one
    pub fn set(&self, key: SessionKey, result: MatchResult) {
        let entry = CacheEntry {
            result,
            timestamp: self.clock.now(),
        };
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(key, entry);
        }
    }

    /// Get a live entry; an expired one is removed and reported as absent
    pub fn get(&self, key: SessionKey) -> Option<CacheEntry> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().ok()?;
        if entries.peek(&key)?.is_expired(now) {
            entries.pop(&key);
            debug!(key, "session entry expired");
            return None;
        }
        entries.get(&key).cloned()
    }

    /// Remove a session's entry
    pub fn delete(&self, key: SessionKey) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.pop(&key);
        }
    }

    /// Remove every expired entry, returning how many were dropped
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let Ok(mut entries) = self.entries.lock() else {
            return 0;
        };

        let stale: Vec<SessionKey> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| *key)
            .collect();
        for key in &stale {
            entries.pop(key);
        }
        stale.len()
    }

    /// Run [`sweep`](Self::sweep) every `period` until `shutdown` is cancelled
    pub fn spawn_sweeper(&self, period: Duration, shutdown: CancellationToken) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        let removed = cache.sweep();
                        if removed > 0 {
                            debug!(removed, "swept expired session entries");
                        }
                    }
                }
            }
        })
    }

    /// Clear the cache
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for SessionCache {
    fn clone(&self) -> Self {
        SessionCache {
            entries: Arc::clone(&self.entries),
            clock: Arc::clone(&self.clock),
        }
    }
}

//! Response cache with a shared rate-limit cooldown.
//!
//! One instance per client, shared across clones through `Arc<RwLock<_>>`.
//! Entries are raw JSON bodies keyed by endpoint-specific strings
//! (`chart_bitcoin_usd_7`, `market_usd_50`, `coin_ethereum`, …).

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default lifetime of a cached response.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(20);

/// Cooldown applied after a 429 without a usable `Retry-After` header.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CacheEntry {
    body: serde_json::Value,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct ResponseCache {
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
    cooldown_until: Option<Instant>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
            cooldown_until: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&mut self, key: &str) -> Option<serde_json::Value> {
        self.get_at(key, Instant::now())
    }

    /// Fresh entry for `key`. Expired entries are evicted on lookup.
    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<serde_json::Value> {
        match self.entries.get(key) {
            Some(entry) if now < entry.expires_at => Some(entry.body.clone()),
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, body: serde_json::Value) {
        self.insert_at(key, body, Instant::now());
    }

    /// Store `body` under `key`. Expired entries for other keys are swept here,
    /// so keys that are never looked up again do not accumulate.
    pub fn insert_at(&mut self, key: impl Into<String>, body: serde_json::Value, now: Instant) {
        self.entries.retain(|_, e| now < e.expires_at);
        self.entries.insert(
            key.into(),
            CacheEntry {
                body,
                expires_at: now + self.ttl,
            },
        );
    }

    pub fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Drop every entry. The cooldown is left in place.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_cooldown(&mut self, duration: Duration) {
        self.set_cooldown_at(duration, Instant::now());
    }

    /// Block requests until `now + duration`. An existing later deadline wins.
    pub fn set_cooldown_at(&mut self, duration: Duration, now: Instant) {
        let until = now + duration;
        if self.cooldown_until.map_or(true, |current| until > current) {
            self.cooldown_until = Some(until);
        }
    }

    pub fn cooldown_remaining(&self) -> Option<Duration> {
        self.cooldown_remaining_at(Instant::now())
    }

    /// Time left on the active cooldown, `None` once it has passed.
    pub fn cooldown_remaining_at(&self, now: Instant) -> Option<Duration> {
        self.cooldown_until
            .and_then(|until| until.checked_duration_since(now))
            .filter(|d| !d.is_zero())
    }
}

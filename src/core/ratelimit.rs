use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

use crate::core::config::RatelimitConfig;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache lock poisoned")]
    Poisoned,
}

struct Entry {
    value: i64,
    expires_at: i64,
}

/// Process-scoped TTL cache backing the rate limiter. Entries expire by
/// wall-clock second; expiry is lazy (checked on read) and on write an
/// opportunistic sweep drops anything already dead, so the map stays
/// bounded by the set of recently active IPs.
///
/// Constructed once at startup and injected; nothing survives a restart.
pub struct TtlCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &str, now: i64) -> Result<Option<i64>, CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.value)),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    pub fn set(&self, key: &str, value: i64, ttl_seconds: i64, now: i64) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: now + ttl_seconds,
            },
        );
        Ok(())
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Limited,
}

// Counter keys only matter for the second they name; 2 seconds covers the
// current second plus one for clock skew.
const COUNTER_TTL_SECONDS: i64 = 2;

/// Per-IP sliding 1-second window with a cool-down block, driven by two
/// cache entries per IP: a request counter for the current second and a
/// block marker that outlives it.
///
/// Concurrent requests from one IP may both read the counter before either
/// writes it back; the threshold is enforced approximately under that race
/// and that is accepted behavior.
pub struct RateLimiter {
    config: RatelimitConfig,
    cache: TtlCache,
}

impl RateLimiter {
    pub fn new(config: RatelimitConfig, cache: TtlCache) -> Self {
        Self { config, cache }
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    /// Run the admission state machine for one request from `ip` at unix
    /// second `now`. A cache write failure propagates: future admission
    /// decisions depend on the key having been written, so the caller must
    /// fail the request rather than guess.
    pub fn check(&self, ip: &str, now: i64) -> Result<Admission, CacheError> {
        // An existing block short-circuits everything, counter untouched.
        // The block falls off naturally once its TTL is reached.
        let block_key = format!("request_{}_ratelimit", ip);
        if self.cache.get(&block_key, now)?.is_some() {
            return Ok(Admission::Limited);
        }

        let counter_key = format!("request_{}_{}", ip, now);
        match self.cache.get(&counter_key, now)? {
            None => {
                // First request this second.
                self.cache.set(&counter_key, 1, COUNTER_TTL_SECONDS, now)?;
                Ok(Admission::Allowed)
            }
            Some(count) => {
                let count = count + 1;
                if count > self.config.requests_threshold {
                    self.cache.set(
                        &block_key,
                        now + self.config.block_seconds,
                        self.config.block_seconds,
                        now,
                    )?;
                    Ok(Admission::Limited)
                } else {
                    self.cache
                        .set(&counter_key, count, COUNTER_TTL_SECONDS, now)?;
                    Ok(Admission::Allowed)
                }
            }
        }
    }
}

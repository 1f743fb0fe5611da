// src/cache/mod.rs
// =============================================================================
// An in-memory response cache with a time-to-live.
//
// The server stores serialized JSON payloads here, keyed by request
// (e.g. "languages:leachim6/hello-world"). Values are opaque bytes; the
// cache doesn't know or care what's inside.
//
// Every value remembers when it was stored, so responses served from the
// cache can report a cached_at timestamp.
// =============================================================================

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

// A value read back from the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedValue {
    pub bytes: Vec<u8>,
    pub cached_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Slot {
    value: CachedValue,
    expires_at: Instant,
}

// Shared key -> bytes store
//
// All methods take &self so the cache can sit behind an Arc in the server
// state. DashMap shards its locks, and no shard guard is held across an
// .await.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    slots: DashMap<String, Slot>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        ResponseCache {
            ttl,
            slots: DashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // Returns the value for key, unless it is missing or expired
    //
    // An expired value is removed on the way out.
    pub fn get(&self, key: &str) -> Option<CachedValue> {
        let now = Instant::now();

        {
            let slot = self.slots.get(key)?;
            if slot.expires_at > now {
                return Some(slot.value.clone());
            }
        }

        debug!(key, "Cache entry expired");
        self.slots.remove_if(key, |_, slot| slot.expires_at <= now);
        None
    }

    // Stores bytes under key, replacing any previous value
    //
    // Returns the timestamp recorded for the new value.
    pub fn set(&self, key: impl Into<String>, bytes: Vec<u8>) -> DateTime<Utc> {
        let cached_at = Utc::now();
        let slot = Slot {
            value: CachedValue { bytes, cached_at },
            expires_at: Instant::now() + self.ttl,
        };

        self.slots.insert(key.into(), slot);
        cached_at
    }

    // Drops every expired value, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.slots.len();
        self.slots.retain(|_, slot| slot.expires_at > now);
        before.saturating_sub(self.slots.len())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why DashMap?
//    - It is a HashMap split into shards, each with its own lock
//    - Handlers reading different keys rarely wait on each other
//    - The guard returned by get() must be dropped before touching the same
//      key again, hence the inner block in get()
//
// 2. Why both Instant and DateTime<Utc>?
//    - Instant is monotonic, so expiry can't be confused by clock changes
//    - DateTime<Utc> is what we show to clients
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let cached_at = cache.set("languages", b"[]".to_vec());

        let value = cache.get("languages").unwrap();
        assert_eq!(value.bytes, b"[]");
        assert_eq!(value.cached_at, cached_at);
    }

    #[test]
    fn test_missing_key() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        assert!(cache.get("nope").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_replaces_value() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.set("key", b"one".to_vec());
        cache.set("key", b"two".to_vec());

        assert_eq!(cache.get("key").unwrap().bytes, b"two");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_value_is_not_returned() {
        let cache = ResponseCache::new(Duration::ZERO);
        cache.set("key", b"stale".to_vec());

        assert!(cache.get("key").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let cache = ResponseCache::new(Duration::ZERO);
        cache.set("a", b"1".to_vec());
        cache.set("b", b"2".to_vec());

        assert_eq!(cache.purge_expired(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_between_threads() {
        let cache = ResponseCache::new(Duration::from_secs(60));

        std::thread::scope(|scope| {
            for i in 0..8 {
                let cache = &cache;
                scope.spawn(move || {
                    let key = format!("language:owner/repo:{}", i);
                    cache.set(key.clone(), vec![i as u8]);
                    assert_eq!(cache.get(&key).unwrap().bytes, vec![i as u8]);
                });
            }
        });

        assert_eq!(cache.len(), 8);
    }

    #[test]
    fn test_purge_keeps_fresh_values() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.set("a", b"1".to_vec());

        assert_eq!(cache.purge_expired(), 0);
        assert_eq!(cache.len(), 1);
    }
}

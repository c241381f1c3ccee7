//! Process-lifetime ABI cache
//!
//! Many readers, few writers; reads never block each other. There is no
//! eviction, TTL, or size bound, and no single-flight guard: two
//! concurrent misses on one key both fetch and both write, last write
//! wins. Keys are the literal `"{chainId}-{address}"` strings as the
//! caller sent them, so mixed-case and lowercase renderings of the same
//! address occupy distinct entries.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::types::CacheRecord;

/// Concurrency-safe in-memory map from `"{chainId}-{address}"` to a
/// resolved record.
#[derive(Default)]
pub struct AbiCache {
    inner: RwLock<HashMap<String, CacheRecord>>,
}

impl AbiCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the literal cache key for a request.
    pub fn key(chain_id: &str, address: &str) -> String {
        format!("{chain_id}-{address}")
    }

    pub fn get(&self, key: &str) -> Option<CacheRecord> {
        self.inner
            .read()
            .expect("cache lock poisoned")
            .get(key)
            .cloned()
    }

    pub fn insert(&self, key: String, record: CacheRecord) {
        self.inner
            .write()
            .expect("cache lock poisoned")
            .insert(key, record);
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn record(abi: &str) -> CacheRecord {
        CacheRecord {
            abi: abi.to_string(),
            implementation: Some(address!("4bd844f72a8edd323056130a86fc624d0dbcf5b0")),
            is_proxy: true,
            is_decompiled: false,
        }
    }

    #[test]
    fn set_then_get_round_trips() {
        let cache = AbiCache::new();
        let rec = record("test-abi");
        cache.insert(AbiCache::key("1", "0xabc"), rec.clone());

        assert_eq!(cache.get("1-0xabc"), Some(rec));
        assert_eq!(cache.get("non-existent"), None);
    }

    #[test]
    fn keys_are_case_literal() {
        let cache = AbiCache::new();
        cache.insert(
            AbiCache::key("1", "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            record("checksummed"),
        );

        assert!(cache.get("1-0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48").is_none());
        assert!(cache
            .get("1-0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")
            .is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn rewrite_of_a_key_is_last_write_wins() {
        let cache = AbiCache::new();
        let key = AbiCache::key("1", "0xabc");
        cache.insert(key.clone(), record("first"));
        cache.insert(key.clone(), record("second"));

        assert_eq!(cache.get(&key).unwrap().abi, "second");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn concurrent_readers_and_writers_stay_consistent() {
        use std::sync::Arc;
        use std::thread;

        let cache = Arc::new(AbiCache::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                let key = AbiCache::key("1", &format!("0x{i:040x}"));
                cache.insert(key.clone(), record(&format!("abi-{i}")));
                assert_eq!(cache.get(&key).unwrap().abi, format!("abi-{i}"));
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 8);
    }
}

//! In-memory TTL cache for query results.
//!
//! String-keyed, single fixed TTL. The current instant is an explicit
//! parameter on every call so evaluation order inside one logical query
//! cannot observe different clocks, and tests need no clock mocking.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default entry lifetime: 30 seconds.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// A string-keyed cache whose entries expire after a fixed TTL.
pub struct TtlCache<V> {
    entries: HashMap<String, Entry<V>>,
    ttl: Duration,
}

impl<V> TtlCache<V> {
    /// Create a cache with the default 30-second TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        TtlCache {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Fetch a live entry. Expired entries are dropped and miss.
    pub fn get(&mut self, key: &str, now: Instant) -> Option<&V> {
        let expired = match self.entries.get(key) {
            Some(entry) => now.duration_since(entry.inserted_at) > self.ttl,
            None => return None,
        };
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|e| &e.value)
    }

    /// Insert or replace an entry, stamped at `now`.
    pub fn set(&mut self, key: impl Into<String>, value: V, now: Instant) {
        self.entries.insert(
            key.into(),
            Entry {
                value,
                inserted_at: now,
            },
        );
    }

    /// Drop one entry.
    pub fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Drop every entry whose key starts with `prefix`. Write paths use
    /// this to evict all cached variants of a household's queries at once.
    pub fn invalidate_prefix(&mut self, prefix: &str) {
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries currently stored (live or not yet evicted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache key for an expenses query, one variant per filter combination.
pub fn expenses_key(
    household_id: &str,
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
    category: Option<&str>,
) -> String {
    let mut key = format!("expenses-{household_id}");
    if let Some(start) = start {
        key.push_str(&format!("-from-{start}"));
    }
    if let Some(end) = end {
        key.push_str(&format!("-to-{end}"));
    }
    if let Some(category) = category {
        key.push_str(&format!("-cat-{category}"));
    }
    key
}

/// Cache key for a household's task list.
pub fn tasks_key(household_id: &str) -> String {
    format!("tasks-{household_id}")
}

/// Cache key for a household's inventory.
pub fn inventory_key(household_id: &str) -> String {
    format!("inventory-{household_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn get_hits_within_ttl_and_misses_after() {
        let mut cache: TtlCache<u32> = TtlCache::with_ttl(Duration::from_secs(30));
        let t0 = Instant::now();
        cache.set("k", 7, t0);

        assert_eq!(cache.get("k", t0 + Duration::from_secs(29)), Some(&7));
        assert_eq!(cache.get("k", t0 + Duration::from_secs(31)), None);
        // The expired entry was evicted, not just hidden
        assert!(cache.is_empty());
    }

    #[test]
    fn set_refreshes_the_stamp() {
        let mut cache: TtlCache<u32> = TtlCache::with_ttl(Duration::from_secs(30));
        let t0 = Instant::now();
        cache.set("k", 1, t0);
        cache.set("k", 2, t0 + Duration::from_secs(20));

        assert_eq!(cache.get("k", t0 + Duration::from_secs(45)), Some(&2));
    }

    #[test]
    fn prefix_invalidation_spares_other_households() {
        let mut cache: TtlCache<u32> = TtlCache::new();
        let now = Instant::now();
        cache.set(expenses_key("hh-1", None, None, None), 1, now);
        cache.set(expenses_key("hh-1", None, None, Some("bills")), 2, now);
        cache.set(expenses_key("hh-2", None, None, None), 3, now);

        cache.invalidate_prefix("expenses-hh-1");
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&expenses_key("hh-2", None, None, None), now).is_some());
    }

    #[test]
    fn key_builders_encode_filters() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1);
        let key = expenses_key("hh-1", start, None, Some("groceries"));
        assert_eq!(key, "expenses-hh-1-from-2025-03-01-cat-groceries");
        assert_eq!(tasks_key("hh-1"), "tasks-hh-1");
        assert_eq!(inventory_key("hh-1"), "inventory-hh-1");
    }

    #[test]
    fn clear_empties_everything() {
        let mut cache: TtlCache<&str> = TtlCache::new();
        let now = Instant::now();
        cache.set("a", "x", now);
        cache.set("b", "y", now);
        cache.clear();
        assert!(cache.is_empty());
    }
}

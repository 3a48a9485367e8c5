//! # Tag-invalidated response cache
//!
//! Query responses are cached by request URL together with the [`Tag`]s they
//! provide. Mutations name the tags they invalidate; every entry carrying one
//! of those tags is dropped, so the next read refetches.
//!
//! | Request | Provides |
//! |---------|----------|
//! | `GET /products` | `Product(id)` for each item, `ProductList` |
//! | `GET /products/search` | `ProductSearch` |
//! | `GET /products/:slug` | `Product(id)` |
//! | `GET /categories` | `CategoryList` |
//! | `GET /categories/search` | `CategorySearch` |
//!
//! | Mutation | Invalidates |
//! |----------|-------------|
//! | create | `ProductList`, `ProductSearch` |
//! | update | `Product(id)`, `ProductList`, `ProductSearch` |
//! | delete | `ProductList`, `ProductSearch` |
//!
//! Logging out calls [`QueryCache::reset`], which drops everything.
//!
//! Entries also expire once they are older than the cache's time-to-live
//! (`[api] cache_ttl_secs`, 60 seconds by default). An expired entry is a miss
//! and is pruned on the next write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use catalog::config::DEFAULT_CACHE_TTL_SECS;
use chrono::{DateTime, TimeDelta, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    ProductList,
    ProductSearch,
    Product(String),
    CategoryList,
    CategorySearch,
}

impl Tag {
    /// Tags dropped by any product write.
    pub fn product_writes() -> Vec<Tag> {
        vec![Tag::ProductList, Tag::ProductSearch]
    }
}

#[derive(Debug)]
struct Entry {
    value: serde_json::Value,
    tags: Vec<Tag>,
    stored_at: DateTime<Utc>,
}

/// Process-wide cache of query responses. Clones share storage.
#[derive(Clone, Debug)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    ttl: TimeDelta,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::with_ttl(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::default(),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    fn is_fresh(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        now - entry.stored_at < self.ttl
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = self.entries();
        let entry = entries.get(key)?;
        if !self.is_fresh(entry, Utc::now()) {
            return None;
        }
        serde_json::from_value(entry.value.clone()).ok()
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T, tags: Vec<Tag>) {
        match serde_json::to_value(value) {
            Ok(value) => {
                let now = Utc::now();
                let mut entries = self.entries();
                entries.retain(|_, entry| self.is_fresh(entry, now));
                entries.insert(
                    key.to_string(),
                    Entry {
                        value,
                        tags,
                        stored_at: now,
                    },
                );
            }
            Err(e) => tracing::warn!("Not caching {key}: {e}"),
        }
    }

    /// Drop every entry carrying one of `tags`. Returns how many were dropped.
    pub fn invalidate(&self, tags: &[Tag]) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, entry| !entry.tags.iter().any(|t| tags.contains(t)));
        let dropped = before - entries.len();
        if dropped > 0 {
            tracing::debug!("Invalidated {dropped} cached responses for {tags:?}");
        }
        dropped
    }

    pub fn reset(&self) {
        self.entries().clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get() {
        let cache = QueryCache::new();
        cache.put("a", &vec![1, 2, 3], vec![Tag::ProductList]);
        assert_eq!(cache.get::<Vec<i32>>("a"), Some(vec![1, 2, 3]));
        assert_eq!(cache.get::<Vec<i32>>("b"), None);
    }

    #[test]
    fn test_invalidate_by_tag() {
        let cache = QueryCache::new();
        cache.put(
            "list",
            &"l",
            vec![Tag::Product("p1".into()), Tag::ProductList],
        );
        cache.put("search", &"s", vec![Tag::ProductSearch]);
        cache.put("detail", &"d", vec![Tag::Product("p1".into())]);
        cache.put("other", &"o", vec![Tag::Product("p2".into())]);
        cache.put("cats", &"c", vec![Tag::CategoryList]);

        assert_eq!(cache.invalidate(&Tag::product_writes()), 2);
        assert_eq!(cache.get::<String>("list"), None);
        assert_eq!(cache.get::<String>("search"), None);
        assert_eq!(cache.len(), 3);

        assert_eq!(cache.invalidate(&[Tag::Product("p1".into())]), 1);
        assert_eq!(cache.get::<String>("other").as_deref(), Some("o"));
        assert_eq!(cache.get::<String>("cats").as_deref(), Some("c"));
    }

    #[test]
    fn test_reset_drops_everything_in_clones() {
        let cache = QueryCache::new();
        let shared = cache.clone();
        cache.put("cats", &"c", vec![Tag::CategoryList]);
        shared.reset();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_entries_miss_and_are_pruned() {
        let cache = QueryCache::with_ttl(Duration::from_millis(20));
        cache.put("old", &"o", vec![Tag::ProductList]);
        assert_eq!(cache.get::<String>("old").as_deref(), Some("o"));

        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(cache.get::<String>("old"), None);

        cache.put("new", &"n", vec![Tag::ProductList]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get::<String>("new").as_deref(), Some("n"));
    }
}

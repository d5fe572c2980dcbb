use leptos::prelude::*;
use leptos::reactive::signal::ArcTrigger;
use std::collections::{HashMap, VecDeque};

/// Most request signatures kept at once. Search-as-you-type produces a new
/// signature per keystroke; the oldest are evicted first.
pub(crate) const MAX_ENTRIES: usize = 64;

/// In-memory store of decoded GET responses, keyed by request signature
/// (`path?query`). Nothing here outlives the page.
#[derive(Clone, Debug, Default)]
pub(crate) struct QueryCache {
    entries: HashMap<String, serde_json::Value>,
    /// Insertion order of `entries`, oldest first.
    order: VecDeque<String>,
    /// Bumped on invalidation. Keyed by path (the part before `?`) so every
    /// page/filter variant of a listing is invalidated together.
    revisions: HashMap<String, u64>,
}

pub(crate) fn key_path(key: &str) -> &str {
    key.split_once('?').map(|(p, _)| p).unwrap_or(key)
}

impl QueryCache {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: String, value: serde_json::Value) {
        if self.entries.insert(key.clone(), value).is_some() {
            self.order.retain(|k| *k != key);
        }
        self.order.push_back(key);
        while self.entries.len() > MAX_ENTRIES {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }

    pub fn revision(&self, key: &str) -> u64 {
        self.revisions.get(key_path(key)).copied().unwrap_or(0)
    }

    /// Drop every entry whose path equals `path` and bump that path's revision.
    /// Returns how many cached entries were dropped.
    pub fn invalidate(&mut self, path: &str) -> usize {
        let path = key_path(path);
        let before = self.entries.len();
        self.entries.retain(|k, _| key_path(k) != path);
        self.order.retain(|k| key_path(k) != path);
        *self.revisions.entry(path.to_string()).or_insert(0) += 1;
        before - self.entries.len()
    }
}

/// Shared handle to the cache. Subscribers read `revision()` inside a tracked
/// context and are woken only when their own path is invalidated.
#[derive(Clone, Copy)]
pub(crate) struct CacheContext {
    store: StoredValue<QueryCache>,
    triggers: StoredValue<HashMap<String, ArcTrigger>>,
}

impl CacheContext {
    pub fn new() -> Self {
        Self {
            store: StoredValue::new(QueryCache::default()),
            triggers: StoredValue::new(HashMap::new()),
        }
    }

    fn trigger(&self, path: &str) -> Option<ArcTrigger> {
        self.triggers.try_update_value(|t| {
            t.entry(path.to_string())
                .or_insert_with(ArcTrigger::new)
                .clone()
        })
    }

    /// Current revision of `key`'s path. Tracks that path only.
    pub fn revision(&self, key: &str) -> u64 {
        if let Some(trigger) = self.trigger(key_path(key)) {
            trigger.track();
        }
        self.store
            .try_with_value(|c| c.revision(key))
            .unwrap_or_default()
    }

    pub fn cached(&self, key: &str) -> Option<serde_json::Value> {
        self.store.try_with_value(|c| c.get(key).cloned()).flatten()
    }

    pub fn store(&self, key: String, value: serde_json::Value) {
        self.store.update_value(|c| c.insert(key, value));
    }

    /// Equivalent of a global `mutate(key)`: every listing under `path` refetches.
    pub fn invalidate(&self, path: &str) {
        let path = key_path(path);
        let dropped = self
            .store
            .try_update_value(|c| c.invalidate(path))
            .unwrap_or_default();
        let subscribed = self
            .triggers
            .try_with_value(|t| t.get(path).cloned())
            .flatten();
        if let Some(trigger) = subscribed {
            trigger.notify();
        }
        tracing::debug!(path, dropped, "cache invalidated");
    }
}

impl Default for CacheContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Generation counter for request tagging. Only the response for the most
/// recent generation may be applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn next(&mut self) -> u64 {
        self.latest = self.latest.saturating_add(1);
        self.latest
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }
}

/// Decides whether a fetch effect run should hit the network. A run is only
/// worth a request when the key or the combined revision moved since the last
/// request; reruns caused by unrelated reads are skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FetchTrigger {
    last: Option<(String, u64)>,
}

impl FetchTrigger {
    pub fn should_fetch(&mut self, key: &str, revision: u64) -> bool {
        if self
            .last
            .as_ref()
            .is_some_and(|(k, r)| k == key && *r == revision)
        {
            return false;
        }
        self.last = Some((key.to_string(), revision));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::reactive::computed::ArcMemo;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_key_path() {
        assert_eq!(key_path("/libraries?page=1&per_page=20"), "/libraries");
        assert_eq!(key_path("/open-content/favorites"), "/open-content/favorites");
    }

    #[test]
    fn test_invalidate_drops_all_variants_of_a_path() {
        let mut c = QueryCache::default();
        c.insert("/libraries?page=1".to_string(), serde_json::json!({"data": []}));
        c.insert("/libraries?page=2".to_string(), serde_json::json!({"data": []}));
        c.insert("/open-content/favorites".to_string(), serde_json::json!({"data": []}));

        assert_eq!(c.revision("/libraries?page=1"), 0);
        assert_eq!(c.invalidate("/libraries"), 2);

        assert!(c.get("/libraries?page=1").is_none());
        assert!(c.get("/libraries?page=2").is_none());
        assert!(c.get("/open-content/favorites").is_some());
        assert_eq!(c.revision("/libraries?page=9"), 1);
        assert_eq!(c.revision("/open-content/favorites"), 0);
    }

    #[test]
    fn test_invalidate_unknown_path_still_bumps_revision() {
        let mut c = QueryCache::default();
        assert_eq!(c.invalidate("/videos"), 0);
        assert_eq!(c.revision("/videos?page=1"), 1);
    }

    #[test]
    fn test_entries_are_bounded_oldest_first() {
        let mut c = QueryCache::default();
        for i in 0..(MAX_ENTRIES + 10) {
            c.insert(format!("/libraries?search={i}"), serde_json::json!({}));
        }
        assert_eq!(c.entries.len(), MAX_ENTRIES);
        assert!(c.get("/libraries?search=0").is_none());
        assert!(c.get("/libraries?search=9").is_none());
        assert!(c.get("/libraries?search=10").is_some());
        assert!(c.get(&format!("/libraries?search={}", MAX_ENTRIES + 9)).is_some());
    }

    #[test]
    fn test_reinserting_a_key_refreshes_its_age() {
        let mut c = QueryCache::default();
        c.insert("/libraries?page=1".to_string(), serde_json::json!(1));
        for i in 0..(MAX_ENTRIES - 1) {
            c.insert(format!("/videos?page={i}"), serde_json::json!({}));
        }
        c.insert("/libraries?page=1".to_string(), serde_json::json!(2));
        c.insert("/helpful-links".to_string(), serde_json::json!({}));

        assert_eq!(c.entries.len(), MAX_ENTRIES);
        assert_eq!(c.get("/libraries?page=1"), Some(&serde_json::json!(2)));
        assert!(c.get("/videos?page=0").is_none());
    }

    #[test]
    fn test_invalidating_one_path_wakes_only_its_subscribers() {
        let cache = CacheContext::new();
        let library_runs = Arc::new(AtomicUsize::new(0));
        let video_runs = Arc::new(AtomicUsize::new(0));

        let libraries = {
            let runs = Arc::clone(&library_runs);
            ArcMemo::new(move |_| {
                runs.fetch_add(1, Ordering::SeqCst);
                cache.revision("/libraries?page=1")
            })
        };
        let videos = {
            let runs = Arc::clone(&video_runs);
            ArcMemo::new(move |_| {
                runs.fetch_add(1, Ordering::SeqCst);
                cache.revision("/videos?page=1")
            })
        };
        assert_eq!((libraries.get(), videos.get()), (0, 0));

        cache.invalidate("/videos");
        assert_eq!((libraries.get(), videos.get()), (0, 1));
        assert_eq!(library_runs.load(Ordering::SeqCst), 1);
        assert_eq!(video_runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_store_does_not_bump_revision() {
        let cache = CacheContext::new();
        cache.store("/libraries?page=1".to_string(), serde_json::json!({"data": []}));
        assert_eq!(cache.revision("/libraries?page=1"), 0);
        assert!(cache.cached("/libraries?page=1").is_some());
        cache.invalidate("/libraries");
        assert!(cache.cached("/libraries?page=1").is_none());
    }

    #[test]
    fn test_request_tracker_discards_stale() {
        let mut t = RequestTracker::default();
        let first = t.next();
        let second = t.next();
        assert!(!t.is_current(first));
        assert!(t.is_current(second));
    }

    #[test]
    fn test_fetch_trigger_skips_unchanged_runs() {
        let mut t = FetchTrigger::default();
        assert!(t.should_fetch("/libraries?page=1", 0));
        assert!(!t.should_fetch("/libraries?page=1", 0));
        assert!(t.should_fetch("/libraries?page=2", 0));
        assert!(t.should_fetch("/libraries?page=2", 1));
    }
}

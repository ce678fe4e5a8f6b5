//! Cache-and-refetch data layer.
//!
//! [`QueryCache`] is provided once in `App` and looked up with
//! [`use_query_cache`]; nothing here is a global. Pages call [`use_query`]
//! with a reactive key and a fetcher and get back loading/data/error signals.
//! Cached data is shown immediately and revalidated on mount; invalidating a
//! key prefix makes every live query under it fetch again.

use std::collections::HashMap;
use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::api_client::{use_api, ApiClient, ApiError};

/// Joins key parts with `:`; `query_key(&["surveys", "list", "2"])` -> `"surveys:list:2"`
pub fn query_key(parts: &[&str]) -> String {
    parts.join(":")
}

/// Serialized query results by key
#[derive(Debug, Default, Clone)]
pub struct CacheStore {
    entries: HashMap<String, serde_json::Value>,
}

impl CacheStore {
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::warn!("Cached value for '{}' has unexpected shape: {}", key, e);
                None
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => {
                self.entries.insert(key.to_string(), json);
            }
            Err(e) => log::warn!("Not caching '{}': {}", key, e),
        }
    }

    /// Drops `prefix` itself and every key nested under it (`prefix:...`).
    /// Returns how many entries were removed.
    pub fn invalidate_prefix(&mut self, prefix: &str) -> usize {
        let nested = format!("{}:", prefix);
        let before = self.entries.len();
        self.entries
            .retain(|key, _| key != prefix && !key.starts_with(&nested));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether a query run must hit the network.
///
/// The first run always revalidates; later runs fetch only on a cache miss
/// or an explicit refetch.
pub fn should_fetch(first_run: bool, cache_hit: bool, refetch_requested: bool) -> bool {
    first_run || !cache_hit || refetch_requested
}

/// What the page shows while a request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestStart {
    /// Drop the data of the previous key
    pub clear_data: bool,
    /// Show the loading placeholder instead of data
    pub show_loading: bool,
}

/// Only a new key without cached data blanks the page. An invalidated or
/// refetched key keeps its last data on screen until the answer arrives.
pub fn request_start(key_changed: bool, cache_hit: bool, has_data: bool) -> RequestStart {
    let clear_data = key_changed && !cache_hit;
    RequestStart {
        clear_data,
        show_loading: !cache_hit && (clear_data || !has_data),
    }
}

#[derive(Clone, Copy)]
pub struct QueryCache {
    store: StoredValue<CacheStore>,
    version: RwSignal<u64>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            store: StoredValue::new(CacheStore::default()),
            version: RwSignal::new(0),
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.store.with_value(|s| s.get(key))
    }

    pub fn insert<T: Serialize>(&self, key: &str, value: &T) {
        self.store.update_value(|s| s.insert(key, value));
    }

    /// Invalidates a key family and wakes every live query so misses refetch
    pub fn invalidate(&self, prefix: &str) {
        let removed = self
            .store
            .try_update_value(|s| s.invalidate_prefix(prefix))
            .unwrap_or_default();
        log::debug!("Invalidated {} cached entries under '{}'", removed, prefix);
        self.version.update(|v| *v += 1);
    }

    fn track(&self) -> u64 {
        self.version.get()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_query_cache() -> QueryCache {
    expect_context::<QueryCache>()
}

/// Reactive result of [`use_query`]
pub struct QueryState<T: Send + Sync + 'static> {
    pub data: RwSignal<Option<T>>,
    /// True while there is nothing to show for the current key
    pub is_loading: RwSignal<bool>,
    /// True while any request is in flight, including background refreshes
    pub is_fetching: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    refetch_trigger: RwSignal<u64>,
}

impl<T: Send + Sync + 'static> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for QueryState<T> {}

impl<T: Send + Sync + 'static> QueryState<T> {
    fn new() -> Self {
        Self {
            data: RwSignal::new(None),
            is_loading: RwSignal::new(true),
            is_fetching: RwSignal::new(false),
            error: RwSignal::new(None),
            refetch_trigger: RwSignal::new(0),
        }
    }

    /// Fetches the current key again while keeping the data on screen
    pub fn refetch(&self) {
        self.refetch_trigger.update(|n| *n += 1);
    }
}

/// Runs `fetcher` for the current `key`, caching results under it.
///
/// Responses that arrive after a newer request was started are discarded,
/// so quickly paging through a list cannot show an older page.
pub fn use_query<T, F, Fut>(key: Signal<String>, fetcher: F) -> QueryState<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    F: Fn(ApiClient) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let api = use_api();
    let cache = use_query_cache();
    let state = QueryState::<T>::new();
    let sequence = StoredValue::new(0u64);

    Effect::new(move |previous: Option<(String, u64)>| {
        let key = key.get();
        let trigger = state.refetch_trigger.get();
        cache.track();

        let key_changed = previous.as_ref().map(|(k, _)| k != &key).unwrap_or(true);
        let refetch_requested = previous
            .as_ref()
            .is_some_and(|(_, t)| *t != trigger);

        let cached = cache.get::<T>(&key);
        let cache_hit = cached.is_some();
        if let Some(value) = cached {
            state.data.set(Some(value));
            state.is_loading.set(false);
        }

        if !should_fetch(key_changed, cache_hit, refetch_requested) {
            return (key, trigger);
        }

        let has_data = state.data.with_untracked(Option::is_some);
        let start = request_start(key_changed, cache_hit, has_data);
        if start.clear_data {
            state.data.set(None);
        }
        if start.show_loading {
            state.is_loading.set(true);
        }
        state.error.set(None);
        state.is_fetching.set(true);

        let ticket = sequence.get_value() + 1;
        sequence.set_value(ticket);

        let request = fetcher(api.clone());
        let request_key = key.clone();
        spawn_local(async move {
            let result = request.await;
            if sequence.try_get_value() != Some(ticket) {
                log::debug!("Discarding stale response for '{}'", request_key);
                return;
            }
            match result {
                Ok(value) => {
                    cache.insert(&request_key, &value);
                    state.data.set(Some(value));
                    state.error.set(None);
                }
                Err(e) => {
                    log::warn!("Query '{}' failed: {}", request_key, e);
                    // Data kept across a refetch is stale once the record is gone
                    if e.status() == Some(404) {
                        state.data.set(None);
                    }
                    state.error.set(Some(e.to_string()));
                }
            }
            state.is_loading.set(false);
            state.is_fetching.set(false);
        });

        (key, trigger)
    });

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_key() {
        assert_eq!(query_key(&["surveys", "list", "2"]), "surveys:list:2");
    }

    #[test]
    fn test_store_round_trip() {
        let mut store = CacheStore::default();
        store.insert("surveys:detail:1", &json!({"title": "NPS"}));
        let value: serde_json::Value = store.get("surveys:detail:1").unwrap();
        assert_eq!(value["title"], "NPS");
        assert!(store.get::<serde_json::Value>("surveys:detail:2").is_none());
    }

    #[test]
    fn test_wrong_shape_is_a_miss() {
        let mut store = CacheStore::default();
        store.insert("count", &"not a number");
        assert_eq!(store.get::<u32>("count"), None);
        assert!(store.contains("count"));
    }

    #[test]
    fn test_invalidate_prefix() {
        let mut store = CacheStore::default();
        store.insert("surveys", &1);
        store.insert("surveys:list:1", &1);
        store.insert("surveys:detail:abc", &1);
        store.insert("surveys_archive", &1);
        store.insert("responses:abc:1", &1);

        assert_eq!(store.invalidate_prefix("surveys"), 3);
        assert!(store.contains("surveys_archive"));
        assert!(store.contains("responses:abc:1"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_should_fetch() {
        assert!(should_fetch(true, true, false));
        assert!(should_fetch(false, false, false));
        assert!(should_fetch(false, true, true));
        assert!(!should_fetch(false, true, false));
    }

    #[test]
    fn test_new_key_without_cache_blanks_the_page() {
        assert_eq!(
            request_start(true, false, true),
            RequestStart { clear_data: true, show_loading: true }
        );
    }

    #[test]
    fn test_invalidated_key_keeps_its_data() {
        // The key is unchanged but its entry was dropped by an invalidation
        assert_eq!(
            request_start(false, false, true),
            RequestStart { clear_data: false, show_loading: false }
        );
        // Nothing arrived yet for this key, so the skeleton stays
        assert_eq!(
            request_start(false, false, false),
            RequestStart { clear_data: false, show_loading: true }
        );
    }

    #[test]
    fn test_cached_key_revalidates_in_background() {
        assert_eq!(
            request_start(true, true, true),
            RequestStart { clear_data: false, show_loading: false }
        );
    }
}

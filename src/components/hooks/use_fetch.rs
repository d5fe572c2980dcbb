use crate::api::{ApiError, ApiResult};
use crate::cache::{FetchTrigger, RequestTracker};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Reactive handle returned by [`use_fetch`].
pub(crate) struct Fetch<T: Send + Sync + 'static> {
    pub data: RwSignal<Option<T>>,
    pub error: RwSignal<Option<ApiError>>,
    pub loading: RwSignal<bool>,
    local_revision: RwSignal<u64>,
}

impl<T: Send + Sync + 'static> Clone for Fetch<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for Fetch<T> {}

impl<T: Send + Sync + 'static> Fetch<T> {
    /// Refetch the current key, keeping whatever is shown until it lands.
    pub fn revalidate(&self) {
        self.local_revision.update(|r| *r += 1);
    }

    /// Local edit of the loaded value (e.g. dropping an unfavorited row).
    pub fn mutate(&self, f: impl FnOnce(&mut T)) {
        self.data.update(|d| {
            if let Some(d) = d.as_mut() {
                f(d);
            }
        });
    }
}

/// GET `key()` whenever it changes, whenever `revision()` moves, whenever the
/// cache invalidates the key's path, or when `revalidate` is called. A cached
/// body for the key is shown first. Reruns with none of those changed issue no
/// request.
///
/// Each request is tagged with a generation; a response that arrives after a
/// newer request was issued is dropped, so rapid filter changes always end on
/// the latest filter's results.
pub(crate) fn use_fetch<T>(
    key: impl Fn() -> Option<String> + 'static,
    revision: impl Fn() -> u64 + 'static,
    decode: fn(serde_json::Value) -> ApiResult<T>,
) -> Fetch<T>
where
    T: Clone + Send + Sync + 'static,
{
    let app_state = expect_context::<AppContext>();
    let cache = app_state.0.cache;
    let api_client = app_state.0.api_client;

    let fetch = Fetch {
        data: RwSignal::new(None),
        error: RwSignal::new(None),
        loading: RwSignal::new(false),
        local_revision: RwSignal::new(0),
    };
    let tracker = StoredValue::new(RequestTracker::default());
    let trigger = StoredValue::new(FetchTrigger::default());

    Effect::new(move |_| {
        let Some(key) = key() else {
            fetch.loading.set(false);
            return;
        };
        let rev = revision() + cache.revision(&key) + fetch.local_revision.get();
        if !trigger
            .try_update_value(|t| t.should_fetch(&key, rev))
            .unwrap_or(false)
        {
            return;
        }

        let Some(generation) = tracker.try_update_value(|t| t.next()) else {
            return;
        };

        if let Some(cached) = cache.cached(&key) {
            if let Ok(v) = decode(cached) {
                fetch.data.set(Some(v));
            }
        }

        fetch.loading.set(true);
        fetch.error.set(None);
        let client = api_client.get_untracked();

        spawn_local(async move {
            let result = client.get_value(&key).await;

            let current = tracker
                .try_with_value(|t| t.is_current(generation))
                .unwrap_or(false);
            if !current {
                tracing::debug!(key = %key, generation, "discarding stale response");
                return;
            }

            let decoded = result.and_then(|raw| {
                let v = decode(raw.clone())?;
                cache.store(key.clone(), raw);
                Ok(v)
            });
            match decoded {
                Ok(v) => {
                    fetch.data.set(Some(v));
                }
                Err(e) => {
                    tracing::warn!(key = %key, revision = rev, error = %e, "fetch failed");
                    fetch.error.set(Some(e));
                }
            }
            fetch.loading.set(false);
        });
    });

    fetch
}

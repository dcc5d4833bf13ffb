// ── Read path ──
//
// An active handle owns a background task that keeps its local state in
// sync with the shared cache entry, fetching whenever the entry is
// missing, stale, or a refetch is requested. Dropping the handle cancels
// the task; a fetch cancelled mid-flight writes nothing.

use std::sync::Arc;

use tokio::sync::{Notify, watch};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, trace};
use ylink_api::ApiClient;

use crate::cache::{QueryCache, QueryKey};
use crate::state::RequestState;

/// Live view of a GET route.
///
/// Inactive handles (non-GET routes, or `enabled: false`) never touch
/// the network and stay `Idle`.
pub struct QueryHandle {
    key: QueryKey,
    active: bool,
    state: Arc<watch::Sender<RequestState>>,
    refetch: Arc<Notify>,
    _task: Option<DropGuard>,
}

impl QueryHandle {
    pub(crate) fn inactive(key: QueryKey, is_get: bool) -> Self {
        let (state, _) = watch::channel(RequestState::idle(is_get));
        Self {
            key,
            active: false,
            state: Arc::new(state),
            refetch: Arc::new(Notify::new()),
            _task: None,
        }
    }

    /// Start an active read. Must be called inside a Tokio runtime.
    pub(crate) fn spawn(
        key: QueryKey,
        url: String,
        client: Arc<ApiClient>,
        cache: Arc<QueryCache>,
    ) -> Self {
        // Seed synchronously so callers observe `Pending` or a cache hit
        // immediately, before the task gets scheduled.
        let initial = match cache.get(&key) {
            Some(entry) if !entry.stale => entry.state,
            Some(mut entry) => {
                entry.state.begin();
                entry.state
            }
            None => {
                let mut pending = RequestState::idle(true);
                pending.begin();
                pending
            }
        };
        let (state, _) = watch::channel(initial);
        let state = Arc::new(state);
        let refetch = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        tokio::spawn(drive(ReadTask {
            key: key.clone(),
            url,
            client,
            cache,
            state: Arc::clone(&state),
            refetch: Arc::clone(&refetch),
            cancel: cancel.clone(),
        }));

        Self {
            key,
            active: true,
            state,
            refetch,
            _task: Some(cancel.drop_guard()),
        }
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// `true` when this handle drives network reads.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current(&self) -> RequestState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    /// Wait until the read has succeeded or failed.
    ///
    /// Returns the current state right away for inactive handles.
    pub async fn settled(&self) -> RequestState {
        let mut rx = self.state.subscribe();
        if self.active {
            if let Ok(state) = rx.wait_for(RequestState::is_settled).await {
                return state.clone();
            }
        }
        let state = rx.borrow().clone();
        state
    }

    /// Force a new fetch even if the cached entry is fresh.
    pub fn refetch(&self) {
        if !self.active {
            return;
        }
        self.state.send_modify(RequestState::begin);
        self.refetch.notify_one();
    }
}

struct ReadTask {
    key: QueryKey,
    url: String,
    client: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    state: Arc<watch::Sender<RequestState>>,
    refetch: Arc<Notify>,
    cancel: CancellationToken,
}

async fn drive(task: ReadTask) {
    let mut entries = task.cache.subscribe(&task.key);
    let mut forced = false;

    loop {
        let cached = entries.borrow_and_update().clone();
        match cached {
            Some(entry) if !entry.stale && !forced => {
                task.state.send_replace(entry.state);
            }
            _ => {
                forced = false;
                task.state.send_modify(RequestState::begin);
                trace!(url = %task.url, "fetching");

                let result = tokio::select! {
                    () = task.cancel.cancelled() => {
                        debug!(url = %task.url, "read cancelled before settling");
                        return;
                    }
                    result = task.client.get(&task.url) => result,
                };

                let settled = RequestState::from_result(result, true);
                // Failures stay on the handle so the next mount retries.
                if settled.is_success() {
                    task.cache.store(&task.key, settled.clone());
                }
                task.state.send_replace(settled);
            }
        }

        tokio::select! {
            () = task.cancel.cancelled() => return,
            () = task.refetch.notified() => forced = true,
            changed = entries.changed() => {
                if changed.is_err() {
                    // Slot removed by `QueryCache::clear`.
                    entries = task.cache.subscribe(&task.key);
                }
            }
        }
    }
}

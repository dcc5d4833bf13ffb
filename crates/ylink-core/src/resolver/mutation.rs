// ── Write path ──
//
// Mutations run only when `mutate` is called. A success invalidates every
// cached read under the same route key.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tracing::debug;
use ylink_api::{ApiClient, RouteDescriptor};

use crate::cache::QueryCache;
use crate::state::RequestState;

/// Explicit trigger for a route's write.
///
/// Concurrent `mutate` calls are independent requests; `current()` shows
/// whichever settled last.
pub struct MutationHandle<B> {
    route: RouteDescriptor,
    url: String,
    default_body: Option<B>,
    client: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    state: watch::Sender<RequestState>,
}

impl<B: Serialize> MutationHandle<B> {
    pub(crate) fn new(
        route: RouteDescriptor,
        url: String,
        default_body: Option<B>,
        client: Arc<ApiClient>,
        cache: Arc<QueryCache>,
    ) -> Self {
        let (state, _) = watch::channel(RequestState::idle(route.method.is_get()));
        Self {
            route,
            url,
            default_body,
            client,
            cache,
            state,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn current(&self) -> RequestState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    /// Back to `Idle`, forgetting the last result.
    pub fn reset(&self) {
        self.state
            .send_replace(RequestState::idle(self.route.method.is_get()));
    }

    /// Send the write.
    ///
    /// `body` falls back to the body given at resolve time; with neither,
    /// the request carries no payload at all.
    pub async fn mutate(&self, body: Option<B>) -> Result<Arc<Value>, Arc<ylink_api::Error>> {
        let is_get = self.route.method.is_get();
        let payload = match body
            .as_ref()
            .or(self.default_body.as_ref())
            .map(serde_json::to_value)
            .transpose()
        {
            Ok(payload) => payload,
            Err(e) => {
                let err = Arc::new(ylink_api::Error::from(e));
                self.state
                    .send_replace(RequestState::failure(Arc::clone(&err), is_get));
                return Err(err);
            }
        };

        self.state.send_modify(RequestState::begin);

        match self
            .client
            .send(self.route.method, &self.url, payload.as_ref())
            .await
        {
            Ok(data) => {
                let invalidated = self.cache.invalidate(self.route.key);
                debug!(
                    route = self.route.key,
                    invalidated, "mutation succeeded"
                );
                let data = Arc::new(data);
                self.state
                    .send_replace(RequestState::success(Arc::clone(&data), is_get));
                Ok(data)
            }
            Err(e) => {
                let err = Arc::new(e);
                self.state
                    .send_replace(RequestState::failure(Arc::clone(&err), is_get));
                Err(err)
            }
        }
    }
}
